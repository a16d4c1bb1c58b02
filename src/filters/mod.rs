// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Concrete filters for the texture analysis pipeline.
//!
//! Each filter takes one input frame, runs an image or data transform on its
//! payload and hands the result back to the engine as an [`Emission`]. Most
//! filters broadcast one result; [`SobelEdge`] emits one image per output pin.
//!
//! [`Emission`]: crate::traits::Emission

pub mod collector;
pub mod image;
pub mod texture;

#[cfg(test)]
mod integration_tests;

pub use self::collector::{CollectedFrames, Collector};
pub use self::image::{
    ColorMode, ConvertImage, CropImage, CropRect, ImageHistogram, ImageInpaint, InpaintSettings,
    LoadImage, ResizeImage, ResizeSettings, SobelEdge,
};
pub use self::texture::{TextureDescriptor, TextureFeatureFilter, TextureSettings};

use ::image::DynamicImage;

use crate::engine::{Frame, PayloadKind};
use crate::errors::FilterError;

/// Borrows the decoded image carried by `frame`.
pub(crate) fn expect_image(frame: &Frame) -> Result<&DynamicImage, FilterError> {
    frame
        .payload()
        .as_image()
        .ok_or(FilterError::UnexpectedPayload {
            expected: PayloadKind::Image,
            actual: frame.payload().kind(),
        })
}

#[cfg(test)]
pub(crate) mod test_images {
    use ::image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

    /// Gray image whose pixel value is `x * step` on every row.
    pub fn horizontal_ramp(width: u32, height: u32, step: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_fn(width, height, |x, _| {
            Luma([(x as u8).saturating_mul(step)])
        }))
    }

    pub fn solid_rgb(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }
}
