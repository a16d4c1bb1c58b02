// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::engine::{Frame, Payload, PayloadKind};
use crate::errors::FilterError;
use crate::filters::expect_image;
use crate::traits::{Emission, Filter};

/// Target pixel layout, named after the usual imaging mode strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ColorMode {
    #[serde(rename = "L")]
    Luma,
    #[serde(rename = "LA")]
    LumaAlpha,
    #[serde(rename = "RGB")]
    Rgb,
    #[serde(rename = "RGBA")]
    Rgba,
}

impl ColorMode {
    pub fn apply(self, image: &DynamicImage) -> DynamicImage {
        match self {
            ColorMode::Luma => DynamicImage::ImageLuma8(image.to_luma8()),
            ColorMode::LumaAlpha => DynamicImage::ImageLumaA8(image.to_luma_alpha8()),
            ColorMode::Rgb => DynamicImage::ImageRgb8(image.to_rgb8()),
            ColorMode::Rgba => DynamicImage::ImageRgba8(image.to_rgba8()),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self {
            ColorMode::Luma => "L",
            ColorMode::LumaAlpha => "LA",
            ColorMode::Rgb => "RGB",
            ColorMode::Rgba => "RGBA",
        };
        f.write_str(mode)
    }
}

/// Converts images to a fixed color mode.
#[derive(Debug)]
pub struct ConvertImage {
    mode: ColorMode,
    name: String,
}

impl ConvertImage {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            name: format!("Image Convert ({})", mode),
        }
    }

    pub fn grayscale() -> Self {
        Self::new(ColorMode::Luma)
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }
}

impl Filter for ConvertImage {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Image]
    }

    fn output_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Image]
    }

    fn execute(&mut self, _input: usize, frame: &Frame) -> Result<Emission, FilterError> {
        let image = expect_image(frame)?;
        Ok(Emission::one(Payload::from(self.mode.apply(image))))
    }
}
