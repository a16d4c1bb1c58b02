// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use image::{DynamicImage, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::config::consts::{DEFAULT_INPAINT_RADIUS, DEFAULT_INPAINT_THRESHOLD};
use crate::engine::{Frame, Payload, PayloadKind};
use crate::errors::FilterError;
use crate::filters::expect_image;
use crate::traits::{Emission, Filter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct InpaintSettings {
    /// A pixel is masked when every channel is at or above this value.
    pub threshold: u8,
    pub radius: u32,
}

impl Default for InpaintSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_INPAINT_THRESHOLD,
            radius: DEFAULT_INPAINT_RADIUS,
        }
    }
}

/// Paints over near-white glare spots using the surrounding pixels.
#[derive(Debug, Default)]
pub struct ImageInpaint {
    settings: InpaintSettings,
}

impl ImageInpaint {
    pub fn new(settings: InpaintSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> InpaintSettings {
        self.settings
    }

    fn is_masked(&self, pixel: &Rgb<u8>) -> bool {
        pixel.0.iter().all(|channel| *channel >= self.settings.threshold)
    }

    /// Every masked pixel becomes the mean of the unmasked pixels in the
    /// square window of `radius` around it. Masked pixels with no unmasked
    /// neighbour keep their value.
    pub fn inpaint(&self, image: &DynamicImage) -> RgbImage {
        let source = image.to_rgb8();
        let (width, height) = source.dimensions();
        let radius = self.settings.radius;
        let mut result = source.clone();

        for (x, y, pixel) in source.enumerate_pixels() {
            if !self.is_masked(pixel) {
                continue;
            }
            let mut sums = [0u64; 3];
            let mut count = 0u64;
            for ny in y.saturating_sub(radius)..=y.saturating_add(radius).min(height - 1) {
                for nx in x.saturating_sub(radius)..=x.saturating_add(radius).min(width - 1) {
                    let neighbour = source.get_pixel(nx, ny);
                    if self.is_masked(neighbour) {
                        continue;
                    }
                    for (sum, channel) in sums.iter_mut().zip(neighbour.0) {
                        *sum += u64::from(channel);
                    }
                    count += 1;
                }
            }
            if count > 0 {
                result.put_pixel(x, y, Rgb(sums.map(|sum| (sum / count) as u8)));
            }
        }
        result
    }
}

impl Filter for ImageInpaint {
    fn name(&self) -> &str {
        "Image Inpaint"
    }

    fn input_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Image]
    }

    fn output_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Image]
    }

    fn execute(&mut self, _input: usize, frame: &Frame) -> Result<Emission, FilterError> {
        let image = expect_image(frame)?;
        let inpainted = self.inpaint(image);
        Ok(Emission::one(Payload::from(DynamicImage::ImageRgb8(inpainted))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NodeId;
    use crate::filters::test_images::solid_rgb;

    #[test]
    fn glare_is_replaced_by_the_neighbourhood_mean() {
        let mut image = solid_rgb(5, 5, [100, 50, 10]).to_rgb8();
        image.put_pixel(2, 2, Rgb([255, 255, 255]));
        image.put_pixel(1, 2, Rgb([120, 70, 30]));

        let filter = ImageInpaint::new(InpaintSettings {
            threshold: 252,
            radius: 1,
        });
        let result = filter.inpaint(&DynamicImage::ImageRgb8(image));

        // 7 neighbours at (100, 50, 10) and one at (120, 70, 30).
        assert_eq!(result.get_pixel(2, 2).0, [102, 52, 12]);
        assert_eq!(result.get_pixel(0, 0).0, [100, 50, 10]);
    }

    #[test]
    fn pixels_with_one_dark_channel_are_kept() {
        let mut image = solid_rgb(3, 3, [0, 0, 0]).to_rgb8();
        image.put_pixel(1, 1, Rgb([255, 255, 200]));

        let result = ImageInpaint::default().inpaint(&DynamicImage::ImageRgb8(image));
        assert_eq!(result.get_pixel(1, 1).0, [255, 255, 200]);
    }

    #[test]
    fn fully_masked_images_are_unchanged() {
        let image = solid_rgb(4, 4, [255, 255, 255]);
        let result = ImageInpaint::default().inpaint(&image);
        assert_eq!(result, image.to_rgb8());
    }

    #[test]
    fn window_larger_than_the_image_is_clamped() {
        let mut image = solid_rgb(3, 3, [255, 255, 255]).to_rgb8();
        image.put_pixel(0, 0, Rgb([10, 20, 30]));

        let filter = ImageInpaint::new(InpaintSettings {
            threshold: 252,
            radius: u32::MAX,
        });
        let result = filter.inpaint(&DynamicImage::ImageRgb8(image));

        assert_eq!(result.get_pixel(2, 2).0, [10, 20, 30]);
        assert_eq!(result.get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn execute_emits_an_rgb_image() {
        let mut filter = ImageInpaint::default();
        let frame = Frame::seed(Payload::from(solid_rgb(2, 2, [1, 2, 3])), NodeId(0));
        let Emission::One(payload) = filter.execute(0, &frame).unwrap() else {
            panic!("expected a broadcast");
        };
        assert_eq!(payload.as_image().unwrap().color(), image::ColorType::Rgb8);
    }
}
