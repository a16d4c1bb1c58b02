// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use image::{DynamicImage, GrayImage, Luma};

use crate::engine::{Frame, Payload, PayloadKind};
use crate::errors::FilterError;
use crate::filters::expect_image;
use crate::traits::{Emission, Filter};

const HORIZONTAL: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const VERTICAL: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Sobel gradients of the grayscale image, one per output pin: horizontal
/// gradient on pin 0, vertical gradient on pin 1.
#[derive(Debug, Default)]
pub struct SobelEdge;

impl SobelEdge {
    pub fn new() -> Self {
        Self
    }

    /// Absolute gradient magnitudes, saturated to 255. Edge pixels are
    /// replicated past the border.
    pub fn gradients(image: &DynamicImage) -> (GrayImage, GrayImage) {
        let gray = image.to_luma8();
        let (width, height) = gray.dimensions();
        let at = |x: i64, y: i64| -> i32 {
            let x = x.clamp(0, i64::from(width) - 1) as u32;
            let y = y.clamp(0, i64::from(height) - 1) as u32;
            i32::from(gray.get_pixel(x, y).0[0])
        };

        let convolve = |kernel: &[[i32; 3]; 3]| {
            GrayImage::from_fn(width, height, |x, y| {
                let mut sum = 0;
                for (ky, row) in kernel.iter().enumerate() {
                    for (kx, weight) in row.iter().enumerate() {
                        sum += weight * at(i64::from(x) + kx as i64 - 1, i64::from(y) + ky as i64 - 1);
                    }
                }
                Luma([sum.unsigned_abs().min(255) as u8])
            })
        };

        (convolve(&HORIZONTAL), convolve(&VERTICAL))
    }
}

impl Filter for SobelEdge {
    fn name(&self) -> &str {
        "Sobel Edge"
    }

    fn input_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Image]
    }

    fn output_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Image, PayloadKind::Image]
    }

    fn execute(&mut self, _input: usize, frame: &Frame) -> Result<Emission, FilterError> {
        let (horizontal, vertical) = Self::gradients(expect_image(frame)?);
        Ok(Emission::many([
            Payload::from(DynamicImage::ImageLuma8(horizontal)),
            Payload::from(DynamicImage::ImageLuma8(vertical)),
        ]))
    }
}
