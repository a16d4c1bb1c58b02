// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::engine::{Frame, Payload, PayloadKind};
use crate::errors::FilterError;
use crate::filters::expect_image;
use crate::traits::{Emission, Filter};

/// Crop box given by its edges; `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// The part of this rectangle that lies inside a `width` x `height` image.
    pub fn clamp_to(&self, width: u32, height: u32) -> CropRect {
        CropRect {
            left: self.left.min(width),
            top: self.top.min(height),
            right: self.right.min(width),
            bottom: self.bottom.min(height),
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.left, self.top, self.right, self.bottom)
    }
}

/// Cuts a fixed rectangle out of every image.
///
/// Without a rectangle the incoming payload is passed through untouched. A
/// second consumer is usually attached with `GraphBuilder::add_output`; both
/// outputs then get the same cropped image.
#[derive(Debug, Default)]
pub struct CropImage {
    rect: Option<CropRect>,
}

impl CropImage {
    pub fn new(rect: Option<CropRect>) -> Self {
        Self { rect }
    }

    pub fn set_crop_rect(&mut self, rect: Option<CropRect>) {
        self.rect = rect;
    }

    pub fn crop_rect(&self) -> Option<CropRect> {
        self.rect
    }

    fn crop(image: &DynamicImage, rect: CropRect) -> Result<DynamicImage, FilterError> {
        let clamped = rect.clamp_to(image.width(), image.height());
        if clamped.is_empty() {
            return Err(FilterError::Invalid(format!(
                "crop rectangle {} lies outside the {}x{} image",
                rect,
                image.width(),
                image.height()
            )));
        }
        Ok(image.crop_imm(clamped.left, clamped.top, clamped.width(), clamped.height()))
    }
}

impl Filter for CropImage {
    fn name(&self) -> &str {
        "Image Crop"
    }

    fn input_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Image]
    }

    fn output_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Image]
    }

    fn execute(&mut self, _input: usize, frame: &Frame) -> Result<Emission, FilterError> {
        let image = expect_image(frame)?;
        match self.rect {
            None => Ok(Emission::One(Arc::clone(frame.shared_payload()))),
            Some(rect) => Ok(Emission::one(Payload::from(Self::crop(image, rect)?))),
        }
    }
}
