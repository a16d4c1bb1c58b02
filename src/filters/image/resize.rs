// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use image::imageops::FilterType;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::config::consts::{
    DEFAULT_RESIZE_HEIGHT, DEFAULT_RESIZE_KEEP_ASPECT_RATIO, DEFAULT_RESIZE_UPSIZE,
    DEFAULT_RESIZE_WIDTH,
};
use crate::engine::{Frame, Payload, PayloadKind};
use crate::errors::FilterError;
use crate::filters::expect_image;
use crate::traits::{Emission, Filter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResizeSettings {
    pub width: u32,
    pub height: u32,
    pub keep_aspect_ratio: bool,
    /// Also scale up images narrower than `width`.
    pub upsize: bool,
}

impl Default for ResizeSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_RESIZE_WIDTH,
            height: DEFAULT_RESIZE_HEIGHT,
            keep_aspect_ratio: DEFAULT_RESIZE_KEEP_ASPECT_RATIO,
            upsize: DEFAULT_RESIZE_UPSIZE,
        }
    }
}

impl ResizeSettings {
    /// Target dimensions for an image of the given size, or `None` when the
    /// image is left as it is.
    pub fn target_for(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        let needs_resize = width > self.width || (self.upsize && width < self.width);
        if !needs_resize || width == 0 {
            return None;
        }
        let target_height = if self.keep_aspect_ratio {
            let ratio = f64::from(self.width) / f64::from(width);
            ((f64::from(height) * ratio) as u32).max(1)
        } else {
            self.height
        };
        Some((self.width, target_height))
    }
}

/// Scales images to a target width.
#[derive(Debug, Default)]
pub struct ResizeImage {
    settings: ResizeSettings,
}

impl ResizeImage {
    pub fn new(settings: ResizeSettings) -> Self {
        Self { settings }
    }

    pub fn set_size(&mut self, width: u32, height: u32, keep_aspect_ratio: bool, upsize: bool) {
        self.settings = ResizeSettings {
            width,
            height,
            keep_aspect_ratio,
            upsize,
        };
    }

    pub fn settings(&self) -> ResizeSettings {
        self.settings
    }

    fn resize(&self, image: &DynamicImage) -> Option<DynamicImage> {
        let (width, height) = self.settings.target_for(image.width(), image.height())?;
        Some(image.resize_exact(width, height, FilterType::Triangle))
    }
}

impl Filter for ResizeImage {
    fn name(&self) -> &str {
        "Image Size"
    }

    fn input_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Image]
    }

    fn output_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Image]
    }

    fn execute(&mut self, _input: usize, frame: &Frame) -> Result<Emission, FilterError> {
        let image = expect_image(frame)?;
        match self.resize(image) {
            Some(resized) => Ok(Emission::one(Payload::from(resized))),
            None => Ok(Emission::One(Arc::clone(frame.shared_payload()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NodeId;
    use crate::filters::test_images::horizontal_ramp;

    fn settings(width: u32, height: u32, keep_aspect_ratio: bool, upsize: bool) -> ResizeSettings {
        ResizeSettings {
            width,
            height,
            keep_aspect_ratio,
            upsize,
        }
    }

    #[test]
    fn wider_images_shrink_keeping_aspect_ratio() {
        assert_eq!(settings(1280, 960, true, false).target_for(2560, 1440), Some((1280, 720)));
    }

    #[test]
    fn height_is_fixed_without_aspect_ratio() {
        assert_eq!(settings(100, 40, false, false).target_for(200, 300), Some((100, 40)));
    }

    #[test]
    fn narrower_images_grow_only_with_upsize() {
        assert_eq!(settings(100, 100, true, false).target_for(50, 50), None);
        assert_eq!(settings(100, 100, true, true).target_for(50, 25), Some((100, 50)));
        assert_eq!(settings(100, 100, true, true).target_for(100, 25), None);
    }

    #[test]
    fn untouched_images_pass_through() {
        let mut filter = ResizeImage::new(settings(100, 100, true, false));
        let frame = Frame::seed(Payload::from(horizontal_ramp(20, 10, 1)), NodeId(0));

        let Emission::One(payload) = filter.execute(0, &frame).unwrap() else {
            panic!("expected a broadcast");
        };
        assert!(Arc::ptr_eq(&payload, frame.shared_payload()));
    }

    #[test]
    fn resizes_through_execute() {
        let mut filter = ResizeImage::default();
        filter.set_size(8, 8, true, false);
        let frame = Frame::seed(Payload::from(horizontal_ramp(16, 4, 1)), NodeId(0));

        let Emission::One(payload) = filter.execute(0, &frame).unwrap() else {
            panic!("expected a broadcast");
        };
        let image = payload.as_image().unwrap();
        assert_eq!((image.width(), image.height()), (8, 2));
    }
}
