// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::Path;

use image::DynamicImage;

use crate::engine::{Frame, Payload, PayloadKind};
use crate::errors::FilterError;
use crate::observability::messages::filter::ImageLoaded;
use crate::observability::messages::StructuredLog;
use crate::traits::{Emission, Filter};

/// Decodes an image from a file path (`Path` or `Text` payload) or from
/// encoded bytes.
#[derive(Debug, Default)]
pub struct LoadImage;

impl LoadImage {
    pub fn new() -> Self {
        Self
    }

    fn decode(payload: &Payload) -> Result<(DynamicImage, String), FilterError> {
        match payload {
            Payload::Path(path) => Ok((image::open(path)?, path.display().to_string())),
            Payload::Text(path) => Ok((image::open(Path::new(path))?, path.clone())),
            Payload::Bytes(bytes) => Ok((
                image::load_from_memory(bytes)?,
                format!("{} bytes", bytes.len()),
            )),
            other => Err(FilterError::UnexpectedPayload {
                expected: PayloadKind::Path,
                actual: other.kind(),
            }),
        }
    }
}

impl Filter for LoadImage {
    fn name(&self) -> &str {
        "Image Load"
    }

    fn input_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Any]
    }

    fn output_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Image]
    }

    fn execute(&mut self, _input: usize, frame: &Frame) -> Result<Emission, FilterError> {
        let (image, origin) = Self::decode(frame.payload())?;
        let color = format!("{:?}", image.color());
        ImageLoaded {
            origin: &origin,
            color: &color,
            width: image.width(),
            height: image.height(),
        }
        .log();
        Ok(Emission::one(Payload::from(image)))
    }
}
