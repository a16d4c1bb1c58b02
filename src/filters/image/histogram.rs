// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use image::DynamicImage;

use crate::config::consts::DEFAULT_HISTOGRAM_BINS;
use crate::engine::{Frame, Histogram, Payload, PayloadKind};
use crate::errors::FilterError;
use crate::filters::expect_image;
use crate::traits::{Emission, Filter};

/// Luma histogram of every incoming image.
#[derive(Debug)]
pub struct ImageHistogram {
    bins: usize,
}

impl Default for ImageHistogram {
    fn default() -> Self {
        Self {
            bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl ImageHistogram {
    /// `bins` must be in `1..=256`.
    pub fn new(bins: usize) -> Result<Self, FilterError> {
        if !(1..=256).contains(&bins) {
            return Err(FilterError::Invalid(format!(
                "histogram bins must be between 1 and 256, got {}",
                bins
            )));
        }
        Ok(Self { bins })
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn compute(&self, image: &DynamicImage) -> Histogram {
        let mut counts = vec![0u64; self.bins];
        for pixel in image.to_luma8().pixels() {
            let bucket = usize::from(pixel.0[0]) * self.bins / 256;
            counts[bucket] += 1;
        }
        Histogram::new(counts)
    }
}

impl Filter for ImageHistogram {
    fn name(&self) -> &str {
        "Histogram"
    }

    fn input_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Image]
    }

    fn output_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Histogram]
    }

    fn execute(&mut self, _input: usize, frame: &Frame) -> Result<Emission, FilterError> {
        let histogram = self.compute(expect_image(frame)?);
        Ok(Emission::one(Payload::from(histogram)))
    }
}
