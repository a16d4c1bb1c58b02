// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Texture feature extraction.
//!
//! The filter only sweeps the distance/angle grid and assembles the result;
//! the statistics themselves come from a [`TextureDescriptor`] supplied by the
//! embedding application (for example a gray-level co-occurrence matrix
//! implementation).

use std::collections::BTreeMap;

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::config::consts::{
    DEFAULT_TEXTURE_ANGLE_STEP, DEFAULT_TEXTURE_DISTANCES, MIN_TEXTURE_ANGLE_STEP,
};
use crate::engine::{Angle, Frame, Payload, PayloadKind, TextureFeatures};
use crate::errors::FilterError;
use crate::filters::expect_image;
use crate::traits::{Emission, Filter};

/// Computes named texture statistics for one pixel offset.
pub trait TextureDescriptor: Send {
    /// Statistics such as contrast or energy for pixel pairs `distance`
    /// pixels apart in direction `angle`.
    fn describe(
        &self,
        image: &GrayImage,
        distance: u32,
        angle: Angle,
    ) -> anyhow::Result<BTreeMap<String, f64>>;
}

impl<F> TextureDescriptor for F
where
    F: Fn(&GrayImage, u32, Angle) -> anyhow::Result<BTreeMap<String, f64>> + Send,
{
    fn describe(
        &self,
        image: &GrayImage,
        distance: u32,
        angle: Angle,
    ) -> anyhow::Result<BTreeMap<String, f64>> {
        self(image, distance, angle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TextureSettings {
    /// Distances `1..=distances` are sampled.
    pub distances: u32,
    /// Angles from 0 to 180 degrees, inclusive, every `angle_step` degrees.
    pub angle_step: f64,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            distances: DEFAULT_TEXTURE_DISTANCES,
            angle_step: DEFAULT_TEXTURE_ANGLE_STEP,
        }
    }
}

impl TextureSettings {
    pub fn distances(&self) -> impl Iterator<Item = u32> {
        1..=self.distances
    }

    /// `floor(180 / angle_step) + 1` angles spread evenly over `[0, 180]`.
    ///
    /// Steps below one degree (and NaN) are rejected.
    pub fn angles(&self) -> Result<Vec<Angle>, FilterError> {
        if !(self.angle_step >= MIN_TEXTURE_ANGLE_STEP) {
            return Err(FilterError::Invalid(format!(
                "texture angle step {} is below {} degree",
                self.angle_step, MIN_TEXTURE_ANGLE_STEP
            )));
        }
        let count = (180.0 / self.angle_step) as usize + 1;
        if count == 1 {
            return Ok(vec![Angle::from_degrees(0.0)]);
        }
        Ok((0..count)
            .map(|index| Angle::from_degrees(180.0 * index as f64 / (count - 1) as f64))
            .collect())
    }
}

/// Emits one [`TextureFeatures`] payload per image.
pub struct TextureFeatureFilter {
    descriptor: Box<dyn TextureDescriptor>,
    settings: TextureSettings,
}

impl TextureFeatureFilter {
    pub fn new(descriptor: Box<dyn TextureDescriptor>, settings: TextureSettings) -> Self {
        Self {
            descriptor,
            settings,
        }
    }

    pub fn settings(&self) -> TextureSettings {
        self.settings
    }

    pub fn extract(&self, image: &GrayImage) -> Result<TextureFeatures, FilterError> {
        let angles = self.settings.angles()?;
        let mut features = TextureFeatures::new();
        for distance in self.settings.distances() {
            for &angle in &angles {
                for (property, value) in self.descriptor.describe(image, distance, angle)? {
                    features.insert(property, distance, angle, value);
                }
            }
        }
        Ok(features)
    }
}

impl Filter for TextureFeatureFilter {
    fn name(&self) -> &str {
        "GLCM"
    }

    fn input_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Image]
    }

    fn output_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Texture]
    }

    fn execute(&mut self, _input: usize, frame: &Frame) -> Result<Emission, FilterError> {
        let gray = expect_image(frame)?.to_luma8();
        let features = self.extract(&gray)?;
        Ok(Emission::one(Payload::from(features)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::engine::NodeId;
    use crate::filters::test_images::horizontal_ramp;

    /// Reports the image width as "contrast" and the distance as "energy".
    pub fn stub_descriptor() -> Box<dyn TextureDescriptor> {
        Box::new(
            |image: &GrayImage, distance: u32, _angle: Angle| -> anyhow::Result<BTreeMap<String, f64>> {
                Ok(BTreeMap::from([
                    ("contrast".to_string(), f64::from(image.width())),
                    ("energy".to_string(), f64::from(distance)),
                ]))
            },
        )
    }

    #[test]
    fn angles_cover_zero_to_one_eighty() {
        let degrees = |step: f64| -> Vec<f64> {
            TextureSettings {
                distances: 1,
                angle_step: step,
            }
            .angles()
            .unwrap()
            .into_iter()
            .map(Angle::degrees)
            .collect()
        };
        assert_eq!(degrees(45.0), vec![0.0, 45.0, 90.0, 135.0, 180.0]);
        assert_eq!(degrees(30.0).len(), 7);
        assert_eq!(degrees(22.5).len(), 9);
        assert_eq!(degrees(15.0).len(), 13);
        assert_eq!(degrees(1.0).len(), 181);
    }

    #[test]
    fn tiny_angle_steps_fail_the_filter() {
        let settings = TextureSettings {
            distances: 1,
            angle_step: 1e-300,
        };
        assert!(matches!(settings.angles(), Err(FilterError::Invalid(_))));

        let mut filter = TextureFeatureFilter::new(stub_descriptor(), settings);
        let frame = Frame::seed(Payload::from(horizontal_ramp(2, 2, 1)), NodeId(0));
        assert!(matches!(filter.execute(0, &frame), Err(FilterError::Invalid(_))));
    }

    #[test]
    fn extract_fills_the_whole_grid() {
        let filter = TextureFeatureFilter::new(stub_descriptor(), TextureSettings::default());
        let features = filter.extract(&horizontal_ramp(7, 2, 1).to_luma8()).unwrap();

        assert_eq!(features.property_names().collect::<Vec<_>>(), vec!["contrast", "energy"]);
        let contrast = features.property("contrast").unwrap();
        assert_eq!(contrast.len(), 5);
        assert!(contrast.values().all(|angles| angles.len() == 5));
        assert_eq!(features.get("energy", 4, Angle::from_degrees(90.0)), Some(4.0));
        assert_eq!(features.get("contrast", 1, Angle::from_degrees(0.0)), Some(7.0));
    }

    #[test]
    fn descriptor_failures_become_filter_errors() {
        let failing: Box<dyn TextureDescriptor> = Box::new(
            |_: &GrayImage, _: u32, _: Angle| -> anyhow::Result<BTreeMap<String, f64>> {
                Err(anyhow::anyhow!("matrix too small"))
            },
        );
        let mut filter = TextureFeatureFilter::new(failing, TextureSettings::default());
        let frame = Frame::seed(Payload::from(horizontal_ramp(2, 2, 1)), NodeId(0));

        let err = filter.execute(0, &frame).unwrap_err();
        assert!(matches!(err, FilterError::External(_)));
        assert_eq!(err.to_string(), "matrix too small");
    }
}
