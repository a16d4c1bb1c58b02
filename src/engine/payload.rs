// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Payload values carried by frames.
//!
//! The engine never looks inside a payload; only filters do. [`PayloadKind`]
//! is the coarse type tag pins use for their compatibility check at wiring time.

use image::DynamicImage;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Payloads travel between frames behind an `Arc`, so a pass-through or a
/// broadcast re-wraps the same value instead of copying it.
pub type SharedPayload = Arc<Payload>;

/// Type tag used by pins. `Any` matches every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    Any,
    Path,
    Text,
    Bytes,
    Image,
    Histogram,
    Texture,
}

impl PayloadKind {
    /// Whether a pin expecting `self` may be fed by a pin producing `offered`.
    pub fn accepts(self, offered: PayloadKind) -> bool {
        self == PayloadKind::Any || offered == PayloadKind::Any || self == offered
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayloadKind::Any => "any",
            PayloadKind::Path => "path",
            PayloadKind::Text => "text",
            PayloadKind::Bytes => "bytes",
            PayloadKind::Image => "image",
            PayloadKind::Histogram => "histogram",
            PayloadKind::Texture => "texture",
        };
        f.write_str(name)
    }
}

/// Bucketed intensity counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: Vec<u64>,
}

impl Histogram {
    pub fn new(bins: Vec<u64>) -> Self {
        Self { bins }
    }

    pub fn bins(&self) -> &[u64] {
        &self.bins
    }

    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Index and count of the fullest bucket; ties go to the lowest index.
    pub fn peak(&self) -> Option<(usize, u64)> {
        self.bins
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (index, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((index, count)),
            })
    }
}

/// An angle with millidegree resolution, usable as an ordered map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Angle(u32);

impl Angle {
    pub fn from_degrees(degrees: f64) -> Self {
        Self((degrees.max(0.0) * 1000.0).round() as u32)
    }

    pub fn degrees(self) -> f64 {
        f64::from(self.0) / 1000.0
    }

    pub fn radians(self) -> f64 {
        self.degrees().to_radians()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Texture statistics keyed by property name, then pixel distance, then angle.
///
/// ```
/// use texture_pipeline::engine::{Angle, TextureFeatures};
///
/// let mut features = TextureFeatures::new();
/// features.insert("contrast", 1, Angle::from_degrees(45.0), 0.75);
/// assert_eq!(features.get("contrast", 1, Angle::from_degrees(45.0)), Some(0.75));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureFeatures {
    properties: BTreeMap<String, BTreeMap<u32, BTreeMap<Angle, f64>>>,
}

impl TextureFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, property: impl Into<String>, distance: u32, angle: Angle, value: f64) {
        self.properties
            .entry(property.into())
            .or_default()
            .entry(distance)
            .or_default()
            .insert(angle, value);
    }

    pub fn get(&self, property: &str, distance: u32, angle: Angle) -> Option<f64> {
        self.properties
            .get(property)?
            .get(&distance)?
            .get(&angle)
            .copied()
    }

    pub fn property(&self, property: &str) -> Option<&BTreeMap<u32, BTreeMap<Angle, f64>>> {
        self.properties.get(property)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// The value a frame carries.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Path(PathBuf),
    Text(String),
    Bytes(Vec<u8>),
    Image(DynamicImage),
    Histogram(Histogram),
    Texture(TextureFeatures),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Path(_) => PayloadKind::Path,
            Payload::Text(_) => PayloadKind::Text,
            Payload::Bytes(_) => PayloadKind::Bytes,
            Payload::Image(_) => PayloadKind::Image,
            Payload::Histogram(_) => PayloadKind::Histogram,
            Payload::Texture(_) => PayloadKind::Texture,
        }
    }

    pub fn as_image(&self) -> Option<&DynamicImage> {
        match self {
            Payload::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_histogram(&self) -> Option<&Histogram> {
        match self {
            Payload::Histogram(histogram) => Some(histogram),
            _ => None,
        }
    }

    pub fn as_texture(&self) -> Option<&TextureFeatures> {
        match self {
            Payload::Texture(features) => Some(features),
            _ => None,
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Path(path) => write!(f, "path {}", path.display()),
            Payload::Text(text) => write!(f, "text \"{}\"", text),
            Payload::Bytes(bytes) => write!(f, "{} bytes", bytes.len()),
            Payload::Image(image) => write!(
                f,
                "image {}x{} {:?}",
                image.width(),
                image.height(),
                image.color()
            ),
            Payload::Histogram(histogram) => {
                write!(
                    f,
                    "histogram {} bins, {} samples",
                    histogram.bins().len(),
                    histogram.total()
                )?;
                if let Some((index, count)) = histogram.peak() {
                    write!(f, ", peak bin {} ({})", index, count)?;
                }
                Ok(())
            }
            Payload::Texture(features) => write!(
                f,
                "texture [{}]",
                features.property_names().collect::<Vec<_>>().join(", ")
            ),
        }
    }
}

impl From<PathBuf> for Payload {
    fn from(path: PathBuf) -> Self {
        Payload::Path(path)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<DynamicImage> for Payload {
    fn from(image: DynamicImage) -> Self {
        Payload::Image(image)
    }
}

impl From<Histogram> for Payload {
    fn from(histogram: Histogram) -> Self {
        Payload::Histogram(histogram)
    }
}

impl From<TextureFeatures> for Payload {
    fn from(features: TextureFeatures) -> Self {
        Payload::Texture(features)
    }
}
