// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a settings file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file '{}': {err}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    #[error("Invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported settings format '{0}' (expected yaml, yml, toml or json)")]
    UnsupportedFormat(String),

    #[error("Configuration validation failed:\n{}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n"))]
    Invalid(Vec<ValidationError>),
}

/// Errors that can occur during settings validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The crop rectangle has no area
    EmptyCropRect {
        left: u32,
        top: u32,
        right: u32,
        bottom: u32,
    },
    /// Resize target has a zero dimension
    ZeroResize { width: u32, height: u32 },
    /// Histogram bucket count outside 1..=256
    HistogramBins { bins: usize },
    /// Texture descriptor needs at least one pixel distance
    TextureDistances { distances: u32 },
    /// Angle step outside [1, 180]
    AngleStep { step: f64 },
    /// Inpaint neighbourhood radius outside 1..=64
    InpaintRadius { radius: u32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyCropRect {
                left,
                top,
                right,
                bottom,
            } => {
                write!(
                    f,
                    "Crop rectangle ({}, {}, {}, {}) is empty: right must exceed left and bottom must exceed top",
                    left, top, right, bottom
                )
            }
            ValidationError::ZeroResize { width, height } => {
                write!(f, "Resize target {}x{} has a zero dimension", width, height)
            }
            ValidationError::HistogramBins { bins } => {
                write!(f, "Histogram bins must be within 1..=256, got {}", bins)
            }
            ValidationError::TextureDistances { distances } => {
                write!(f, "Texture distances must be at least 1, got {}", distances)
            }
            ValidationError::AngleStep { step } => {
                write!(f, "Texture angle step must be within [1, 180] degrees, got {}", step)
            }
            ValidationError::InpaintRadius { radius } => {
                write!(f, "Inpaint radius must be within 1..=64, got {}", radius)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
