//! Settings validation.
//!
//! Each section is checked on its own and every problem is collected, so a
//! broken settings file is reported in one go rather than one error per run.
//!
//! # Checks
//!
//! 1. **Crop**: the rectangle must have an area (`right > left`, `bottom > top`)
//! 2. **Resize**: target width and height must be non-zero
//! 3. **Histogram**: bucket count within `1..=256`
//! 4. **Texture**: at least one distance, angle step within `[1, 180]` degrees
//! 5. **Inpaint**: radius within `1..=64` pixels
//!
//! # Example
//! ```rust
//! use texture_pipeline::config::{validate_settings, Settings};
//! use texture_pipeline::errors::ValidationError;
//!
//! let mut settings = Settings::default();
//! settings.histogram.bins = 0;
//!
//! let errors = validate_settings(&settings).unwrap_err();
//! assert_eq!(errors, vec![ValidationError::HistogramBins { bins: 0 }]);
//! ```

use crate::config::consts::{MAX_HISTOGRAM_BINS, MAX_INPAINT_RADIUS, MIN_TEXTURE_ANGLE_STEP};
use crate::config::Settings;
use crate::errors::ValidationError;

/// Validates every settings section, returning all problems found.
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(rect) = settings.crop {
        if rect.is_empty() {
            errors.push(ValidationError::EmptyCropRect {
                left: rect.left,
                top: rect.top,
                right: rect.right,
                bottom: rect.bottom,
            });
        }
    }

    let resize = settings.resize;
    if resize.width == 0 || resize.height == 0 {
        errors.push(ValidationError::ZeroResize {
            width: resize.width,
            height: resize.height,
        });
    }

    let bins = settings.histogram.bins;
    if bins == 0 || bins > MAX_HISTOGRAM_BINS {
        errors.push(ValidationError::HistogramBins { bins });
    }

    let texture = settings.texture;
    if texture.distances == 0 {
        errors.push(ValidationError::TextureDistances {
            distances: texture.distances,
        });
    }
    // NaN fails both comparisons.
    if !(texture.angle_step >= MIN_TEXTURE_ANGLE_STEP && texture.angle_step <= 180.0) {
        errors.push(ValidationError::AngleStep {
            step: texture.angle_step,
        });
    }

    let radius = settings.inpaint.radius;
    if radius == 0 || radius > MAX_INPAINT_RADIUS {
        errors.push(ValidationError::InpaintRadius { radius });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
