// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_CROP_RECT, DEFAULT_HISTOGRAM_BINS, DEFAULT_LOG_FILTER};
use crate::engine::Payload;
use crate::errors::ConfigError;
use crate::filters::{CropRect, InpaintSettings, ResizeSettings, TextureSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for the texture analysis application.
///
/// Every section is optional; anything left out falls back to the built-in
/// defaults in [`consts`](crate::config::consts).
///
/// # Fields
/// * `inputs` - Image files the source runs on when no items are given on the command line
/// * `log_filter` - `tracing` filter directive, overridden by `RUST_LOG`
/// * `inpaint` - Glare removal threshold and radius
/// * `resize` - Target size of the resize stage
/// * `crop` - Crop box, or `null` to pass images through uncropped
/// * `histogram` - Number of histogram buckets
/// * `texture` - Distance and angle grid for texture features
/// * `edges` - Also wire the Sobel edge branch
///
/// # Example
/// ```yaml
/// inputs: [samples/a.png, samples/b.png]
/// log_filter: debug
/// inpaint: { threshold: 250, radius: 2 }
/// resize: { width: 1024, height: 768, keep_aspect_ratio: true, upsize: false }
/// crop: { left: 128, top: 0, right: 768, bottom: 768 }
/// histogram: { bins: 64 }
/// texture: { distances: 3, angle_step: 30.0 }
/// edges: true
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub inputs: Vec<PathBuf>,
    pub log_filter: String,
    pub inpaint: InpaintSettings,
    pub resize: ResizeSettings,
    pub crop: Option<CropRect>,
    pub histogram: HistogramSettings,
    pub texture: TextureSettings,
    pub edges: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let (left, top, right, bottom) = DEFAULT_CROP_RECT;
        Self {
            inputs: Vec::new(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            inpaint: InpaintSettings::default(),
            resize: ResizeSettings::default(),
            crop: Some(CropRect::new(left, top, right, bottom)),
            histogram: HistogramSettings::default(),
            texture: TextureSettings::default(),
            edges: false,
        }
    }
}

impl Settings {
    /// Configured inputs as source items, or `None` when there are none.
    pub fn default_items(&self) -> Option<Vec<Payload>> {
        if self.inputs.is_empty() {
            return None;
        }
        Some(self.inputs.iter().cloned().map(Payload::from).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HistogramSettings {
    pub bins: usize,
}

impl Default for HistogramSettings {
    fn default() -> Self {
        Self {
            bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

/// On-disk settings formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Yaml,
    Toml,
    Json,
}

impl SettingsFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Ok(SettingsFormat::Yaml),
            "toml" => Ok(SettingsFormat::Toml),
            "json" => Ok(SettingsFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(extension)),
        }
    }
}

/// Parse settings text in the given format
pub fn parse_config(content: &str, format: SettingsFormat) -> Result<Settings, ConfigError> {
    let settings = match format {
        SettingsFormat::Yaml => serde_yaml::from_str(content)?,
        SettingsFormat::Toml => toml::from_str(content)?,
        SettingsFormat::Json => serde_json::from_str(content)?,
    };
    Ok(settings)
}

/// Load settings from a YAML, TOML or JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    let format = SettingsFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|err| ConfigError::Read {
        path: path.to_path_buf(),
        err,
    })?;
    parse_config(&content, format)
}

/// Load and validate settings from a file
///
/// All validation problems are reported together in [`ConfigError::Invalid`].
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    let settings = load_config(path)?;
    crate::config::validate_settings(&settings).map_err(ConfigError::Invalid)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        let settings = parse_config("{}", SettingsFormat::Yaml).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.crop, Some(CropRect::new(160, 0, 960, 960)));
        assert_eq!(settings.resize.width, 1280);
        assert_eq!(settings.inpaint.threshold, 252);
    }

    #[test]
    fn parse_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
inputs: [a.png, b.png]
resize:
  width: 640
texture:
  angle_step: 30.0
edges: true
"#;
        let settings = parse_config(yaml, SettingsFormat::Yaml).unwrap();
        assert_eq!(settings.inputs, vec![PathBuf::from("a.png"), PathBuf::from("b.png")]);
        assert_eq!(settings.resize.width, 640);
        assert_eq!(settings.resize.height, 960);
        assert_eq!(settings.texture.distances, 5);
        assert_eq!(settings.texture.angle_step, 30.0);
        assert!(settings.edges);
    }

    #[test]
    fn null_crop_disables_cropping() {
        let settings = parse_config("crop: null", SettingsFormat::Yaml).unwrap();
        assert_eq!(settings.crop, None);
    }

    #[test]
    fn load_toml_and_json_by_extension() {
        let toml_file = write_temp(
            ".toml",
            "log_filter = \"debug\"\n[histogram]\nbins = 64\n",
        );
        let settings = load_config(toml_file.path()).unwrap();
        assert_eq!(settings.log_filter, "debug");
        assert_eq!(settings.histogram.bins, 64);

        let json_file = write_temp(".json", r#"{"crop": {"left": 1, "top": 2, "right": 3, "bottom": 4}}"#);
        let settings = load_config(json_file.path()).unwrap();
        assert_eq!(settings.crop, Some(CropRect::new(1, 2, 3, 4)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp(".ini", "edges = true");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "ini"
        ));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = load_config("no/such/settings.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("no/such/settings.yaml"));
    }

    #[test]
    fn test_load_and_validate_collects_every_problem() {
        let yaml = r#"
crop: { left: 10, top: 0, right: 5, bottom: 10 }
histogram: { bins: 0 }
texture: { distances: 0, angle_step: 45.0 }
"#;
        let file = write_temp(".yaml", yaml);
        let err = load_and_validate_config(file.path()).unwrap_err();

        let ConfigError::Invalid(errors) = &err else {
            panic!("expected validation errors, got {}", err);
        };
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::HistogramBins { bins: 0 }));
        assert!(err.to_string().starts_with("Configuration validation failed:"));
    }

    #[test]
    fn test_load_and_validate_valid_config() {
        let file = write_temp(".yml", "inputs: [img1.png]\nedges: true\n");
        let settings = load_and_validate_config(file.path()).unwrap();
        assert_eq!(settings.default_items().map(|items| items.len()), Some(1));
    }

    #[test]
    fn sample_settings_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/texture-app.yaml");
        let settings = load_and_validate_config(path).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
