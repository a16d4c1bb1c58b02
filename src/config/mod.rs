// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
pub mod topology;
mod validation;

pub mod consts;

pub use loader::{
    load_and_validate_config, load_config, parse_config, HistogramSettings, Settings,
    SettingsFormat,
};
pub use topology::{build_default_pipeline, DefaultPipeline, TopologyError};
pub use validation::validate_settings;
