// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod filter;
mod graph;

pub use config::{ConfigError, ValidationError};
pub use filter::FilterError;
pub use graph::{GraphError, WiringError};
