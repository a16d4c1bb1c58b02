// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // settings + default topology
pub mod engine;     // frames, pins, graph and propagation
pub mod errors;     // error handling
pub mod filters;    // concrete image filters
pub mod observability;
pub mod traits;     // filter and observer capabilities
