// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability for pipeline runs: structured log messages and the
//! observer that writes pipeline events to `tracing`.
//!
//! Messages are struct types implementing `Display` and [`messages::StructuredLog`],
//! so every log line has one definition and consistent fields:
//!
//! * `messages::engine` - run lifecycle and graph freezing
//! * `messages::filter` - filter execution and produced frames
//! * `messages::wiring` - pin connections, re-bindings and rejections
//! * `messages::diagnostic` - run diagnostics at their severity
//!
//! ```rust
//! use texture_pipeline::observability::messages::{wiring::PinsConnected, StructuredLog};
//!
//! let msg = PinsConnected {
//!     from_node: "Image Load",
//!     from_port: 0,
//!     to_node: "Image Crop",
//!     to_port: 0,
//! };
//!
//! msg.log();
//! ```

pub mod messages;
mod tracing_observer;

pub use tracing_observer::TracingObserver;
