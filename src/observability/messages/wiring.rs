// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for graph wiring.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An output pin was bound to an input pin.
///
/// # Log Level
/// `debug!` - Setup detail
pub struct PinsConnected<'a> {
    pub from_node: &'a str,
    pub from_port: usize,
    pub to_node: &'a str,
    pub to_port: usize,
}

impl Display for PinsConnected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Connected {}:{} -> {}:{}",
            self.from_node, self.from_port, self.to_node, self.to_port
        )
    }
}

impl StructuredLog for PinsConnected<'_> {
    fn log(&self) {
        tracing::debug!(
            from_node = self.from_node,
            from_port = self.from_port,
            to_node = self.to_node,
            to_port = self.to_port,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "pins_connected",
            span_name = name,
            from_node = self.from_node,
            to_node = self.to_node,
        )
    }
}

/// An already bound output pin was re-bound, dropping its previous connection.
///
/// # Log Level
/// `warn!` - Topology changed implicitly
///
/// # Example
/// ```
/// use texture_pipeline::observability::messages::wiring::OutputRebound;
///
/// let msg = OutputRebound {
///     from_node: "Image Crop",
///     from_port: 1,
///     previous_node: "Histogram",
///     previous_port: 0,
///     to_node: "GLCM",
///     to_port: 0,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct OutputRebound<'a> {
    pub from_node: &'a str,
    pub from_port: usize,
    pub previous_node: &'a str,
    pub previous_port: usize,
    pub to_node: &'a str,
    pub to_port: usize,
}

impl Display for OutputRebound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Output pin {}:{} re-bound from {}:{} to {}:{}",
            self.from_node,
            self.from_port,
            self.previous_node,
            self.previous_port,
            self.to_node,
            self.to_port
        )
    }
}

impl StructuredLog for OutputRebound<'_> {
    fn log(&self) {
        tracing::warn!(
            from_node = self.from_node,
            from_port = self.from_port,
            previous_node = self.previous_node,
            previous_port = self.previous_port,
            to_node = self.to_node,
            to_port = self.to_port,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "output_rebound",
            span_name = name,
            from_node = self.from_node,
            from_port = self.from_port,
        )
    }
}

/// A connect call was refused.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ConnectionRejected<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for ConnectionRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Connection rejected: {}", self.error)
    }
}

impl StructuredLog for ConnectionRejected<'_> {
    fn log(&self) {
        tracing::error!(error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("connection_rejected", span_name = name, error = %self.error)
    }
}
