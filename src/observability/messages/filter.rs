// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for filter execution events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A filter is about to execute on a frame.
///
/// # Log Level
/// `debug!` - Per-frame detail
///
/// # Example
/// ```
/// use texture_pipeline::observability::messages::filter::FilterExecuting;
///
/// let msg = FilterExecuting {
///     filter: "Image Crop",
///     input: 0,
///     from_node: "Image Size",
///     from_port: "0",
///     payload: "image",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct FilterExecuting<'a> {
    pub filter: &'a str,
    pub input: usize,
    pub from_node: &'a str,
    pub from_port: &'a str,
    pub payload: &'a str,
}

impl Display for FilterExecuting<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Filter '{}' executing on input {}: {} from {}:{}",
            self.filter, self.input, self.payload, self.from_node, self.from_port
        )
    }
}

impl StructuredLog for FilterExecuting<'_> {
    fn log(&self) {
        tracing::debug!(
            filter = self.filter,
            input = self.input,
            from_node = self.from_node,
            from_port = self.from_port,
            payload = self.payload,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "filter_execution",
            span_name = name,
            filter = self.filter,
            input = self.input,
        )
    }
}

/// A filter produced a frame.
///
/// # Log Level
/// `debug!` - Per-frame detail
pub struct FrameProduced<'a> {
    pub filter: &'a str,
    pub port: &'a str,
    pub payload: &'a str,
}

impl Display for FrameProduced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Filter '{}' produced {} on port {}",
            self.filter, self.payload, self.port
        )
    }
}

impl StructuredLog for FrameProduced<'_> {
    fn log(&self) {
        tracing::debug!(
            filter = self.filter,
            port = self.port,
            payload = self.payload,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "frame_produced",
            span_name = name,
            filter = self.filter,
            port = self.port,
        )
    }
}

/// An image was decoded from a path or byte buffer.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ImageLoaded<'a> {
    pub origin: &'a str,
    pub color: &'a str,
    pub width: u32,
    pub height: u32,
}

impl Display for ImageLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded image {} mode={} size={}x{}",
            self.origin, self.color, self.width, self.height
        )
    }
}

impl StructuredLog for ImageLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            origin = self.origin,
            color = self.color,
            width = self.width,
            height = self.height,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "image_loaded",
            span_name = name,
            origin = self.origin,
            color = self.color,
        )
    }
}
