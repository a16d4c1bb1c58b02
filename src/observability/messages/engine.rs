// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pipeline run lifecycle and graph freezing.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A pipeline run is starting.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use texture_pipeline::observability::messages::engine::RunStarted;
///
/// let msg = RunStarted {
///     source: "Source",
///     items: Some(3),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RunStarted<'a> {
    pub source: &'a str,
    /// `None` when the source falls back to its stored data.
    pub items: Option<usize>,
}

impl Display for RunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.items {
            Some(items) => write!(f, "Running pipeline from '{}' with {} items", self.source, items),
            None => write!(f, "Running pipeline from '{}' with its stored data", self.source),
        }
    }
}

impl StructuredLog for RunStarted<'_> {
    fn log(&self) {
        tracing::info!(
            source = self.source,
            items = ?self.items,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline_run",
            span_name = name,
            source = self.source,
            items = ?self.items,
        )
    }
}

/// A pipeline run finished.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RunCompleted<'a> {
    pub source: &'a str,
    pub seeded: usize,
    pub executions: usize,
    pub errors: usize,
    pub warnings: usize,
    pub duration: std::time::Duration,
}

impl Display for RunCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline run from '{}' completed: {} items, {} executions, {} errors, {} warnings in {:?}",
            self.source, self.seeded, self.executions, self.errors, self.warnings, self.duration
        )
    }
}

impl StructuredLog for RunCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            source = self.source,
            seeded = self.seeded,
            executions = self.executions,
            errors = self.errors,
            warnings = self.warnings,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline_run_completed",
            span_name = name,
            source = self.source,
            seeded = self.seeded,
            executions = self.executions,
            duration = ?self.duration,
        )
    }
}

/// Topology was validated and frozen.
///
/// # Log Level
/// `debug!` - Setup detail
pub struct GraphFrozen {
    pub node_count: usize,
    pub connection_count: usize,
}

impl Display for GraphFrozen {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Graph frozen with {} nodes and {} connections",
            self.node_count, self.connection_count
        )
    }
}

impl StructuredLog for GraphFrozen {
    fn log(&self) {
        tracing::debug!(
            node_count = self.node_count,
            connection_count = self.connection_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "graph_frozen",
            span_name = name,
            node_count = self.node_count,
            connection_count = self.connection_count,
        )
    }
}

/// Freezing failed because the pin connections loop.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use texture_pipeline::observability::messages::engine::CyclicConnectionDetected;
///
/// let cycle = vec!["Image Crop", "Image Size", "Image Crop"];
/// let msg = CyclicConnectionDetected { cycle: &cycle };
///
/// assert_eq!(msg.to_string(), "Cyclic connection detected: Image Crop -> Image Size -> Image Crop");
/// ```
pub struct CyclicConnectionDetected<'a> {
    pub cycle: &'a [&'a str],
}

impl Display for CyclicConnectionDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cyclic connection detected: {}", self.cycle.join(" -> "))
    }
}

impl StructuredLog for CyclicConnectionDetected<'_> {
    fn log(&self) {
        tracing::error!(
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "cyclic_connection",
            span_name = name,
            cycle = self.cycle.join(" -> "),
        )
    }
}
