// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Locally recovered conditions raised while a pipeline runs.
//!
//! None of these unwind the pipeline. Each one is logged, handed to the
//! observers and collected into the [`RunReport`] returned to the caller.

use serde::Serialize;
use thiserror::Error;

use super::pin::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A frame was pushed to an output pin with no bound input and dropped.
    #[error("Output pin {node_name}:{port} is not connected, frame dropped")]
    UnconnectedOutput {
        node: NodeId,
        node_name: String,
        port: usize,
    },

    /// A positional emission did not match the node's output pin count.
    #[error("Filter {node_name} produced {frames} frames for {pins} output pins")]
    ArityMismatch {
        node: NodeId,
        node_name: String,
        frames: usize,
        pins: usize,
    },

    /// A source ran with neither argument data nor stored default data.
    #[error("Source {node_name} has no data")]
    NoData { node: NodeId, node_name: String },

    /// A broadcast from a node that owns no output pins.
    #[error("No output pins for {node_name}")]
    Sink { node: NodeId, node_name: String },

    /// A filter's external transform failed; its branch stops here.
    #[error("Filter {node_name} failed: {message}")]
    FilterFailed {
        node: NodeId,
        node_name: String,
        message: String,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::UnconnectedOutput { .. }
            | Diagnostic::NoData { .. }
            | Diagnostic::FilterFailed { .. } => Severity::Error,
            Diagnostic::ArityMismatch { .. } => Severity::Warning,
            Diagnostic::Sink { .. } => Severity::Info,
        }
    }

    pub fn node(&self) -> NodeId {
        match self {
            Diagnostic::UnconnectedOutput { node, .. }
            | Diagnostic::ArityMismatch { node, .. }
            | Diagnostic::NoData { node, .. }
            | Diagnostic::Sink { node, .. }
            | Diagnostic::FilterFailed { node, .. } => *node,
        }
    }

    pub fn node_name(&self) -> &str {
        match self {
            Diagnostic::UnconnectedOutput { node_name, .. }
            | Diagnostic::ArityMismatch { node_name, .. }
            | Diagnostic::NoData { node_name, .. }
            | Diagnostic::Sink { node_name, .. }
            | Diagnostic::FilterFailed { node_name, .. } => node_name,
        }
    }
}

/// Outcome of one [`Pipeline::exec`](crate::engine::Pipeline::exec) call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    seeded: usize,
    executions: usize,
    diagnostics: Vec<Diagnostic>,
}

impl RunReport {
    /// Number of seed frames the source pushed.
    pub fn seeded(&self) -> usize {
        self.seeded
    }

    /// Number of filter `execute` calls.
    pub fn executions(&self) -> usize {
        self.executions
    }

    /// Diagnostics in the order they were raised.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity() == severity)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// True when the source had nothing to run.
    pub fn had_no_data(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::NoData { .. }))
    }

    pub(crate) fn count_seed(&mut self) {
        self.seeded += 1;
    }

    pub(crate) fn count_execution(&mut self) {
        self.executions += 1;
    }

    pub(crate) fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
