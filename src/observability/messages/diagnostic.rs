// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Run diagnostics logged at the level matching their severity.

use crate::engine::{Diagnostic, Severity};
use crate::observability::messages::StructuredLog;
use tracing::Span;

impl StructuredLog for Diagnostic {
    fn log(&self) {
        let node = self.node().index();
        match self.severity() {
            Severity::Error => tracing::error!(node, node_name = self.node_name(), "{}", self),
            Severity::Warning => tracing::warn!(node, node_name = self.node_name(), "{}", self),
            Severity::Info => tracing::info!(node, node_name = self.node_name(), "{}", self),
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "diagnostic",
            span_name = name,
            node = self.node().index(),
            node_name = self.node_name(),
            severity = ?self.severity(),
        )
    }
}
