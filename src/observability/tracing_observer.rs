// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::{Frame, InputPinId};
use crate::observability::messages::filter::{FilterExecuting, FrameProduced};
use crate::observability::messages::StructuredLog;
use crate::traits::{NodeRef, Observer};

/// Writes every execute and produce event to `tracing` at debug level.
///
/// Diagnostics are already logged by the engine, so this observer skips them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for TracingObserver {
    fn on_executing(&self, node: NodeRef<'_>, input: InputPinId, frame: &Frame) {
        let from_node = frame.producing_node().to_string();
        let from_port = frame.producing_port().to_string();
        let payload = frame.payload().kind().to_string();
        FilterExecuting {
            filter: node.name,
            input: input.index,
            from_node: &from_node,
            from_port: &from_port,
            payload: &payload,
        }
        .log();
    }

    fn on_produced(&self, node: NodeRef<'_>, frame: &Frame) {
        let port = frame.producing_port().to_string();
        let payload = frame.payload().to_string();
        FrameProduced {
            filter: node.name,
            port: &port,
            payload: &payload,
        }
        .log();
    }
}
