// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while building or freezing a pipeline graph.

use crate::engine::{InputPinId, NodeId, OutputPinId, PayloadKind};
use thiserror::Error;

/// A rejected `connect` call. The graph is left exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WiringError {
    /// The input pin's owner refused the offered output.
    #[error("Output pin {from_node}:{} cannot be connected to {to_node}:{}: {offered} is not accepted where {expected} is expected", .from.index, .to.index)]
    Incompatible {
        from: OutputPinId,
        from_node: String,
        to: InputPinId,
        to_node: String,
        offered: PayloadKind,
        expected: PayloadKind,
    },

    /// The input pin already receives from another output pin.
    #[error("Input pin {to_node}:{} is already bound to {bound_to}; refusing connection from {from}", .to.index)]
    InputOccupied {
        from: OutputPinId,
        to: InputPinId,
        to_node: String,
        bound_to: OutputPinId,
    },

    /// One of the pin handles does not exist in this graph.
    #[error("Unknown pin {0}")]
    UnknownPin(String),
}

/// Structural errors for graph construction and pipeline setup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// Output arity of a source is fixed at one pin.
    #[error("Node '{name}' ({node}) is a source and cannot gain output pins")]
    SourceOutputsFixed { node: NodeId, name: String },

    #[error("Node '{name}' ({node}) is not a source")]
    NotASource { node: NodeId, name: String },

    /// Pin connections form a loop, which a synchronous push can never finish.
    #[error("Cyclic connection detected: {}", .cycle.join(" -> "))]
    Cycle { cycle: Vec<String> },

    #[error(transparent)]
    Wiring(#[from] WiringError),
}
