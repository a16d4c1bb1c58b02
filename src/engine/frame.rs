// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use super::payload::{Payload, SharedPayload};
use super::pin::NodeId;

/// The port a frame left its producer on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    /// Seed data pushed by a source; there is no producing port.
    Seed,
    /// Delivered on the output pin with this index.
    Output(usize),
    /// The single after-produce notification of a broadcast, before the
    /// frame is stamped per output pin.
    Broadcast,
}

impl Port {
    pub fn index(self) -> Option<usize> {
        match self {
            Port::Output(index) => Some(index),
            Port::Seed | Port::Broadcast => None,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Seed => f.write_str("seed"),
            Port::Output(index) => write!(f, "{}", index),
            Port::Broadcast => f.write_str("*"),
        }
    }
}

/// Which node, and which of its ports, produced a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Provenance {
    pub node: NodeId,
    pub port: Port,
}

/// An immutable payload envelope with provenance.
///
/// Cloning a frame shares the payload. Frames are never mutated; the engine
/// builds a new one for every output of every node.
#[derive(Debug, Clone)]
pub struct Frame {
    payload: SharedPayload,
    provenance: Provenance,
}

impl Frame {
    pub fn new(payload: impl Into<SharedPayload>, node: NodeId, port: Port) -> Self {
        Self {
            payload: payload.into(),
            provenance: Provenance { node, port },
        }
    }

    /// A frame originating at a source, which has no producing port.
    pub fn seed(payload: impl Into<SharedPayload>, source: NodeId) -> Self {
        Self::new(payload, source, Port::Seed)
    }

    /// A new frame with the same payload and producer but another port.
    pub(crate) fn on_port(&self, port: Port) -> Self {
        Self {
            payload: Arc::clone(&self.payload),
            provenance: Provenance {
                node: self.provenance.node,
                port,
            },
        }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn shared_payload(&self) -> &SharedPayload {
        &self.payload
    }

    pub fn producing_node(&self) -> NodeId {
        self.provenance.node
    }

    pub fn producing_port(&self) -> Port {
        self.provenance.port
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// True when both frames wrap the very same payload allocation.
    pub fn shares_payload_with(&self, other: &Frame) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }
}
