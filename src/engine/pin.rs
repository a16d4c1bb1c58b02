// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Node and pin handles.
//!
//! Nodes live in an arena owned by the graph. Every back-reference (pin to
//! owner, output to bound input, input to bound output) is a copyable handle
//! into that arena, so there is no ownership cycle and tearing the graph down
//! is just dropping the arena.

use std::fmt;

use super::payload::PayloadKind;

/// Handle of a node inside its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }

    pub fn input(self, index: usize) -> InputPinId {
        InputPinId { node: self, index }
    }

    pub fn output(self, index: usize) -> OutputPinId {
        OutputPinId { node: self, index }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputPinId {
    pub node: NodeId,
    pub index: usize,
}

impl fmt::Display for InputPinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.in[{}]", self.node, self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputPinId {
    pub node: NodeId,
    pub index: usize,
}

impl fmt::Display for OutputPinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.out[{}]", self.node, self.index)
    }
}

/// Receiving endpoint. Bound to at most one output pin.
#[derive(Debug, Clone)]
pub struct InputPin {
    id: InputPinId,
    kind: PayloadKind,
    upstream: Option<OutputPinId>,
}

impl InputPin {
    pub(crate) fn new(id: InputPinId, kind: PayloadKind) -> Self {
        Self {
            id,
            kind,
            upstream: None,
        }
    }

    pub fn id(&self) -> InputPinId {
        self.id
    }

    pub fn kind(&self) -> PayloadKind {
        self.kind
    }

    pub fn upstream(&self) -> Option<OutputPinId> {
        self.upstream
    }

    pub fn is_connected(&self) -> bool {
        self.upstream.is_some()
    }

    pub(crate) fn bind(&mut self, output: OutputPinId) {
        self.upstream = Some(output);
    }

    pub(crate) fn release(&mut self) {
        self.upstream = None;
    }
}

/// Sending endpoint. Pushes to at most one input pin.
#[derive(Debug, Clone)]
pub struct OutputPin {
    id: OutputPinId,
    kind: PayloadKind,
    downstream: Option<InputPinId>,
}

impl OutputPin {
    pub(crate) fn new(id: OutputPinId, kind: PayloadKind) -> Self {
        Self {
            id,
            kind,
            downstream: None,
        }
    }

    pub fn id(&self) -> OutputPinId {
        self.id
    }

    pub fn kind(&self) -> PayloadKind {
        self.kind
    }

    pub fn downstream(&self) -> Option<InputPinId> {
        self.downstream
    }

    pub fn is_connected(&self) -> bool {
        self.downstream.is_some()
    }

    /// Binds to `input`, returning the input it was bound to before, if any.
    pub(crate) fn bind(&mut self, input: InputPinId) -> Option<InputPinId> {
        self.downstream.replace(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_handles_display_owner_and_index() {
        let node = NodeId(2);
        assert_eq!(node.input(0).to_string(), "#2.in[0]");
        assert_eq!(node.output(1).to_string(), "#2.out[1]");
    }

    #[test]
    fn output_bind_returns_previous_binding() {
        let mut output = OutputPin::new(NodeId(0).output(0), PayloadKind::Any);
        assert_eq!(output.bind(NodeId(1).input(0)), None);
        assert_eq!(output.bind(NodeId(2).input(0)), Some(NodeId(1).input(0)));
        assert_eq!(output.downstream(), Some(NodeId(2).input(0)));
    }
}
