// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Graph construction.
//!
//! All topology changes go through [`GraphBuilder`]: adding nodes, appending
//! output pins and connecting pins. [`GraphBuilder::freeze`] checks the result
//! and hands out an immutable-topology [`Graph`].
//!
//! # Example
//! ```
//! use texture_pipeline::engine::{GraphBuilder, Pipeline};
//! use texture_pipeline::filters::Collector;
//!
//! let mut builder = GraphBuilder::new();
//! let source = builder.add_source("Source");
//! let collector = Collector::new("Sink");
//! let frames = collector.frames();
//! let sink = builder.add_filter(collector);
//! builder.connect(source.output(0), sink.input(0)).unwrap();
//!
//! let mut pipeline = Pipeline::new(builder.freeze().unwrap(), source).unwrap();
//! let report = pipeline.run(["img1.png", "img2.png"]);
//!
//! assert_eq!(report.seeded(), 2);
//! assert_eq!(frames.len(), 2);
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::graph::{Graph, NodeBody, NodeSlot};
use super::payload::{Payload, PayloadKind};
use super::pin::{InputPin, InputPinId, NodeId, OutputPin, OutputPinId};
use super::source::SourceNode;
use crate::errors::{GraphError, WiringError};
use crate::observability::messages::engine::{CyclicConnectionDetected, GraphFrozen};
use crate::observability::messages::wiring::{ConnectionRejected, OutputRebound, PinsConnected};
use crate::observability::messages::StructuredLog;
use crate::traits::Filter;

/// Result of a successful `connect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub from: OutputPinId,
    pub to: InputPinId,
    /// Input the output pin was bound to before this call, if it was re-bound.
    pub replaced: Option<InputPinId>,
}

/// Mutable topology under construction.
#[derive(Default)]
pub struct GraphBuilder {
    nodes: Vec<NodeSlot>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source with one output pin and no stored data.
    pub fn add_source(&mut self, name: impl Into<String>) -> NodeId {
        self.push_source(name.into(), SourceNode::new())
    }

    /// Adds a source whose stored items are used when a run gives no data.
    pub fn add_source_with_defaults<I, P>(&mut self, name: impl Into<String>, items: I) -> NodeId
    where
        I: IntoIterator<Item = P>,
        P: Into<Payload>,
    {
        self.push_source(name.into(), SourceNode::with_defaults(items))
    }

    fn push_source(&mut self, name: String, source: SourceNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeSlot {
            name: Arc::from(name),
            body: NodeBody::Source(source),
            inputs: Vec::new(),
            outputs: vec![OutputPin::new(id.output(0), PayloadKind::Any)],
        });
        id
    }

    /// Adds a filter; its pins are created from its declared input and output kinds.
    pub fn add_filter<F: Filter + 'static>(&mut self, filter: F) -> NodeId {
        let id = NodeId(self.nodes.len());
        let inputs = filter
            .input_kinds()
            .into_iter()
            .enumerate()
            .map(|(index, kind)| InputPin::new(id.input(index), kind))
            .collect();
        let outputs = filter
            .output_kinds()
            .into_iter()
            .enumerate()
            .map(|(index, kind)| OutputPin::new(id.output(index), kind))
            .collect();
        self.nodes.push(NodeSlot {
            name: Arc::from(filter.name()),
            body: NodeBody::Filter(Box::new(filter)),
            inputs,
            outputs,
        });
        id
    }

    /// Appends an output pin at the next index. The new pin carries the same
    /// kind as the node's last output, or `Any` when it had none.
    pub fn add_output(&mut self, node: NodeId) -> Result<OutputPinId, GraphError> {
        let slot = self.nodes.get_mut(node.0).ok_or(GraphError::UnknownNode(node))?;
        if slot.is_source() {
            return Err(GraphError::SourceOutputsFixed {
                node,
                name: slot.name.to_string(),
            });
        }
        let kind = slot
            .outputs
            .last()
            .map(OutputPin::kind)
            .unwrap_or(PayloadKind::Any);
        let id = node.output(slot.outputs.len());
        slot.outputs.push(OutputPin::new(id, kind));
        Ok(id)
    }

    /// Replaces the stored items of a source.
    pub fn set_source_defaults<I, P>(&mut self, source: NodeId, items: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Payload>,
    {
        let slot = self.nodes.get_mut(source.0).ok_or(GraphError::UnknownNode(source))?;
        match &mut slot.body {
            NodeBody::Source(node) => {
                node.set_defaults(items);
                Ok(())
            }
            NodeBody::Filter(_) => Err(GraphError::NotASource {
                node: source,
                name: slot.name.to_string(),
            }),
        }
    }

    pub fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).map(|slot| &*slot.name)
    }

    pub fn inputs(&self, node: NodeId) -> Option<&[InputPin]> {
        self.nodes.get(node.0).map(|slot| slot.inputs.as_slice())
    }

    pub fn outputs(&self, node: NodeId) -> Option<&[OutputPin]> {
        self.nodes.get(node.0).map(|slot| slot.outputs.as_slice())
    }

    /// Binds `from` to `to`.
    ///
    /// The input's owner is asked whether it accepts the output first. An input
    /// that already receives from a different output refuses the connection.
    /// When `from` was bound elsewhere, the old input is released and the
    /// re-binding is logged and returned in [`Connection::replaced`].
    /// On any error the graph is unchanged.
    pub fn connect(&mut self, from: OutputPinId, to: InputPinId) -> Result<Connection, WiringError> {
        let result = self.try_connect(from, to);
        if let Err(err) = &result {
            ConnectionRejected { error: err }.log();
        }
        result
    }

    fn try_connect(&mut self, from: OutputPinId, to: InputPinId) -> Result<Connection, WiringError> {
        let output = self
            .output_pin(from)
            .ok_or_else(|| WiringError::UnknownPin(from.to_string()))?
            .clone();
        let input = self
            .input_pin(to)
            .ok_or_else(|| WiringError::UnknownPin(to.to_string()))?
            .clone();

        match input.upstream() {
            Some(bound) if bound == from => {
                return Ok(Connection {
                    from,
                    to,
                    replaced: None,
                })
            }
            Some(bound) => {
                return Err(WiringError::InputOccupied {
                    from,
                    to,
                    to_node: self.slot_name(to.node),
                    bound_to: bound,
                })
            }
            None => {}
        }

        let accepted = match &self.nodes[to.node.0].body {
            NodeBody::Filter(filter) => filter.can_accept(&input, &output),
            NodeBody::Source(_) => false,
        };
        if !accepted {
            return Err(WiringError::Incompatible {
                from,
                from_node: self.slot_name(from.node),
                to,
                to_node: self.slot_name(to.node),
                offered: output.kind(),
                expected: input.kind(),
            });
        }

        let replaced = self.nodes[from.node.0].outputs[from.index].bind(to);
        if let Some(previous) = replaced {
            self.nodes[previous.node.0].inputs[previous.index].release();
            OutputRebound {
                from_node: &self.nodes[from.node.0].name,
                from_port: from.index,
                previous_node: &self.nodes[previous.node.0].name,
                previous_port: previous.index,
                to_node: &self.nodes[to.node.0].name,
                to_port: to.index,
            }
            .log();
        }
        self.nodes[to.node.0].inputs[to.index].bind(from);

        PinsConnected {
            from_node: &self.nodes[from.node.0].name,
            from_port: from.index,
            to_node: &self.nodes[to.node.0].name,
            to_port: to.index,
        }
        .log();

        Ok(Connection { from, to, replaced })
    }

    fn output_pin(&self, pin: OutputPinId) -> Option<&OutputPin> {
        self.nodes.get(pin.node.0)?.outputs.get(pin.index)
    }

    fn input_pin(&self, pin: InputPinId) -> Option<&InputPin> {
        self.nodes.get(pin.node.0)?.inputs.get(pin.index)
    }

    fn slot_name(&self, node: NodeId) -> String {
        self.nodes
            .get(node.0)
            .map(|slot| slot.name.to_string())
            .unwrap_or_default()
    }

    /// Validates the topology and freezes it.
    ///
    /// Fails when the pin connections contain a cycle, since a synchronous
    /// push around a loop would never return.
    pub fn freeze(self) -> Result<Graph, GraphError> {
        if let Some(cycle) = self.find_cycle() {
            let names: Vec<String> = cycle.iter().map(|node| self.slot_name(*node)).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            CyclicConnectionDetected { cycle: &refs }.log();
            return Err(GraphError::Cycle { cycle: names });
        }

        let graph = Graph::from_slots(self.nodes);
        GraphFrozen {
            node_count: graph.node_count(),
            connection_count: graph.connection_count(),
        }
        .log();
        Ok(graph)
    }

    fn find_cycle(&self) -> Option<Vec<NodeId>> {
        let adjacency: HashMap<NodeId, Vec<NodeId>> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                let next = slot
                    .outputs
                    .iter()
                    .filter_map(|pin| pin.downstream().map(|input| input.node))
                    .collect();
                (NodeId(index), next)
            })
            .collect();

        let mut visited = HashSet::new();
        let mut on_stack = HashSet::new();
        let mut path = Vec::new();

        for index in 0..self.nodes.len() {
            let node = NodeId(index);
            if visited.contains(&node) {
                continue;
            }
            if let Some(cycle) = dfs_cycle(node, &adjacency, &mut visited, &mut on_stack, &mut path) {
                return Some(cycle);
            }
        }
        None
    }
}

fn dfs_cycle(
    node: NodeId,
    adjacency: &HashMap<NodeId, Vec<NodeId>>,
    visited: &mut HashSet<NodeId>,
    on_stack: &mut HashSet<NodeId>,
    path: &mut Vec<NodeId>,
) -> Option<Vec<NodeId>> {
    visited.insert(node);
    on_stack.insert(node);
    path.push(node);

    for &next in adjacency.get(&node).into_iter().flatten() {
        if !visited.contains(&next) {
            if let Some(cycle) = dfs_cycle(next, adjacency, visited, on_stack, path) {
                return Some(cycle);
            }
        } else if on_stack.contains(&next) {
            let start = path.iter().position(|n| *n == next).unwrap_or(0);
            let mut cycle = path[start..].to_vec();
            cycle.push(next);
            return Some(cycle);
        }
    }

    on_stack.remove(&node);
    path.pop();
    None
}
