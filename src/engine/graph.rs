// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Frozen graph and synchronous push propagation.
//!
//! Propagation is a depth-first descent on the call stack: a push on an output
//! pin calls straight into the bound input's owner, which executes and pushes
//! its own results before the original push returns. There is no queue and no
//! scheduler, so for a single seed item every downstream effect happens in
//! output pin declaration order, and item `i` finishes before item `i + 1`.

use std::fmt;
use std::sync::Arc;

use super::frame::{Frame, Port};
use super::payload::{Payload, SharedPayload};
use super::pin::{InputPin, InputPinId, NodeId, OutputPin, OutputPinId};
use super::report::Diagnostic;
use super::run::Run;
use super::source::SourceNode;
use crate::observability::messages::filter::FilterExecuting;
use crate::observability::messages::StructuredLog;
use crate::traits::{Emission, Filter, NodeRef};

pub(crate) enum NodeBody {
    Source(SourceNode),
    Filter(Box<dyn Filter>),
}

pub(crate) struct NodeSlot {
    pub(crate) name: Arc<str>,
    pub(crate) body: NodeBody,
    pub(crate) inputs: Vec<InputPin>,
    pub(crate) outputs: Vec<OutputPin>,
}

impl NodeSlot {
    pub(crate) fn is_source(&self) -> bool {
        matches!(self.body, NodeBody::Source(_))
    }
}

/// A graph whose topology can no longer change.
///
/// Built with [`GraphBuilder::freeze`](crate::engine::GraphBuilder::freeze).
/// There is no wiring API here, so nothing can rewire the graph while a
/// pipeline is running through it.
pub struct Graph {
    nodes: Vec<NodeSlot>,
}

impl Graph {
    pub(crate) fn from_slots(nodes: Vec<NodeSlot>) -> Self {
        Self { nodes }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }

    pub fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).map(|slot| &*slot.name)
    }

    /// First node with the given name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|slot| &*slot.name == name)
            .map(NodeId)
    }

    pub fn inputs(&self, node: NodeId) -> Option<&[InputPin]> {
        self.nodes.get(node.0).map(|slot| slot.inputs.as_slice())
    }

    pub fn outputs(&self, node: NodeId) -> Option<&[OutputPin]> {
        self.nodes.get(node.0).map(|slot| slot.outputs.as_slice())
    }

    pub fn is_source(&self, node: NodeId) -> bool {
        self.nodes.get(node.0).is_some_and(NodeSlot::is_source)
    }

    pub fn connection_count(&self) -> usize {
        self.nodes
            .iter()
            .flat_map(|slot| slot.outputs.iter())
            .filter(|pin| pin.is_connected())
            .count()
    }

    /// Seeds the graph from `source`: one frame per item, each pushed through
    /// the whole graph before the next one starts.
    pub(crate) fn exec_source(&mut self, source: NodeId, data: Option<Vec<Payload>>, run: &mut Run<'_>) {
        let Some(slot) = self.nodes.get(source.0) else {
            return;
        };
        let NodeBody::Source(node) = &slot.body else {
            return;
        };

        let Some(items) = node.items_for(data) else {
            run.report(Diagnostic::NoData {
                node: source,
                node_name: slot.name.to_string(),
            });
            return;
        };

        for item in items {
            run.seeded();
            self.push(source.output(0), Frame::seed(item, source), run);
        }
    }

    /// Forwards `frame` to the input bound to `pin`, or drops it and reports
    /// the unconnected pin.
    fn push(&mut self, pin: OutputPinId, frame: Frame, run: &mut Run<'_>) {
        let downstream = self.nodes[pin.node.0].outputs[pin.index].downstream();
        match downstream {
            Some(input) => self.receive(input, frame, run),
            None => run.report(Diagnostic::UnconnectedOutput {
                node: pin.node,
                node_name: self.nodes[pin.node.0].name.to_string(),
                port: pin.index,
            }),
        }
    }

    /// Runs the owner of `pin` on `frame` and dispatches whatever it emits.
    fn receive(&mut self, pin: InputPinId, frame: Frame, run: &mut Run<'_>) {
        let from_node = self
            .nodes
            .get(frame.producing_node().0)
            .map(|slot| Arc::clone(&slot.name))
            .unwrap_or_else(|| Arc::from(""));
        let slot = &mut self.nodes[pin.node.0];
        let NodeBody::Filter(filter) = &mut slot.body else {
            return;
        };
        let name = Arc::clone(&slot.name);

        let from_port = frame.producing_port().to_string();
        let payload = frame.payload().kind().to_string();
        let span = FilterExecuting {
            filter: &name,
            input: pin.index,
            from_node: &from_node,
            from_port: &from_port,
            payload: &payload,
        }
        .span("filter_execute");
        let _enter = span.enter();

        run.executing(NodeRef { id: pin.node, name: &name }, pin, &frame);
        let outcome = filter.execute(pin.index, &frame);
        drop(frame);

        match outcome {
            Ok(Emission::Nothing) => {}
            Ok(Emission::One(payload)) => self.push_one(pin.node, &name, payload, run),
            Ok(Emission::Many(payloads)) => self.push_many(pin.node, &name, payloads, run),
            Err(err) => run.report(Diagnostic::FilterFailed {
                node: pin.node,
                node_name: name.to_string(),
                message: err.to_string(),
            }),
        }
    }

    /// Broadcast: one after-produce notification, then the payload goes to
    /// every output pin, each frame stamped with its own port.
    fn push_one(&mut self, node: NodeId, name: &str, payload: SharedPayload, run: &mut Run<'_>) {
        let produced = Frame::new(payload, node, Port::Broadcast);
        run.produced(NodeRef { id: node, name }, &produced);

        let pins = self.nodes[node.0].outputs.len();
        if pins == 0 {
            run.report(Diagnostic::Sink {
                node,
                node_name: name.to_string(),
            });
            return;
        }
        for index in 0..pins {
            self.push(node.output(index), produced.on_port(Port::Output(index)), run);
        }
    }

    /// Positional: the i-th payload goes to the i-th output pin. Surplus
    /// payloads are dropped and missing ones leave pins idle, with one
    /// arity warning either way.
    fn push_many(&mut self, node: NodeId, name: &str, payloads: Vec<SharedPayload>, run: &mut Run<'_>) {
        let pins = self.nodes[node.0].outputs.len();
        if payloads.len() != pins {
            run.report(Diagnostic::ArityMismatch {
                node,
                node_name: name.to_string(),
                frames: payloads.len(),
                pins,
            });
        }
        for (index, payload) in payloads.into_iter().take(pins).enumerate() {
            let frame = Frame::new(payload, node, Port::Output(index));
            run.produced(NodeRef { id: node, name }, &frame);
            self.push(node.output(index), frame, run);
        }
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.nodes.len())
            .field(
                "node_names",
                &self.nodes.iter().map(|slot| &*slot.name).collect::<Vec<_>>(),
            )
            .field("connection_count", &self.connection_count())
            .finish()
    }
}
