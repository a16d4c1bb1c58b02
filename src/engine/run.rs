// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use super::frame::Frame;
use super::pin::{InputPinId, NodeId};
use super::report::{Diagnostic, RunReport};
use crate::observability::messages::StructuredLog;
use crate::traits::{NodeRef, Observer};

/// Observers registered on a pipeline, either for every node or for one node.
#[derive(Clone, Default)]
pub(crate) struct Observers {
    all: Vec<Arc<dyn Observer>>,
    by_node: HashMap<NodeId, Vec<Arc<dyn Observer>>>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Arc<dyn Observer>) {
        self.all.push(observer);
    }

    pub(crate) fn add_for(&mut self, node: NodeId, observer: Arc<dyn Observer>) {
        self.by_node.entry(node).or_default().push(observer);
    }

    /// Global observers first, then the node's own, each in registration order.
    fn for_node(&self, node: NodeId) -> impl Iterator<Item = &Arc<dyn Observer>> {
        self.all
            .iter()
            .chain(self.by_node.get(&node).into_iter().flatten())
    }

    pub(crate) fn len(&self) -> usize {
        self.all.len() + self.by_node.values().map(Vec::len).sum::<usize>()
    }
}

/// State of one `exec` call: where notifications go and what has been reported.
pub(crate) struct Run<'a> {
    observers: &'a Observers,
    report: RunReport,
}

impl<'a> Run<'a> {
    pub(crate) fn new(observers: &'a Observers) -> Self {
        Self {
            observers,
            report: RunReport::default(),
        }
    }

    pub(crate) fn seeded(&mut self) {
        self.report.count_seed();
    }

    pub(crate) fn executing(&mut self, node: NodeRef<'_>, input: InputPinId, frame: &Frame) {
        self.report.count_execution();
        for observer in self.observers.for_node(node.id) {
            observer.on_executing(node, input, frame);
        }
    }

    pub(crate) fn produced(&self, node: NodeRef<'_>, frame: &Frame) {
        for observer in self.observers.for_node(node.id) {
            observer.on_produced(node, frame);
        }
    }

    /// Logs the diagnostic, hands it to the observers and keeps it for the report.
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        diagnostic.log();
        for observer in self.observers.for_node(diagnostic.node()) {
            observer.on_diagnostic(&diagnostic);
        }
        self.report.record(diagnostic);
    }

    pub(crate) fn finish(self) -> RunReport {
        self.report
    }
}
