// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Instant;

use super::graph::Graph;
use super::payload::Payload;
use super::pin::NodeId;
use super::report::{RunReport, Severity};
use super::run::{Observers, Run};
use crate::errors::GraphError;
use crate::observability::messages::engine::{RunCompleted, RunStarted};
use crate::observability::messages::StructuredLog;
use crate::traits::Observer;

/// A frozen graph plus the source that starts each run.
///
/// `exec` blocks until every frame caused by the supplied items has been
/// fully propagated. Filters keep their state between runs.
pub struct Pipeline {
    graph: Graph,
    source: NodeId,
    observers: Observers,
}

impl Pipeline {
    pub fn new(graph: Graph, source: NodeId) -> Result<Self, GraphError> {
        if !graph.contains(source) {
            return Err(GraphError::UnknownNode(source));
        }
        if !graph.is_source(source) {
            return Err(GraphError::NotASource {
                node: source,
                name: graph.name(source).unwrap_or_default().to_string(),
            });
        }
        Ok(Self {
            graph,
            source,
            observers: Observers::default(),
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Registers an observer for every node.
    pub fn observe(&mut self, observer: Arc<dyn Observer>) {
        self.observers.add(observer);
    }

    /// Registers an observer for a single node.
    pub fn observe_node(&mut self, node: NodeId, observer: Arc<dyn Observer>) -> Result<(), GraphError> {
        if !self.graph.contains(node) {
            return Err(GraphError::UnknownNode(node));
        }
        self.observers.add_for(node, observer);
        Ok(())
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Runs the graph once.
    ///
    /// With `Some(items)` each item is seeded in order; with `None` the
    /// source's stored items are used. When there is nothing to seed the
    /// report carries a single `NoData` diagnostic and no filter runs.
    pub fn exec(&mut self, data: Option<Vec<Payload>>) -> RunReport {
        let started = Instant::now();
        let source_name = self.graph.name(self.source).unwrap_or_default().to_string();
        let start_msg = RunStarted {
            source: &source_name,
            items: data.as_ref().map(Vec::len),
        };
        start_msg.log();
        let span = start_msg.span("pipeline_exec");
        let _enter = span.enter();

        let mut run = Run::new(&self.observers);
        self.graph.exec_source(self.source, data, &mut run);
        let report = run.finish();

        RunCompleted {
            source: &source_name,
            seeded: report.seeded(),
            executions: report.executions(),
            errors: report.with_severity(Severity::Error).count(),
            warnings: report.with_severity(Severity::Warning).count(),
            duration: started.elapsed(),
        }
        .log();
        report
    }

    /// Runs the graph once over `items`.
    pub fn run<I, P>(&mut self, items: I) -> RunReport
    where
        I: IntoIterator<Item = P>,
        P: Into<Payload>,
    {
        self.exec(Some(items.into_iter().map(Into::into).collect()))
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("graph", &self.graph)
            .field("source", &self.source)
            .field("observers", &self.observers.len())
            .finish()
    }
}
