// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::{Diagnostic, Frame, InputPinId, NodeId};

/// Read-only view of the node an event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef<'a> {
    pub id: NodeId,
    pub name: &'a str,
}

/// Listener for pipeline events.
///
/// Notifications are delivered synchronously, in line with propagation and in
/// the same depth-first order. Observers only get read-only views, so they can
/// never rewire the graph from inside a notification.
pub trait Observer: Send + Sync {
    /// Fired before a filter's `execute` runs on `frame`.
    fn on_executing(&self, _node: NodeRef<'_>, _input: InputPinId, _frame: &Frame) {}

    /// Fired once per logical result a filter emits.
    ///
    /// A broadcast is reported once with [`Port::Broadcast`]; the frames the
    /// receivers get share its payload but carry their own `Port::Output(i)`.
    ///
    /// [`Port::Broadcast`]: crate::engine::Port::Broadcast
    fn on_produced(&self, _node: NodeRef<'_>, _frame: &Frame) {}

    fn on_diagnostic(&self, _diagnostic: &Diagnostic) {}
}
