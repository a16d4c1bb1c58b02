// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::{Frame, InputPin, OutputPin, Payload, PayloadKind, SharedPayload};
use crate::errors::FilterError;

/// What a filter produced for one input frame.
///
/// The engine wraps every payload in a new [`Frame`] stamped with the
/// producing node and port, so filters never build output frames themselves.
#[derive(Debug, Clone)]
pub enum Emission {
    /// Nothing to propagate; the branch ends here.
    Nothing,
    /// One result broadcast to every output pin of the node.
    One(SharedPayload),
    /// Positional results: the i-th payload goes to the i-th output pin.
    Many(Vec<SharedPayload>),
}

impl Emission {
    pub fn one(payload: impl Into<SharedPayload>) -> Self {
        Emission::One(payload.into())
    }

    pub fn many<I, P>(payloads: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<SharedPayload>,
    {
        Emission::Many(payloads.into_iter().map(Into::into).collect())
    }
}

impl From<Payload> for Emission {
    fn from(payload: Payload) -> Self {
        Emission::one(payload)
    }
}

/// A processing node in the pipeline graph.
///
/// Pin counts come from [`input_kinds`](Filter::input_kinds) and
/// [`output_kinds`](Filter::output_kinds) when the node is added to a graph;
/// more outputs can be appended while the graph is still being built.
pub trait Filter: Send {
    /// Human-readable label, used for logs and diagnostics only.
    fn name(&self) -> &str;

    fn input_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Any]
    }

    fn output_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Any]
    }

    /// Compatibility check run by `connect` before binding `offered` to `input`.
    fn can_accept(&self, input: &InputPin, offered: &OutputPin) -> bool {
        input.kind().accepts(offered.kind())
    }

    /// Called exactly once for every frame arriving on input pin `input`.
    fn execute(&mut self, input: usize, frame: &Frame) -> Result<Emission, FilterError>;
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn input_kinds(&self) -> Vec<PayloadKind> {
        (**self).input_kinds()
    }

    fn output_kinds(&self) -> Vec<PayloadKind> {
        (**self).output_kinds()
    }

    fn can_accept(&self, input: &InputPin, offered: &OutputPin) -> bool {
        (**self).can_accept(input, offered)
    }

    fn execute(&mut self, input: usize, frame: &Frame) -> Result<Emission, FilterError> {
        (**self).execute(input, frame)
    }
}
