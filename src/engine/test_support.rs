// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Filters and observers used by the engine tests.

use std::sync::{Arc, Mutex};

use crate::engine::{Diagnostic, Frame, InputPinId, NodeId, Payload, PayloadKind, Port};
use crate::errors::FilterError;
use crate::traits::{Emission, Filter, NodeRef, Observer};

/// Forwards every frame's payload unchanged as a broadcast.
pub struct Relay {
    name: String,
    kind: PayloadKind,
    outputs: usize,
}

impl Relay {
    pub fn new(name: &str) -> Self {
        Self::typed(name, PayloadKind::Any)
    }

    pub fn typed(name: &str, kind: PayloadKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            outputs: 1,
        }
    }

    pub fn with_outputs(name: &str, outputs: usize) -> Self {
        Self {
            outputs,
            ..Self::new(name)
        }
    }
}

impl Filter for Relay {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_kinds(&self) -> Vec<PayloadKind> {
        vec![self.kind]
    }

    fn output_kinds(&self) -> Vec<PayloadKind> {
        vec![self.kind; self.outputs]
    }

    fn execute(&mut self, _input: usize, frame: &Frame) -> Result<Emission, FilterError> {
        Ok(Emission::One(Arc::clone(frame.shared_payload())))
    }
}

/// Emits `count` text payloads positionally: "<input>-0", "<input>-1", ...
pub struct Splitter {
    name: String,
    outputs: usize,
    count: usize,
}

impl Splitter {
    pub fn new(name: &str, outputs: usize, count: usize) -> Self {
        Self {
            name: name.to_string(),
            outputs,
            count,
        }
    }
}

impl Filter for Splitter {
    fn name(&self) -> &str {
        &self.name
    }

    fn output_kinds(&self) -> Vec<PayloadKind> {
        vec![PayloadKind::Any; self.outputs]
    }

    fn execute(&mut self, _input: usize, frame: &Frame) -> Result<Emission, FilterError> {
        let base = frame.payload().as_text().unwrap_or_default().to_string();
        Ok(Emission::many(
            (0..self.count).map(|index| Payload::from(format!("{}-{}", base, index))),
        ))
    }
}

/// Fails on every frame whose text equals `poison`, relays everything else.
pub struct Failing {
    poison: String,
}

impl Failing {
    pub fn on(poison: &str) -> Self {
        Self {
            poison: poison.to_string(),
        }
    }
}

impl Filter for Failing {
    fn name(&self) -> &str {
        "Failing"
    }

    fn execute(&mut self, _input: usize, frame: &Frame) -> Result<Emission, FilterError> {
        if frame.payload().as_text() == Some(self.poison.as_str()) {
            return Err(FilterError::Invalid(format!("cannot process {}", self.poison)));
        }
        Ok(Emission::One(Arc::clone(frame.shared_payload())))
    }
}

/// Counts its executions and emits nothing.
#[derive(Default)]
pub struct Counter {
    pub seen: Arc<Mutex<Vec<String>>>,
}

impl Filter for Counter {
    fn name(&self) -> &str {
        "Counter"
    }

    fn output_kinds(&self) -> Vec<PayloadKind> {
        Vec::new()
    }

    fn execute(&mut self, _input: usize, frame: &Frame) -> Result<Emission, FilterError> {
        let text = frame.payload().as_text().unwrap_or_default().to_string();
        self.seen.lock().unwrap().push(text);
        Ok(Emission::Nothing)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Executing {
        node: String,
        input: InputPinId,
        from: NodeId,
        port: Port,
        payload: Option<String>,
    },
    Produced {
        node: String,
        port: Port,
        payload: Option<String>,
    },
    Diagnostic(Diagnostic),
}

/// Records every notification in arrival order.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Event>>,
    frames: Mutex<Vec<Frame>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Frames passed to `on_produced`, in order.
    pub fn produced_frames(&self) -> Vec<Frame> {
        self.frames.lock().unwrap().clone()
    }

    /// Compact trace: "exec:<node>" and "prod:<node>:<port>" entries.
    pub fn trace(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Executing { node, .. } => Some(format!("exec:{}", node)),
                Event::Produced { node, port, .. } => Some(format!("prod:{}:{}", node, port)),
                Event::Diagnostic(_) => None,
            })
            .collect()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Diagnostic(diagnostic) => Some(diagnostic),
                _ => None,
            })
            .collect()
    }
}

impl Observer for RecordingObserver {
    fn on_executing(&self, node: NodeRef<'_>, input: InputPinId, frame: &Frame) {
        self.events.lock().unwrap().push(Event::Executing {
            node: node.name.to_string(),
            input,
            from: frame.producing_node(),
            port: frame.producing_port(),
            payload: frame.payload().as_text().map(str::to_string),
        });
    }

    fn on_produced(&self, node: NodeRef<'_>, frame: &Frame) {
        self.events.lock().unwrap().push(Event::Produced {
            node: node.name.to_string(),
            port: frame.producing_port(),
            payload: frame.payload().as_text().map(str::to_string),
        });
        self.frames.lock().unwrap().push(frame.clone());
    }

    fn on_diagnostic(&self, diagnostic: &Diagnostic) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Diagnostic(diagnostic.clone()));
    }
}
