// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::engine::{Frame, PayloadKind};
use crate::errors::FilterError;
use crate::traits::{Emission, Filter};

/// Shared handle to the frames a [`Collector`] has received.
///
/// Cloning the handle shares the same storage, so the caller keeps one clone
/// and moves the collector into the graph.
#[derive(Debug, Clone, Default)]
pub struct CollectedFrames(Arc<Mutex<Vec<Frame>>>);

impl CollectedFrames {
    fn lock(&self) -> MutexGuard<'_, Vec<Frame>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, frame: Frame) {
        self.lock().push(frame);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the collected frames in arrival order; payloads stay shared.
    pub fn snapshot(&self) -> Vec<Frame> {
        self.lock().clone()
    }

    pub fn last(&self) -> Option<Frame> {
        self.lock().last().cloned()
    }

    /// Removes and returns everything collected so far.
    pub fn take(&self) -> Vec<Frame> {
        std::mem::take(&mut *self.lock())
    }
}

/// Terminal sink that keeps every frame it receives.
///
/// It owns no output pins and never emits, which stands in for the renderer
/// widgets at the end of an interactive pipeline.
#[derive(Debug)]
pub struct Collector {
    name: String,
    kind: PayloadKind,
    frames: CollectedFrames,
}

impl Collector {
    pub fn new(name: impl Into<String>) -> Self {
        Self::accepting(name, PayloadKind::Any)
    }

    /// A collector whose input only accepts `kind`.
    pub fn accepting(name: impl Into<String>, kind: PayloadKind) -> Self {
        Self {
            name: name.into(),
            kind,
            frames: CollectedFrames::default(),
        }
    }

    pub fn frames(&self) -> CollectedFrames {
        self.frames.clone()
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new("Collector")
    }
}

impl Filter for Collector {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_kinds(&self) -> Vec<PayloadKind> {
        vec![self.kind]
    }

    fn output_kinds(&self) -> Vec<PayloadKind> {
        Vec::new()
    }

    fn execute(&mut self, _input: usize, frame: &Frame) -> Result<Emission, FilterError> {
        self.frames.push(frame.clone());
        Ok(Emission::Nothing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{NodeId, Payload};

    #[test]
    fn keeps_frames_in_arrival_order() {
        let mut collector = Collector::default();
        let frames = collector.frames();

        for text in ["a", "b"] {
            let emission = collector
                .execute(0, &Frame::seed(Payload::from(text), NodeId(0)))
                .unwrap();
            assert!(matches!(emission, Emission::Nothing));
        }

        let texts: Vec<String> = frames
            .snapshot()
            .iter()
            .filter_map(|frame| frame.payload().as_text().map(str::to_string))
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert_eq!(frames.take().len(), 2);
        assert!(frames.is_empty());
    }

    #[test]
    fn collectors_are_sinks() {
        let collector = Collector::accepting("Histograms", PayloadKind::Histogram);
        assert!(collector.output_kinds().is_empty());
        assert_eq!(collector.input_kinds(), vec![PayloadKind::Histogram]);
        assert_eq!(collector.name(), "Histograms");
    }
}
