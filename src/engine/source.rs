// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::payload::{Payload, SharedPayload};

/// Entry node of a graph: turns externally supplied items into seed frames.
///
/// A source has no inputs and exactly one output pin. It can keep a default
/// item list that is used whenever a run is started without explicit data.
#[derive(Debug, Clone, Default)]
pub struct SourceNode {
    defaults: Option<Vec<SharedPayload>>,
}

impl SourceNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults<I, P>(items: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Payload>,
    {
        let mut source = Self::new();
        source.set_defaults(items);
        source
    }

    pub fn set_defaults<I, P>(&mut self, items: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<Payload>,
    {
        self.defaults = Some(
            items
                .into_iter()
                .map(|item| SharedPayload::new(item.into()))
                .collect(),
        );
    }

    pub fn defaults(&self) -> Option<&[SharedPayload]> {
        self.defaults.as_deref()
    }

    /// Items for one run: the argument when given, otherwise the stored defaults.
    ///
    /// `None` means there is nothing to run, which includes an explicitly
    /// empty argument; an empty argument does not fall back to the defaults.
    pub(crate) fn items_for(&self, data: Option<Vec<Payload>>) -> Option<Vec<SharedPayload>> {
        let items = match data {
            Some(data) => data.into_iter().map(SharedPayload::new).collect(),
            None => self.defaults.clone()?,
        };
        if items.is_empty() {
            None
        } else {
            Some(items)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_data_wins_over_defaults() {
        let source = SourceNode::with_defaults(["default.png"]);
        let items = source.items_for(Some(vec![Payload::from("given.png")])).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_text(), Some("given.png"));
    }

    #[test]
    fn omitted_data_uses_defaults() {
        let source = SourceNode::with_defaults(["a.png", "b.png"]);
        let items = source.items_for(None).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn missing_or_empty_data_yields_nothing() {
        assert!(SourceNode::new().items_for(None).is_none());
        assert!(SourceNode::new().items_for(Some(vec![])).is_none());
        let source = SourceNode::with_defaults(["a.png"]);
        assert!(source.items_for(Some(vec![])).is_none());
    }
}
