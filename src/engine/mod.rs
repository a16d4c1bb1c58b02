// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod builder;
pub mod frame;
pub mod graph;
pub mod payload;
pub mod pin;
pub mod pipeline;
pub mod report;
mod run;
pub mod source;

#[cfg(test)]
pub(crate) mod test_support;

pub use builder::{Connection, GraphBuilder};
pub use frame::{Frame, Port, Provenance};
pub use graph::Graph;
pub use payload::{Angle, Histogram, Payload, PayloadKind, SharedPayload, TextureFeatures};
pub use pin::{InputPin, InputPinId, NodeId, OutputPin, OutputPinId};
pub use pipeline::Pipeline;
pub use report::{Diagnostic, RunReport, Severity};
pub use source::SourceNode;
