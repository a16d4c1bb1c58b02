// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.

use tracing::Span;

pub mod diagnostic;
pub mod engine;
pub mod filter;
pub mod wiring;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the message at its level with its fields attached.
    fn log(&self);

    /// A span carrying the same fields, for scoping work under this message.
    fn span(&self, name: &str) -> Span;
}
