// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::PayloadKind;
use thiserror::Error;

/// Failure inside a filter's `execute`.
///
/// The engine never unwinds on these; it turns them into a
/// [`Diagnostic::FilterFailed`](crate::engine::Diagnostic::FilterFailed)
/// and stops the affected branch.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("expected a {expected} payload, got {actual}")]
    UnexpectedPayload {
        expected: PayloadKind,
        actual: PayloadKind,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid parameters: {0}")]
    Invalid(String),

    /// Failure reported by an external transform (feature extraction and the like).
    #[error(transparent)]
    External(#[from] anyhow::Error),
}
