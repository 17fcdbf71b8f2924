// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for index construction, queries, and snapshot decoding.
//!
//! Every contract violation surfaces as a value. Nothing is retried and
//! nothing is recovered silently: construction either succeeds completely
//! or fails before a query is possible.

use std::io;

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, CompletionError>;

/// Errors raised by [`CompletionIndex`](crate::CompletionIndex) and its parts.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Bad separator, or a snapshot that is inconsistent with the mode it implies.
    #[error("configuration error: {0}")]
    Config(String),

    /// A word in the input list cannot be stored.
    ///
    /// `index` is the position in the caller's list, before sorting.
    #[error("invalid word at index {index}: {reason}")]
    InvalidWord { index: usize, reason: &'static str },

    /// A NaN rank, or an infinite rank on its way into JSON.
    #[error("invalid rank at index {index}: NaN, or infinity in a JSON snapshot")]
    InvalidRank { index: usize },

    /// An identifier-dependent query on an index built without identifiers.
    #[error("index was built without word identifiers")]
    MissingIds,

    /// A rank-dependent query on an index built without ranks.
    #[error("index was built without word rankings")]
    MissingRanks,

    /// JSON snapshot could not be encoded or decoded.
    #[error("json snapshot error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary snapshot is malformed, truncated, or fails its checksum.
    #[error("binary snapshot error: {0}")]
    Binary(#[from] io::Error),
}

impl CompletionError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        CompletionError::Config(message.into())
    }

    /// True for the two "built without optional data" errors.
    pub fn is_state_error(&self) -> bool {
        matches!(self, CompletionError::MissingIds | CompletionError::MissingRanks)
    }
}
