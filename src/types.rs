// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! What an index can be built from.
//!
//! There are five ways in, and each fixes which queries the finished index
//! supports:
//!
//! | Request               | Ranked queries | Id queries |
//! |-----------------------|----------------|------------|
//! | `Words`               | no             | no         |
//! | `WordsWithIds`        | no             | yes        |
//! | `RankedWords`         | yes            | no         |
//! | `RankedWordsWithIds`  | yes            | yes        |
//! | `Snapshot`            | as serialized  | as serialized |
//!
//! Ranks are `f64`, lower is better. NaN is rejected; infinities are allowed.

use crate::snapshot::Snapshot;

/// Input to [`CompletionIndex::build`](crate::CompletionIndex::build).
#[derive(Debug, Clone, PartialEq)]
pub enum BuildRequest<I = ()> {
    /// Plain words. Prefix queries only.
    Words(Vec<String>),
    /// Words paired with caller identifiers.
    WordsWithIds(Vec<(String, I)>),
    /// Words paired with ranks. Enables top-k queries.
    RankedWords(Vec<(String, f64)>),
    /// Words with ranks and identifiers. Enables every query.
    RankedWordsWithIds(Vec<(String, f64, I)>),
    /// A previously serialized index.
    Snapshot(Snapshot<I>),
}

impl<I> BuildRequest<I> {
    /// Short name of the construction mode, for logs and errors.
    pub fn mode(&self) -> &'static str {
        match self {
            BuildRequest::Words(_) => "words",
            BuildRequest::WordsWithIds(_) => "words_with_ids",
            BuildRequest::RankedWords(_) => "ranked_words",
            BuildRequest::RankedWordsWithIds(_) => "ranked_words_with_ids",
            BuildRequest::Snapshot(_) => "snapshot",
        }
    }

    /// Number of input entries. For a snapshot, the number of stored words.
    pub fn len(&self) -> usize {
        match self {
            BuildRequest::Words(words) => words.len(),
            BuildRequest::WordsWithIds(words) => words.len(),
            BuildRequest::RankedWords(words) => words.len(),
            BuildRequest::RankedWordsWithIds(words) => words.len(),
            BuildRequest::Snapshot(snapshot) => snapshot.word_starts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<I> From<Snapshot<I>> for BuildRequest<I> {
    fn from(snapshot: Snapshot<I>) -> Self {
        BuildRequest::Snapshot(snapshot)
    }
}
