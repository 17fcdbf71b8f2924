// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures and brute-force oracles so every test
//! checks the index against the same reference behavior.

#![doc(hidden)]

use std::cmp::Ordering;

use crate::error::Result;
use crate::index::CompletionIndex;

/// The unranked fixture: four words sharing the prefix "so".
pub const SOAP_WORDS: [&str; 4] = ["so", "soap", "soupy", "soapy"];

/// The ranked fixture as `(word, rank, id)`.
pub const TONGUE_TWISTER: [(&str, f64, u32); 6] = [
    ("sally", 2.0, 0),
    ("sells", 5.0, 1),
    ("seashells", 3.0, 2),
    ("by", 8.0, 3),
    ("the", 1.0, 4),
    ("seashore", 6.0, 5),
];

/// Unranked index over [`SOAP_WORDS`].
pub fn soap_index() -> Result<CompletionIndex> {
    CompletionIndex::from_words(SOAP_WORDS)
}

/// Ranked index over [`TONGUE_TWISTER`] without ids.
pub fn ranked_index() -> Result<CompletionIndex> {
    CompletionIndex::from_ranked_words(TONGUE_TWISTER.iter().map(|&(w, r, _)| (w, r)))
}

/// Ranked index over [`TONGUE_TWISTER`] with ids.
pub fn ranked_index_with_ids() -> Result<CompletionIndex<u32>> {
    CompletionIndex::from_ranked_words_with_ids(TONGUE_TWISTER)
}

/// Reference prefix query: filter and sort in code point order.
pub fn brute_force_prefix<'a>(words: &[&'a str], prefix: &str) -> Vec<&'a str> {
    let mut found: Vec<&str> = words
        .iter()
        .copied()
        .filter(|w| w.starts_with(prefix))
        .collect();
    found.sort_unstable();
    found
}

/// Reference top-k: matching words by `(rank, word)`, truncated to `k`.
///
/// Sorting by word breaks rank ties the same way the index does, since
/// sorted position follows code point order.
pub fn brute_force_top_k<'a>(ranked: &[(&'a str, f64)], prefix: &str, k: usize) -> Vec<&'a str> {
    let mut found: Vec<(&str, f64)> = ranked
        .iter()
        .copied()
        .filter(|(w, _)| w.starts_with(prefix))
        .collect();
    found.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    found.into_iter().take(k).map(|(w, _)| w).collect()
}
