// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the index invariants.
//!
//! Debug-mode assertions that re-check what construction is supposed to
//! guarantee. They cost nothing in release builds and catch algorithmic
//! mistakes while the test suite runs.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract                    | Invariant                                        |
//! |-----------------------------|--------------------------------------------------|
//! | `check_word_store`          | buffer delimited, offsets ascending, words sorted|
//! | `check_parallel_arrays`     | words, ranks and ids share one length `n`        |
//! | `check_rank_tree`           | tree over `[0, n)`, every node = best child      |
//! | `check_top_k_ordered`       | top-k output ascending by (rank, index)          |

use crate::index::WordStore;
use crate::ranking::{RankOrder, RankTree};

// ============================================================================
// WORD STORE CONTRACTS
// ============================================================================

/// Check that a word store is delimited, ascending and sorted.
///
/// # Panics (debug builds only)
/// Panics if the buffer does not end with the separator, if any offset does
/// not point at a separator, or if adjacent words are out of order.
#[inline]
pub fn check_word_store(store: &WordStore) {
    if !cfg!(debug_assertions) {
        return;
    }
    let separator = store.separator();
    let buffer = store.buffer();

    debug_assert!(
        buffer.ends_with(separator),
        "Contract violation: Delimited - buffer does not end with the separator"
    );

    for (i, &offset) in store.word_starts().iter().enumerate() {
        debug_assert!(
            buffer.get(offset..).is_some_and(|rest| rest.starts_with(separator)),
            "Contract violation: Delimited - word_starts[{}] = {} is not a separator",
            i,
            offset
        );
        if i > 0 {
            let prev = store.word_starts()[i - 1];
            debug_assert!(
                prev < offset,
                "Contract violation: Ascending - word_starts[{}] = {} <= word_starts[{}] = {}",
                i,
                offset,
                i - 1,
                prev
            );
            debug_assert!(
                store.word_at(i - 1) <= store.word_at(i),
                "Contract violation: Sorted - word {} ({:?}) > word {} ({:?})",
                i - 1,
                store.word_at(i - 1),
                i,
                store.word_at(i)
            );
        }
    }
}

// ============================================================================
// PARALLEL ARRAY CONTRACTS
// ============================================================================

/// Check that the co-indexed arrays share the word count `n`.
///
/// Every optional array is indexed by sorted word position. Any reordering
/// that moves one without the others silently pairs words with the wrong
/// rank or identifier.
#[inline]
pub fn check_parallel_arrays(words: usize, ranks: Option<usize>, ids: Option<usize>) {
    if let Some(ranks) = ranks {
        debug_assert_eq!(
            ranks, words,
            "Contract violation: Lockstep - {} ranks for {} words",
            ranks, words
        );
    }
    if let Some(ids) = ids {
        debug_assert_eq!(
            ids, words,
            "Contract violation: Lockstep - {} ids for {} words",
            ids, words
        );
    }
}

// ============================================================================
// RANK TREE CONTRACTS
// ============================================================================

/// Check that a freshly built rank tree covers `[0, n)` and is consistent.
///
/// # Panics (debug builds only)
/// Panics if a leaf does not hold its own index or an internal node
/// disagrees with its children.
#[inline]
pub fn check_rank_tree(tree: &RankTree) {
    if !cfg!(debug_assertions) {
        return;
    }
    for idx in 0..tree.len() {
        debug_assert_eq!(
            tree.leaf(idx),
            Some(idx),
            "Contract violation: RankTree - leaf {} does not hold its own index",
            idx
        );
    }
    debug_assert!(
        tree.is_consistent(),
        "Contract violation: RankTree - internal node disagrees with its children"
    );
}

// ============================================================================
// TOP-K CONTRACTS
// ============================================================================

/// Check that top-k output is ascending by `(rank, index)`.
#[inline]
pub fn check_top_k_ordered(order: &RankOrder, indices: &[usize]) {
    for pair in indices.windows(2) {
        debug_assert!(
            order.key(pair[0]) < order.key(pair[1]),
            "Contract violation: TopK - index {} (rank {}) emitted before index {} (rank {})",
            pair[0],
            order.rank(pair[0]),
            pair[1],
            order.rank(pair[1])
        );
    }
}
