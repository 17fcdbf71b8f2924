// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranked retrieval: the segment tree, the heap, and the top-k loop that joins them.
//!
//! The segment tree answers "best word in `[l, r)`" in O(log n). The heap
//! orders the best words of disjoint intervals. Neither is useful alone for
//! autocomplete; [`top_k_indices`] combines them so that asking for ten
//! suggestions costs about ten tree queries, not a sort of every match.

mod order;
mod queue;
mod segment_tree;
mod top_k;

pub use order::RankOrder;
pub use queue::PriorityQueue;
pub use segment_tree::{Combine, SegmentTree};
pub use top_k::{top_k_indices, RankTree};
