// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lazy best-first top-k over a contiguous index range.
//!
//! Sorting every match of a short prefix like `"s"` just to show ten
//! suggestions is wasteful. Instead, the segment tree hands out the best
//! word of an interval in O(log n), and emitting that word splits its
//! interval in two. The heap always holds the best word of every interval
//! that is still unresolved, so the next pop is the next-best word overall.
//!
//! ```text
//! prefix range [2, 9)       ranks: 2:7 3:4 4:9 5:1 6:8 7:3 8:6
//!
//! pop 5 (rank 1)   split [2,9) → [2,5) best 3, [6,9) best 7
//! pop 7 (rank 3)   split [6,9) → [6,7) best 6, [8,9) best 8
//! pop 3 (rank 4)   split [2,5) → [2,3) best 2, [4,5) best 4
//! ...
//! ```
//!
//! Each emitted word costs at most two range queries and two heap pushes,
//! so k results cost O((k + 1) log n) regardless of how wide the range is.

use std::collections::HashMap;
use std::ops::Range;

use tracing::{trace, warn};

use super::order::RankOrder;
use super::queue::PriorityQueue;
use super::segment_tree::SegmentTree;

/// The ranked segment tree: word indices reduced by [`RankOrder`].
pub type RankTree = SegmentTree<usize, RankOrder>;

/// Indices of the `k` best-ranked words in `range`, best first.
///
/// Equal ranks come out in ascending index order. Returns fewer than `k`
/// indices when the range is smaller than `k`; `usize::MAX` means all of them.
pub fn top_k_indices(tree: &RankTree, range: Range<usize>, k: usize) -> Vec<usize> {
    let mut found = Vec::with_capacity(k.min(range.len()));
    if k == 0 || range.is_empty() {
        return found;
    }

    // Interval map: best index of an unresolved interval → that interval.
    let mut intervals: HashMap<usize, Range<usize>> = HashMap::new();
    let mut queue: PriorityQueue<usize, (f64, usize)> = PriorityQueue::new();
    enqueue_best(tree, range, &mut intervals, &mut queue);

    while found.len() < k {
        let Some(best) = queue.pop() else {
            break;
        };
        let Some(span) = intervals.remove(&best) else {
            continue;
        };
        found.push(best);

        if best > span.start {
            enqueue_best(tree, span.start..best, &mut intervals, &mut queue);
        }
        if best + 1 < span.end {
            enqueue_best(tree, best + 1..span.end, &mut intervals, &mut queue);
        }
    }

    found
}

fn enqueue_best(
    tree: &RankTree,
    span: Range<usize>,
    intervals: &mut HashMap<usize, Range<usize>>,
    queue: &mut PriorityQueue<usize, (f64, usize)>,
) {
    let Some(best) = tree.range_query(span.start, span.end) else {
        return;
    };
    // Only a tree restored without verification can answer outside the span.
    if !span.contains(&best) {
        warn!(
            best,
            start = span.start,
            end = span.end,
            "ranked tree returned an index outside the queried interval"
        );
        return;
    }
    trace!(best, start = span.start, end = span.end, "enqueue interval");
    queue.push(best, tree.combiner().key(best));
    intervals.insert(best, span);
}
