// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Leftmost and rightmost binary search over a predicate.
//!
//! Both functions take a three-way comparator between an element and a
//! target that need not share a type. The sequence must be ordered
//! consistently with the comparator against that target: every `Less`
//! comes before every `Equal`, which comes before every `Greater`.
//!
//! ```text
//! cmp:     Less Less Equal Equal Equal Greater
//! index:    0    1    2     3     4     5
//!                     ▲           ▲
//!             leftmost_match   rightmost_match
//! ```
//!
//! Together they give the half-open range of elements that compare `Equal`:
//! `leftmost_match(..)..rightmost_match(..).map_or(0, |i| i + 1)`.

use std::cmp::Ordering;

/// Smallest index `i` with `cmp(&sequence[i], target) >= Equal`.
///
/// Returns `sequence.len()` when every element compares `Less`, which is
/// also the insertion point for `target`.
pub fn leftmost_match<A, T, F>(sequence: &[A], target: &T, mut cmp: F) -> usize
where
    T: ?Sized,
    F: FnMut(&A, &T) -> Ordering,
{
    let mut lo = 0usize;
    let mut hi = sequence.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if cmp(&sequence[mid], target) == Ordering::Less {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Largest index `i` with `cmp(&sequence[i], target) <= Equal`.
///
/// Returns `None` when every element compares `Greater` (including the
/// empty sequence).
pub fn rightmost_match<A, T, F>(sequence: &[A], target: &T, mut cmp: F) -> Option<usize>
where
    T: ?Sized,
    F: FnMut(&A, &T) -> Ordering,
{
    // First index that compares Greater; the answer sits just before it.
    let mut lo = 0usize;
    let mut hi = sequence.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if cmp(&sequence[mid], target) == Ordering::Greater {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo.checked_sub(1)
}
