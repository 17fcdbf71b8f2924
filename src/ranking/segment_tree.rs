// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Static, array-backed segment tree with O(log n) range reduce and point update.
//!
//! The tree is a dense vector of `2n` slots. Leaves sit in `[n, 2n)` in input
//! order, internal node `i` holds `combine(data[2i], data[2i + 1])`, the root
//! is at 1 and slot 0 is unused.
//!
//! ```text
//! values = [a, b, c, d]              n = 4
//!
//! slot:   0    1       2      3      4  5  6  7
//! data:  [-, abcd,    ab,    cd,     a, b, c, d]
//!              ▲       ▲      ▲      └─ leaves ─┘
//!             root   2·1    2·1+1
//! ```
//!
//! Queries walk bottom-up without recursion or allocation. The left and right
//! partial results are kept apart and joined at the end, so the combiner only
//! needs to be associative. Commutativity is not required, and `n` need not be
//! a power of two.
//!
//! # Serialization
//!
//! The persistent state is exactly `(n, data)`. The combiner is code, not
//! data: whoever restores a tree with [`SegmentTree::from_parts`] supplies it
//! again, and must supply the same one that built the tree.

use crate::error::{CompletionError, Result};

/// An associative binary operation used to reduce ranges.
///
/// Implemented for every `Fn(T, T) -> T`, so plain closures work. Stateful
/// combiners (like [`RankOrder`](super::RankOrder)) implement it directly.
pub trait Combine<T> {
    fn combine(&self, left: T, right: T) -> T;
}

impl<T, F> Combine<T> for F
where
    F: Fn(T, T) -> T,
{
    #[inline]
    fn combine(&self, left: T, right: T) -> T {
        self(left, right)
    }
}

/// Segment tree over `T` reduced with `C`.
#[derive(Debug, Clone)]
pub struct SegmentTree<T, C> {
    n: usize,
    data: Vec<T>,
    combiner: C,
}

impl<T, C> SegmentTree<T, C>
where
    T: Copy + Default,
    C: Combine<T>,
{
    /// Build a tree over `values`. O(n).
    pub fn new(values: &[T], combiner: C) -> Self {
        let n = values.len();
        let mut data = vec![T::default(); 2 * n];
        data[n..].copy_from_slice(values);
        for i in (1..n).rev() {
            data[i] = combiner.combine(data[2 * i], data[2 * i + 1]);
        }
        Self { n, data, combiner }
    }

    /// Restore a tree from its persisted `(n, data)` state.
    ///
    /// Only the shape is checked here. Use [`SegmentTree::is_consistent`]
    /// to confirm every internal node agrees with `combiner`.
    pub fn from_parts(n: usize, data: Vec<T>, combiner: C) -> Result<Self> {
        let expected = n.checked_mul(2).ok_or_else(|| {
            CompletionError::config(format!("segment tree size {} overflows", n))
        })?;
        if data.len() != expected {
            return Err(CompletionError::config(format!(
                "segment tree data has {} slots, expected 2 * {} = {}",
                data.len(),
                n,
                expected
            )));
        }
        Ok(Self { n, data, combiner })
    }

    /// Reduce the half-open range `[left, right)` of the input domain.
    ///
    /// Returns `None` for an empty range (`left >= right`). The caller must
    /// keep `right <= len()`; larger bounds panic on the slot index or,
    /// when they still land inside the backing vector, return a meaningless
    /// value. The tree does not validate bounds on this hot path.
    pub fn range_query(&self, left: usize, right: usize) -> Option<T> {
        let mut left = left + self.n;
        let mut right = right + self.n;
        let mut acc_left: Option<T> = None;
        let mut acc_right: Option<T> = None;

        // Odd slots are right children: they can't be covered by their parent,
        // so fold them in and step inward before moving up a level.
        while left < right {
            if left & 1 == 1 {
                acc_left = Some(self.join(acc_left, self.data[left]));
                left += 1;
            }
            if right & 1 == 1 {
                right -= 1;
                acc_right = Some(match acc_right {
                    Some(acc) => self.combiner.combine(self.data[right], acc),
                    None => self.data[right],
                });
            }
            left >>= 1;
            right >>= 1;
        }

        match (acc_left, acc_right) {
            (Some(l), Some(r)) => Some(self.combiner.combine(l, r)),
            (l, r) => l.or(r),
        }
    }

    /// Overwrite leaf `idx` and recompute its ancestors. O(log n).
    ///
    /// Panics if `idx >= len()`. Not safe to interleave with concurrent
    /// queries; `&mut self` enforces exclusive access.
    pub fn update(&mut self, idx: usize, value: T) {
        assert!(idx < self.n, "segment tree index {} out of range {}", idx, self.n);
        let mut pos = idx + self.n;
        self.data[pos] = value;
        while pos > 1 {
            pos >>= 1;
            self.data[pos] = self.combiner.combine(self.data[2 * pos], self.data[2 * pos + 1]);
        }
    }

    /// Leaf value at `idx`.
    pub fn leaf(&self, idx: usize) -> Option<T> {
        if idx < self.n {
            Some(self.data[self.n + idx])
        } else {
            None
        }
    }

    #[inline]
    fn join(&self, acc: Option<T>, value: T) -> T {
        match acc {
            Some(acc) => self.combiner.combine(acc, value),
            None => value,
        }
    }
}

impl<T, C> SegmentTree<T, C>
where
    T: Copy + Default + PartialEq,
    C: Combine<T>,
{
    /// True if every internal node equals the combination of its children.
    pub fn is_consistent(&self) -> bool {
        (1..self.n).all(|i| {
            self.data[i] == self.combiner.combine(self.data[2 * i], self.data[2 * i + 1])
        })
    }
}

impl<T, C> SegmentTree<T, C> {
    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Backing slots, including the unused slot 0.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn combiner(&self) -> &C {
        &self.combiner
    }

    /// Decompose into the persisted `(n, data)` state and the combiner.
    pub fn into_parts(self) -> (usize, Vec<T>, C) {
        (self.n, self.data, self.combiner)
    }
}
