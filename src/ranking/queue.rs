// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary min-heap over `(id, priority)` pairs.
//!
//! Ids and priorities live in two parallel dense vectors instead of a vector
//! of pairs, so sifting compares priorities without touching the ids. The
//! heap grows as needed and never allocates per node.
//!
//! ```text
//! position:    0   1   2   3   4
//! ids:        [c,  a,  e,  b,  d]
//! priorities: [1,  3,  2,  7,  4]
//!
//! parent(i) = (i - 1) / 2     children(i) = 2i + 1, 2i + 2
//! ```

/// Min-heap keyed by `P`. The smallest priority pops first.
#[derive(Debug, Clone)]
pub struct PriorityQueue<I, P = f64> {
    ids: Vec<I>,
    priorities: Vec<P>,
}

impl<I, P> Default for PriorityQueue<I, P> {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            priorities: Vec::new(),
        }
    }
}

impl<I, P: PartialOrd + Copy> PriorityQueue<I, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            priorities: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Insert `id` and sift it up. O(log n).
    pub fn push(&mut self, id: I, priority: P) {
        let mut pos = self.ids.len();
        self.ids.push(id);
        self.priorities.push(priority);

        while pos > 0 {
            let parent = (pos - 1) >> 1;
            if priority >= self.priorities[parent] {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    /// Remove and return the id with the smallest priority. O(log n).
    pub fn pop(&mut self) -> Option<I> {
        let last = self.ids.len().checked_sub(1)?;
        self.swap(0, last);
        self.priorities.pop();
        let top = self.ids.pop();
        self.sift_down(0);
        top
    }

    /// Id with the smallest priority, without removing it.
    pub fn peek(&self) -> Option<&I> {
        self.ids.first()
    }

    /// Smallest priority, without removing it.
    pub fn peek_priority(&self) -> Option<P> {
        self.priorities.first().copied()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.priorities.clear();
    }

    /// Release capacity beyond the current length.
    pub fn shrink_to_fit(&mut self) {
        self.ids.shrink_to_fit();
        self.priorities.shrink_to_fit();
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.ids.len();
        loop {
            let left = (pos << 1) + 1;
            if left >= len {
                break;
            }
            // Right child wins only when strictly smaller.
            let right = left + 1;
            let best = if right < len && self.priorities[right] < self.priorities[left] {
                right
            } else {
                left
            };
            if self.priorities[best] >= self.priorities[pos] {
                break;
            }
            self.swap(pos, best);
            pos = best;
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.ids.swap(a, b);
        self.priorities.swap(a, b);
    }
}
