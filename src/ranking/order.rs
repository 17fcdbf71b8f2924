// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The rank comparator behind the ranked segment tree.
//!
//! The tree is built over word indices `[0, n)`, not over rank values. Each
//! node holds the index of the best-ranked word below it, so a range query
//! answers *which* word wins, not just its rank. `RankOrder` owns the rank
//! vector and is the only thing that looks inside it.

use std::cmp::Ordering;

use super::segment_tree::Combine;

/// Picks the lower-ranked of two word indices; equal ranks go to the lower index.
#[derive(Debug, Clone, PartialEq)]
pub struct RankOrder {
    ranks: Vec<f64>,
}

impl RankOrder {
    pub fn new(ranks: Vec<f64>) -> Self {
        Self { ranks }
    }

    pub fn ranks(&self) -> &[f64] {
        &self.ranks
    }

    pub fn into_ranks(self) -> Vec<f64> {
        self.ranks
    }

    #[inline]
    pub fn rank(&self, idx: usize) -> f64 {
        self.ranks[idx]
    }

    /// Heap key for `idx`: rank first, then index, matching [`Combine::combine`].
    #[inline]
    pub fn key(&self, idx: usize) -> (f64, usize) {
        (self.ranks[idx], idx)
    }
}

impl Combine<usize> for RankOrder {
    #[inline]
    fn combine(&self, left: usize, right: usize) -> usize {
        match self.ranks[left].partial_cmp(&self.ranks[right]) {
            Some(Ordering::Less) => left,
            Some(Ordering::Greater) => right,
            _ => left.min(right),
        }
    }
}
