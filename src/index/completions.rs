// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The completion index: word store, optional ranks and ids, and the rank tree.
//!
//! Everything is indexed by sorted word position. The word store, the rank
//! vector (inside the tree's [`RankOrder`]) and the id vector are co-indexed
//! arrays of one length `n`:
//!
//! ```text
//! sorted position:   0        1           2          3
//! word:              sally    seashells   seashore   sells
//! rank:              2        3           6          5
//! id:                a        c           f          b
//! ```
//!
//! Building sorts the words once and applies the same permutation to ranks
//! and ids, so the three never drift apart.
//!
//! # Queries
//!
//! | Operation                    | Needs          | Cost                    |
//! |------------------------------|----------------|-------------------------|
//! | `find_words`                 | -              | O(log n + m)            |
//! | `find_words_with_ids`        | ids            | O(log n + m)            |
//! | `find_top_k_words`           | ranks          | O(log n + k log n)      |
//! | `find_top_k_words_with_ids`  | ranks and ids  | O(log n + k log n)      |
//!
//! `m` is the number of matches. Results borrow from the index.

use std::ops::Range;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;
use tracing::debug;

use crate::binary;
use crate::config::{parse_separator, CompletionsConfig};
use crate::error::{CompletionError, Result};
use crate::ranking::{top_k_indices, RankOrder, RankTree, SegmentTree};
use crate::snapshot::{Snapshot, SnapshotRef, TreeRef, TreeSnapshot};
use crate::types::BuildRequest;
use crate::verify;

use super::word_store::{check_word, sorted_order, WordStore};

/// Prefix and top-k completions over a fixed vocabulary.
///
/// `I` is the caller's identifier type. Indexes built without identifiers
/// use the default `()`.
#[derive(Debug, Clone)]
pub struct CompletionIndex<I = ()> {
    store: WordStore,
    ranking: Option<RankTree>,
    ids: Option<Vec<I>>,
    /// False only for snapshots restored with `verify_snapshots` off.
    verified: bool,
}

/// A build request taken apart into co-indexed columns, in input order.
struct Columns<I> {
    words: Vec<String>,
    ranks: Option<Vec<f64>>,
    ids: Option<Vec<I>>,
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

impl CompletionIndex {
    /// Unranked index over `words`.
    pub fn from_words<S: Into<String>>(words: impl IntoIterator<Item = S>) -> Result<Self> {
        Self::build(BuildRequest::Words(
            words.into_iter().map(Into::into).collect(),
        ))
    }

    /// Ranked index over `(word, rank)` pairs.
    pub fn from_ranked_words<S: Into<String>>(
        words: impl IntoIterator<Item = (S, f64)>,
    ) -> Result<Self> {
        Self::build(BuildRequest::RankedWords(
            words.into_iter().map(|(w, r)| (w.into(), r)).collect(),
        ))
    }
}

impl<I> CompletionIndex<I> {
    /// Unranked index over `(word, id)` pairs.
    pub fn from_words_with_ids<S: Into<String>>(
        words: impl IntoIterator<Item = (S, I)>,
    ) -> Result<Self> {
        Self::build(BuildRequest::WordsWithIds(
            words.into_iter().map(|(w, id)| (w.into(), id)).collect(),
        ))
    }

    /// Ranked index over `(word, rank, id)` triples.
    pub fn from_ranked_words_with_ids<S: Into<String>>(
        words: impl IntoIterator<Item = (S, f64, I)>,
    ) -> Result<Self> {
        Self::build(BuildRequest::RankedWordsWithIds(
            words
                .into_iter()
                .map(|(w, r, id)| (w.into(), r, id))
                .collect(),
        ))
    }

    /// Build with the default configuration.
    pub fn build(request: BuildRequest<I>) -> Result<Self> {
        Self::build_with(request, &CompletionsConfig::default())
    }

    /// Build from any of the five construction modes.
    ///
    /// For [`BuildRequest::Snapshot`] the separator stored in the snapshot
    /// wins over `config.separator`.
    pub fn build_with(request: BuildRequest<I>, config: &CompletionsConfig) -> Result<Self> {
        let mode = request.mode();
        let columns = match request {
            BuildRequest::Words(words) => Columns {
                words,
                ranks: None,
                ids: None,
            },
            BuildRequest::WordsWithIds(entries) => {
                let (words, ids) = entries.into_iter().unzip();
                Columns {
                    words,
                    ranks: None,
                    ids: Some(ids),
                }
            }
            BuildRequest::RankedWords(entries) => {
                let (words, ranks) = entries.into_iter().unzip();
                Columns {
                    words,
                    ranks: Some(ranks),
                    ids: None,
                }
            }
            BuildRequest::RankedWordsWithIds(entries) => {
                let mut words = Vec::with_capacity(entries.len());
                let mut ranks = Vec::with_capacity(entries.len());
                let mut ids = Vec::with_capacity(entries.len());
                for (word, rank, id) in entries {
                    words.push(word);
                    ranks.push(rank);
                    ids.push(id);
                }
                Columns {
                    words,
                    ranks: Some(ranks),
                    ids: Some(ids),
                }
            }
            BuildRequest::Snapshot(snapshot) => return Self::from_snapshot(snapshot, config),
        };

        let index = Self::from_columns(columns, config.separator)?;
        debug!(
            mode,
            words = index.len(),
            buffer_bytes = index.store.buffer().len(),
            ranked = index.is_ranked(),
            ids = index.has_ids(),
            "built completion index"
        );
        Ok(index)
    }

    fn from_columns(columns: Columns<I>, separator: char) -> Result<Self> {
        let Columns { words, ranks, ids } = columns;

        for (index, word) in words.iter().enumerate() {
            check_word(index, word, separator)?;
        }
        if let Some(ranks) = &ranks {
            check_ranks(ranks)?;
        }

        let order = sorted_order(&words);
        let store = WordStore::from_sorted(order.iter().map(|&i| words[i].as_str()), separator);
        let ranking = ranks.map(|ranks| build_rank_tree(permute(ranks, &order)));
        let ids = ids.map(|ids| permute(ids, &order));

        verify::check_parallel_arrays(
            store.len(),
            ranking.as_ref().map(|tree| tree.combiner().ranks().len()),
            ids.as_ref().map(Vec::len),
        );

        Ok(Self {
            store,
            ranking,
            ids,
            verified: true,
        })
    }

    /// Restore an index from a snapshot without re-sorting or rebuilding.
    ///
    /// Shape is always validated: separator, offsets, array lengths, tree
    /// size and every tree slot. With `config.verify_snapshots` the word
    /// order and tree consistency are checked too.
    pub fn from_snapshot(snapshot: Snapshot<I>, config: &CompletionsConfig) -> Result<Self> {
        let Snapshot {
            buffer,
            word_starts,
            separator,
            tree,
            ranks,
            ids,
        } = snapshot;
        let verify = config.verify_snapshots;

        let separator = parse_separator(&separator)?;
        let store = WordStore::from_parts(buffer, word_starts, separator, verify)?;
        let n = store.len();

        let ranking = match (tree, ranks) {
            (Some(tree), Some(ranks)) => Some(restore_rank_tree(tree, ranks, n, verify)?),
            (None, None) => None,
            (Some(_), None) => {
                return Err(CompletionError::config(
                    "snapshot has a tree but no wordRankings",
                ))
            }
            (None, Some(_)) => {
                return Err(CompletionError::config(
                    "snapshot has wordRankings but no tree",
                ))
            }
        };

        if let Some(ids) = &ids {
            if ids.len() != n {
                return Err(CompletionError::config(format!(
                    "snapshot has {} wordIds for {} words",
                    ids.len(),
                    n
                )));
            }
        }

        debug!(
            words = n,
            ranked = ranking.is_some(),
            ids = ids.is_some(),
            verified = verify,
            "restored completion index from snapshot"
        );
        Ok(Self {
            store,
            ranking,
            ids,
            verified: verify,
        })
    }
}

/// Reject NaN ranks, which have no place in the order.
fn check_ranks(ranks: &[f64]) -> Result<()> {
    match ranks.iter().position(|rank| rank.is_nan()) {
        Some(index) => Err(CompletionError::InvalidRank { index }),
        None => Ok(()),
    }
}

/// Reorder `values` so that entry `i` is `values[order[i]]`.
fn permute<T>(values: Vec<T>, order: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = values.into_iter().map(Some).collect();
    order.iter().filter_map(|&i| slots[i].take()).collect()
}

/// Tree over `[0, n)` whose nodes hold the best-ranked index below them.
fn build_rank_tree(ranks: Vec<f64>) -> RankTree {
    let indices: Vec<usize> = (0..ranks.len()).collect();
    let tree = SegmentTree::new(&indices, RankOrder::new(ranks));
    verify::check_rank_tree(&tree);
    tree
}

fn restore_rank_tree(
    tree: TreeSnapshot,
    ranks: Vec<f64>,
    n: usize,
    verify: bool,
) -> Result<RankTree> {
    if ranks.len() != n {
        return Err(CompletionError::config(format!(
            "snapshot has {} wordRankings for {} words",
            ranks.len(),
            n
        )));
    }
    check_ranks(&ranks)?;
    if tree.n != n {
        return Err(CompletionError::config(format!(
            "snapshot tree covers {} words, index has {}",
            tree.n, n
        )));
    }

    let tree = SegmentTree::from_parts(tree.n, tree.data, RankOrder::new(ranks))?;

    // Slot 0 is unused. Every other slot is dereferenced as a word index.
    if let Some((slot, &value)) = tree
        .data()
        .iter()
        .enumerate()
        .skip(1)
        .find(|&(_, &value)| value >= n)
    {
        return Err(CompletionError::config(format!(
            "tree slot {} holds {}, outside 0..{}",
            slot, value, n
        )));
    }

    if verify {
        if let Some(idx) = (0..n).find(|&idx| tree.leaf(idx) != Some(idx)) {
            return Err(CompletionError::config(format!(
                "tree leaf {} does not hold its own index",
                idx
            )));
        }
        if !tree.is_consistent() {
            return Err(CompletionError::config(
                "tree internal nodes disagree with the rankings",
            ));
        }
    }
    Ok(tree)
}

// ============================================================================
// QUERIES
// ============================================================================

impl<I> CompletionIndex<I> {
    /// Sorted positions of the words starting with `prefix`.
    pub fn prefix_range(&self, prefix: &str) -> Range<usize> {
        self.store.prefix_bounds(prefix)
    }

    /// Number of words starting with `prefix`. O(log n).
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.prefix_range(prefix).len()
    }

    /// Every word starting with `prefix`, in code point order.
    ///
    /// The empty prefix returns the whole vocabulary.
    pub fn find_words(&self, prefix: &str) -> Vec<&str> {
        self.store.words_in(self.prefix_range(prefix)).collect()
    }

    /// Like [`find_words`](Self::find_words), paired with identifiers.
    pub fn find_words_with_ids(&self, prefix: &str) -> Result<Vec<(&str, &I)>> {
        let ids = self.ids.as_deref().ok_or(CompletionError::MissingIds)?;
        Ok(self
            .prefix_range(prefix)
            .filter_map(|i| Some((self.store.word_at(i)?, ids.get(i)?)))
            .collect())
    }

    /// The `k` best-ranked words starting with `prefix`, best first.
    ///
    /// Equal ranks come out in code point order. `k == 0` gives an empty
    /// result and `usize::MAX` gives every match.
    pub fn find_top_k_words(&self, prefix: &str, k: usize) -> Result<Vec<&str>> {
        Ok(self
            .top_k(prefix, k)?
            .into_iter()
            .filter_map(|i| self.store.word_at(i))
            .collect())
    }

    /// Like [`find_top_k_words`](Self::find_top_k_words), paired with identifiers.
    pub fn find_top_k_words_with_ids(&self, prefix: &str, k: usize) -> Result<Vec<(&str, &I)>> {
        if self.ranking.is_none() {
            return Err(CompletionError::MissingRanks);
        }
        let ids = self.ids.as_deref().ok_or(CompletionError::MissingIds)?;
        Ok(self
            .top_k(prefix, k)?
            .into_iter()
            .filter_map(|i| Some((self.store.word_at(i)?, ids.get(i)?)))
            .collect())
    }

    /// Every word starting with `prefix`, best rank first.
    pub fn find_all_ranked(&self, prefix: &str) -> Result<Vec<&str>> {
        self.find_top_k_words(prefix, usize::MAX)
    }

    fn top_k(&self, prefix: &str, k: usize) -> Result<Vec<usize>> {
        let tree = self.ranking.as_ref().ok_or(CompletionError::MissingRanks)?;
        let indices = top_k_indices(tree, self.prefix_range(prefix), k);
        if self.verified {
            verify::check_top_k_ordered(tree.combiner(), &indices);
        }
        Ok(indices)
    }
}

// ============================================================================
// ACCESSORS
// ============================================================================

impl<I> CompletionIndex<I> {
    /// Number of words.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn separator(&self) -> char {
        self.store.separator()
    }

    /// True if built with ranks, so top-k queries are available.
    pub fn is_ranked(&self) -> bool {
        self.ranking.is_some()
    }

    pub fn has_ids(&self) -> bool {
        self.ids.is_some()
    }

    /// Word at sorted position `index`.
    pub fn word(&self, index: usize) -> Option<&str> {
        self.store.word_at(index)
    }

    /// Every word in code point order.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.store.words()
    }

    /// Rank of the word at sorted position `index`.
    pub fn rank(&self, index: usize) -> Option<f64> {
        self.ranks()?.get(index).copied()
    }

    /// Identifier of the word at sorted position `index`.
    pub fn id(&self, index: usize) -> Option<&I> {
        self.ids.as_deref()?.get(index)
    }

    /// Ranks in sorted word order.
    pub fn ranks(&self) -> Option<&[f64]> {
        self.ranking.as_ref().map(|tree| tree.combiner().ranks())
    }

    /// Identifiers in sorted word order.
    pub fn ids(&self) -> Option<&[I]> {
        self.ids.as_deref()
    }

    pub fn word_store(&self) -> &WordStore {
        &self.store
    }

    pub fn rank_tree(&self) -> Option<&RankTree> {
        self.ranking.as_ref()
    }
}

// ============================================================================
// SERIALIZATION
// ============================================================================

impl<I> CompletionIndex<I> {
    /// Borrowed snapshot of the current state.
    pub fn as_snapshot(&self) -> SnapshotRef<'_, I> {
        SnapshotRef {
            buffer: self.store.buffer(),
            word_starts: self.store.word_starts(),
            separator: self.store.separator(),
            tree: self.ranking.as_ref().map(|tree| TreeRef {
                n: tree.len(),
                data: tree.data(),
            }),
            ranks: self.ranks(),
            ids: self.ids.as_deref(),
        }
    }

    /// Owned snapshot, consuming the index.
    pub fn into_snapshot(self) -> Snapshot<I> {
        let (buffer, word_starts, separator) = self.store.into_parts();
        let (tree, ranks) = match self.ranking {
            Some(ranking) => {
                let (n, data, order) = ranking.into_parts();
                (Some(TreeSnapshot { n, data }), Some(order.into_ranks()))
            }
            None => (None, None),
        };
        Snapshot {
            buffer,
            word_starts,
            separator: separator.to_string(),
            tree,
            ranks,
            ids: self.ids,
        }
    }
}

impl<I: Clone> CompletionIndex<I> {
    /// Owned snapshot of the current state.
    pub fn to_snapshot(&self) -> Snapshot<I> {
        self.as_snapshot().to_snapshot()
    }
}

impl<I: Serialize> CompletionIndex<I> {
    /// Serialize to the JSON snapshot format.
    ///
    /// JSON has no infinity, so an index holding an infinite rank fails with
    /// [`CompletionError::InvalidRank`]. The binary format stores it exactly.
    pub fn to_json(&self) -> Result<String> {
        if let Some(index) = self
            .ranks()
            .and_then(|ranks| ranks.iter().position(|rank| rank.is_infinite()))
        {
            return Err(CompletionError::InvalidRank { index });
        }
        Ok(serde_json::to_string(&self.as_snapshot())?)
    }

    /// Serialize to the checksummed binary snapshot format.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        binary::encode_snapshot(&self.as_snapshot())
    }
}

impl<I: DeserializeOwned> CompletionIndex<I> {
    /// Restore from JSON with the default configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_with(json, &CompletionsConfig::default())
    }

    /// Restore from JSON.
    ///
    /// Text that is not JSON is a [`CompletionError::Json`]. Well-formed JSON
    /// that lacks a required field or holds the wrong type is a
    /// [`CompletionError::Config`], like any other inconsistent snapshot.
    pub fn from_json_with(json: &str, config: &CompletionsConfig) -> Result<Self> {
        let snapshot: Snapshot<I> = serde_json::from_str(json).map_err(|e| match e.classify() {
            Category::Data => CompletionError::config(format!("invalid snapshot payload: {}", e)),
            _ => CompletionError::Json(e),
        })?;
        Self::from_snapshot(snapshot, config)
    }

    /// Restore from the binary format with the default configuration.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with(bytes, &CompletionsConfig::default())
    }

    pub fn from_bytes_with(bytes: &[u8], config: &CompletionsConfig) -> Result<Self> {
        Self::from_snapshot(binary::decode_snapshot(bytes)?, config)
    }
}
