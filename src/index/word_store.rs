// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sorted words packed into one separator-delimited buffer.
//!
//! Instead of a suffix for every character, only word starts matter:
//! completions always begin at a word boundary. So every word is stored once,
//! prefixed by the separator, and the index keeps the byte offset of each
//! leading separator.
//!
//! ```text
//! words (sorted): so, soap, soapy, soupy        SEP = ·
//!
//! buffer:  · s o · s o a p · s o a p y · s o u p y ·
//! offset:  0       3         8            14          20
//! word_starts = [0, 3, 8, 14]
//! ```
//!
//! # INVARIANTS
//!
//! 1. **DELIMITED**: every word is preceded by exactly one separator, and the
//!    buffer ends with a separator. Words never contain the separator.
//! 2. **ASCENDING**: `word_starts` is strictly increasing, and entry `i` points
//!    at the separator in front of the `i`-th word in code point order.
//!
//! Because every stored word carries the same leading separator, the order of
//! `SEP + word` strings equals the order of the words, which is what makes
//! binary search over `word_starts` valid.
//!
//! # Offsets
//!
//! Offsets are UTF-8 byte offsets. Comparison is byte-wise, which for valid
//! UTF-8 is exactly Unicode code point order.

use std::cmp::Ordering;
use std::ops::Range;

use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{CompletionError, Result};
use crate::search::{leftmost_match, rightmost_match};

/// Concatenated word buffer plus the offset of every word's leading separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordStore {
    buffer: String,
    word_starts: Vec<usize>,
    separator: char,
}

/// Reject words that cannot be stored: empty ones, and ones containing `separator`.
///
/// `index` is reported back so callers can find the offending input.
pub fn check_word(index: usize, word: &str, separator: char) -> Result<()> {
    if word.is_empty() {
        return Err(CompletionError::InvalidWord {
            index,
            reason: "word is empty",
        });
    }
    if word.contains(separator) {
        return Err(CompletionError::InvalidWord {
            index,
            reason: "word contains the separator",
        });
    }
    Ok(())
}

/// Permutation that puts `words` in code point order. Stable for duplicates.
pub(crate) fn sorted_order<S: AsRef<str> + Sync>(words: &[S]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..words.len()).collect();
    #[cfg(feature = "parallel")]
    {
        order.par_sort_by(|&a, &b| words[a].as_ref().cmp(words[b].as_ref()));
    }
    #[cfg(not(feature = "parallel"))]
    {
        order.sort_by(|&a, &b| words[a].as_ref().cmp(words[b].as_ref()));
    }
    order
}

impl WordStore {
    /// Validate, sort and pack `words`.
    pub fn build<S: AsRef<str> + Sync>(words: &[S], separator: char) -> Result<Self> {
        for (index, word) in words.iter().enumerate() {
            check_word(index, word.as_ref(), separator)?;
        }
        let order = sorted_order(words);
        Ok(Self::from_sorted(
            order.iter().map(|&i| words[i].as_ref()),
            separator,
        ))
    }

    /// Pack words that are already validated and sorted.
    pub(crate) fn from_sorted<'a, W>(words: W, separator: char) -> Self
    where
        W: IntoIterator<Item = &'a str>,
        W::IntoIter: ExactSizeIterator,
    {
        let words = words.into_iter();
        let mut word_starts = Vec::with_capacity(words.len());
        let mut buffer = String::new();
        for word in words {
            word_starts.push(buffer.len());
            buffer.push(separator);
            buffer.push_str(word);
        }
        buffer.push(separator);

        debug!(
            words = word_starts.len(),
            buffer_bytes = buffer.len(),
            "packed word store"
        );
        let store = Self {
            buffer,
            word_starts,
            separator,
        };
        crate::verify::check_word_store(&store);
        store
    }

    /// Restore a store from its persisted parts.
    ///
    /// Offsets are always bounds-checked, so a hostile payload cannot make
    /// later queries panic. With `verify` set, the full layout is checked too:
    /// words are non-empty, separator-free, contiguous and sorted.
    pub fn from_parts(
        buffer: String,
        word_starts: Vec<usize>,
        separator: char,
        verify: bool,
    ) -> Result<Self> {
        let sep_len = separator.len_utf8();
        if !buffer.ends_with(separator) {
            return Err(CompletionError::config(
                "word buffer must end with the separator",
            ));
        }

        let mut previous: Option<usize> = None;
        for (i, &offset) in word_starts.iter().enumerate() {
            if previous.is_some_and(|p| offset <= p) {
                return Err(CompletionError::config(format!(
                    "word start offsets not ascending at position {}",
                    i
                )));
            }
            let on_separator = offset + sep_len <= buffer.len()
                && buffer.is_char_boundary(offset)
                && buffer[offset..].starts_with(separator);
            if !on_separator {
                return Err(CompletionError::config(format!(
                    "word start offset {} at position {} does not point at a separator",
                    offset, i
                )));
            }
            previous = Some(offset);
        }

        let store = Self {
            buffer,
            word_starts,
            separator,
        };
        if verify {
            store.verify_layout()?;
        }
        Ok(store)
    }

    /// Deep layout check used when restoring untrusted snapshots.
    fn verify_layout(&self) -> Result<()> {
        let sep_len = self.separator.len_utf8();
        if self.word_starts.first().is_some_and(|&first| first != 0) {
            return Err(CompletionError::config(
                "first word must start at offset 0",
            ));
        }
        for (i, &offset) in self.word_starts.iter().enumerate() {
            let expected_end = self
                .word_starts
                .get(i + 1)
                .copied()
                .unwrap_or(self.buffer.len() - sep_len);
            let end = self.word_end(offset);
            if end != expected_end || end == offset + sep_len {
                return Err(CompletionError::config(format!(
                    "word {} is empty or not followed by the next word",
                    i
                )));
            }
        }
        for i in 1..self.word_starts.len() {
            if self.word_at(i - 1) > self.word_at(i) {
                return Err(CompletionError::config(format!(
                    "words not sorted at position {}",
                    i
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.word_starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_starts.is_empty()
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// The concatenated buffer, `SEP w0 SEP w1 ... SEP`.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn word_starts(&self) -> &[usize] {
        &self.word_starts
    }

    pub fn into_parts(self) -> (String, Vec<usize>, char) {
        (self.buffer, self.word_starts, self.separator)
    }

    /// Half-open range of sorted word indices whose words start with `prefix`.
    ///
    /// An empty prefix matches every word. A prefix containing the separator
    /// matches nothing, since no stored word contains it.
    pub fn prefix_bounds(&self, prefix: &str) -> Range<usize> {
        if prefix.contains(self.separator) {
            return 0..0;
        }
        let mut target = String::with_capacity(prefix.len() + self.separator.len_utf8());
        target.push(self.separator);
        target.push_str(prefix);
        let target = target.as_bytes();

        let cmp = |&offset: &usize, target: &[u8]| self.compare_at(offset, target);
        let left = leftmost_match(&self.word_starts, target, cmp);
        let right = rightmost_match(&self.word_starts, target, cmp).map_or(0, |i| i + 1);
        left..right.max(left)
    }

    /// Compare the stored `SEP + word` at `offset`, cut to `target.len()`
    /// bytes, against `target`.
    ///
    /// The cut never crosses the word's closing separator. Without that, a
    /// short word followed by the next word's separator and letters could
    /// compare as a longer match.
    fn compare_at(&self, offset: usize, target: &[u8]) -> Ordering {
        let end = offset
            .saturating_add(target.len())
            .min(self.word_end(offset));
        self.buffer.as_bytes()[offset..end].cmp(target)
    }

    /// Byte offset of the separator closing the word whose leading separator is at `offset`.
    #[inline]
    fn word_end(&self, offset: usize) -> usize {
        let body = offset + self.separator.len_utf8();
        self.buffer[body..]
            .find(self.separator)
            .map_or(self.buffer.len(), |pos| body + pos)
    }

    /// Word at sorted position `index`.
    pub fn word_at(&self, index: usize) -> Option<&str> {
        let offset = *self.word_starts.get(index)?;
        let start = offset + self.separator.len_utf8();
        Some(&self.buffer[start..self.word_end(offset)])
    }

    /// Words in `range`, in sorted order.
    pub fn words_in(&self, range: Range<usize>) -> impl Iterator<Item = &str> + '_ {
        range.filter_map(move |i| self.word_at(i))
    }

    /// Every word, in sorted order.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words_in(0..self.len())
    }
}
