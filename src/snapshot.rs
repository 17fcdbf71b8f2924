// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Plain-data snapshots of a built index.
//!
//! A snapshot is everything needed to answer queries without re-sorting or
//! rebuilding the tree. The JSON field names are the interchange format:
//!
//! ```json
//! {
//!   "string": "\u0001sally\u0001sells\u0001",
//!   "array": [0, 6],
//!   "SEPARATOR": "\u0001",
//!   "tree": { "n": 2, "data": [0, 0, 0, 1] },
//!   "wordRankings": [2.0, 5.0],
//!   "wordIds": ["a", "b"]
//! }
//! ```
//!
//! `tree` and `wordRankings` appear together or not at all. `wordIds` is
//! present only for indexes built with identifiers. Absent fields are omitted
//! on output and read as absent on input. On input `tree` may also be a
//! string holding the same `{ "n", "data" }` object as JSON text.
//!
//! [`Snapshot`] owns its data and is what decoding produces. [`SnapshotRef`]
//! borrows from a live index so encoding never clones the buffer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::CompletionsConfig;
use crate::index::CompletionIndex;

// ============================================================================
// OWNED SNAPSHOT
// ============================================================================

/// Serialized rank tree: leaf count and the `2n` slot array (slot 0 unused).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub n: usize,
    pub data: Vec<usize>,
}

/// Owned snapshot of a [`CompletionIndex`].
///
/// Nothing here is validated until it is handed to
/// [`CompletionIndex::from_snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<I = ()> {
    #[serde(rename = "string")]
    pub buffer: String,
    #[serde(rename = "array")]
    pub word_starts: Vec<usize>,
    #[serde(rename = "SEPARATOR")]
    pub separator: String,
    #[serde(
        default,
        deserialize_with = "deserialize_tree",
        skip_serializing_if = "Option::is_none"
    )]
    pub tree: Option<TreeSnapshot>,
    #[serde(rename = "wordRankings", skip_serializing_if = "Option::is_none")]
    pub ranks: Option<Vec<f64>>,
    #[serde(rename = "wordIds", skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<I>>,
}

/// `tree` as written: a nested object, or the same object encoded as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum TreeField {
    Nested(TreeSnapshot),
    Encoded(String),
}

fn deserialize_tree<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<TreeSnapshot>, D::Error> {
    match Option::<TreeField>::deserialize(deserializer)? {
        None => Ok(None),
        Some(TreeField::Nested(tree)) => Ok(Some(tree)),
        Some(TreeField::Encoded(json)) => serde_json::from_str(&json)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

// ============================================================================
// BORROWED SNAPSHOT
// ============================================================================

/// Borrowed rank tree view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeRef<'a> {
    pub n: usize,
    pub data: &'a [usize],
}

/// Borrowed snapshot of a live index. Serializes to the same JSON as
/// [`Snapshot`].
#[derive(Debug, Serialize)]
pub struct SnapshotRef<'a, I> {
    #[serde(rename = "string")]
    pub buffer: &'a str,
    #[serde(rename = "array")]
    pub word_starts: &'a [usize],
    #[serde(rename = "SEPARATOR", serialize_with = "serialize_char_as_str")]
    pub separator: char,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<TreeRef<'a>>,
    #[serde(rename = "wordRankings", skip_serializing_if = "Option::is_none")]
    pub ranks: Option<&'a [f64]>,
    #[serde(rename = "wordIds", skip_serializing_if = "Option::is_none")]
    pub ids: Option<&'a [I]>,
}

impl<I> Clone for SnapshotRef<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for SnapshotRef<'_, I> {}

fn serialize_char_as_str<S: Serializer>(c: &char, serializer: S) -> Result<S::Ok, S::Error> {
    let mut buf = [0u8; 4];
    serializer.serialize_str(c.encode_utf8(&mut buf))
}

impl<I: Clone> SnapshotRef<'_, I> {
    /// Copy the borrowed data into an owned [`Snapshot`].
    pub fn to_snapshot(&self) -> Snapshot<I> {
        Snapshot {
            buffer: self.buffer.to_owned(),
            word_starts: self.word_starts.to_vec(),
            separator: self.separator.to_string(),
            tree: self.tree.map(|t| TreeSnapshot {
                n: t.n,
                data: t.data.to_vec(),
            }),
            ranks: self.ranks.map(<[f64]>::to_vec),
            ids: self.ids.map(<[I]>::to_vec),
        }
    }
}

// ============================================================================
// SERDE FOR THE INDEX
// ============================================================================

impl<I: Serialize> Serialize for CompletionIndex<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_snapshot().serialize(serializer)
    }
}

/// Restores through [`CompletionIndex::from_snapshot`] with the default
/// configuration, so a deserialized index is validated like any other.
impl<'de, I: Deserialize<'de>> Deserialize<'de> for CompletionIndex<I> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let snapshot = Snapshot::<I>::deserialize(deserializer)?;
        CompletionIndex::from_snapshot(snapshot, &CompletionsConfig::default())
            .map_err(serde::de::Error::custom)
    }
}
