// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Construction options.
//!
//! There are only two knobs. The separator is the reserved code point that
//! delimits words in the concatenated buffer. Snapshot verification decides
//! how much of a deserialized index is re-checked before it is trusted.
//!
//! Word order is fixed to Unicode code point order, which is the same as
//! UTF-8 byte order. It is not configurable: prefix bounds depend on the
//! build-time order and the query-time comparison agreeing exactly, and
//! locale-sensitive collation does not give that guarantee across machines.

use serde::{Deserialize, Serialize};

use crate::error::{CompletionError, Result};

/// Default separator: U+0001 (START OF HEADING), never found in ordinary words.
pub const DEFAULT_SEPARATOR: char = '\u{1}';

/// Options applied when building or restoring a [`CompletionIndex`](crate::CompletionIndex).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompletionsConfig {
    /// Reserved word delimiter. Words containing it are rejected.
    pub separator: char,
    /// Run the O(n) structural checks when restoring a snapshot.
    ///
    /// With this off only O(1) shape checks and index bounds are validated,
    /// so a corrupted payload can produce wrong (but memory-safe) results.
    pub verify_snapshots: bool,
}

impl Default for CompletionsConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            verify_snapshots: true,
        }
    }
}

impl CompletionsConfig {
    /// Use `separator`, which must be exactly one character.
    pub fn with_separator(mut self, separator: &str) -> Result<Self> {
        self.separator = parse_separator(separator)?;
        Ok(self)
    }

    pub fn with_verify_snapshots(mut self, verify: bool) -> Self {
        self.verify_snapshots = verify;
        self
    }
}

/// Parse a separator string, enforcing the one-character rule.
pub(crate) fn parse_separator(separator: &str) -> Result<char> {
    let mut chars = separator.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CompletionError::config(format!(
            "separator must be exactly one character, got {} characters",
            separator.chars().count()
        ))),
    }
}
