// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction: the word store and the completion index built on it.
//!
//! - **Word store**: sorted words in one separator-delimited buffer, O(log n)
//!   prefix bounds by binary search over word starts
//! - **Completion index**: the word store plus optional ranks, ids and the
//!   rank tree, with every query and serialization entry point

mod completions;
mod word_store;

pub use completions::CompletionIndex;
pub use word_store::{check_word, WordStore};
