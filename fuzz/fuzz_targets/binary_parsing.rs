// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary snapshot parsing under adversarial input.
//!
//! A snapshot fetched from a cache or a CDN is untrusted. The worst case
//! should be an error message, not a panic: varints that decode to
//! usize::MAX, truncated headers, trees pointing past the word count and
//! CRCs that lie about the data they protect.

#![no_main]

use fastcomplete::{CompletionIndex, CompletionsConfig};
use libfuzzer_sys::fuzz_target;

fn exercise(index: &CompletionIndex<u32>) {
    for prefix in ["", "a", "s", "\u{1}", "zzzz"] {
        let words = index.find_words(prefix);
        assert_eq!(words.len(), index.count_prefix(prefix));
        if index.is_ranked() {
            let top = index
                .find_top_k_words(prefix, 3)
                .expect("ranked index must answer top-k");
            assert!(top.len() <= 3);
            assert!(top.len() <= words.len());
        }
    }
}

/// Every path through `from_bytes` must terminate safely, verified or not.
fuzz_target!(|data: &[u8]| {
    if let Ok(index) = CompletionIndex::<u32>::from_bytes(data) {
        // A verified restore upholds the same invariants as a fresh build
        let words: Vec<&str> = index.words().collect();
        for pair in words.windows(2) {
            assert!(pair[0] <= pair[1], "words out of order: {:?}", pair);
        }
        if let Some(tree) = index.rank_tree() {
            assert!(tree.is_consistent());
        }
        exercise(&index);
    }

    // Unverified restores may answer wrongly but must not crash
    let unverified = CompletionsConfig::default().with_verify_snapshots(false);
    if let Ok(index) = CompletionIndex::<u32>::from_bytes_with(data, &unverified) {
        exercise(&index);
    }
});
