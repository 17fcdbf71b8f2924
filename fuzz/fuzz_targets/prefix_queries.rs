// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Prefix and top-k queries against a brute-force reference.
//!
//! Arbitrary words, arbitrary ranks, arbitrary prefixes. Emoji, combining
//! marks and the separator itself all show up. The index must agree with a
//! linear scan on every one of them.

#![no_main]

use arbitrary::Arbitrary;
use fastcomplete::testing::{brute_force_prefix, brute_force_top_k};
use fastcomplete::{CompletionError, CompletionIndex, DEFAULT_SEPARATOR};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    words: Vec<(String, i16)>,
    prefix: String,
    k: u8,
}

fuzz_target!(|input: Input| {
    // Cap sizes to avoid timeouts
    let ranked: Vec<(&str, f64)> = input
        .words
        .iter()
        .take(256)
        .map(|(w, r)| (w.as_str(), f64::from(*r)))
        .collect();
    let k = usize::from(input.k);

    let index = match CompletionIndex::from_ranked_words(ranked.iter().copied()) {
        Ok(index) => index,
        Err(CompletionError::InvalidWord { .. }) => {
            assert!(ranked
                .iter()
                .any(|(w, _)| w.is_empty() || w.contains(DEFAULT_SEPARATOR)));
            return;
        }
        Err(e) => panic!("unexpected build error: {}", e),
    };

    let words: Vec<&str> = ranked.iter().map(|&(w, _)| w).collect();
    let expected = brute_force_prefix(&words, &input.prefix);
    assert_eq!(index.find_words(&input.prefix), expected);
    assert_eq!(index.count_prefix(&input.prefix), expected.len());

    let top = index
        .find_top_k_words(&input.prefix, k)
        .expect("ranked index must answer top-k");
    assert_eq!(top, brute_force_top_k(&ranked, &input.prefix, k));
});
