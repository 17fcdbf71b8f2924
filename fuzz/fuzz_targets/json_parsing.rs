// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! JSON snapshot parsing under adversarial input.
//!
//! The JSON form carries offsets and tree slots as plain numbers, so a
//! hand-edited snapshot can claim anything. Restoring must either reject it
//! or produce an index whose queries stay in bounds.

#![no_main]

use fastcomplete::{CompletionIndex, CompletionsConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    let unverified = CompletionsConfig::default().with_verify_snapshots(false);
    for config in [CompletionsConfig::default(), unverified] {
        let Ok(index) = CompletionIndex::<String>::from_json_with(json, &config) else {
            continue;
        };
        let all = index.find_words("");
        assert_eq!(all.len(), index.len());
        if index.is_ranked() {
            let top = index
                .find_top_k_words("", usize::MAX)
                .expect("ranked index must answer top-k");
            assert!(top.len() <= index.len());
        }
        if index.has_ids() {
            let with_ids = index
                .find_words_with_ids("")
                .expect("index with ids must answer id queries");
            assert_eq!(with_ids.len(), index.len());
        }

        // Whatever restored must serialize again
        let json = index.to_json().expect("restored index must serialize");
        let again = CompletionIndex::<String>::from_json_with(&json, &config)
            .expect("serialized index must restore");
        assert_eq!(again.len(), index.len());
    }
});
