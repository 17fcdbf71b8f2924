// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for varint (LEB128) encoding/decoding.
//!
//! Varints carry every offset and tree slot in the binary format. If roundtrip
//! fails or decode panics on malformed input, everything built on top breaks.

#![no_main]

use fastcomplete::binary::{decode_tree, decode_varint, decode_word_starts, encode_varint};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // decode_varint returns Ok or Err, never panics
    if let Ok((value, consumed)) = decode_varint(data) {
        let mut reencoded = Vec::new();
        encode_varint(value, &mut reencoded);

        let (redecoded, reconsumed) = decode_varint(&reencoded)
            .expect("Re-encoding of valid value should always decode");
        assert_eq!(value, redecoded, "Roundtrip failed: {} != {}", value, redecoded);
        assert_eq!(reconsumed, reencoded.len());

        assert!(consumed <= 10, "Varint consumed {} bytes, max should be 10", consumed);
        assert!(consumed <= data.len());
    }

    // Section decoders built on varints must not panic either
    if let Ok(starts) = decode_word_starts(data, data.len().min(64)) {
        for pair in starts.windows(2) {
            assert!(pair[0] < pair[1], "word starts not ascending: {:?}", pair);
        }
    }
    if let Ok((n, slots)) = decode_tree(data) {
        assert_eq!(slots.len(), 2 * n);
    }
});
