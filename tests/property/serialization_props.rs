//! Serialization round trips preserve every query.
//!
//! For any built index, restoring from JSON or from the binary format must
//! give identical results for all four query kinds on every tested prefix.

use super::common::assert_index_well_formed;
use fastcomplete::{CompletionIndex, CompletionsConfig};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

fn entries_strategy() -> impl Strategy<Value = Vec<(String, f64, u32)>> {
    prop::collection::vec(
        (
            prop::string::string_regex("[a-cü]{1,5}").unwrap(),
            -100.0f64..100.0,
            any::<u32>(),
        ),
        0..40,
    )
}

fn prefixes_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[a-cü]{0,3}").unwrap(), 1..8)
}

fn assert_same_answers(
    original: &CompletionIndex<u32>,
    restored: &CompletionIndex<u32>,
    prefixes: &[String],
) -> Result<(), TestCaseError> {
    assert_index_well_formed(restored);
    prop_assert_eq!(original.len(), restored.len());
    for prefix in prefixes {
        prop_assert_eq!(original.find_words(prefix), restored.find_words(prefix));
        prop_assert_eq!(
            original.find_words_with_ids(prefix).unwrap(),
            restored.find_words_with_ids(prefix).unwrap()
        );
        for k in [1, 3, usize::MAX] {
            prop_assert_eq!(
                original.find_top_k_words(prefix, k).unwrap(),
                restored.find_top_k_words(prefix, k).unwrap()
            );
            prop_assert_eq!(
                original.find_top_k_words_with_ids(prefix, k).unwrap(),
                restored.find_top_k_words_with_ids(prefix, k).unwrap()
            );
        }
    }
    Ok(())
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    /// Property: JSON round trip is lossless.
    #[test]
    fn prop_json_round_trip(entries in entries_strategy(), prefixes in prefixes_strategy()) {
        let index = CompletionIndex::from_ranked_words_with_ids(entries).unwrap();
        let json = index.to_json().unwrap();
        let restored = CompletionIndex::<u32>::from_json(&json).unwrap();
        assert_same_answers(&index, &restored, &prefixes)?;
        prop_assert_eq!(restored.to_snapshot(), index.to_snapshot());
    }

    /// Property: binary round trip is lossless, ranks bit for bit.
    #[test]
    fn prop_binary_round_trip(entries in entries_strategy(), prefixes in prefixes_strategy()) {
        let index = CompletionIndex::from_ranked_words_with_ids(entries).unwrap();
        let bytes = index.to_bytes().unwrap();
        let restored = CompletionIndex::<u32>::from_bytes(&bytes).unwrap();
        assert_same_answers(&index, &restored, &prefixes)?;
        prop_assert_eq!(restored.to_snapshot(), index.to_snapshot());
    }

    /// Property: skipping deep verification changes nothing for honest snapshots.
    #[test]
    fn prop_unverified_restore_agrees(entries in entries_strategy(), prefixes in prefixes_strategy()) {
        let index = CompletionIndex::from_ranked_words_with_ids(entries).unwrap();
        let config = CompletionsConfig::default().with_verify_snapshots(false);
        let restored = CompletionIndex::from_snapshot(index.to_snapshot(), &config).unwrap();
        assert_same_answers(&index, &restored, &prefixes)?;
    }

    /// Property: a single flipped byte never decodes into a different index.
    #[test]
    fn prop_binary_corruption_detected(
        entries in entries_strategy(),
        position in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let index = CompletionIndex::from_ranked_words_with_ids(entries).unwrap();
        let mut bytes = index.to_bytes().unwrap();
        let at = position.index(bytes.len());
        bytes[at] ^= flip;
        prop_assert!(CompletionIndex::<u32>::from_bytes(&bytes).is_err());
    }
}
