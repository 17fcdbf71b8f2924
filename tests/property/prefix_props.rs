//! Prefix query soundness and completeness.
//!
//! Verifies that:
//! 1. `find_words("")` returns the whole vocabulary in code point order
//! 2. every returned word starts with the prefix (soundness)
//! 3. every matching input word is returned exactly once (completeness)
//! 4. ids stay attached to their words after sorting

use super::common::{assert_index_well_formed, brute_force_prefix};
use fastcomplete::CompletionIndex;
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Short words over a small alphabet, so prefixes collide often.
fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-d]{1,6}").unwrap()
}

/// Words with multi-byte characters mixed in.
fn unicode_word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[aéz日]{1,4}").unwrap()
}

fn vocabulary_strategy() -> impl Strategy<Value = Vec<String>> {
    prop_oneof![
        4 => prop::collection::vec(word_strategy(), 0..40),
        1 => prop::collection::vec(unicode_word_strategy(), 0..20),
    ]
}

fn prefix_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-dé日]{0,4}").unwrap()
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    /// Property: the empty prefix lists every word, sorted.
    #[test]
    fn prop_empty_prefix_returns_everything(words in vocabulary_strategy()) {
        let index = CompletionIndex::from_words(words.clone()).unwrap();
        assert_index_well_formed(&index);

        let mut expected: Vec<&str> = words.iter().map(String::as_str).collect();
        expected.sort_unstable();
        prop_assert_eq!(index.find_words(""), expected);
    }

    /// Property: results equal the brute-force filter, in order.
    #[test]
    fn prop_find_words_matches_oracle(
        words in vocabulary_strategy(),
        prefix in prefix_strategy(),
    ) {
        let index = CompletionIndex::from_words(words.clone()).unwrap();
        let input: Vec<&str> = words.iter().map(String::as_str).collect();

        let found = index.find_words(&prefix);
        for word in &found {
            prop_assert!(word.starts_with(prefix.as_str()), "{:?} does not start with {:?}", word, prefix);
        }
        prop_assert_eq!(&found, &brute_force_prefix(&input, &prefix));
        prop_assert_eq!(index.count_prefix(&prefix), found.len());
    }

    /// Property: a prefix of a stored word always finds that word.
    #[test]
    fn prop_every_word_finds_itself(words in prop::collection::vec(word_strategy(), 1..30)) {
        let index = CompletionIndex::from_words(words.clone()).unwrap();
        for word in &words {
            for cut in (1..=word.len()).filter(|&c| word.is_char_boundary(c)) {
                prop_assert!(index.find_words(&word[..cut]).contains(&word.as_str()));
            }
        }
    }

    /// Property: ids follow their words through the sort.
    #[test]
    fn prop_ids_stay_attached(
        words in prop::collection::vec(word_strategy(), 0..30),
        prefix in prefix_strategy(),
    ) {
        let entries: Vec<(String, usize)> = words.iter().cloned().enumerate().map(|(i, w)| (w, i)).collect();
        let index = CompletionIndex::from_words_with_ids(entries).unwrap();
        assert_index_well_formed(&index);

        for (word, &id) in index.find_words_with_ids(&prefix).unwrap() {
            prop_assert_eq!(word, words[id].as_str());
        }
    }

    /// Property: any single-character separator that no word uses works the same.
    #[test]
    fn prop_custom_separator_same_results(
        words in prop::collection::vec(word_strategy(), 0..30),
        prefix in prefix_strategy(),
        separator in prop::sample::select(vec!["|", "#", "§", "\u{1F600}"]),
    ) {
        use fastcomplete::{BuildRequest, CompletionsConfig};

        let config = CompletionsConfig::default().with_separator(separator).unwrap();
        let custom: CompletionIndex =
            CompletionIndex::build_with(BuildRequest::Words(words.clone()), &config).unwrap();
        let default = CompletionIndex::from_words(words).unwrap();
        assert_index_well_formed(&custom);
        prop_assert_eq!(custom.find_words(&prefix), default.find_words(&prefix));
    }
}
