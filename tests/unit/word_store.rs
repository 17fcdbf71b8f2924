//! Word store layout and prefix bounds with non-default separators and Unicode words.

use fastcomplete::{leftmost_match, rightmost_match, WordStore};

#[test]
fn test_visible_separator_layout() {
    let store = WordStore::build(&["soupy", "so", "soapy", "soap"], '|').unwrap();
    assert_eq!(store.buffer(), "|so|soap|soapy|soupy|");
    assert_eq!(store.word_starts(), &[0, 3, 8, 14]);
    assert_eq!(store.prefix_bounds("soa"), 1..3);
}

#[test]
fn test_multibyte_separator() {
    let store = WordStore::build(&["über", "uber", "ü", "ubel"], '§').unwrap();
    let words: Vec<&str> = store.words().collect();
    assert_eq!(words, vec!["ubel", "uber", "ü", "über"]);
    assert_eq!(store.words_in(store.prefix_bounds("ü")).count(), 2);
    assert_eq!(store.words_in(store.prefix_bounds("ub")).count(), 2);
    assert_eq!(store.prefix_bounds("übers"), 4..4);
}

#[test]
fn test_code_point_order_not_locale_order() {
    // Uppercase sorts before lowercase in code point order.
    let store = WordStore::build(&["apple", "Banana", "cherry", "Apple"], '\u{1}').unwrap();
    let words: Vec<&str> = store.words().collect();
    assert_eq!(words, vec!["Apple", "Banana", "apple", "cherry"]);
    assert_eq!(store.words_in(store.prefix_bounds("a")).collect::<Vec<_>>(), vec!["apple"]);
}

#[test]
fn test_prefix_longer_than_any_word() {
    let store = WordStore::build(&["a", "ab", "b"], '\u{1}').unwrap();
    assert_eq!(store.prefix_bounds("abc"), 2..2);
    assert_eq!(store.prefix_bounds("ab"), 1..2);
}

#[test]
fn test_duplicates_are_kept() {
    let store = WordStore::build(&["so", "so", "soap"], '\u{1}').unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(store.prefix_bounds("so"), 0..3);
    assert_eq!(store.prefix_bounds("soa"), 2..3);
}

#[test]
fn test_from_parts_rejects_broken_layouts() {
    // Offset not on a separator
    assert!(WordStore::from_parts("|a|b|".into(), vec![0, 1], '|', false).is_err());
    // Missing trailing separator
    assert!(WordStore::from_parts("|a|b".into(), vec![0, 2], '|', false).is_err());
    // Unsorted words are only caught with verification
    assert!(WordStore::from_parts("|b|a|".into(), vec![0, 2], '|', false).is_ok());
    assert!(WordStore::from_parts("|b|a|".into(), vec![0, 2], '|', true).is_err());
}

#[test]
fn test_bisection_sentinels() {
    let values = [1, 3, 3, 5];
    let cmp = |a: &i32, b: &i32| a.cmp(b);
    assert_eq!(leftmost_match(&values, &3, cmp), 1);
    assert_eq!(rightmost_match(&values, &3, cmp), Some(2));
    assert_eq!(leftmost_match(&values, &9, cmp), 4);
    assert_eq!(rightmost_match(&values, &0, cmp), None);

    let empty: [i32; 0] = [];
    assert_eq!(leftmost_match(&empty, &1, cmp), 0);
    assert_eq!(rightmost_match(&empty, &1, cmp), None);
}
