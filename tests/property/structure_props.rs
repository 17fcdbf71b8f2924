//! Building blocks against their brute-force definitions.
//!
//! - segment tree range minimum vs scanning the subarray
//! - leftmost/rightmost bisection vs a linear scan
//! - heap pop order vs a stable sort

use fastcomplete::{leftmost_match, rightmost_match, PriorityQueue, SegmentTree};
use proptest::prelude::*;

proptest! {
    /// Property: range_query(i, j) is the minimum of values[i..j] for every i < j.
    #[test]
    fn prop_segment_tree_min_matches_brute_force(
        values in prop::collection::vec(-1000i32..1000, 1..64),
    ) {
        let tree = SegmentTree::new(&values, |a: i32, b: i32| a.min(b));
        for i in 0..values.len() {
            for j in i + 1..=values.len() {
                prop_assert_eq!(tree.range_query(i, j), values[i..j].iter().copied().min());
            }
        }
    }

    /// Property: point updates keep every range correct.
    #[test]
    fn prop_segment_tree_updates(
        values in prop::collection::vec(0u32..100, 1..40),
        updates in prop::collection::vec((any::<prop::sample::Index>(), 0u32..100), 0..20),
    ) {
        let mut values = values;
        let mut tree = SegmentTree::new(&values, |a: u32, b: u32| a.max(b));
        for (slot, value) in updates {
            let idx = slot.index(values.len());
            values[idx] = value;
            tree.update(idx, value);
        }
        prop_assert!(tree.is_consistent());
        for i in 0..values.len() {
            for j in i + 1..=values.len() {
                prop_assert_eq!(tree.range_query(i, j), values[i..j].iter().copied().max());
            }
        }
    }

    /// Property: bisection agrees with a linear scan on sorted input.
    #[test]
    fn prop_bisection_matches_linear_scan(
        mut values in prop::collection::vec(0u8..20, 0..50),
        target in 0u8..22,
    ) {
        values.sort_unstable();
        let cmp = |a: &u8, b: &u8| a.cmp(b);

        let leftmost = values.iter().position(|&v| v >= target).unwrap_or(values.len());
        let rightmost = values.iter().rposition(|&v| v <= target);
        prop_assert_eq!(leftmost_match(&values, &target, cmp), leftmost);
        prop_assert_eq!(rightmost_match(&values, &target, cmp), rightmost);
    }

    /// Property: the heap pops in the same order as a stable sort by (priority, id).
    #[test]
    fn prop_heap_matches_sort(items in prop::collection::vec((0u16..50, 0usize..1000), 0..100)) {
        let mut queue = PriorityQueue::new();
        for &(priority, id) in &items {
            queue.push(id, (priority, id));
        }
        let mut expected = items.clone();
        expected.sort_unstable();

        let mut popped = Vec::new();
        while let Some(id) = queue.pop() {
            popped.push(id);
        }
        prop_assert_eq!(popped, expected.into_iter().map(|(_, id)| id).collect::<Vec<_>>());
    }
}
