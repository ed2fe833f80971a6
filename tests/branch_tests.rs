#![cfg(feature = "chain")]
//! Unit tests for the branch contract and its provided implementations.

use std::collections::{BTreeMap, BTreeSet};

use catena::prelude::*;
use rstest::rstest;

/// A forward-only branch that yields `0, step, 2 * step, ...` below `limit`.
#[derive(Debug, Clone, PartialEq)]
struct Stride {
    values: Vec<u32>,
}

impl Stride {
    fn new(step: u32, limit: u32) -> Self {
        Self {
            values: (0..limit).step_by(step as usize).collect(),
        }
    }
}

impl Branch for Stride {
    type Element = u32;
    type Index = usize;

    fn start_index(&self) -> usize {
        0
    }

    fn end_index(&self) -> usize {
        self.values.len()
    }

    fn index_after(&self, index: &usize) -> usize {
        assert!(*index < self.values.len(), "stride advanced past end");
        index + 1
    }

    fn element(&self, index: &usize) -> &u32 {
        &self.values[*index]
    }
}

// =============================================================================
// Provided Methods
// =============================================================================

#[rstest]
fn test_default_count_walks_indices() {
    let stride = Stride::new(3, 10);
    assert_eq!(stride.count(), 4);
    assert!(!stride.is_empty());
    assert!(Stride::new(1, 0).is_empty());
}

#[rstest]
fn test_default_offsets_walk_from_start() {
    let stride = Stride::new(2, 8);
    assert_eq!(stride.offset_of(&3), 3);
    assert_eq!(stride.index_at_offset(4), stride.end_index());
}

#[rstest]
fn test_default_queries_use_elements() {
    let stride = Stride::new(5, 20);
    assert!(stride.contains(&15));
    assert!(!stride.contains(&16));
    assert_eq!(stride.min_element(), Some(&0));
    assert_eq!(stride.max_element(), Some(&15));
}

#[rstest]
#[should_panic(expected = "branch index 5 is out of bounds for a branch of 4 elements")]
fn test_default_index_at_offset_past_end_panics() {
    let _ = Stride::new(3, 10).index_at_offset(5);
}

#[rstest]
#[should_panic(expected = "index is not reachable within a branch of 4 elements")]
fn test_default_offset_of_unreachable_index_panics() {
    let _ = Stride::new(3, 10).offset_of(&10);
}

#[rstest]
#[should_panic(expected = "branch index 4 is out of bounds for a branch of 4 elements")]
fn test_forward_only_branch_end_position_panics() {
    let chain = Chain::new(product!(Stride::new(3, 10), vec![50]));
    let _ = chain.offset_of(&ChainIndex::at::<Rank0>(4));
}

// =============================================================================
// Forward-Only Chains
// =============================================================================

#[rstest]
fn test_forward_only_branch_supports_offsets() {
    let chain = Chain::new(product!(Stride::new(4, 9), vec![100, 200]));
    assert_eq!(chain.len(), 5);

    let index = chain.index_at(3);
    assert_eq!(chain.locate(&index), Some((1, 0)));
    assert_eq!(chain[&index], 100);
    assert_eq!(chain.offset_of(&index), 3);
    assert_eq!(chain.distance(&chain.start_index(), &chain.end_index()), 5);
}

#[rstest]
fn test_forward_only_branch_iterates_and_queries() {
    let chain = Chain::new(product!(Vec::new(), Stride::new(10, 30)));
    assert_eq!(chain.iter().copied().collect::<Vec<_>>(), vec![0, 10, 20]);
    assert_eq!(chain.first(), Some(&0));
    assert_eq!(chain.max(), Some(&20));
    assert!(chain.contains(&10));
}

// =============================================================================
// Keyed Branches
// =============================================================================

#[rstest]
fn test_set_branch_chains_in_key_order() {
    let set: BTreeSet<char> = "dbca".chars().collect();
    let chain = Chain::new(product!(vec!['z'], set));
    assert_eq!(chain.to_string(), "[z, a, b, c, d]");

    let index = chain.index_at(2);
    assert_eq!(index, ChainIndex::at::<Rank1>(KeyIndex::Key('b')));
    assert_eq!(chain.offset_of(&index), 2);
    assert_eq!(chain.index_before(&index), ChainIndex::at::<Rank1>(KeyIndex::Key('a')));
}

#[rstest]
fn test_map_branch_yields_values() {
    let map: BTreeMap<u8, &str> = [(2, "two"), (1, "one")].into_iter().collect();
    let chain = Chain::new(product!(map, ["three"]));
    assert_eq!(
        chain.iter().copied().collect::<Vec<_>>(),
        vec!["one", "two", "three"]
    );
    assert_eq!(chain.last(), Some(&"three"));
}

#[rstest]
fn test_map_branch_mutation_is_copy_on_write() {
    let map: BTreeMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
    let original = Chain::new(product!(map, vec![3]));
    let mut copy = original.clone();

    let index = ChainIndex::at::<Rank0>(KeyIndex::Key("b"));
    *copy.element_mut(&index) *= 10;

    assert_eq!(original[&index], 2);
    assert_eq!(copy[&index], 20);
}

#[rstest]
#[should_panic(expected = "key index does not name an element of the branch")]
fn test_missing_key_panics() {
    let set: BTreeSet<i32> = [1, 2].into_iter().collect();
    let chain = Chain::new(product!(set));
    let _element = &chain[&ChainIndex::at::<Rank0>(KeyIndex::Key(7))];
}

#[rstest]
fn test_key_index_orders_end_last() {
    assert!(KeyIndex::Key(u64::MAX) < KeyIndex::End);
}
