#![cfg(all(feature = "serde", feature = "chain"))]
//! Serialization tests for the algebra and chain types.

use std::collections::BTreeSet;

use catena::prelude::*;
use rstest::rstest;

#[rstest]
fn test_product_serializes_as_nested_fields() {
    let value: Product![i32, String] = product!(1, "a".to_string());
    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, r#"{"head":1,"tail":{"head":"a","tail":null}}"#);

    let restored: Product![i32, String] = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, value);
}

#[rstest]
fn test_shared_product_matches_inline_format() {
    let inline: Product![u8, bool] = product!(7, true);
    let shared = SharedProduct::new(inline.clone());
    assert_eq!(
        serde_json::to_string(&shared).unwrap(),
        serde_json::to_string(&inline).unwrap()
    );

    let restored: SharedProduct<Product![u8, bool]> =
        serde_json::from_str(&serde_json::to_string(&inline).unwrap()).unwrap();
    assert_eq!(restored.as_inline(), &inline);
}

#[rstest]
fn test_sum_preserves_occupied_branch() {
    let value: Sum![u32, u32] = Sum::inject::<Rank1>(5);
    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, r#"{"Tail":{"Head":5}}"#);

    let restored: Sum![u32, u32] = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.rank(), 1);
}

#[rstest]
fn test_chain_serializes_its_branches() {
    let sorted: BTreeSet<i32> = [9, 8].into_iter().collect();
    let chain = Chain::new(product!(vec![1, 2], sorted));
    let json = serde_json::to_string(&chain).unwrap();
    assert_eq!(json, r#"{"head":[1,2],"tail":{"head":[8,9],"tail":null}}"#);

    let restored: Chain<i32, Product![Vec<i32>, BTreeSet<i32>]> =
        serde_json::from_str(&json).unwrap();
    assert_eq!(restored, chain);
    assert_eq!(restored.iter().copied().collect::<Vec<_>>(), vec![1, 2, 8, 9]);
}

#[rstest]
fn test_chain_index_round_trips() {
    let chain = Chain::new(product!(vec!['x'], vec!['y', 'z']));
    let index = chain.index_at(2);
    let json = serde_json::to_string(&index).unwrap();
    let restored = serde_json::from_str(&json).unwrap();
    assert_eq!(index, restored);
    assert_eq!(chain[&restored], 'z');
    assert_eq!(
        serde_json::to_string(&chain.end_index()).unwrap(),
        r#""End""#
    );
}
