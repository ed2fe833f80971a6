#![cfg(feature = "algebra")]
//! Unit tests for Sum.

use std::cell::Cell;

use catena::algebra::{Rank0, Rank1, Rank2, Rank3, Sum, Uniform, Void};
use catena::{Sum, product};
use rstest::rstest;

type Quad = Sum![i32, String, char, bool];

// =============================================================================
// Construction and Access
// =============================================================================

#[rstest]
fn test_inject_occupies_requested_branch() {
    let value: Quad = Sum::inject::<Rank2>('x');
    assert_eq!(value.rank(), 2);
    assert_eq!(value.get::<Rank2>(), Some(&'x'));
}

#[rstest]
fn test_get_on_unoccupied_branch_returns_none() {
    let value: Quad = Sum::inject::<Rank1>("text".to_string());
    assert_eq!(value.get::<Rank0>(), None);
    assert_eq!(value.get::<Rank2>(), None);
    assert_eq!(value.get::<Rank3>(), None);
}

#[rstest]
fn test_take_returns_payload_of_occupied_branch() {
    let value: Quad = Sum::inject::<Rank3>(true);
    assert_eq!(value.take::<Rank3>(), Ok(true));
}

#[rstest]
fn test_take_gives_back_unoccupied_sum() {
    let value: Quad = Sum::inject::<Rank0>(5);
    let returned = value.take::<Rank1>().unwrap_err();
    assert_eq!(returned, Sum::inject::<Rank0>(5));
}

#[rstest]
fn test_nested_representation_of_rank() {
    let value: Quad = Sum::inject::<Rank1>("a".to_string());
    assert_eq!(value, Sum::Tail(Sum::Head("a".to_string())));
}

// =============================================================================
// Equality and Ordering
// =============================================================================

#[rstest]
fn test_equality_requires_same_branch() {
    let left: Sum![i32, i32] = Sum::inject::<Rank0>(1);
    let right: Sum![i32, i32] = Sum::inject::<Rank1>(1);
    assert_ne!(left, right);
}

#[rstest]
fn test_lower_rank_orders_first_regardless_of_payload() {
    let low: Sum![i32, i32] = Sum::inject::<Rank0>(i32::MAX);
    let high: Sum![i32, i32] = Sum::inject::<Rank1>(i32::MIN);
    assert!(low < high);
}

#[rstest]
#[case(1, 2)]
#[case(-5, 0)]
#[case(7, 70)]
fn test_same_rank_orders_by_payload(#[case] smaller: i32, #[case] larger: i32) {
    let left: Sum![u8, i32] = Sum::inject::<Rank1>(smaller);
    let right: Sum![u8, i32] = Sum::inject::<Rank1>(larger);
    assert!(left < right);
}

#[rstest]
fn test_sorting_groups_by_rank() {
    let mut values: Vec<Sum![i32, char]> = vec![
        Sum::inject::<Rank1>('b'),
        Sum::inject::<Rank0>(3),
        Sum::inject::<Rank1>('a'),
        Sum::inject::<Rank0>(1),
    ];
    values.sort();
    let ranks: Vec<usize> = values.iter().map(Sum::rank).collect();
    assert_eq!(ranks, vec![0, 0, 1, 1]);
    assert_eq!(values[0].get::<Rank0>(), Some(&1));
    assert_eq!(values[3].get::<Rank1>(), Some(&'b'));
}

// =============================================================================
// Uniform Values
// =============================================================================

#[rstest]
#[case(Sum::inject::<Rank0>("first"), 0)]
#[case(Sum::inject::<Rank1>("second"), 1)]
#[case(Sum::inject::<Rank2>("third"), 2)]
fn test_into_tagged_reports_rank(#[case] value: Sum![&'static str, &'static str, &'static str], #[case] rank: usize) {
    let (tag, payload) = value.into_tagged();
    assert_eq!(tag, rank);
    assert!(!payload.is_empty());
}

#[rstest]
fn test_uniform_reads_payload_of_any_branch() {
    let value: Sum![u8, u8, u8] = Sum::inject::<Rank2>(9);
    assert_eq!(*value.uniform(), 9);
    assert_eq!(value.into_uniform(), 9);
}

// =============================================================================
// Alternatives
// =============================================================================

#[rstest]
fn test_first_present_selects_leftmost_value() {
    let chosen: Option<Sum![i32, &str, char]> =
        Sum::first_present(product!(|| None, || Some("b"), || Some('c')));
    assert_eq!(chosen, Some(Sum::inject::<Rank1>("b")));
}

#[rstest]
fn test_first_present_does_not_evaluate_past_choice() {
    let calls = Cell::new(0);
    let chosen: Option<Sum![i32, i32, i32]> = Sum::first_present(product!(
        || {
            calls.set(calls.get() + 1);
            None
        },
        || {
            calls.set(calls.get() + 1);
            Some(2)
        },
        || {
            calls.set(calls.get() + 100);
            Some(3)
        },
    ));
    assert_eq!(chosen.map(Sum::into_tagged), Some((1, 2)));
    assert_eq!(calls.get(), 2);
}

#[rstest]
fn test_last_present_selects_rightmost_value() {
    let chosen: Option<Sum![i32, &str, char]> =
        Sum::last_present(product!(|| Some(1), || Some("b"), || None));
    assert_eq!(chosen, Some(Sum::inject::<Rank1>("b")));
}

#[rstest]
fn test_last_present_evaluates_right_to_left() {
    let order = std::cell::RefCell::new(Vec::new());
    let chosen: Option<Sum![u8, u8, u8]> = Sum::last_present(product!(
        || {
            order.borrow_mut().push(0);
            Some(0)
        },
        || {
            order.borrow_mut().push(1);
            Some(1)
        },
        || {
            order.borrow_mut().push(2);
            None
        },
    ));
    assert_eq!(chosen.map(Sum::into_tagged), Some((1, 1)));
    assert_eq!(*order.borrow(), vec![2, 1]);
}

#[rstest]
fn test_all_absent_yields_none() {
    let chosen: Option<Sum![i32, char]> = Sum::first_present(product!(|| None, || None));
    assert_eq!(chosen, None);
    let chosen: Option<Sum![i32, char]> = Sum::last_present(product!(|| None, || None));
    assert_eq!(chosen, None);
}

#[rstest]
fn test_void_terminates_nine_way_sum() {
    type Nine = Sum![u8, u8, u8, u8, u8, u8, u8, u8, u8];
    let value = Nine::inject::<catena::algebra::Rank8>(8);
    assert_eq!(value.rank(), 8);
    let _: fn(Void) -> u8 = |void| match void {};
}
