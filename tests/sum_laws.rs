#![cfg(feature = "algebra")]
//! Property-based tests for Sum laws.
//!
//! This module verifies the ordering and equality laws of Sum using proptest.

use catena::Sum;
use catena::algebra::{Rank0, Rank1, Rank2, Sum, Tagged};
use proptest::prelude::*;

type Triple = Sum![i64, String, u8];

fn triple_strategy() -> impl Strategy<Value = Triple> {
    prop_oneof![
        any::<i64>().prop_map(|value| -> Triple { Sum::inject::<Rank0>(value) }),
        ".*".prop_map(|value| -> Triple { Sum::inject::<Rank1>(value) }),
        any::<u8>().prop_map(|value| -> Triple { Sum::inject::<Rank2>(value) }),
    ]
}

proptest! {
    /// Rank Law: a lower-ranked value is less than any higher-ranked value
    #[test]
    fn prop_lower_rank_is_less(left in triple_strategy(), right in triple_strategy()) {
        if left.rank() < right.rank() {
            prop_assert!(left < right);
        }
        if left.rank() > right.rank() {
            prop_assert!(left > right);
        }
    }

    /// Payload Law: within one rank, ordering is the payload ordering
    #[test]
    fn prop_same_rank_orders_by_payload(left in any::<i64>(), right in any::<i64>()) {
        let left_sum: Triple = Sum::inject::<Rank0>(left);
        let right_sum: Triple = Sum::inject::<Rank0>(right);
        prop_assert_eq!(left_sum.cmp(&right_sum), left.cmp(&right));
    }

    /// Equality Law: equal sums occupy the same rank
    #[test]
    fn prop_equal_sums_share_rank(left in triple_strategy(), right in triple_strategy()) {
        if left == right {
            prop_assert_eq!(Tagged::rank(&left), Tagged::rank(&right));
        }
    }

    /// Injection Law: get after inject returns the injected payload
    #[test]
    fn prop_get_after_inject(payload in ".*") {
        let value: Triple = Sum::inject::<Rank1>(payload.clone());
        prop_assert_eq!(value.get::<Rank1>(), Some(&payload));
        prop_assert_eq!(value.get::<Rank0>(), None);
    }
}
