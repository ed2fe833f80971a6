#![cfg(feature = "algebra")]
//! Property-based tests for Product representation laws.
//!
//! This module verifies that the inline and shared representations of a
//! product convert into each other without changing any field.

use catena::Product;
use catena::algebra::{Rank0, Rank1, Rank2, SharedProduct};
use proptest::prelude::*;

type Record = Product![i64, String, Vec<u8>];

fn record_strategy() -> impl Strategy<Value = Record> {
    (any::<i64>(), ".*", prop::collection::vec(any::<u8>(), 0..16))
        .prop_map(|(number, text, bytes)| catena::product!(number, text, bytes))
}

proptest! {
    /// Inline Round Trip Law: inline -> shared -> inline is the identity
    #[test]
    fn prop_inline_round_trip(record in record_strategy()) {
        let shared = SharedProduct::from(record.clone());
        prop_assert_eq!(shared.as_inline(), &record);
        let restored: Record = shared.into();
        prop_assert_eq!(restored, record);
    }

    /// Shared Round Trip Law: shared -> inline -> shared is the identity
    #[test]
    fn prop_shared_round_trip(record in record_strategy()) {
        let shared = SharedProduct::new(record);
        let inline: Record = shared.clone().into();
        prop_assert_eq!(shared.get::<Rank0>(), inline.get::<Rank0>());
        prop_assert_eq!(shared.get::<Rank1>(), inline.get::<Rank1>());
        prop_assert_eq!(shared.get::<Rank2>(), inline.get::<Rank2>());

        let restored = SharedProduct::from(inline);
        prop_assert_eq!(restored, shared);
    }

    /// Shared Conversion Law: converting a shared block leaves the other copy intact
    #[test]
    fn prop_converting_shared_copy_keeps_sharer(record in record_strategy(), replacement in any::<i64>()) {
        let shared = SharedProduct::new(record.clone());
        let mut inline: Record = shared.clone().into();
        inline.set::<Rank0>(replacement);

        prop_assert_eq!(shared.as_inline(), &record);
        prop_assert!(!shared.is_shared());
    }
}
