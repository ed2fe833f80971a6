//! Type-level ranks addressing the components of sums and products.

use std::marker::PhantomData;

/// A type-level natural number naming a branch or component ordinal.
pub trait Rank {
    /// The ordinal as a value.
    const VALUE: usize;
}

/// Rank of the first component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct First;

/// Rank of the component following the one at rank `R`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Next<R>(PhantomData<R>);

impl Rank for First {
    const VALUE: usize = 0;
}

impl<R: Rank> Rank for Next<R> {
    const VALUE: usize = R::VALUE + 1;
}

/// Rank of the component at ordinal 0.
pub type Rank0 = First;

macro_rules! define_rank_aliases {
    ($($ordinal:literal => $previous:literal),* $(,)?) => {
        $crate::paste::paste! {
            $(
                #[doc = "Rank of the component at ordinal " $ordinal "."]
                pub type [<Rank $ordinal>] = Next<[<Rank $previous>]>;
            )*
        }
    };
}

define_rank_aliases!(1 => 0, 2 => 1, 3 => 2, 4 => 3, 5 => 4, 6 => 5, 7 => 6, 8 => 7);
