//! Chain indices.

use crate::algebra::{Tagged, Variant};

/// An index into a chain: a position inside one branch, or the end.
///
/// `End` is not a branch of its own. It is the single index one past the last
/// element, and the derived ordering places it after every position.
/// Positions order by branch rank first and branch-local index second.
///
/// Indices are only meaningful for the chain that produced them, or for a
/// copy of it. Comparing indices from unrelated chains is not detected.
///
/// # Examples
///
/// ```rust
/// use catena::prelude::*;
///
/// type Position = Sum![usize, usize];
///
/// let early = ChainIndex::<Position>::at::<Rank0>(9);
/// let late = ChainIndex::<Position>::at::<Rank1>(0);
/// assert!(early < late);
/// assert!(late < ChainIndex::End);
/// assert_eq!(late.rank(), Some(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChainIndex<P> {
    /// A live element, identified by branch rank and branch-local index.
    Position(P),
    /// One past the last element.
    End,
}

impl<P> ChainIndex<P> {
    /// Creates the index of `local` inside the branch at rank `R`.
    #[inline]
    pub fn at<R>(local: <P as Variant<R>>::Payload) -> Self
    where
        P: Variant<R>,
    {
        Self::Position(P::inject(local))
    }

    /// Returns `true` if this is the end index.
    #[inline]
    pub const fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// Returns the position, or `None` for the end index.
    #[inline]
    pub const fn position(&self) -> Option<&P> {
        match self {
            Self::Position(position) => Some(position),
            Self::End => None,
        }
    }

    /// Returns the branch rank, or `None` for the end index.
    #[inline]
    pub fn rank(&self) -> Option<usize>
    where
        P: Tagged,
    {
        self.position().map(Tagged::rank)
    }
}

impl<P> From<Option<P>> for ChainIndex<P> {
    /// Maps `None` to the end index.
    #[inline]
    fn from(position: Option<P>) -> Self {
        position.map_or(Self::End, Self::Position)
    }
}
