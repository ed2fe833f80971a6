//! Backing storage of a chain.

use std::marker::PhantomData;

use crate::contract::{ContractViolation, violation};

use super::branches::{BidirectionalBranchList, BranchList, MutableBranchList};
use super::index::ChainIndex;
use super::linear::Linearization;

/// The branches of a chain together with its navigation rules.
///
/// Branch order is fixed at construction and defines the rank of every
/// branch. The logical count is the sum of the branch counts, and the
/// storage is empty exactly when every branch is empty.
pub struct ChainStorage<T, B> {
    branches: B,
    element: PhantomData<fn() -> T>,
}

impl<T, B> ChainStorage<T, B> {
    /// Creates storage owning `branches`.
    #[inline]
    pub const fn new(branches: B) -> Self {
        Self {
            branches,
            element: PhantomData,
        }
    }

    /// Returns the branches.
    #[inline]
    pub const fn branches(&self) -> &B {
        &self.branches
    }

    /// Returns the branches mutably.
    #[inline]
    pub const fn branches_mut(&mut self) -> &mut B {
        &mut self.branches
    }

    /// Consumes the storage and returns the branches.
    #[inline]
    pub fn into_branches(self) -> B {
        self.branches
    }
}

impl<T, B: BranchList<T>> ChainStorage<T, B> {
    /// Returns the total number of elements.
    #[inline]
    pub fn count(&self) -> usize {
        self.branches.count()
    }

    /// Returns `true` if every branch is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Returns the index of the first element of the first non-empty
    /// branch, or the end index if there is none.
    #[inline]
    pub fn first_index(&self) -> ChainIndex<B::Position> {
        self.branches.first_position().into()
    }

    /// Returns the index following `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is the end index.
    #[track_caller]
    pub fn successor(&self, index: &ChainIndex<B::Position>) -> ChainIndex<B::Position> {
        match index {
            ChainIndex::Position(position) => self.branches.position_after(position).into(),
            ChainIndex::End => violation(ContractViolation::AdvancedPastEnd),
        }
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is the end index or names no element.
    #[track_caller]
    pub fn element(&self, index: &ChainIndex<B::Position>) -> &T {
        match index {
            ChainIndex::Position(position) => self.branches.element(position),
            ChainIndex::End => violation(ContractViolation::SubscriptedEnd),
        }
    }

    /// Builds the prefix-sum table for the current branch counts.
    #[inline]
    pub fn linearization(&self) -> Linearization {
        Linearization::new(&self.branches)
    }

    /// Returns `true` if any branch contains `element`.
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.branches.contains(element)
    }

    /// Returns the least element of all branches, or `None` if every branch
    /// is empty.
    pub fn min(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.branches.min_element()
    }

    /// Returns the greatest element of all branches, or `None` if every
    /// branch is empty.
    pub fn max(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.branches.max_element()
    }
}

impl<T, B: BidirectionalBranchList<T>> ChainStorage<T, B> {
    /// Returns the index of the last element of the last non-empty branch.
    pub fn last_position(&self) -> Option<B::Position> {
        self.branches.last_position()
    }

    /// Returns the index preceding `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is the first index, or if `index` is the end index
    /// of an empty chain.
    #[track_caller]
    pub fn predecessor(&self, index: &ChainIndex<B::Position>) -> ChainIndex<B::Position> {
        let previous = match index {
            ChainIndex::Position(position) => self.branches.position_before(position),
            ChainIndex::End => self.branches.last_position(),
        };
        previous.map_or_else(
            || violation(ContractViolation::RetreatedBeforeStart),
            ChainIndex::Position,
        )
    }
}

impl<T, B: MutableBranchList<T>> ChainStorage<T, B> {
    /// Returns the element at `index` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `index` is the end index or names no element.
    #[track_caller]
    pub fn element_mut(&mut self, index: &ChainIndex<B::Position>) -> &mut T {
        match index {
            ChainIndex::Position(position) => self.branches.element_mut(position),
            ChainIndex::End => violation(ContractViolation::SubscriptedEnd),
        }
    }
}

impl<T, B: Clone> Clone for ChainStorage<T, B> {
    fn clone(&self) -> Self {
        Self::new(self.branches.clone())
    }
}
