//! Navigation across a type-level list of branches.
//!
//! A chain's branches are a [`Product`] of branch values ending in [`Unit`].
//! [`BranchList`] walks that list recursively: the head branch is handled
//! directly and everything else is delegated to the tail. Positions follow
//! the same shape, so the position type of `Product<B, Tail>` is
//! `Sum<B::Index, Tail::Position>`: one case per branch, each holding that
//! branch's native index.
//!
//! Transitions that leave a branch land on the first (or last) index of the
//! next non-empty branch, so a position inside an empty branch is never
//! produced.

use crate::algebra::{Product, Sum, Tagged, Unit, Void};
use crate::contract::{ContractViolation, violation};

use super::branch::{BidirectionalBranch, Branch, MutableBranch};

/// A list of branches sharing the element type `T`.
pub trait BranchList<T> {
    /// A branch rank together with a branch-local index.
    type Position: Clone + Ord + Tagged;

    /// The number of branches.
    const ARITY: usize;

    /// Returns the total number of elements.
    fn count(&self) -> usize;

    /// Returns `true` if every branch is empty.
    fn is_empty(&self) -> bool;

    /// Appends the element count of every branch, in rank order.
    fn collect_counts<E: Extend<usize>>(&self, counts: &mut E);

    /// Returns the first position of the first non-empty branch.
    fn first_position(&self) -> Option<Self::Position>;

    /// Returns the position following `position`, or `None` if it was the
    /// last one.
    fn position_after(&self, position: &Self::Position) -> Option<Self::Position>;

    /// Returns the element at `position`.
    fn element(&self, position: &Self::Position) -> &T;

    /// Returns the offset of `position` from the start of its own branch.
    ///
    /// # Panics
    ///
    /// Panics if `position` does not name an element of its branch.
    fn local_offset(&self, position: &Self::Position) -> usize;

    /// Returns the position `offset` elements into the branch at `rank`.
    fn position_in(&self, rank: usize, offset: usize) -> Self::Position;

    /// Returns `true` if any branch contains `element`.
    fn contains(&self, element: &T) -> bool
    where
        T: PartialEq;

    /// Returns the least element over all branches.
    fn min_element(&self) -> Option<&T>
    where
        T: Ord;

    /// Returns the greatest element over all branches.
    fn max_element(&self) -> Option<&T>
    where
        T: Ord;
}

/// A list of branches that can all step backwards.
pub trait BidirectionalBranchList<T>: BranchList<T> {
    /// Returns the last position of the last non-empty branch.
    fn last_position(&self) -> Option<Self::Position>;

    /// Returns the position preceding `position`, or `None` if it was the
    /// first one.
    fn position_before(&self, position: &Self::Position) -> Option<Self::Position>;
}

/// A list of branches whose elements can all be modified in place.
pub trait MutableBranchList<T>: BranchList<T> {
    /// Returns the element at `position` mutably.
    fn element_mut(&mut self, position: &Self::Position) -> &mut T;
}

// =============================================================================
// Terminator
// =============================================================================

impl<T> BranchList<T> for Unit {
    type Position = Void;

    const ARITY: usize = 0;

    #[inline]
    fn count(&self) -> usize {
        0
    }

    #[inline]
    fn is_empty(&self) -> bool {
        true
    }

    #[inline]
    fn collect_counts<E: Extend<usize>>(&self, _counts: &mut E) {}

    #[inline]
    fn first_position(&self) -> Option<Void> {
        None
    }

    fn position_after(&self, position: &Void) -> Option<Void> {
        match *position {}
    }

    fn element(&self, position: &Void) -> &T {
        match *position {}
    }

    fn local_offset(&self, position: &Void) -> usize {
        match *position {}
    }

    fn position_in(&self, _rank: usize, _offset: usize) -> Void {
        violation(ContractViolation::RankOutOfRange)
    }

    #[inline]
    fn contains(&self, _element: &T) -> bool
    where
        T: PartialEq,
    {
        false
    }

    #[inline]
    fn min_element(&self) -> Option<&T>
    where
        T: Ord,
    {
        None
    }

    #[inline]
    fn max_element(&self) -> Option<&T>
    where
        T: Ord,
    {
        None
    }
}

impl<T> BidirectionalBranchList<T> for Unit {
    #[inline]
    fn last_position(&self) -> Option<Void> {
        None
    }

    fn position_before(&self, position: &Void) -> Option<Void> {
        match *position {}
    }
}

impl<T> MutableBranchList<T> for Unit {
    fn element_mut(&mut self, position: &Void) -> &mut T {
        match *position {}
    }
}

// =============================================================================
// Cons Cell
// =============================================================================

/// A position holds an element index, never the branch's own end index.
#[inline]
#[track_caller]
fn require_live<B: Branch>(branch: &B, index: &B::Index) {
    if *index == branch.end_index() {
        let count = branch.count();
        violation(ContractViolation::BranchIndexOutOfBounds {
            index: count,
            count,
        });
    }
}

fn last_index<B: BidirectionalBranch>(branch: &B) -> Option<B::Index> {
    if branch.is_empty() {
        None
    } else {
        Some(branch.index_before(&branch.end_index()))
    }
}

/// Combines two optional extremum candidates; an absent side contributes
/// nothing.
fn extremum<'a, T>(
    left: Option<&'a T>,
    right: Option<&'a T>,
    pick: fn(&'a T, &'a T) -> &'a T,
) -> Option<&'a T> {
    match (left, right) {
        (Some(left), Some(right)) => Some(pick(left, right)),
        (left, right) => left.or(right),
    }
}

impl<T, B, Tail> BranchList<T> for Product<B, Tail>
where
    B: Branch<Element = T>,
    Tail: BranchList<T>,
{
    type Position = Sum<B::Index, Tail::Position>;

    const ARITY: usize = 1 + Tail::ARITY;

    #[inline]
    fn count(&self) -> usize {
        self.head.count() + self.tail.count()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.head.is_empty() && self.tail.is_empty()
    }

    fn collect_counts<E: Extend<usize>>(&self, counts: &mut E) {
        counts.extend(std::iter::once(self.head.count()));
        self.tail.collect_counts(counts);
    }

    fn first_position(&self) -> Option<Self::Position> {
        if self.head.is_empty() {
            self.tail.first_position().map(Sum::Tail)
        } else {
            Some(Sum::Head(self.head.start_index()))
        }
    }

    fn position_after(&self, position: &Self::Position) -> Option<Self::Position> {
        match position {
            Sum::Head(index) => {
                let next = self.head.index_after(index);
                if next == self.head.end_index() {
                    self.tail.first_position().map(Sum::Tail)
                } else {
                    Some(Sum::Head(next))
                }
            }
            Sum::Tail(rest) => self.tail.position_after(rest).map(Sum::Tail),
        }
    }

    fn element(&self, position: &Self::Position) -> &T {
        match position {
            Sum::Head(index) => self.head.element(index),
            Sum::Tail(rest) => self.tail.element(rest),
        }
    }

    fn local_offset(&self, position: &Self::Position) -> usize {
        match position {
            Sum::Head(index) => {
                require_live(&self.head, index);
                self.head.offset_of(index)
            }
            Sum::Tail(rest) => self.tail.local_offset(rest),
        }
    }

    fn position_in(&self, rank: usize, offset: usize) -> Self::Position {
        if rank == 0 {
            Sum::Head(self.head.index_at_offset(offset))
        } else {
            Sum::Tail(self.tail.position_in(rank - 1, offset))
        }
    }

    fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.head.contains(element) || self.tail.contains(element)
    }

    fn min_element(&self) -> Option<&T>
    where
        T: Ord,
    {
        extremum(self.head.min_element(), self.tail.min_element(), std::cmp::min)
    }

    fn max_element(&self) -> Option<&T>
    where
        T: Ord,
    {
        extremum(self.head.max_element(), self.tail.max_element(), std::cmp::max)
    }
}

impl<T, B, Tail> BidirectionalBranchList<T> for Product<B, Tail>
where
    B: BidirectionalBranch<Element = T>,
    Tail: BidirectionalBranchList<T>,
{
    fn last_position(&self) -> Option<Self::Position> {
        self.tail
            .last_position()
            .map(Sum::Tail)
            .or_else(|| last_index(&self.head).map(Sum::Head))
    }

    fn position_before(&self, position: &Self::Position) -> Option<Self::Position> {
        match position {
            Sum::Head(index) => {
                require_live(&self.head, index);
                if *index == self.head.start_index() {
                    None
                } else {
                    Some(Sum::Head(self.head.index_before(index)))
                }
            }
            Sum::Tail(rest) => match self.tail.position_before(rest) {
                Some(previous) => Some(Sum::Tail(previous)),
                None => last_index(&self.head).map(Sum::Head),
            },
        }
    }
}

impl<T, B, Tail> MutableBranchList<T> for Product<B, Tail>
where
    B: MutableBranch<Element = T>,
    Tail: MutableBranchList<T>,
{
    fn element_mut(&mut self, position: &Self::Position) -> &mut T {
        match position {
            Sum::Head(index) => self.head.element_mut(index),
            Sum::Tail(rest) => self.tail.element_mut(rest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product;
    use rstest::rstest;

    #[rstest]
    fn test_first_position_skips_leading_empty_branches() {
        let branches = product!(Vec::<i32>::new(), Vec::<i32>::new(), vec![7]);
        assert_eq!(
            branches.first_position(),
            Some(Sum::Tail(Sum::Tail(Sum::Head(0))))
        );
    }

    #[rstest]
    fn test_position_after_crosses_into_next_non_empty_branch() {
        let branches = product!(vec![1], Vec::<i32>::new(), vec![3]);
        let next = branches.position_after(&Sum::Head(0));
        assert_eq!(next, Some(Sum::Tail(Sum::Tail(Sum::Head(0)))));
    }

    #[rstest]
    fn test_position_before_crosses_back_over_empty_branch() {
        let branches = product!(vec![1, 2], Vec::<i32>::new(), vec![3]);
        let previous = branches.position_before(&Sum::Tail(Sum::Tail(Sum::Head(0))));
        assert_eq!(previous, Some(Sum::Head(1)));
    }

    #[rstest]
    #[should_panic(expected = "branch index 2 is out of bounds for a branch of 2 elements")]
    fn test_local_offset_rejects_branch_end() {
        let branches = product!(vec![1, 2], vec![3]);
        let _ = branches.local_offset(&Sum::Head(2));
    }

    #[rstest]
    #[should_panic(expected = "branch index 2 is out of bounds for a branch of 2 elements")]
    fn test_position_before_rejects_branch_end() {
        let branches = product!(vec![1, 2], vec![3]);
        let _ = branches.position_before(&Sum::Head(2));
    }

    #[rstest]
    fn test_collect_counts_in_rank_order() {
        let branches = product!(vec![1, 2], Vec::<i32>::new(), [3, 4, 5]);
        let mut counts = Vec::new();
        branches.collect_counts(&mut counts);
        assert_eq!(counts, vec![2, 0, 3]);
    }

    #[rstest]
    fn test_extremum_skips_absent_candidates() {
        let branches = product!(vec![4, 9], Vec::<i32>::new(), vec![1]);
        assert_eq!(branches.min_element(), Some(&1));
        assert_eq!(branches.max_element(), Some(&9));
    }
}
