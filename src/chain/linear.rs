//! Mapping between chain indices and global linear offsets.
//!
//! A [`Linearization`] is a prefix-sum table over branch counts:
//! `cumulative[k]` is the number of elements in all branches of rank less
//! than `k`, and the final entry is the total count. With it:
//!
//! - the offset of a position is `cumulative[rank] + local offset`
//! - the offset of the end index is the total count
//! - the index at an offset is found by binary search over the table,
//!   followed by a branch-local offset step
//!
//! Branches other than the one containing the target are never walked, so
//! offset and distance arithmetic costs O(branch count) when every branch is
//! random access.

use smallvec::SmallVec;

use crate::algebra::Tagged;
use crate::contract::{ContractViolation, violation};

use super::branches::BranchList;
use super::index::ChainIndex;

/// Inline capacity of the prefix table: nine branches plus the total.
const INLINE_ENTRIES: usize = 10;

/// Prefix sums of the branch counts of one chain.
///
/// The table is a snapshot. It is derived on demand from the branches and
/// must not be reused after a branch changes its count.
///
/// # Examples
///
/// ```rust
/// use catena::prelude::*;
///
/// let branches = product!(vec![1, 2, 3], Vec::<i32>::new(), vec![4, 5]);
/// let table = Linearization::new(&branches);
/// assert_eq!(table.total(), 5);
/// assert_eq!(table.branch_start(2), 3);
///
/// let index = table.index_at(&branches, 3);
/// assert_eq!(index, ChainIndex::at::<Rank2>(0));
/// assert_eq!(table.offset_of(&branches, &index), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linearization {
    cumulative: SmallVec<[usize; INLINE_ENTRIES]>,
}

#[inline]
fn signed(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

impl Linearization {
    /// Builds the table from the current branch counts.
    pub fn new<T, B: BranchList<T>>(branches: &B) -> Self {
        let mut counts: SmallVec<[usize; INLINE_ENTRIES]> = SmallVec::new();
        branches.collect_counts(&mut counts);

        let mut cumulative = SmallVec::with_capacity(counts.len() + 1);
        let mut running = 0;
        cumulative.push(running);
        for count in counts {
            running += count;
            cumulative.push(running);
        }
        Self { cumulative }
    }

    /// Returns the number of branches.
    #[inline]
    pub fn arity(&self) -> usize {
        self.cumulative.len() - 1
    }

    /// Returns the total number of elements.
    #[inline]
    pub fn total(&self) -> usize {
        self.cumulative[self.arity()]
    }

    /// Returns the offset of the first element of the branch at `rank`.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not less than the arity.
    #[inline]
    pub fn branch_start(&self, rank: usize) -> usize {
        if rank >= self.arity() {
            violation(ContractViolation::RankOutOfRange);
        }
        self.cumulative[rank]
    }

    /// Returns the number of elements of the branch at `rank`.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not less than the arity.
    #[inline]
    pub fn branch_count(&self, rank: usize) -> usize {
        let start = self.branch_start(rank);
        self.cumulative[rank + 1] - start
    }

    /// Returns the linear offset of `index`.
    ///
    /// # Panics
    ///
    /// Panics if a position in `index` names no element of its branch.
    #[track_caller]
    pub fn offset_of<T, B: BranchList<T>>(
        &self,
        branches: &B,
        index: &ChainIndex<B::Position>,
    ) -> usize {
        match index {
            ChainIndex::Position(position) => {
                self.branch_start(Tagged::rank(position)) + branches.local_offset(position)
            }
            ChainIndex::End => self.total(),
        }
    }

    /// Returns the index at linear `offset`. An offset equal to the total
    /// count yields the end index.
    ///
    /// # Panics
    ///
    /// Panics if `offset` exceeds the total count.
    pub fn index_at<T, B: BranchList<T>>(
        &self,
        branches: &B,
        offset: usize,
    ) -> ChainIndex<B::Position> {
        let total = self.total();
        if offset == total {
            return ChainIndex::End;
        }
        if offset > total {
            violation(ContractViolation::OffsetOutOfBounds {
                target: signed(offset),
                count: total,
            });
        }
        // Empty branches share their start with the next branch, so the last
        // start not exceeding the offset belongs to a non-empty branch.
        let starts = &self.cumulative[..self.arity()];
        let rank = starts.partition_point(|&start| start <= offset) - 1;
        ChainIndex::Position(branches.position_in(rank, offset - starts[rank]))
    }

    /// Returns the signed number of steps from `from` to `to`.
    pub fn distance<T, B: BranchList<T>>(
        &self,
        branches: &B,
        from: &ChainIndex<B::Position>,
        to: &ChainIndex<B::Position>,
    ) -> isize {
        signed(self.offset_of(branches, to)) - signed(self.offset_of(branches, from))
    }

    /// Returns the index `distance` steps away from `index`.
    ///
    /// # Panics
    ///
    /// Panics if the target falls outside `0..=total`.
    pub fn offset_by<T, B: BranchList<T>>(
        &self,
        branches: &B,
        index: &ChainIndex<B::Position>,
        distance: isize,
    ) -> ChainIndex<B::Position> {
        let total = self.total();
        let target = signed(self.offset_of(branches, index)).saturating_add(distance);
        match usize::try_from(target) {
            Ok(offset) if offset <= total => self.index_at(branches, offset),
            _ => violation(ContractViolation::OffsetOutOfBounds {
                target,
                count: total,
            }),
        }
    }
}
