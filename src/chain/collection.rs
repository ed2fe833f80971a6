//! The chain collection.
//!
//! [`Chain`] presents a product of branches as one logically contiguous
//! sequence. It is a value type: cloning shares the backing storage, and a
//! write through one copy first gives that copy private storage, so it is
//! never observable through another copy.
//!
//! # Capability Tiers
//!
//! | Available when every branch is | Operations                                   |
//! |--------------------------------|----------------------------------------------|
//! | [`Branch`]                     | `start_index`, `index_after`, indexing, offsets, `iter` |
//! | [`BidirectionalBranch`]        | `index_before`, `last`                       |
//! | [`MutableBranch`]              | `element_mut`, `IndexMut`                    |
//!
//! Offset and distance arithmetic is available for every tier; with
//! [`RandomAccessBranch`] branches it costs O(branch count).
//!
//! [`Branch`]: super::Branch
//! [`BidirectionalBranch`]: super::BidirectionalBranch
//! [`MutableBranch`]: super::MutableBranch
//! [`RandomAccessBranch`]: super::RandomAccessBranch
//!
//! # Examples
//!
//! ```rust
//! use catena::prelude::*;
//!
//! let letters = Chain::new(product!(vec!["1", "2", "3"], ["a", "b"]));
//! assert_eq!(letters.len(), 5);
//!
//! let start = letters.start_index();
//! assert_eq!(letters.locate(&start), Some((0, 0)));
//!
//! let fourth = letters.index_offset_by(&start, 3);
//! assert_eq!(letters.locate(&fourth), Some((1, 0)));
//! assert_eq!(letters[&fourth], "a");
//!
//! let mut index = start;
//! for _ in 0..5 {
//!     index = letters.index_after(&index);
//! }
//! assert!(index.is_end());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};

use crate::algebra::{Field, Tagged};
use crate::cow::CowBox;

use super::branches::{BidirectionalBranchList, BranchList, MutableBranchList};
use super::index::ChainIndex;
use super::storage::ChainStorage;

// =============================================================================
// Chain Definition
// =============================================================================

/// N heterogeneous branches with a common element type, viewed as one
/// randomly indexable sequence.
///
/// `B` is a [`Product`](crate::algebra::Product) of branches and `T` their
/// element type. Misusing an index (advancing past the end, retreating
/// before the start, subscripting the end, offsetting outside `0..=len`)
/// is a contract violation and panics.
///
/// # Time Complexity
///
/// | Operation              | Complexity                               |
/// |------------------------|------------------------------------------|
/// | `clone`                | O(1)                                     |
/// | `len` / `is_empty`     | O(branch count) with O(1) branch counts  |
/// | `start_index`          | O(branch count)                          |
/// | `index_after`          | O(1) amortized, O(branch count) at a boundary |
/// | `index_offset_by`      | O(branch count) with random access branches |
/// | `distance`             | O(branch count) with random access branches |
/// | first write after `clone` | O(clone of all branches)              |
pub struct Chain<T, B> {
    storage: CowBox<ChainStorage<T, B>>,
}

impl<T, B: BranchList<T>> Chain<T, B> {
    /// Creates a chain over `branches`, in rank order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catena::prelude::*;
    /// use std::collections::VecDeque;
    ///
    /// let chain = Chain::new(product!(vec![1, 2], VecDeque::from([3])));
    /// assert_eq!(chain.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    #[inline]
    pub fn new(branches: B) -> Self {
        Self {
            storage: CowBox::new(ChainStorage::new(branches)),
        }
    }

    /// Returns the branches.
    #[inline]
    pub fn branches(&self) -> &B {
        self.storage.branches()
    }

    /// Returns the branch at rank `R`.
    #[inline]
    pub fn branch<R>(&self) -> &<B as Field<R>>::Output
    where
        B: Field<R>,
    {
        <B as Field<R>>::field(self.storage.branches())
    }

    /// Returns the number of elements over all branches.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.count()
    }

    /// Returns `true` if every branch is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Returns `true` if another copy currently shares this chain's storage.
    #[inline]
    pub fn is_storage_shared(&self) -> bool {
        !self.storage.is_unique()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Returns the index of the first element, or the end index if every
    /// branch is empty.
    #[inline]
    pub fn start_index(&self) -> ChainIndex<B::Position> {
        self.storage.first_index()
    }

    /// Returns the end index.
    #[inline]
    pub const fn end_index(&self) -> ChainIndex<B::Position> {
        ChainIndex::End
    }

    /// Returns the index following `index`, skipping empty branches.
    ///
    /// # Panics
    ///
    /// Panics if `index` is the end index.
    #[inline]
    #[track_caller]
    pub fn index_after(&self, index: &ChainIndex<B::Position>) -> ChainIndex<B::Position> {
        self.storage.successor(index)
    }

    /// Returns the linear offset of `index`: its distance from the start
    /// index.
    ///
    /// # Panics
    ///
    /// Panics if `index` names no element of this chain.
    #[track_caller]
    pub fn offset_of(&self, index: &ChainIndex<B::Position>) -> usize {
        self.storage
            .linearization()
            .offset_of(self.storage.branches(), index)
    }

    /// Returns the index at linear `offset`; `len()` yields the end index.
    ///
    /// # Panics
    ///
    /// Panics if `offset` exceeds `len()`.
    #[track_caller]
    pub fn index_at(&self, offset: usize) -> ChainIndex<B::Position> {
        self.storage
            .linearization()
            .index_at(self.storage.branches(), offset)
    }

    /// Returns the index `distance` steps away from `index`. Negative
    /// distances move backwards.
    ///
    /// # Panics
    ///
    /// Panics if `index` names no element of this chain, or if the target
    /// falls outside `0..=len()`.
    #[track_caller]
    pub fn index_offset_by(
        &self,
        index: &ChainIndex<B::Position>,
        distance: isize,
    ) -> ChainIndex<B::Position> {
        self.storage
            .linearization()
            .offset_by(self.storage.branches(), index, distance)
    }

    /// Returns the signed number of steps from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index names no element of this chain.
    #[track_caller]
    pub fn distance(
        &self,
        from: &ChainIndex<B::Position>,
        to: &ChainIndex<B::Position>,
    ) -> isize {
        self.storage
            .linearization()
            .distance(self.storage.branches(), from, to)
    }

    /// Resolves `index` into its branch rank and branch-local offset, or
    /// `None` for the end index.
    ///
    /// # Panics
    ///
    /// Panics if `index` names no element of this chain.
    #[track_caller]
    pub fn locate(&self, index: &ChainIndex<B::Position>) -> Option<(usize, usize)> {
        index.position().map(|position| {
            (
                Tagged::rank(position),
                self.storage.branches().local_offset(position),
            )
        })
    }

    // =========================================================================
    // Element Access
    // =========================================================================

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is the end index or names no element.
    #[inline]
    #[track_caller]
    pub fn element(&self, index: &ChainIndex<B::Position>) -> &T {
        self.storage.element(index)
    }

    /// Returns the element at linear `offset`, or `None` if `offset` is not
    /// less than `len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catena::prelude::*;
    ///
    /// let chain = Chain::new(product!(vec!['a'], vec!['b', 'c']));
    /// assert_eq!(chain.get(2), Some(&'c'));
    /// assert_eq!(chain.get(3), None);
    /// ```
    pub fn get(&self, offset: usize) -> Option<&T> {
        if offset >= self.len() {
            return None;
        }
        Some(self.element(&self.index_at(offset)))
    }

    /// Returns the first element, or `None` if the chain is empty.
    pub fn first(&self) -> Option<&T> {
        match self.start_index() {
            ChainIndex::End => None,
            index => Some(self.element(&index)),
        }
    }

    /// Returns `true` if any branch contains `element`.
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.storage.contains(element)
    }

    /// Returns the least element, or `None` if the chain is empty.
    pub fn min(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.storage.min()
    }

    /// Returns the greatest element, or `None` if the chain is empty.
    pub fn max(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.storage.max()
    }

    /// Returns an iterator over the elements, in rank order.
    #[inline]
    pub fn iter(&self) -> ChainIter<'_, T, B> {
        ChainIter {
            indices: self.indices(),
        }
    }

    /// Returns an iterator over the indices of every element, in order.
    #[inline]
    pub fn indices(&self) -> ChainIndices<'_, T, B> {
        ChainIndices {
            storage: self.storage.get(),
            front: self.start_index(),
            remaining: self.len(),
        }
    }
}

impl<T, B: BranchList<T> + Clone> Chain<T, B> {
    /// Returns the branches mutably, first giving this chain private storage
    /// if it is shared.
    ///
    /// Indices obtained before a change of branch counts are invalidated.
    #[inline]
    pub fn branches_mut(&mut self) -> &mut B {
        self.storage.make_mut().branches_mut()
    }

    /// Returns the branch at rank `R` mutably, first giving this chain
    /// private storage if it is shared.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catena::prelude::*;
    ///
    /// let original = Chain::new(product!(vec![1], vec![2]));
    /// let mut extended = original.clone();
    /// extended.branch_mut::<Rank1>().push(3);
    ///
    /// assert_eq!(original.len(), 2);
    /// assert_eq!(extended.len(), 3);
    /// ```
    #[inline]
    pub fn branch_mut<R>(&mut self) -> &mut <B as Field<R>>::Output
    where
        B: Field<R>,
    {
        <B as Field<R>>::field_mut(self.branches_mut())
    }

    /// Consumes the chain and returns its branches, cloning them only if the
    /// storage is still shared.
    pub fn into_branches(self) -> B {
        self.storage.into_inner().into_branches()
    }
}

impl<T, B: BidirectionalBranchList<T>> Chain<T, B> {
    /// Returns the index preceding `index`, skipping empty branches. The
    /// predecessor of the end index is the last element.
    ///
    /// # Panics
    ///
    /// Panics if `index` is the start index.
    #[inline]
    #[track_caller]
    pub fn index_before(&self, index: &ChainIndex<B::Position>) -> ChainIndex<B::Position> {
        self.storage.predecessor(index)
    }

    /// Returns the last element, or `None` if the chain is empty.
    pub fn last(&self) -> Option<&T> {
        self.storage
            .last_position()
            .map(|position| self.element(&ChainIndex::Position(position)))
    }
}

impl<T, B: MutableBranchList<T> + Clone> Chain<T, B> {
    /// Returns the element at `index` mutably, first giving this chain
    /// private storage if it is shared.
    ///
    /// # Panics
    ///
    /// Panics if `index` is the end index or names no element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catena::prelude::*;
    ///
    /// let original = Chain::new(product!(vec![1, 2], [3, 4]));
    /// let mut copy = original.clone();
    /// let index = copy.index_at(2);
    /// *copy.element_mut(&index) = 30;
    ///
    /// assert_eq!(original[&index], 3);
    /// assert_eq!(copy[&index], 30);
    /// ```
    #[track_caller]
    pub fn element_mut(&mut self, index: &ChainIndex<B::Position>) -> &mut T {
        self.storage.make_mut().element_mut(index)
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over the indices of a chain, produced by [`Chain::indices`].
pub struct ChainIndices<'a, T, B: BranchList<T>> {
    storage: &'a ChainStorage<T, B>,
    front: ChainIndex<B::Position>,
    remaining: usize,
}

impl<T, B: BranchList<T>> Iterator for ChainIndices<'_, T, B> {
    type Item = ChainIndex<B::Position>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let next = self.storage.successor(&self.front);
        self.remaining -= 1;
        Some(std::mem::replace(&mut self.front, next))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, B: BranchList<T>> ExactSizeIterator for ChainIndices<'_, T, B> {}

impl<T, B: BranchList<T>> FusedIterator for ChainIndices<'_, T, B> {}

impl<T, B: BranchList<T>> Clone for ChainIndices<'_, T, B> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            front: self.front.clone(),
            remaining: self.remaining,
        }
    }
}

/// Iterator over the elements of a chain, produced by [`Chain::iter`].
pub struct ChainIter<'a, T, B: BranchList<T>> {
    indices: ChainIndices<'a, T, B>,
}

impl<'a, T, B: BranchList<T>> Iterator for ChainIter<'a, T, B> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let storage = self.indices.storage;
        self.indices.next().map(|index| storage.element(&index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<T, B: BranchList<T>> ExactSizeIterator for ChainIter<'_, T, B> {}

impl<T, B: BranchList<T>> FusedIterator for ChainIter<'_, T, B> {}

impl<T, B: BranchList<T>> Clone for ChainIter<'_, T, B> {
    fn clone(&self) -> Self {
        Self {
            indices: self.indices.clone(),
        }
    }
}

impl<'a, T, B: BranchList<T>> IntoIterator for &'a Chain<T, B> {
    type Item = &'a T;
    type IntoIter = ChainIter<'a, T, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, B> Clone for Chain<T, B> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
        }
    }
}

impl<T, B: BranchList<T>> From<B> for Chain<T, B> {
    fn from(branches: B) -> Self {
        Self::new(branches)
    }
}

impl<T, B: BranchList<T> + Default> Default for Chain<T, B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<'a, T, B: BranchList<T>> Index<&'a ChainIndex<B::Position>> for Chain<T, B> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: &'a ChainIndex<B::Position>) -> &T {
        self.element(index)
    }
}

impl<'a, T, B: MutableBranchList<T> + Clone> IndexMut<&'a ChainIndex<B::Position>>
    for Chain<T, B>
{
    #[track_caller]
    fn index_mut(&mut self, index: &'a ChainIndex<B::Position>) -> &mut T {
        self.element_mut(index)
    }
}

impl<T, B: PartialEq> PartialEq for Chain<T, B> {
    fn eq(&self, other: &Self) -> bool {
        self.storage.ptr_eq(&other.storage)
            || self.storage.branches() == other.storage.branches()
    }
}

impl<T, B: Eq> Eq for Chain<T, B> {}

impl<T, B: Hash> Hash for Chain<T, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.storage.branches().hash(state);
    }
}

impl<T: fmt::Debug, B: BranchList<T>> fmt::Debug for Chain<T, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, B: BranchList<T>> fmt::Display for Chain<T, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

#[cfg(feature = "serde")]
impl<T, B: serde::Serialize> serde::Serialize for Chain<T, B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.storage.branches().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, B> serde::Deserialize<'de> for Chain<T, B>
where
    B: BranchList<T> + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        B::deserialize(deserializer).map(Self::new)
    }
}
