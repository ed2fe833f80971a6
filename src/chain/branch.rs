//! The contract a sequence must satisfy to be chained.
//!
//! A branch is an ordered, finite, multiply-traversable sequence with a
//! start index, an end index one past its last element, and a successor
//! operation. Capabilities are layered:
//!
//! - [`Branch`]: forward traversal and bounds-checked element lookup
//! - [`BidirectionalBranch`]: adds a predecessor operation
//! - [`RandomAccessBranch`]: promises O(1) offset arithmetic
//! - [`MutableBranch`]: adds in-place element access
//!
//! A chain offers a capability only when every one of its branches does.
//!
//! Implementations are provided for `Vec<T>`, `VecDeque<T>`, `Box<[T]>`,
//! `[T; N]` and `&[T]` (random access, indexed by `usize`), and for
//! `BTreeSet<T>` and `BTreeMap<K, V>` (bidirectional, indexed by
//! [`KeyIndex`]).

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::ops::Bound;

use crate::contract::{ContractViolation, violation};

// =============================================================================
// Capability Traits
// =============================================================================

/// An ordered, finite sequence that can be traversed any number of times.
///
/// Only the four required methods must be written. The provided methods walk
/// the branch with [`index_after`](Self::index_after); branches that can do
/// better should override them.
///
/// Index values must totally order every valid position before the end
/// index. Passing an index that did not come from this branch, stepping past
/// the end, or subscripting the end index is a contract violation and panics.
///
/// # Examples
///
/// ```rust
/// use catena::chain::Branch;
///
/// let branch = vec!['a', 'b'];
/// let second = branch.index_after(&branch.start_index());
/// assert_eq!(branch.element(&second), &'b');
/// assert_eq!(branch.index_after(&second), branch.end_index());
/// ```
pub trait Branch {
    /// The element type shared by every branch of one chain.
    type Element;

    /// The branch-local position type.
    type Index: Clone + Ord;

    /// Returns the index of the first element, or the end index if the
    /// branch is empty.
    fn start_index(&self) -> Self::Index;

    /// Returns the index one past the last element.
    fn end_index(&self) -> Self::Index;

    /// Returns the index following `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is the end index.
    fn index_after(&self, index: &Self::Index) -> Self::Index;

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not name an element of this branch.
    fn element(&self, index: &Self::Index) -> &Self::Element;

    /// Returns the number of elements.
    fn count(&self) -> usize {
        self.indices().count()
    }

    /// Returns `true` if the branch has no elements.
    fn is_empty(&self) -> bool {
        self.start_index() == self.end_index()
    }

    /// Returns an iterator over the indices of every element, in order.
    fn indices(&self) -> BranchIndices<'_, Self> {
        BranchIndices {
            branch: self,
            current: self.start_index(),
            end: self.end_index(),
        }
    }

    /// Returns the number of steps from the start index to `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not reachable from the start index.
    fn offset_of(&self, index: &Self::Index) -> usize {
        let end = self.end_index();
        let mut current = self.start_index();
        let mut offset = 0;
        while current != *index {
            if current == end {
                violation(ContractViolation::UnreachableIndex { count: offset });
            }
            current = self.index_after(&current);
            offset += 1;
        }
        offset
    }

    /// Returns the index `offset` steps after the start index. An offset
    /// equal to the count yields the end index.
    ///
    /// # Panics
    ///
    /// Panics if `offset` exceeds the count.
    fn index_at_offset(&self, offset: usize) -> Self::Index {
        let end = self.end_index();
        let mut current = self.start_index();
        for step in 0..offset {
            if current == end {
                violation(ContractViolation::BranchIndexOutOfBounds {
                    index: offset,
                    count: step,
                });
            }
            current = self.index_after(&current);
        }
        current
    }

    /// Returns `true` if any element equals `element`.
    fn contains(&self, element: &Self::Element) -> bool
    where
        Self::Element: PartialEq,
    {
        self.indices().any(|index| self.element(&index) == element)
    }

    /// Returns the least element, or `None` if the branch is empty. Among
    /// equal candidates the first one wins.
    fn min_element(&self) -> Option<&Self::Element>
    where
        Self::Element: Ord,
    {
        self.indices().map(|index| self.element(&index)).min()
    }

    /// Returns the greatest element, or `None` if the branch is empty. Among
    /// equal candidates the last one wins.
    fn max_element(&self) -> Option<&Self::Element>
    where
        Self::Element: Ord,
    {
        self.indices().map(|index| self.element(&index)).max()
    }
}

/// A branch that can also step backwards.
pub trait BidirectionalBranch: Branch {
    /// Returns the index preceding `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is the start index.
    fn index_before(&self, index: &Self::Index) -> Self::Index;
}

/// A branch whose [`offset_of`](Branch::offset_of) and
/// [`index_at_offset`](Branch::index_at_offset) run in constant time.
pub trait RandomAccessBranch: BidirectionalBranch {}

/// A branch whose elements can be modified in place.
pub trait MutableBranch: Branch {
    /// Returns the element at `index` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not name an element of this branch.
    fn element_mut(&mut self, index: &Self::Index) -> &mut Self::Element;
}

// =============================================================================
// BranchIndices
// =============================================================================

/// Iterator over the element indices of a branch, produced by
/// [`Branch::indices`].
pub struct BranchIndices<'a, B: Branch + ?Sized> {
    branch: &'a B,
    current: B::Index,
    end: B::Index,
}

impl<B: Branch + ?Sized> Iterator for BranchIndices<'_, B> {
    type Item = B::Index;

    fn next(&mut self) -> Option<B::Index> {
        if self.current == self.end {
            return None;
        }
        let next = self.branch.index_after(&self.current);
        Some(std::mem::replace(&mut self.current, next))
    }
}

impl<B: Branch + ?Sized> std::iter::FusedIterator for BranchIndices<'_, B> {}

// =============================================================================
// Contiguous Branches
// =============================================================================

#[inline]
#[track_caller]
fn checked_offset(index: usize, count: usize) -> usize {
    if index > count {
        violation(ContractViolation::BranchIndexOutOfBounds { index, count });
    }
    index
}

macro_rules! impl_contiguous_branch {
    ($([$($generics:tt)*] $branch:ty),* $(,)?) => {
        $(
            impl<$($generics)*> Branch for $branch {
                type Element = T;
                type Index = usize;

                #[inline]
                fn start_index(&self) -> usize {
                    0
                }

                #[inline]
                fn end_index(&self) -> usize {
                    self.len()
                }

                #[inline]
                fn index_after(&self, index: &usize) -> usize {
                    if *index >= self.len() {
                        violation(ContractViolation::AdvancedPastEnd);
                    }
                    index + 1
                }

                #[inline]
                fn element(&self, index: &usize) -> &T {
                    self.get(*index).unwrap_or_else(|| {
                        violation(ContractViolation::BranchIndexOutOfBounds {
                            index: *index,
                            count: self.len(),
                        })
                    })
                }

                #[inline]
                fn count(&self) -> usize {
                    self.len()
                }

                #[inline]
                fn is_empty(&self) -> bool {
                    self.len() == 0
                }

                #[inline]
                fn offset_of(&self, index: &usize) -> usize {
                    checked_offset(*index, self.len())
                }

                #[inline]
                fn index_at_offset(&self, offset: usize) -> usize {
                    checked_offset(offset, self.len())
                }

                fn contains(&self, element: &T) -> bool
                where
                    T: PartialEq,
                {
                    self.iter().any(|candidate| candidate == element)
                }

                fn min_element(&self) -> Option<&T>
                where
                    T: Ord,
                {
                    self.iter().min()
                }

                fn max_element(&self) -> Option<&T>
                where
                    T: Ord,
                {
                    self.iter().max()
                }
            }

            impl<$($generics)*> BidirectionalBranch for $branch {
                #[inline]
                fn index_before(&self, index: &usize) -> usize {
                    let count = self.len();
                    if *index > count {
                        violation(ContractViolation::BranchIndexOutOfBounds {
                            index: *index,
                            count,
                        });
                    }
                    if *index == 0 {
                        violation(ContractViolation::RetreatedBeforeStart);
                    }
                    index - 1
                }
            }

            impl<$($generics)*> RandomAccessBranch for $branch {}
        )*
    };
}

macro_rules! impl_mutable_contiguous_branch {
    ($([$($generics:tt)*] $branch:ty),* $(,)?) => {
        $(
            impl<$($generics)*> MutableBranch for $branch {
                #[inline]
                fn element_mut(&mut self, index: &usize) -> &mut T {
                    let count = self.len();
                    self.get_mut(*index).unwrap_or_else(|| {
                        violation(ContractViolation::BranchIndexOutOfBounds {
                            index: *index,
                            count,
                        })
                    })
                }
            }
        )*
    };
}

impl_contiguous_branch!(
    [T] Vec<T>,
    [T] VecDeque<T>,
    [T] Box<[T]>,
    [T, const N: usize] [T; N],
    ['a, T] &'a [T],
);

impl_mutable_contiguous_branch!(
    [T] Vec<T>,
    [T] VecDeque<T>,
    [T] Box<[T]>,
    [T, const N: usize] [T; N],
);

// =============================================================================
// Keyed Branches
// =============================================================================

/// Position inside a keyed branch: the key of an element, or the end.
///
/// The derived ordering places every key before [`KeyIndex::End`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyIndex<K> {
    /// The element stored under this key.
    Key(K),
    /// One past the greatest key.
    End,
}

impl<K> KeyIndex<K> {
    fn from_key(key: Option<&K>) -> Self
    where
        K: Clone,
    {
        key.cloned().map_or(Self::End, Self::Key)
    }
}

#[inline]
#[track_caller]
fn require_key(present: bool) {
    if !present {
        violation(ContractViolation::MissingKey);
    }
}

impl<T: Ord + Clone> Branch for BTreeSet<T> {
    type Element = T;
    type Index = KeyIndex<T>;

    fn start_index(&self) -> KeyIndex<T> {
        KeyIndex::from_key(self.first())
    }

    fn end_index(&self) -> KeyIndex<T> {
        KeyIndex::End
    }

    fn index_after(&self, index: &KeyIndex<T>) -> KeyIndex<T> {
        match index {
            KeyIndex::Key(key) => {
                require_key(BTreeSet::contains(self, key));
                KeyIndex::from_key(
                    self.range::<T, _>((Bound::Excluded(key), Bound::Unbounded))
                        .next(),
                )
            }
            KeyIndex::End => violation(ContractViolation::AdvancedPastEnd),
        }
    }

    fn element(&self, index: &KeyIndex<T>) -> &T {
        match index {
            KeyIndex::Key(key) => self
                .get(key)
                .unwrap_or_else(|| violation(ContractViolation::MissingKey)),
            KeyIndex::End => violation(ContractViolation::SubscriptedEnd),
        }
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn offset_of(&self, index: &KeyIndex<T>) -> usize {
        match index {
            KeyIndex::Key(key) => {
                require_key(BTreeSet::contains(self, key));
                self.range::<T, _>(..key).count()
            }
            KeyIndex::End => self.len(),
        }
    }

    fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        BTreeSet::contains(self, element)
    }

    fn min_element(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.first()
    }

    fn max_element(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.last()
    }
}

impl<T: Ord + Clone> BidirectionalBranch for BTreeSet<T> {
    fn index_before(&self, index: &KeyIndex<T>) -> KeyIndex<T> {
        let previous = match index {
            KeyIndex::Key(key) => {
                require_key(BTreeSet::contains(self, key));
                self.range::<T, _>(..key).next_back()
            }
            KeyIndex::End => self.last(),
        };
        previous.cloned().map_or_else(
            || violation(ContractViolation::RetreatedBeforeStart),
            KeyIndex::Key,
        )
    }
}

impl<K: Ord + Clone, V> Branch for BTreeMap<K, V> {
    type Element = V;
    type Index = KeyIndex<K>;

    fn start_index(&self) -> KeyIndex<K> {
        KeyIndex::from_key(self.keys().next())
    }

    fn end_index(&self) -> KeyIndex<K> {
        KeyIndex::End
    }

    fn index_after(&self, index: &KeyIndex<K>) -> KeyIndex<K> {
        match index {
            KeyIndex::Key(key) => {
                require_key(self.contains_key(key));
                KeyIndex::from_key(
                    self.range::<K, _>((Bound::Excluded(key), Bound::Unbounded))
                        .next()
                        .map(|(key, _)| key),
                )
            }
            KeyIndex::End => violation(ContractViolation::AdvancedPastEnd),
        }
    }

    fn element(&self, index: &KeyIndex<K>) -> &V {
        match index {
            KeyIndex::Key(key) => self
                .get(key)
                .unwrap_or_else(|| violation(ContractViolation::MissingKey)),
            KeyIndex::End => violation(ContractViolation::SubscriptedEnd),
        }
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn offset_of(&self, index: &KeyIndex<K>) -> usize {
        match index {
            KeyIndex::Key(key) => {
                require_key(self.contains_key(key));
                self.range::<K, _>(..key).count()
            }
            KeyIndex::End => self.len(),
        }
    }

    fn contains(&self, element: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|candidate| candidate == element)
    }

    fn min_element(&self) -> Option<&V>
    where
        V: Ord,
    {
        self.values().min()
    }

    fn max_element(&self) -> Option<&V>
    where
        V: Ord,
    {
        self.values().max()
    }
}

impl<K: Ord + Clone, V> BidirectionalBranch for BTreeMap<K, V> {
    fn index_before(&self, index: &KeyIndex<K>) -> KeyIndex<K> {
        let previous = match index {
            KeyIndex::Key(key) => {
                require_key(self.contains_key(key));
                self.range::<K, _>(..key).next_back()
            }
            KeyIndex::End => self.last_key_value(),
        };
        previous.map_or_else(
            || violation(ContractViolation::RetreatedBeforeStart),
            |(key, _)| KeyIndex::Key(key.clone()),
        )
    }
}

impl<K: Ord + Clone, V> MutableBranch for BTreeMap<K, V> {
    fn element_mut(&mut self, index: &KeyIndex<K>) -> &mut V {
        match index {
            KeyIndex::Key(key) => self
                .get_mut(key)
                .unwrap_or_else(|| violation(ContractViolation::MissingKey)),
            KeyIndex::End => violation(ContractViolation::SubscriptedEnd),
        }
    }
}
