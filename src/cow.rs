//! Copy-on-write box.
//!
//! This module provides [`CowBox`], a reference-counted cell with value
//! semantics. Cloning a `CowBox` only increments the reference count; the
//! payload is deep-copied lazily, the first time a holder asks for mutable
//! access while another holder still shares it.
//!
//! # Examples
//!
//! ```rust
//! use catena::cow::CowBox;
//!
//! let original = CowBox::new(vec![1, 2, 3]);
//! let mut copy = original.clone();
//! assert!(copy.ptr_eq(&original));
//!
//! // The first write detaches the copy from the shared storage
//! copy.make_mut().push(4);
//! assert_eq!(*original, vec![1, 2, 3]);
//! assert_eq!(*copy, vec![1, 2, 3, 4]);
//! assert!(!copy.ptr_eq(&original));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

// =============================================================================
// CowBox Definition
// =============================================================================

/// A shared cell that copies its payload on divergent mutation.
///
/// A box is the sole owner of its payload when its reference count is one.
/// Only a sole owner mutates in place; any other holder clones the payload
/// into a fresh box first, so a write through one copy is never observable
/// through another.
///
/// # Time Complexity
///
/// | Operation      | Complexity                        |
/// |----------------|-----------------------------------|
/// | `clone`        | O(1)                              |
/// | `get`          | O(1)                              |
/// | `is_unique`    | O(1)                              |
/// | `obtain_clone` | O(clone of `T`)                   |
/// | `make_mut`     | O(1) if unique, else O(clone of `T`) |
pub struct CowBox<T> {
    inner: ReferenceCounter<T>,
}

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(CowBox<i32>: Send, Sync);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(CowBox<i32>: Send, Sync);

impl<T> CowBox<T> {
    /// Creates a box that is the sole owner of `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catena::cow::CowBox;
    ///
    /// let cell = CowBox::new(42);
    /// assert!(cell.is_unique());
    /// assert_eq!(*cell.get(), 42);
    /// ```
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            inner: ReferenceCounter::new(value),
        }
    }

    /// Returns a reference to the payload.
    #[inline]
    pub fn get(&self) -> &T {
        &self.inner
    }

    /// Returns `true` if no other box shares this payload.
    #[inline]
    pub fn is_unique(&self) -> bool {
        ReferenceCounter::strong_count(&self.inner) == 1
    }

    /// Returns the number of boxes sharing this payload.
    #[inline]
    pub fn reference_count(&self) -> usize {
        ReferenceCounter::strong_count(&self.inner)
    }

    /// Returns `true` if both boxes share the same payload allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone> CowBox<T> {
    /// Returns a new, independently owned box holding a copy of the payload.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catena::cow::CowBox;
    ///
    /// let original = CowBox::new(String::from("left"));
    /// let copy = original.obtain_clone();
    /// assert_eq!(copy, original);
    /// assert!(!copy.ptr_eq(&original));
    /// assert!(original.is_unique());
    /// ```
    #[must_use]
    pub fn obtain_clone(&self) -> Self {
        Self::new(T::clone(&self.inner))
    }

    /// Returns a new, independently owned box holding a copy of the payload
    /// with `mutator` applied to it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catena::cow::CowBox;
    ///
    /// let original = CowBox::new(vec![1, 2]);
    /// let extended = original.obtain_mutated_clone(|values| values.push(3));
    /// assert_eq!(*original, vec![1, 2]);
    /// assert_eq!(*extended, vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn obtain_mutated_clone<F>(&self, mutator: F) -> Self
    where
        F: FnOnce(&mut T),
    {
        let mut value = T::clone(&self.inner);
        mutator(&mut value);
        Self::new(value)
    }

    /// Returns mutable access to the payload, cloning it first if it is
    /// shared with another box.
    pub fn make_mut(&mut self) -> &mut T {
        if !self.is_unique() {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                reference_count = self.reference_count(),
                payload = std::any::type_name::<T>(),
                "cloning shared storage before write"
            );
            *self = self.obtain_clone();
        }
        // The box is unique here, so this never clones.
        ReferenceCounter::make_mut(&mut self.inner)
    }

    /// Consumes the box and returns the payload, cloning it only if it is
    /// still shared.
    pub fn into_inner(self) -> T {
        ReferenceCounter::try_unwrap(self.inner).unwrap_or_else(|shared| T::clone(&shared))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for CowBox<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            inner: ReferenceCounter::clone(&self.inner),
        }
    }
}

impl<T> Deref for CowBox<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: Default> Default for CowBox<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for CowBox<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: PartialEq> PartialEq for CowBox<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.inner == *other.inner
    }
}

impl<T: Eq> Eq for CowBox<T> {}

impl<T: PartialOrd> PartialOrd for CowBox<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        (*self.inner).partial_cmp(&*other.inner)
    }
}

impl<T: Ord> Ord for CowBox<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self.inner).cmp(&*other.inner)
    }
}

impl<T: Hash> Hash for CowBox<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (*self.inner).hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for CowBox<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("CowBox").field(&*self.inner).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_clone_shares_payload() {
        let original = CowBox::new(vec![1, 2, 3]);
        let copy = original.clone();
        assert_eq!(original.reference_count(), 2);
        assert!(!copy.is_unique());
    }

    #[rstest]
    fn test_make_mut_on_unique_box_keeps_allocation() {
        let mut cell = CowBox::new(vec![1]);
        let before = ReferenceCounter::as_ptr(&cell.inner);
        cell.make_mut().push(2);
        assert_eq!(ReferenceCounter::as_ptr(&cell.inner), before);
        assert_eq!(*cell, vec![1, 2]);
    }

    #[rstest]
    fn test_make_mut_on_shared_box_detaches() {
        let original = CowBox::new(vec![1]);
        let mut copy = original.clone();
        copy.make_mut().push(2);
        assert!(original.is_unique());
        assert!(copy.is_unique());
        assert_eq!(*original, vec![1]);
    }

    #[rstest]
    fn test_into_inner_of_shared_box_clones() {
        let original = CowBox::new(String::from("payload"));
        let copy = original.clone();
        assert_eq!(copy.into_inner(), "payload");
        assert!(original.is_unique());
    }
}
