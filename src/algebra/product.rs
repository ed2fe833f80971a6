//! Arity-generic aggregate in inline and shared representations.
//!
//! [`Product<H, T>`] stores one value per component directly: `head`, then
//! the remaining components in `tail`, terminated by [`Unit`]. Equality,
//! ordering and hashing are derived, so they are componentwise and ordering
//! is lexicographic in declared component order.
//!
//! [`SharedProduct<P>`] stores the same product once in a [`CowBox`]. Copies
//! share that block until one of them writes a field, at which point the
//! writer clones the block first. The two representations convert into each
//! other with `From` and preserve field-for-field equality.
//!
//! # Examples
//!
//! ```rust
//! use catena::prelude::*;
//!
//! let inline = product!(1, String::from("one"));
//! let shared = SharedProduct::from(inline.clone());
//!
//! let mut copy = shared.clone();
//! copy.set::<Rank1>(String::from("uno"));
//!
//! assert_eq!(shared.get::<Rank1>(), "one");
//! assert_eq!(copy.get::<Rank1>(), "uno");
//! assert_eq!(Product::from(shared), inline);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use super::rank::{First, Next};
use crate::cow::CowBox;

// =============================================================================
// Inline Representation
// =============================================================================

/// An aggregate holding one value per component.
///
/// # Examples
///
/// ```rust
/// use catena::prelude::*;
///
/// let low = product!(1, 'b');
/// let high = product!(1, 'c');
/// assert!(low < high);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Product<H, T> {
    /// The component at rank 0.
    pub head: H,
    /// The remaining components.
    pub tail: T,
}

/// The empty product, terminating every [`Product`] list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit;

/// Access to the component at rank `R` of a product.
pub trait Field<R> {
    /// The type of the component at rank `R`.
    type Output;

    /// Returns a reference to the component.
    fn field(&self) -> &Self::Output;

    /// Returns a mutable reference to the component.
    fn field_mut(&mut self) -> &mut Self::Output;
}

impl<H, T> Field<First> for Product<H, T> {
    type Output = H;

    #[inline]
    fn field(&self) -> &H {
        &self.head
    }

    #[inline]
    fn field_mut(&mut self) -> &mut H {
        &mut self.head
    }
}

impl<H, T, R> Field<Next<R>> for Product<H, T>
where
    T: Field<R>,
{
    type Output = T::Output;

    #[inline]
    fn field(&self) -> &T::Output {
        self.tail.field()
    }

    #[inline]
    fn field_mut(&mut self) -> &mut T::Output {
        self.tail.field_mut()
    }
}

impl<H, T> Product<H, T> {
    /// Creates a product from its first component and the remaining ones.
    #[inline]
    pub const fn new(head: H, tail: T) -> Self {
        Self { head, tail }
    }

    /// Returns the component at rank `R`.
    #[inline]
    pub fn get<R>(&self) -> &<Self as Field<R>>::Output
    where
        Self: Field<R>,
    {
        <Self as Field<R>>::field(self)
    }

    /// Returns the component at rank `R` mutably.
    #[inline]
    pub fn get_mut<R>(&mut self) -> &mut <Self as Field<R>>::Output
    where
        Self: Field<R>,
    {
        <Self as Field<R>>::field_mut(self)
    }

    /// Replaces the component at rank `R` and returns the previous value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catena::prelude::*;
    ///
    /// let mut pair = product!(1, "one");
    /// assert_eq!(pair.set::<Rank0>(2), 1);
    /// assert_eq!(pair, product!(2, "one"));
    /// ```
    #[inline]
    pub fn set<R>(&mut self, value: <Self as Field<R>>::Output) -> <Self as Field<R>>::Output
    where
        Self: Field<R>,
    {
        std::mem::replace(<Self as Field<R>>::field_mut(self), value)
    }

    /// Returns the product with the component at rank `R` replaced.
    #[inline]
    #[must_use]
    pub fn with<R>(mut self, value: <Self as Field<R>>::Output) -> Self
    where
        Self: Field<R>,
    {
        *<Self as Field<R>>::field_mut(&mut self) = value;
        self
    }
}

// =============================================================================
// Shared Representation
// =============================================================================

/// A product stored once behind copy-on-write storage.
///
/// Cloning a `SharedProduct` shares the block. Writing a field through
/// [`set`](Self::set), [`update`](Self::update) or
/// [`make_mut`](Self::make_mut) first checks whether the block is shared and
/// clones it if so, so the write is never visible through another copy.
#[derive(Clone)]
pub struct SharedProduct<P> {
    storage: CowBox<P>,
}

impl<P> SharedProduct<P> {
    /// Moves `product` into a new, unshared block.
    #[inline]
    pub fn new(product: P) -> Self {
        Self {
            storage: CowBox::new(product),
        }
    }

    /// Returns the component at rank `R`.
    #[inline]
    pub fn get<R>(&self) -> &<P as Field<R>>::Output
    where
        P: Field<R>,
    {
        <P as Field<R>>::field(self.storage.get())
    }

    /// Returns the underlying inline product.
    #[inline]
    pub fn as_inline(&self) -> &P {
        self.storage.get()
    }

    /// Returns `true` if another copy currently shares the block.
    #[inline]
    pub fn is_shared(&self) -> bool {
        !self.storage.is_unique()
    }
}

impl<P: Clone> SharedProduct<P> {
    /// Returns mutable access to the whole product, cloning a shared block
    /// first.
    #[inline]
    pub fn make_mut(&mut self) -> &mut P {
        self.storage.make_mut()
    }

    /// Replaces the component at rank `R` and returns the previous value.
    pub fn set<R>(&mut self, value: <P as Field<R>>::Output) -> <P as Field<R>>::Output
    where
        P: Field<R>,
    {
        std::mem::replace(<P as Field<R>>::field_mut(self.make_mut()), value)
    }

    /// Applies `function` to the component at rank `R` in place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catena::prelude::*;
    ///
    /// let original = SharedProduct::new(product!(vec![1], 'a'));
    /// let mut copy = original.clone();
    /// copy.update::<Rank0, _>(|values| values.push(2));
    ///
    /// assert_eq!(original.get::<Rank0>(), &vec![1]);
    /// assert_eq!(copy.get::<Rank0>(), &vec![1, 2]);
    /// ```
    pub fn update<R, F>(&mut self, function: F)
    where
        P: Field<R>,
        F: FnOnce(&mut <P as Field<R>>::Output),
    {
        function(<P as Field<R>>::field_mut(self.make_mut()));
    }

    /// Converts into the inline representation, cloning only if the block is
    /// still shared.
    pub fn into_inline(self) -> P {
        self.storage.into_inner()
    }
}

impl<P> From<P> for SharedProduct<P> {
    fn from(product: P) -> Self {
        Self::new(product)
    }
}

impl<H: Clone, T: Clone> From<SharedProduct<Self>> for Product<H, T> {
    fn from(shared: SharedProduct<Self>) -> Self {
        shared.into_inline()
    }
}

impl<P: PartialEq> PartialEq for SharedProduct<P> {
    fn eq(&self, other: &Self) -> bool {
        self.storage == other.storage
    }
}

impl<P: Eq> Eq for SharedProduct<P> {}

impl<P: PartialOrd> PartialOrd for SharedProduct<P> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.storage.partial_cmp(&other.storage)
    }
}

impl<P: Ord> Ord for SharedProduct<P> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.storage.cmp(&other.storage)
    }
}

impl<P: Hash> Hash for SharedProduct<P> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.storage.hash(state);
    }
}

impl<P: fmt::Debug> fmt::Debug for SharedProduct<P> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("SharedProduct")
            .field(self.storage.get())
            .finish()
    }
}

impl<P: Default> Default for SharedProduct<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

#[cfg(feature = "serde")]
impl<P: serde::Serialize> serde::Serialize for SharedProduct<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.storage.get().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, P: serde::Deserialize<'de>> serde::Deserialize<'de> for SharedProduct<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        P::deserialize(deserializer).map(Self::new)
    }
}
