//! Arity-generic tagged union.
//!
//! [`Sum<H, T>`] is either `Head(H)` or `Tail(T)`, where `T` is itself a sum
//! or the uninhabited terminator [`Void`]. A sum over N branch types is
//! therefore N nested `Sum`s, and the branch at rank k is reached through
//! k `Tail`s followed by one `Head`.
//!
//! # Ordering
//!
//! The derived ordering compares the occupied rank first and the payload
//! second: every value of a lower-ranked branch is less than every value of a
//! higher-ranked branch, regardless of payload.
//!
//! ```rust
//! use catena::prelude::*;
//!
//! let low: Sum![u32, u32] = Sum::inject::<Rank0>(u32::MAX);
//! let high: Sum![u32, u32] = Sum::inject::<Rank1>(0);
//! assert!(low < high);
//! ```

use super::product::{Product, Unit};
use super::rank::{First, Next};

/// A value of exactly one of several branch types.
///
/// `Sum<H, T>` holds either an `H` at rank 0 or, through `T`, a value at a
/// later rank. Sums are immutable once constructed: changing the occupied
/// branch replaces the whole value.
///
/// # Examples
///
/// ```rust
/// use catena::prelude::*;
///
/// let value: Sum![i32, String] = Sum::inject::<Rank1>("text".to_string());
/// assert_eq!(value.rank(), 1);
/// assert_eq!(value.get::<Rank1>().map(String::as_str), Some("text"));
/// assert!(value.get::<Rank0>().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sum<H, T> {
    /// The branch at rank 0 of this sum.
    Head(H),
    /// One of the remaining branches.
    Tail(T),
}

/// The empty sum, terminating every [`Sum`] list.
///
/// `Void` has no values, so code matching on it is unreachable by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Void {}

// =============================================================================
// Tagged
// =============================================================================

/// Sums that report which branch they occupy.
pub trait Tagged {
    /// Returns the rank of the occupied branch.
    fn rank(&self) -> usize;
}

impl Tagged for Void {
    fn rank(&self) -> usize {
        match *self {}
    }
}

impl<H, T: Tagged> Tagged for Sum<H, T> {
    #[inline]
    fn rank(&self) -> usize {
        match self {
            Self::Head(_) => 0,
            Self::Tail(rest) => 1 + rest.rank(),
        }
    }
}

// =============================================================================
// Variant
// =============================================================================

/// Access to the branch at rank `R` of a sum.
pub trait Variant<R>: Sized {
    /// The payload type of the branch at rank `R`.
    type Payload;

    /// Creates a sum occupying the branch at rank `R`.
    fn inject(payload: Self::Payload) -> Self;

    /// Returns the payload if the branch at rank `R` is occupied.
    fn get(&self) -> Option<&Self::Payload>;

    /// Extracts the payload if the branch at rank `R` is occupied, or gives
    /// the sum back otherwise.
    ///
    /// # Errors
    ///
    /// Returns the unchanged sum when another branch is occupied.
    fn take(self) -> Result<Self::Payload, Self>;
}

impl<H, T> Variant<First> for Sum<H, T> {
    type Payload = H;

    #[inline]
    fn inject(payload: H) -> Self {
        Self::Head(payload)
    }

    #[inline]
    fn get(&self) -> Option<&H> {
        match self {
            Self::Head(payload) => Some(payload),
            Self::Tail(_) => None,
        }
    }

    #[inline]
    fn take(self) -> Result<H, Self> {
        match self {
            Self::Head(payload) => Ok(payload),
            other @ Self::Tail(_) => Err(other),
        }
    }
}

impl<H, T, R> Variant<Next<R>> for Sum<H, T>
where
    T: Variant<R>,
{
    type Payload = T::Payload;

    #[inline]
    fn inject(payload: T::Payload) -> Self {
        Self::Tail(T::inject(payload))
    }

    #[inline]
    fn get(&self) -> Option<&T::Payload> {
        match self {
            Self::Head(_) => None,
            Self::Tail(rest) => rest.get(),
        }
    }

    #[inline]
    fn take(self) -> Result<T::Payload, Self> {
        match self {
            Self::Head(payload) => Err(Self::Head(payload)),
            Self::Tail(rest) => rest.take().map_err(Self::Tail),
        }
    }
}

// =============================================================================
// Uniform
// =============================================================================

/// Sums whose branches all carry the same payload type `U`.
pub trait Uniform<U> {
    /// Returns the payload, whichever branch holds it.
    fn uniform(&self) -> &U;

    /// Consumes the sum and returns the payload, whichever branch holds it.
    fn into_uniform(self) -> U;
}

impl<U> Uniform<U> for Void {
    fn uniform(&self) -> &U {
        match *self {}
    }

    fn into_uniform(self) -> U {
        match self {}
    }
}

impl<U, T: Uniform<U>> Uniform<U> for Sum<U, T> {
    #[inline]
    fn uniform(&self) -> &U {
        match self {
            Self::Head(payload) => payload,
            Self::Tail(rest) => rest.uniform(),
        }
    }

    #[inline]
    fn into_uniform(self) -> U {
        match self {
            Self::Head(payload) => payload,
            Self::Tail(rest) => rest.into_uniform(),
        }
    }
}

// =============================================================================
// Alternatives
// =============================================================================

/// A [`Product`] of thunks, each producing an optional branch value.
///
/// Used by [`Sum::first_present`] and [`Sum::last_present`] to pick one value
/// out of a fallback chain without evaluating the thunks past the one chosen.
pub trait Alternatives {
    /// The sum with one branch per thunk.
    type Output;

    /// Calls the thunks left to right and returns the first present value.
    fn first_present(self) -> Option<Self::Output>;

    /// Calls the thunks right to left and returns the first present value.
    fn last_present(self) -> Option<Self::Output>;
}

impl Alternatives for Unit {
    type Output = Void;

    #[inline]
    fn first_present(self) -> Option<Void> {
        None
    }

    #[inline]
    fn last_present(self) -> Option<Void> {
        None
    }
}

impl<F, V, T> Alternatives for Product<F, T>
where
    F: FnOnce() -> Option<V>,
    T: Alternatives,
{
    type Output = Sum<V, T::Output>;

    fn first_present(self) -> Option<Self::Output> {
        let Self { head, tail } = self;
        match head() {
            Some(value) => Some(Sum::Head(value)),
            None => tail.first_present().map(Sum::Tail),
        }
    }

    fn last_present(self) -> Option<Self::Output> {
        let Self { head, tail } = self;
        match tail.last_present() {
            Some(rest) => Some(Sum::Tail(rest)),
            None => head().map(Sum::Head),
        }
    }
}

// =============================================================================
// Inherent Conveniences
// =============================================================================

impl<H, T> Sum<H, T> {
    /// Creates a sum occupying the branch at rank `R`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catena::prelude::*;
    ///
    /// let value: Sum![u8, char, bool] = Sum::inject::<Rank2>(true);
    /// assert_eq!(value, Sum::Tail(Sum::Tail(Sum::Head(true))));
    /// ```
    #[inline]
    pub fn inject<R>(payload: <Self as Variant<R>>::Payload) -> Self
    where
        Self: Variant<R>,
    {
        <Self as Variant<R>>::inject(payload)
    }

    /// Returns the payload of the branch at rank `R`, or `None` if another
    /// branch is occupied.
    #[inline]
    pub fn get<R>(&self) -> Option<&<Self as Variant<R>>::Payload>
    where
        Self: Variant<R>,
    {
        <Self as Variant<R>>::get(self)
    }

    /// Extracts the payload of the branch at rank `R`.
    ///
    /// # Errors
    ///
    /// Returns the unchanged sum when another branch is occupied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catena::prelude::*;
    ///
    /// let value: Sum![u8, char] = Sum::inject::<Rank1>('x');
    /// let value = value.take::<Rank0>().unwrap_err();
    /// assert_eq!(value.take::<Rank1>(), Ok('x'));
    /// ```
    #[inline]
    pub fn take<R>(self) -> Result<<Self as Variant<R>>::Payload, Self>
    where
        Self: Variant<R>,
    {
        <Self as Variant<R>>::take(self)
    }

    /// Returns the rank of the occupied branch.
    #[inline]
    pub fn rank(&self) -> usize
    where
        T: Tagged,
    {
        Tagged::rank(self)
    }

    /// Consumes a sum whose branches share one payload type and returns the
    /// occupied rank together with the payload.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catena::prelude::*;
    ///
    /// let value: Sum![&str, &str, &str] = Sum::inject::<Rank2>("last");
    /// assert_eq!(value.into_tagged(), (2, "last"));
    /// ```
    pub fn into_tagged(self) -> (usize, H)
    where
        T: Tagged + Uniform<H>,
    {
        (self.rank(), self.into_uniform())
    }

    /// Builds a sum from the first thunk, left to right, that yields a value.
    ///
    /// Thunks after the chosen one are never called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catena::prelude::*;
    ///
    /// let chosen: Option<Sum![i32, &str, char]> = Sum::first_present(product!(
    ///     || None,
    ///     || Some("fallback"),
    ///     || -> Option<char> { unreachable!() },
    /// ));
    /// assert_eq!(chosen.map(|value| value.rank()), Some(1));
    /// ```
    pub fn first_present<A>(alternatives: A) -> Option<Self>
    where
        A: Alternatives<Output = Self>,
    {
        alternatives.first_present()
    }

    /// Builds a sum from the first thunk, right to left, that yields a value.
    ///
    /// Thunks before the chosen one are never called.
    pub fn last_present<A>(alternatives: A) -> Option<Self>
    where
        A: Alternatives<Output = Self>,
    {
        alternatives.last_present()
    }
}
