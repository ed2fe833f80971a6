//! Arity-generic sum and product types.
//!
//! Both families are type-level cons lists, so one implementation serves
//! every arity:
//!
//! - [`Sum`]: a tagged union, `Sum<A, Sum<B, Void>>` holds either an `A` or a `B`
//! - [`Product`]: an aggregate, `Product<A, Product<B, Unit>>` holds an `A` and a `B`
//! - [`SharedProduct`]: a product behind copy-on-write storage
//!
//! The [`Sum!`](crate::Sum!), [`Product!`](crate::Product!) and
//! [`product!`](crate::product!) macros spell these lists flat. Components
//! are addressed by type-level ranks ([`Rank0`], [`Rank1`], ...).
//!
//! # Examples
//!
//! ```rust
//! use catena::prelude::*;
//!
//! let mut triple: Product![i32, &str, bool] = product!(1, "two", true);
//! assert_eq!(*triple.get::<Rank1>(), "two");
//! triple.set::<Rank2>(false);
//! assert_eq!(triple, product!(1, "two", false));
//!
//! let choice: Sum![i32, &str, bool] = Sum::inject::<Rank1>("two");
//! assert_eq!(choice.rank(), 1);
//! assert_eq!(choice.get::<Rank1>(), Some(&"two"));
//! assert_eq!(choice.get::<Rank0>(), None);
//! ```

mod product;
mod rank;
mod sum;

pub use product::Field;
pub use product::Product;
pub use product::SharedProduct;
pub use product::Unit;
pub use rank::First;
pub use rank::Next;
pub use rank::Rank;
pub use rank::{Rank0, Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8};
pub use sum::Alternatives;
pub use sum::Sum;
pub use sum::Tagged;
pub use sum::Uniform;
pub use sum::Variant;
pub use sum::Void;

/// Number of components (for products) or branches (for sums) of a
/// type-level list.
///
/// # Examples
///
/// ```rust
/// use catena::prelude::*;
///
/// assert_eq!(<Product![u8, u16, u32] as Arity>::ARITY, 3);
/// assert_eq!(<Sum![u8, u16] as Arity>::ARITY, 2);
/// ```
pub trait Arity {
    /// The number of components.
    const ARITY: usize;
}

impl Arity for Unit {
    const ARITY: usize = 0;
}

impl<H, T: Arity> Arity for Product<H, T> {
    const ARITY: usize = 1 + T::ARITY;
}

impl Arity for Void {
    const ARITY: usize = 0;
}

impl<H, T: Arity> Arity for Sum<H, T> {
    const ARITY: usize = 1 + T::ARITY;
}

/// Spells a [`Product`] type from a flat list of component types.
///
/// `Product![A, B, C]` expands to `Product<A, Product<B, Product<C, Unit>>>`.
#[macro_export]
macro_rules! Product {
    () => { $crate::algebra::Unit };
    ($head:ty $(, $rest:ty)* $(,)?) => {
        $crate::algebra::Product<$head, $crate::Product![$($rest),*]>
    };
}

/// Builds a [`Product`] value from a flat list of component expressions.
///
/// Components are evaluated left to right.
///
/// # Examples
///
/// ```rust
/// use catena::prelude::*;
///
/// let pair = product!(1, "one");
/// assert_eq!(pair.head, 1);
/// assert_eq!(pair.tail.head, "one");
/// ```
#[macro_export]
macro_rules! product {
    () => { $crate::algebra::Unit };
    ($head:expr $(, $rest:expr)* $(,)?) => {
        $crate::algebra::Product {
            head: $head,
            tail: $crate::product!($($rest),*),
        }
    };
}

/// Spells a [`Sum`] type from a flat list of branch types.
///
/// `Sum![A, B, C]` expands to `Sum<A, Sum<B, Sum<C, Void>>>`.
#[macro_export]
macro_rules! Sum {
    () => { $crate::algebra::Void };
    ($head:ty $(, $rest:ty)* $(,)?) => {
        $crate::algebra::Sum<$head, $crate::Sum![$($rest),*]>
    };
}
