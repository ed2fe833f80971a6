//! # catena
//!
//! Generic sum/product algebra and copy-on-write chain collections.
//!
//! ## Overview
//!
//! This library composes heterogeneous ordered sequences that share an
//! element type into one logically contiguous, randomly-indexable sequence.
//! It includes:
//!
//! - **Algebra**: arity-generic tagged unions ([`algebra::Sum`]) and
//!   aggregates ([`algebra::Product`]), built as type-level cons lists so a
//!   single implementation serves every arity
//! - **Copy-on-write**: [`cow::CowBox`], a reference-counted cell that clones
//!   its payload only when a write meets shared storage
//! - **Chains**: [`chain::Chain`], a value type presenting N branches as one
//!   sequence with O(branch-count) offset and distance arithmetic
//!
//! ## Feature Flags
//!
//! - `algebra`: Sum and product types
//! - `chain`: Chain collections (implies `algebra`)
//! - `arc`: Use `Arc` instead of `Rc` for shared storage
//! - `serde`: Serialization support
//! - `tracing`: Trace events when copy-on-write storage is cloned
//! - `full`: Enable all features except `arc`
//!
//! ## Example
//!
//! ```rust
//! use catena::prelude::*;
//! use std::collections::VecDeque;
//!
//! let chain = Chain::new(product!(vec![1, 2, 3], VecDeque::from([4, 5])));
//! assert_eq!(chain.len(), 5);
//!
//! let index = chain.index_offset_by(&chain.start_index(), 3);
//! assert_eq!(chain.locate(&index), Some((1, 0)));
//! assert_eq!(chain[&index], 4);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types, traits and macros.
///
/// # Usage
///
/// ```rust
/// use catena::prelude::*;
/// ```
pub mod prelude {
    pub use crate::contract::ContractViolation;
    pub use crate::cow::CowBox;

    #[cfg(feature = "algebra")]
    pub use crate::algebra::*;

    #[cfg(feature = "algebra")]
    pub use crate::{Product, Sum, product};

    #[cfg(feature = "chain")]
    pub use crate::chain::*;
}

#[doc(hidden)]
pub use paste;

pub mod contract;
pub mod cow;

#[cfg(feature = "algebra")]
pub mod algebra;

#[cfg(feature = "chain")]
pub mod chain;
