//! Chain collections.
//!
//! A [`Chain`] presents N heterogeneous branches with a common element type
//! as one logically contiguous sequence:
//!
//! - [`Branch`] and its capability subtraits: what a sequence must offer
//! - [`BranchList`]: navigation across a product of branches
//! - [`ChainIndex`]: a branch position, or the end
//! - [`Linearization`]: offsets and distances through prefix sums
//! - [`ChainStorage`]: the branches behind a chain's copy-on-write handle
//!
//! # Examples
//!
//! ```rust
//! use catena::prelude::*;
//! use std::collections::BTreeSet;
//!
//! let sorted: BTreeSet<i32> = [30, 10, 20].into_iter().collect();
//! let chain = Chain::new(product!(vec![3, 2, 1], Vec::new(), sorted));
//!
//! let elements: Vec<i32> = chain.iter().copied().collect();
//! assert_eq!(elements, vec![3, 2, 1, 10, 20, 30]);
//! assert_eq!(chain.min(), Some(&1));
//! assert_eq!(chain.max(), Some(&30));
//! assert!(chain.contains(&20));
//!
//! // The empty middle branch never yields a position
//! let last_of_first = chain.index_at(2);
//! assert_eq!(chain.locate(&chain.index_after(&last_of_first)), Some((2, 0)));
//! ```

mod branch;
mod branches;
mod collection;
mod index;
mod linear;
mod storage;

pub use branch::BidirectionalBranch;
pub use branch::Branch;
pub use branch::BranchIndices;
pub use branch::KeyIndex;
pub use branch::MutableBranch;
pub use branch::RandomAccessBranch;
pub use branches::BidirectionalBranchList;
pub use branches::BranchList;
pub use branches::MutableBranchList;
pub use collection::Chain;
pub use collection::ChainIndices;
pub use collection::ChainIter;
pub use index::ChainIndex;
pub use linear::Linearization;
pub use storage::ChainStorage;
