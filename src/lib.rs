//! Mergeable binomial heap with value-keyed operations
//!
//! This crate provides a binomial heap (a mergeable priority queue) whose
//! forest shape stays observable from the outside, for consumption by
//! rendering/controller layers that re-draw the tree after each mutation.
//!
//! # Features
//!
//! - **Insert / find-min / extract-min**: O(log n) worst case
//! - **Decrease-key / delete-key by value**: value-keyed search plus an
//!   O(tree height) fix-up
//! - **Union**: merge two heaps' root lists with carry-like coalescing,
//!   leaving the merged-from heap empty but usable
//! - **Duplicate-root-tree**: deep-clone one binomial tree and union the
//!   copy back in
//! - **Shape accessors**: the root list and each node's value, order,
//!   parent, child and sibling are readable between mutations
//!
//! The heap is single-threaded by contract; it is built on `Rc`, so the
//! type system already rules out sharing it across threads.
//!
//! # Example
//!
//! ```rust
//! use binomial_forest::{BinomialHeap, HeapError};
//!
//! let mut heap = BinomialHeap::new();
//! for v in [10, 3, 7, 1] {
//!     heap.insert(v);
//! }
//! assert_eq!(heap.get_min(), Ok(1));
//! assert_eq!(heap.extract_min(), Ok(1));
//!
//! heap.decrease_key(&7, 2)?;
//! assert_eq!(heap.get_min(), Ok(2));
//! # Ok::<(), HeapError>(())
//! ```

pub mod binomial;
pub mod error;
pub mod node;

// Re-export the main types for convenience
pub use binomial::BinomialHeap;
pub use error::HeapError;
pub use node::{Node, NodePtr, NodeRef};
