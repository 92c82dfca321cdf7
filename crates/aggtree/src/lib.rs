//! aggtree is a family of generic segment trees for range aggregation over monoids
//!
//! Four variants cover the dense/sparse and plain/lazy combinations of
//! the same contract: point assignment, range aggregate queries, and
//! (for the lazy variants) range updates, all parameterized by an
//! algebraic policy trait instead of a fixed value type. See the
//! [tree] module for picking a variant and the [monoid] module for the
//! [Monoid]/[ActionMonoid] contract and the built-in sum/min/max
//! implementations.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Algebraic capability interfaces and built-in implementations
pub mod monoid;
/// The four segment tree variants
pub mod tree;

pub use monoid::{ActionMonoid, Monoid};
pub use tree::{DynamicSegmentTree, LazyDynamicSegmentTree, LazySegmentTree, SegmentTree};
