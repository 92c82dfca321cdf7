//! Segment tree variants over a shared algebraic contract
//!
//! All four trees implement point assignment and half-open range
//! aggregation over a [Monoid](crate::Monoid); the lazy variants add
//! range updates through an [ActionMonoid](crate::ActionMonoid).
//! Callers pick the variant matching their domain size and whether
//! range updates are needed:
//!
//! | | plain | lazy range updates |
//! |---|---|---|
//! | dense `[0, n)` | [SegmentTree] | [LazySegmentTree] |
//! | sparse `[lo, hi)` | [DynamicSegmentTree] | [LazyDynamicSegmentTree] |

/// Dense fixed-domain tree
pub mod dense;
/// Dense tree with lazily-propagated range updates
pub mod lazy_dense;
/// Sparse tree with lazily-propagated range updates and threshold search
pub mod lazy_sparse;
/// Sparse/dynamic tree over a large or unbounded domain
pub mod sparse;

pub use dense::SegmentTree;
pub use lazy_dense::LazySegmentTree;
pub use lazy_sparse::LazyDynamicSegmentTree;
pub use sparse::DynamicSegmentTree;

/// Floor midpoint of `[l, r)` without i64 overflow
#[inline]
pub(crate) fn midpoint(l: i64, r: i64) -> i64 {
    ((l as i128 + r as i128) >> 1) as i64
}

/// Width of `[l, r)` as a span length, valid for the full i64 domain
#[inline]
pub(crate) fn span(l: i64, r: i64) -> u64 {
    (r as i128 - l as i128) as u64
}
