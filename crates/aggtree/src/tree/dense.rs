use crate::monoid::Monoid;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// A dense segment tree over the fixed index domain `[0, n)`
///
/// The tree is a 1-indexed complete binary tree stored in a single flat
/// array whose size is `n` rounded up to the next power of two; leaves
/// occupy `[size, 2 * size)`. Construction is O(n); point updates and
/// range queries are O(log n) and fully iterative.
///
/// Queries accumulate a left-to-right and a right-to-left partial
/// result separately before fusing them, so non-commutative monoids
/// aggregate in index order.
///
/// # Example
///
/// ```
/// use aggtree::{SegmentTree, monoid::sum::U64SumMonoid};
///
/// let mut tree: SegmentTree<U64SumMonoid> = SegmentTree::new(8);
/// tree.update(2, 13);
/// tree.update(5, 8);
/// assert_eq!(tree.query(0, 8), 21);
/// assert_eq!(tree.query(3, 3), 0);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "M: Default"))]
#[derive(Clone, Debug)]
pub struct SegmentTree<M: Monoid> {
    /// Number of addressable leaves, `[0, len)`
    len: usize,
    /// Backing array capacity, `len` rounded up to a power of two
    size: usize,
    /// 1-indexed node values; `data[1]` aggregates the whole domain
    data: Vec<M::Value>,
}

impl<M: Monoid> SegmentTree<M> {
    /// Creates a tree of `n` leaves, all set to the identity
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "segment tree domain must be non-empty");
        let size = n.next_power_of_two();
        Self {
            len: n,
            size,
            data: (0..size * 2).map(|_| M::identity()).collect(),
        }
    }

    /// Returns the number of leaves
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree has no leaves
    ///
    /// Always `false` in practice, since construction rejects `n == 0`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Assigns `value` to the leaf at `pos` and recombines its ancestors
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside `[0, len)`.
    pub fn update(&mut self, pos: usize, value: M::Value) {
        assert!(pos < self.len, "index {pos} out of domain [0, {})", self.len);
        let mut k = pos + self.size;
        self.data[k] = value;
        k >>= 1;
        while k > 0 {
            self.data[k] = M::combine(self.data[k << 1].clone(), self.data[(k << 1) | 1].clone());
            k >>= 1;
        }
    }

    /// Aggregates the half-open range `[a, b)`
    ///
    /// Returns the identity when `a >= b`.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` exceeds `len`.
    pub fn query(&self, a: usize, b: usize) -> M::Value {
        assert!(a <= self.len, "lower bound {a} out of domain [0, {}]", self.len);
        assert!(b <= self.len, "upper bound {b} out of domain [0, {}]", self.len);
        if a >= b {
            return M::identity();
        }

        let mut vl = M::identity();
        let mut vr = M::identity();
        let mut l = a + self.size;
        let mut r = b + self.size;
        while l < r {
            if l & 1 == 1 {
                vl = M::combine(vl, self.data[l].clone());
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                vr = M::combine(self.data[r].clone(), vr);
            }
            l >>= 1;
            r >>= 1;
        }
        M::combine(vl, vr)
    }
}
