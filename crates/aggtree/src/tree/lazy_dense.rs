use crate::monoid::ActionMonoid;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// A dense segment tree with lazily-propagated range updates
///
/// Extends the plain [SegmentTree](crate::SegmentTree) layout with a
/// second flat array of pending update tags. A tag buffered at index
/// `k` applies to the whole subtree below `k` but has not been pushed
/// into it yet; it is composed downward (thrust) one level at a time
/// before any traversal touches the subtree, and ancestors are
/// recombined (recalc) bottom-up after leaf-level mutations.
///
/// `set`, `update` and `query` are all O(log n) and fully iterative.
/// `query` takes `&mut self` because push-down rewrites tags along the
/// two boundary paths.
///
/// # Example
///
/// ```
/// use aggtree::{LazySegmentTree, monoid::sum::I64AddSum};
///
/// let mut tree: LazySegmentTree<I64AddSum> = LazySegmentTree::new(8);
/// tree.update(0, 8, 10); // add 10 to every index
/// tree.update(2, 6, 5);
/// assert_eq!(tree.query(0, 8), 8 * 10 + 4 * 5);
/// assert_eq!(tree.query(2, 3), 15);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "A: Default"))]
#[derive(Clone, Debug)]
pub struct LazySegmentTree<A: ActionMonoid> {
    /// Number of addressable leaves, `[0, len)`
    len: usize,
    /// Backing array capacity, `len` rounded up to a power of two
    size: usize,
    /// Tree height, `log2(size)`; bounds every thrust/recalc walk
    height: u32,
    /// 1-indexed node values, exclusive of each node's own pending tag
    data: Vec<A::Value>,
    /// Pending update per node, not yet pushed to its children
    lazy: Vec<A::Update>,
}

impl<A: ActionMonoid> LazySegmentTree<A> {
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
            height: size.trailing_zeros(),
            data: (0..size * 2).map(|_| A::identity()).collect(),
            lazy: (0..size * 2).map(|_| A::identity_update()).collect(),
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

    /// Assigns `value` to the leaf at `pos`, discarding anything pending there
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside `[0, len)`.
    pub fn set(&mut self, pos: usize, value: A::Value) {
        assert!(pos < self.len, "index {pos} out of domain [0, {})", self.len);
        let k = pos + self.size;
        self.thrust(k);
        self.data[k] = value;
        self.lazy[k] = A::identity_update();
        self.recalc(k);
    }

    /// Applies `x` to every index in the half-open range `[a, b)`
    ///
    /// A no-op when `a >= b`.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` exceeds `len`.
    pub fn update(&mut self, a: usize, b: usize, x: A::Update) {
        assert!(a <= self.len, "lower bound {a} out of domain [0, {}]", self.len);
        assert!(b <= self.len, "upper bound {b} out of domain [0, {}]", self.len);
        if a >= b {
            return;
        }

        let a_leaf = a + self.size;
        let b_leaf = b + self.size - 1;
        self.thrust(a_leaf);
        self.thrust(b_leaf);

        // Mark O(log n) boundary nodes without entering covered subtrees.
        let mut l = a_leaf;
        let mut r = b_leaf + 1;
        while l < r {
            if l & 1 == 1 {
                self.lazy[l] = A::compose(x.clone(), self.lazy[l].clone());
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                self.lazy[r] = A::compose(x.clone(), self.lazy[r].clone());
            }
            l >>= 1;
            r >>= 1;
        }

        self.recalc(a_leaf);
        self.recalc(b_leaf);
    }

    /// Aggregates the half-open range `[a, b)`
    ///
    /// Returns the identity when `a >= b`.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` exceeds `len`.
    pub fn query(&mut self, a: usize, b: usize) -> A::Value {
        assert!(a <= self.len, "lower bound {a} out of domain [0, {}]", self.len);
        assert!(b <= self.len, "upper bound {b} out of domain [0, {}]", self.len);
        if a >= b {
            return A::identity();
        }

        self.thrust(a + self.size);
        self.thrust(b + self.size - 1);

        let mut vl = A::identity();
        let mut vr = A::identity();
        let mut l = a + self.size;
        let mut r = b + self.size;
        while l < r {
            if l & 1 == 1 {
                vl = A::combine(vl, self.reflect(l));
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                vr = A::combine(self.reflect(r), vr);
            }
            l >>= 1;
            r >>= 1;
        }
        A::combine(vl, vr)
    }

    /// Number of leaves under index `k`
    #[inline]
    fn span(&self, k: usize) -> u64 {
        (self.size >> k.ilog2()) as u64
    }

    /// Effective value at `k`: stored value with any pending tag applied
    #[inline]
    fn reflect(&self, k: usize) -> A::Value {
        if self.lazy[k] == A::identity_update() {
            self.data[k].clone()
        } else {
            A::apply(self.data[k].clone(), &self.lazy[k], self.span(k))
        }
    }

    /// Pushes the tag at `k` one level down and bakes it into `data[k]`
    #[inline]
    fn propagate(&mut self, k: usize) {
        if self.lazy[k] == A::identity_update() {
            return;
        }
        let l = k << 1;
        let r = (k << 1) | 1;
        self.lazy[l] = A::compose(self.lazy[k].clone(), self.lazy[l].clone());
        self.lazy[r] = A::compose(self.lazy[k].clone(), self.lazy[r].clone());
        self.data[k] = self.reflect(k);
        self.lazy[k] = A::identity_update();
    }

    /// Clears every pending tag on the path from the root to leaf `k`
    fn thrust(&mut self, k: usize) {
        for i in (1..=self.height).rev() {
            self.propagate(k >> i);
        }
    }

    /// Recombines every ancestor of leaf `k` from its reflected children
    fn recalc(&mut self, mut k: usize) {
        k >>= 1;
        while k > 0 {
            self.data[k] = A::combine(self.reflect(k << 1), self.reflect((k << 1) | 1));
            k >>= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monoid::{
        min_max::I64AddMin,
        sum::{I64AddSum, I64AssignSum},
    };

    fn build_add_sum(values: &[i64]) -> LazySegmentTree<I64AddSum> {
        let mut tree = LazySegmentTree::new(values.len());
        for (i, &v) in values.iter().enumerate() {
            tree.set(i, v);
        }
        tree
    }

    #[test]
    fn range_add_scenario() {
        let mut tree = build_add_sum(&[10, 7, 13, 9, 11, 8, 12, 10]);
        assert_eq!(tree.len(), 8);
        assert!(!tree.is_empty());
        tree.update(2, 6, 10);
        assert_eq!(tree.query(0, 8), 120);
        assert_eq!(tree.query(2, 6), 81);
        assert_eq!(tree.query(0, 2), 17);
        assert_eq!(tree.query(6, 8), 22);
    }

    #[test]
    fn set_discards_pending_updates() {
        let mut tree = build_add_sum(&[1, 1, 1, 1]);
        tree.update(0, 4, 100);
        tree.set(2, 5);
        assert_eq!(tree.query(2, 3), 5);
        assert_eq!(tree.query(0, 4), 101 + 101 + 5 + 101);
    }

    #[test]
    fn empty_range_update_is_noop() {
        let mut tree = build_add_sum(&[3, 3, 3]);
        tree.update(1, 1, 50);
        tree.update(2, 0, 50);
        tree.update(0, 0, 50);
        assert_eq!(tree.query(0, 3), 9);
        assert_eq!(tree.query(1, 1), 0);
    }

    #[test]
    fn assign_is_idempotent() {
        let mut tree: LazySegmentTree<I64AssignSum> = LazySegmentTree::new(8);
        tree.update(1, 6, Some(7));
        let once = tree.query(0, 8);
        tree.update(1, 6, Some(7));
        assert_eq!(tree.query(0, 8), once);
        assert_eq!(once, 5 * 7);
    }

    #[test]
    fn later_assign_wins_on_overlap() {
        let mut tree: LazySegmentTree<I64AssignSum> = LazySegmentTree::new(8);
        tree.update(0, 8, Some(1));
        tree.update(2, 5, Some(-2));
        assert_eq!(tree.query(0, 8), 5 * 1 + 3 * -2);
        assert_eq!(tree.query(2, 5), -6);
        assert_eq!(tree.query(4, 6), -2 + 1);
    }

    #[test]
    fn range_add_min_tree() {
        let mut tree: LazySegmentTree<I64AddMin> = LazySegmentTree::new(10);
        for i in 0..10 {
            tree.set(i, 0);
        }
        tree.update(0, 10, 10);
        tree.update(2, 8, 100);
        tree.update(4, 6, 1);
        assert_eq!(tree.query(0, 10), 10);
        assert_eq!(tree.query(2, 8), 110);
        assert_eq!(tree.query(4, 6), 111);
        assert_eq!(tree.query(5, 8), 110);
    }

    #[test]
    fn matches_bruteforce_on_random_ops() {
        let n = 21usize;
        let mut model = vec![0i64; n];
        let mut tree: LazySegmentTree<I64AddSum> = LazySegmentTree::new(n);
        fastrand::seed(0xa11ce);
        for _ in 0..600 {
            match fastrand::u8(0..3) {
                0 => {
                    let pos = fastrand::usize(0..n);
                    let v = fastrand::i64(-100..100);
                    model[pos] = v;
                    tree.set(pos, v);
                }
                1 => {
                    let a = fastrand::usize(0..=n);
                    let b = fastrand::usize(0..=n);
                    let x = fastrand::i64(-20..20);
                    if a < b {
                        for slot in &mut model[a..b] {
                            *slot += x;
                        }
                    }
                    tree.update(a, b, x);
                }
                _ => {
                    let a = fastrand::usize(0..=n);
                    let b = fastrand::usize(0..=n);
                    let expected: i64 = if a < b { model[a..b].iter().sum() } else { 0 };
                    assert_eq!(tree.query(a, b), expected, "a={a} b={b}");
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "upper bound")]
    fn query_past_domain_panics() {
        let mut tree: LazySegmentTree<I64AddSum> = LazySegmentTree::new(8);
        let _ = tree.query(0, 9);
    }
}
