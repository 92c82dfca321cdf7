use crate::monoid::Monoid;
use crate::tree::midpoint;

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "M: Default"))]
#[derive(Clone, Debug)]
struct Node<M: Monoid> {
    value: M::Value,
    left: Option<Box<Node<M>>>,
    right: Option<Box<Node<M>>>,
}

impl<M: Monoid> Node<M> {
    fn new() -> Self {
        Self {
            value: M::identity(),
            left: None,
            right: None,
        }
    }
}

/// A dynamically-allocated segment tree over the index domain `[lo, hi)`
///
/// Unlike [SegmentTree](crate::SegmentTree), construction is O(1) and
/// the domain may span up to the full `i64` range: nodes are created on
/// demand the first time an update descends past them, and an absent
/// child reads as the identity over its whole span. Nodes are owned
/// exclusively by their parent and live until the tree is dropped;
/// memory grows monotonically with the number of distinct indices
/// touched.
///
/// Choose this variant over the dense tree when the domain is large or
/// unbounded relative to the number of touched indices; the dense tree
/// avoids its recursion and pointer-chasing overhead.
///
/// # Example
///
/// ```
/// use aggtree::{DynamicSegmentTree, monoid::sum::I64SumMonoid};
///
/// let mut tree: DynamicSegmentTree<I64SumMonoid> = DynamicSegmentTree::new(-1_000_000_000, 1_000_000_000);
/// tree.update(-500_000, 3);
/// tree.update(700_000_000, 4);
/// assert_eq!(tree.query(-1_000_000_000, 1_000_000_000), 7);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "M: Default"))]
#[derive(Clone, Debug)]
pub struct DynamicSegmentTree<M: Monoid> {
    lo: i64,
    hi: i64,
    root: Node<M>,
}

impl<M: Monoid> DynamicSegmentTree<M> {
    /// Creates an empty tree over the half-open domain `[lo, hi)`
    ///
    /// # Panics
    ///
    /// Panics if `hi <= lo`.
    pub fn new(lo: i64, hi: i64) -> Self {
        assert!(lo < hi, "invalid domain [{lo}, {hi})");
        Self {
            lo,
            hi,
            root: Node::new(),
        }
    }

    /// Returns the domain as `(lo, hi)`
    pub fn domain(&self) -> (i64, i64) {
        (self.lo, self.hi)
    }

    /// Assigns `value` to the leaf at `pos`
    ///
    /// Materializes the nodes on the descent path on first touch.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside `[lo, hi)`.
    pub fn update(&mut self, pos: i64, value: M::Value) {
        assert!(
            self.lo <= pos && pos < self.hi,
            "index {pos} out of domain [{}, {})",
            self.lo,
            self.hi
        );
        Self::update_at(&mut self.root, self.lo, self.hi, pos, value);
    }

    /// Aggregates the half-open range `[a, b)`
    ///
    /// Returns the identity when `a >= b`. Never allocates.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` lies outside `[lo, hi]`.
    pub fn query(&self, a: i64, b: i64) -> M::Value {
        assert!(
            self.lo <= a && a <= self.hi,
            "lower bound {a} out of domain [{}, {}]",
            self.lo,
            self.hi
        );
        assert!(
            self.lo <= b && b <= self.hi,
            "upper bound {b} out of domain [{}, {}]",
            self.lo,
            self.hi
        );
        if a >= b {
            return M::identity();
        }
        Self::query_at(Some(&self.root), self.lo, self.hi, a, b)
    }

    fn update_at(node: &mut Node<M>, l: i64, r: i64, pos: i64, value: M::Value) {
        // `l + 1` cannot overflow: l < r <= i64::MAX
        if l + 1 == r {
            node.value = value;
            return;
        }
        let m = midpoint(l, r);
        if pos < m {
            let child = node.left.get_or_insert_with(|| Box::new(Node::new()));
            Self::update_at(child, l, m, pos, value);
        } else {
            let child = node.right.get_or_insert_with(|| Box::new(Node::new()));
            Self::update_at(child, m, r, pos, value);
        }
        let vl = node.left.as_ref().map_or_else(M::identity, |n| n.value.clone());
        let vr = node.right.as_ref().map_or_else(M::identity, |n| n.value.clone());
        node.value = M::combine(vl, vr);
    }

    fn query_at(node: Option<&Node<M>>, l: i64, r: i64, a: i64, b: i64) -> M::Value {
        let Some(node) = node else {
            return M::identity();
        };
        if b <= l || r <= a {
            return M::identity();
        }
        if a <= l && r <= b {
            return node.value.clone();
        }
        let m = midpoint(l, r);
        let vl = Self::query_at(node.left.as_deref(), l, m, a, b);
        let vr = Self::query_at(node.right.as_deref(), m, r, a, b);
        M::combine(vl, vr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monoid::{min_max::I64MinMonoid, sum::I64SumMonoid};
    use crate::SegmentTree;

    /// Ordered concatenation, to catch accumulation-order mistakes
    #[derive(Default, Debug, Clone)]
    struct ConcatMonoid;

    impl Monoid for ConcatMonoid {
        type Value = String;

        fn identity() -> String {
            String::new()
        }

        fn combine(a: String, b: String) -> String {
            a + &b
        }
    }

    #[test]
    fn point_round_trip_over_offset_domain() {
        let mut tree: DynamicSegmentTree<I64SumMonoid> = DynamicSegmentTree::new(-100, 100);
        tree.update(-100, 5);
        tree.update(0, 7);
        tree.update(99, 11);
        assert_eq!(tree.query(-100, -99), 5);
        assert_eq!(tree.query(0, 1), 7);
        assert_eq!(tree.query(99, 100), 11);
        assert_eq!(tree.query(-100, 100), 23);
    }

    #[test]
    fn non_commutative_order_over_offset_domain() {
        // Negative lo exercises the floored-midpoint descent order.
        let words = ["seg", "ment", "tree", "s"];
        let mut tree: DynamicSegmentTree<ConcatMonoid> = DynamicSegmentTree::new(-2, 2);
        for (i, w) in words.iter().enumerate() {
            tree.update(i as i64 - 2, (*w).to_string());
        }
        assert_eq!(tree.query(-2, 2), "segmenttrees");
        assert_eq!(tree.query(-1, 1), "menttree");
        assert_eq!(tree.query(0, 2), "trees");
        assert_eq!(tree.query(-2, -1), "seg");
    }

    #[test]
    fn empty_range_is_identity() {
        let mut tree: DynamicSegmentTree<I64SumMonoid> = DynamicSegmentTree::new(0, 1 << 40);
        tree.update(12345, 6);
        assert_eq!(tree.query(12345, 12345), 0);
        assert_eq!(tree.query(900, 100), 0);
    }

    #[test]
    fn untouched_regions_read_identity() {
        let mut tree: DynamicSegmentTree<I64MinMonoid> = DynamicSegmentTree::new(0, 1 << 62);
        tree.update(1 << 40, -3);
        assert_eq!(tree.query(0, 1 << 40), i64::MAX);
        assert_eq!(tree.query(0, (1 << 40) + 1), -3);
        assert_eq!(tree.query((1 << 40) + 1, 1 << 62), i64::MAX);
    }

    #[test]
    fn full_width_domain_midpoints_do_not_overflow() {
        let mut tree: DynamicSegmentTree<I64SumMonoid> =
            DynamicSegmentTree::new(i64::MIN, i64::MAX);
        tree.update(i64::MIN, 1);
        tree.update(0, 2);
        tree.update(i64::MAX - 1, 4);
        assert_eq!(tree.query(i64::MIN, i64::MAX), 7);
        assert_eq!(tree.query(i64::MIN, 0), 1);
        assert_eq!(tree.query(0, i64::MAX), 6);
    }

    #[test]
    fn matches_dense_tree_on_shared_domain() {
        let n = 29usize;
        let mut dense: SegmentTree<I64SumMonoid> = SegmentTree::new(n);
        let mut sparse: DynamicSegmentTree<I64SumMonoid> = DynamicSegmentTree::new(0, n as i64);
        fastrand::seed(42);
        for _ in 0..300 {
            let pos = fastrand::usize(0..n);
            let v = fastrand::i64(-50..50);
            dense.update(pos, v);
            sparse.update(pos as i64, v);

            let a = fastrand::usize(0..=n);
            let b = fastrand::usize(0..=n);
            assert_eq!(dense.query(a, b), sparse.query(a as i64, b as i64));
        }
    }

    #[test]
    #[should_panic(expected = "out of domain")]
    fn update_below_domain_panics() {
        let mut tree: DynamicSegmentTree<I64SumMonoid> = DynamicSegmentTree::new(10, 20);
        tree.update(9, 1);
    }

    #[test]
    #[should_panic(expected = "invalid domain")]
    fn reversed_domain_panics() {
        let _ = DynamicSegmentTree::<I64SumMonoid>::new(5, 5);
    }
}
