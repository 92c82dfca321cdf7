use crate::monoid::ActionMonoid;
use crate::tree::{midpoint, span};

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "A: Default"))]
#[derive(Clone, Debug)]
struct Node<A: ActionMonoid> {
    /// Aggregate of the node's span, exclusive of its own pending tag
    value: A::Value,
    /// Pending update, not yet pushed to the children
    tag: A::Update,
    left: Option<Box<Node<A>>>,
    right: Option<Box<Node<A>>>,
}

impl<A: ActionMonoid> Node<A> {
    fn new() -> Self {
        Self {
            value: A::identity(),
            tag: A::identity_update(),
            left: None,
            right: None,
        }
    }
}

/// A dynamically-allocated segment tree with lazy range updates
///
/// Combines the on-demand node allocation of
/// [DynamicSegmentTree](crate::DynamicSegmentTree) with the pending-tag
/// discipline of [LazySegmentTree](crate::LazySegmentTree): O(1)
/// construction over any `[lo, hi)` domain of `i64`, O(log(hi - lo))
/// point and range operations, and a threshold search
/// ([lower_bound](Self::lower_bound)) in O(log²(hi - lo)).
///
/// Traversals push pending tags down as they descend, materializing the
/// children of each visited internal node; nodes persist until the tree
/// is dropped.
///
/// # Example
///
/// ```
/// use aggtree::{LazyDynamicSegmentTree, monoid::sum::I64AddSum};
///
/// let mut tree: LazyDynamicSegmentTree<I64AddSum> = LazyDynamicSegmentTree::new(0, 1 << 40);
/// tree.update(1_000, 1_000_000_000, 3);
/// assert_eq!(tree.query(0, 1 << 40), 3 * 999_999_000);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "A: Default"))]
#[derive(Clone, Debug)]
pub struct LazyDynamicSegmentTree<A: ActionMonoid> {
    lo: i64,
    hi: i64,
    root: Node<A>,
}

impl<A: ActionMonoid> LazyDynamicSegmentTree<A> {
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

    /// Assigns `value` to the leaf at `pos`, discarding anything pending there
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside `[lo, hi)`.
    pub fn set(&mut self, pos: i64, value: A::Value) {
        assert!(
            self.lo <= pos && pos < self.hi,
            "index {pos} out of domain [{}, {})",
            self.lo,
            self.hi
        );
        Self::set_at(&mut self.root, self.lo, self.hi, pos, value);
    }

    /// Applies `x` to every index in the half-open range `[a, b)`
    ///
    /// A no-op when `a >= b`.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` lies outside `[lo, hi]`.
    pub fn update(&mut self, a: i64, b: i64, x: A::Update) {
        self.assert_bounds(a, b);
        if a >= b {
            return;
        }
        Self::update_at(&mut self.root, self.lo, self.hi, a, b, &x);
    }

    /// Aggregates the half-open range `[a, b)`
    ///
    /// Returns the identity when `a >= b`. Takes `&mut self`: pending
    /// tags along the boundary paths are pushed down during traversal.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` lies outside `[lo, hi]`.
    pub fn query(&mut self, a: i64, b: i64) -> A::Value {
        self.assert_bounds(a, b);
        if a >= b {
            return A::identity();
        }
        Self::query_at(&mut self.root, self.lo, self.hi, a, b)
    }

    /// Finds the smallest index whose prefix aggregate satisfies `pred`
    ///
    /// Scanning `[a, b)` left to right, returns the first index `i`
    /// such that `pred` holds for the aggregate of `[a, i]`; returns
    /// `hi` when no prefix satisfies it (including when `a >= b`).
    ///
    /// `pred` must be monotone: once satisfied by some prefix it must
    /// stay satisfied by every longer prefix. Subtrees whose whole
    /// aggregate still fails the predicate are absorbed without
    /// descending, giving O(log²(hi - lo)).
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` lies outside `[lo, hi]`.
    pub fn lower_bound<P>(&mut self, a: i64, b: i64, pred: P) -> i64
    where
        P: Fn(&A::Value) -> bool,
    {
        self.assert_bounds(a, b);
        if a >= b {
            return self.hi;
        }
        let mut acc = A::identity();
        Self::lower_bound_at(&mut self.root, self.lo, self.hi, a, b, &mut acc, &pred)
            .unwrap_or(self.hi)
    }

    fn assert_bounds(&self, a: i64, b: i64) {
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
    }

    /// Effective value of a node spanning `[l, r)` with its tag applied
    #[inline]
    fn reflect(node: &Node<A>, l: i64, r: i64) -> A::Value {
        if node.tag == A::identity_update() {
            node.value.clone()
        } else {
            A::apply(node.value.clone(), &node.tag, span(l, r))
        }
    }

    /// Pushes the node's tag one level down and bakes it into the value
    ///
    /// Children of an internal node are materialized here so descent
    /// always finds them; leaves bake the tag in place.
    fn push_down(node: &mut Node<A>, l: i64, r: i64) {
        let internal = l + 1 != r;
        if internal {
            if node.left.is_none() {
                node.left = Some(Box::new(Node::new()));
            }
            if node.right.is_none() {
                node.right = Some(Box::new(Node::new()));
            }
        }
        if node.tag != A::identity_update() {
            if internal {
                if let Some(child) = node.left.as_deref_mut() {
                    child.tag = A::compose(node.tag.clone(), child.tag.clone());
                }
                if let Some(child) = node.right.as_deref_mut() {
                    child.tag = A::compose(node.tag.clone(), child.tag.clone());
                }
            }
            node.value = A::apply(node.value.clone(), &node.tag, span(l, r));
            node.tag = A::identity_update();
        }
    }

    /// Recomputes a node's value from its reflected children
    fn recalc(node: &mut Node<A>, l: i64, r: i64) {
        let m = midpoint(l, r);
        let vl = node
            .left
            .as_deref()
            .map_or_else(A::identity, |n| Self::reflect(n, l, m));
        let vr = node
            .right
            .as_deref()
            .map_or_else(A::identity, |n| Self::reflect(n, m, r));
        node.value = A::combine(vl, vr);
    }

    fn set_at(node: &mut Node<A>, l: i64, r: i64, pos: i64, value: A::Value) {
        Self::push_down(node, l, r);
        if l + 1 == r {
            node.value = value;
            return;
        }
        let m = midpoint(l, r);
        if pos < m {
            let child = node.left.get_or_insert_with(|| Box::new(Node::new()));
            Self::set_at(child, l, m, pos, value);
        } else {
            let child = node.right.get_or_insert_with(|| Box::new(Node::new()));
            Self::set_at(child, m, r, pos, value);
        }
        Self::recalc(node, l, r);
    }

    fn update_at(node: &mut Node<A>, l: i64, r: i64, a: i64, b: i64, x: &A::Update) {
        if b <= l || r <= a {
            return;
        }
        Self::push_down(node, l, r);
        if a <= l && r <= b {
            // Tag was just cleared, so the composed tag is x itself.
            node.tag = x.clone();
            return;
        }
        let m = midpoint(l, r);
        let left = node.left.get_or_insert_with(|| Box::new(Node::new()));
        Self::update_at(left, l, m, a, b, x);
        let right = node.right.get_or_insert_with(|| Box::new(Node::new()));
        Self::update_at(right, m, r, a, b, x);
        Self::recalc(node, l, r);
    }

    fn query_at(node: &mut Node<A>, l: i64, r: i64, a: i64, b: i64) -> A::Value {
        if b <= l || r <= a {
            return A::identity();
        }
        if a <= l && r <= b {
            return Self::reflect(node, l, r);
        }
        Self::push_down(node, l, r);
        let m = midpoint(l, r);
        let vl = match node.left.as_deref_mut() {
            Some(child) => Self::query_at(child, l, m, a, b),
            None => A::identity(),
        };
        let vr = match node.right.as_deref_mut() {
            Some(child) => Self::query_at(child, m, r, a, b),
            None => A::identity(),
        };
        A::combine(vl, vr)
    }

    fn lower_bound_at<P>(
        node: &mut Node<A>,
        l: i64,
        r: i64,
        a: i64,
        b: i64,
        acc: &mut A::Value,
        pred: &P,
    ) -> Option<i64>
    where
        P: Fn(&A::Value) -> bool,
    {
        if b <= l || r <= a {
            return None;
        }
        Self::push_down(node, l, r);
        if a <= l && r <= b {
            let total = A::combine(acc.clone(), node.value.clone());
            if !pred(&total) {
                // Whole subtree fails: absorb it and move right.
                *acc = total;
                return None;
            }
            if l + 1 == r {
                return Some(l);
            }
        }
        let m = midpoint(l, r);
        let left = node.left.get_or_insert_with(|| Box::new(Node::new()));
        if let Some(i) = Self::lower_bound_at(left, l, m, a, b, acc, pred) {
            return Some(i);
        }
        let right = node.right.get_or_insert_with(|| Box::new(Node::new()));
        Self::lower_bound_at(right, m, r, a, b, acc, pred)
    }
}
