use core::fmt::Debug;

/// Sum monoids and sum-valued actions (range add, range assign)
#[cfg(feature = "sum")]
pub mod sum;

/// Min/Max monoids and min-valued actions
#[cfg(feature = "min_max")]
pub mod min_max;

/// Algebraic interface that library users implement to aggregate values in a tree
///
/// A monoid is a value type together with an associative `combine`
/// operation and a two-sided identity element. Implementations are
/// zero-sized policy structs; all methods are static and must be pure,
/// side-effect free, and total.
///
/// Commutativity is **not** assumed: every tree in this crate combines
/// values strictly left-to-right in index order, so ordered monoids
/// such as string concatenation or matrix multiplication are supported.
///
/// # Example
///
/// A SUM monoid over u64:
/// ```
/// use aggtree::Monoid;
///
/// #[derive(Default, Debug, Clone)]
/// struct MySumMonoid;
///
/// impl Monoid for MySumMonoid {
///     type Value = u64;
///
///     fn identity() -> u64 {
///         0
///     }
///     fn combine(a: u64, b: u64) -> u64 {
///         a + b
///     }
/// }
/// ```
pub trait Monoid: Default + Debug + Clone + 'static {
    /// Aggregated value type stored in tree nodes
    type Value: ValueBounds;

    /// Returns the identity element of [Self::combine]
    ///
    /// Must be neutral on both sides: `combine(identity(), x) == x ==
    /// combine(x, identity())`.
    fn identity() -> Self::Value;

    /// Combines two values and produces a new [Self::Value]
    ///
    /// Must be associative. `a` always aggregates indices strictly to
    /// the left of `b`.
    fn combine(a: Self::Value, b: Self::Value) -> Self::Value;
}

/// A [Monoid] paired with a monoid of updates acting on it
///
/// Lazily-propagated trees additionally need an update type that forms
/// its own monoid under [Self::compose] and acts on aggregated values
/// through [Self::apply]. Pending updates are buffered in tree nodes as
/// composed tags and applied when a traversal needs to read or modify
/// below them.
///
/// # Laws
///
/// For all values `s`, updates `f`, `g`, and spans `n`:
///
/// - `apply(s, identity_update(), n) == s`
/// - `apply(s, compose(f, g), n) == apply(apply(s, g, n), f, n)`
///
/// i.e. `compose(f, g)` means "`f` after `g`": the newer update is the
/// left argument. `apply` must also distribute over [Monoid::combine]
/// consistently for every span an update may cover, e.g. for a range
/// ADD over a SUM monoid, `apply(s, e, n) == s + e * n`.
pub trait ActionMonoid: Monoid {
    /// Update type buffered in lazy tree nodes
    type Update: UpdateBounds;

    /// Returns the identity element of [Self::compose]
    ///
    /// A node whose tag equals the identity update has nothing pending.
    fn identity_update() -> Self::Update;

    /// Composes two updates into one, newer first
    fn compose(f: Self::Update, g: Self::Update) -> Self::Update;

    /// Applies an update to a value aggregated over `span` leaves
    fn apply(value: Self::Value, update: &Self::Update, span: u64) -> Self::Value;
}

/// Trait bounds for an aggregated value type
#[cfg(not(feature = "serde"))]
pub trait ValueBounds: Debug + Clone {}

/// Trait bounds for an aggregated value type
#[cfg(feature = "serde")]
pub trait ValueBounds:
    Debug + Clone + serde::Serialize + for<'a> serde::Deserialize<'a>
{
}

#[cfg(not(feature = "serde"))]
impl<T> ValueBounds for T where T: Debug + Clone {}

#[cfg(feature = "serde")]
impl<T> ValueBounds for T where T: Debug + Clone + serde::Serialize + for<'a> serde::Deserialize<'a> {}

/// Trait bounds for an update type
///
/// `PartialEq` lets trees skip identity tags without calling
/// [ActionMonoid::apply].
#[cfg(not(feature = "serde"))]
pub trait UpdateBounds: Debug + Clone + PartialEq {}

/// Trait bounds for an update type
#[cfg(feature = "serde")]
pub trait UpdateBounds:
    Debug + Clone + PartialEq + serde::Serialize + for<'a> serde::Deserialize<'a>
{
}

#[cfg(not(feature = "serde"))]
impl<T> UpdateBounds for T where T: Debug + Clone + PartialEq {}

#[cfg(feature = "serde")]
impl<T> UpdateBounds for T where
    T: Debug + Clone + PartialEq + serde::Serialize + for<'a> serde::Deserialize<'a>
{
}
