use super::{ActionMonoid, Monoid};

#[inline]
fn min<T: PartialOrd>(a: T, b: T) -> T {
    if a < b { a } else { b }
}

#[inline]
fn max<T: PartialOrd>(a: T, b: T) -> T {
    if a > b { a } else { b }
}

macro_rules! min_monoid {
    ($struct:tt, $type:ty) => {
        #[derive(Default, Debug, Clone, Copy)]
        #[allow(missing_docs)]
        pub struct $struct;

        impl Monoid for $struct {
            type Value = $type;

            fn identity() -> Self::Value {
                <$type>::MAX
            }

            #[inline]
            fn combine(a: Self::Value, b: Self::Value) -> Self::Value {
                min(a, b)
            }
        }
    };
}

macro_rules! max_monoid {
    ($struct:tt, $type:ty) => {
        #[derive(Default, Debug, Clone, Copy)]
        #[allow(missing_docs)]
        pub struct $struct;

        impl Monoid for $struct {
            type Value = $type;

            fn identity() -> Self::Value {
                <$type>::MIN
            }

            #[inline]
            fn combine(a: Self::Value, b: Self::Value) -> Self::Value {
                max(a, b)
            }
        }
    };
}

min_monoid!(U16MinMonoid, u16);
min_monoid!(U32MinMonoid, u32);
min_monoid!(U64MinMonoid, u64);
min_monoid!(I16MinMonoid, i16);
min_monoid!(I32MinMonoid, i32);
min_monoid!(I64MinMonoid, i64);

max_monoid!(U16MaxMonoid, u16);
max_monoid!(U32MaxMonoid, u32);
max_monoid!(U64MaxMonoid, u64);
max_monoid!(I16MaxMonoid, i16);
max_monoid!(I32MaxMonoid, i32);
max_monoid!(I64MaxMonoid, i64);

/// Range ADD over an i64 MIN monoid
///
/// Adding a constant to every leaf shifts the minimum by the same
/// constant, independent of the span. The add saturates so positive
/// updates never overflow past the identity (`i64::MAX`). As with any
/// MIN tree over a sparse domain, leaves must be initialized before
/// additive updates become meaningful.
#[derive(Default, Debug, Clone, Copy)]
pub struct I64AddMin;

impl Monoid for I64AddMin {
    type Value = i64;

    fn identity() -> Self::Value {
        i64::MAX
    }

    #[inline]
    fn combine(a: Self::Value, b: Self::Value) -> Self::Value {
        min(a, b)
    }
}

impl ActionMonoid for I64AddMin {
    type Update = i64;

    fn identity_update() -> Self::Update {
        0
    }

    #[inline]
    fn compose(f: Self::Update, g: Self::Update) -> Self::Update {
        f.saturating_add(g)
    }

    #[inline]
    fn apply(value: Self::Value, update: &Self::Update, _span: u64) -> Self::Value {
        value.saturating_add(*update)
    }
}

/// Range ASSIGN over an i64 MIN monoid
#[derive(Default, Debug, Clone, Copy)]
pub struct I64AssignMin;

impl Monoid for I64AssignMin {
    type Value = i64;

    fn identity() -> Self::Value {
        i64::MAX
    }

    #[inline]
    fn combine(a: Self::Value, b: Self::Value) -> Self::Value {
        min(a, b)
    }
}

impl ActionMonoid for I64AssignMin {
    type Update = Option<i64>;

    fn identity_update() -> Self::Update {
        None
    }

    #[inline]
    fn compose(f: Self::Update, g: Self::Update) -> Self::Update {
        f.or(g)
    }

    #[inline]
    fn apply(value: Self::Value, update: &Self::Update, _span: u64) -> Self::Value {
        match update {
            Some(v) => *v,
            None => value,
        }
    }
}
