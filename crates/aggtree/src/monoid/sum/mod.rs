use super::{ActionMonoid, Monoid};

macro_rules! sum_monoid {
    ($struct:tt, $type:ty) => {
        #[derive(Default, Debug, Clone, Copy)]
        #[allow(missing_docs)]
        pub struct $struct;

        impl Monoid for $struct {
            type Value = $type;

            fn identity() -> Self::Value {
                0 as $type
            }

            #[inline]
            fn combine(a: Self::Value, b: Self::Value) -> Self::Value {
                a + b
            }
        }
    };
}

sum_monoid!(U16SumMonoid, u16);
sum_monoid!(U32SumMonoid, u32);
sum_monoid!(U64SumMonoid, u64);
sum_monoid!(I16SumMonoid, i16);
sum_monoid!(I32SumMonoid, i32);
sum_monoid!(I64SumMonoid, i64);

/// Range ADD over an i64 SUM monoid
///
/// An update `e` adds `e` to every leaf it covers, so a subtree
/// aggregating `span` leaves gains `e * span`. The intermediate
/// product is computed in i128 so full-width sparse domains (spans up
/// to 2^63) never panic; results that exceed i64 wrap on truncation.
#[derive(Default, Debug, Clone, Copy)]
pub struct I64AddSum;

impl Monoid for I64AddSum {
    type Value = i64;

    fn identity() -> Self::Value {
        0
    }

    #[inline]
    fn combine(a: Self::Value, b: Self::Value) -> Self::Value {
        a + b
    }
}

impl ActionMonoid for I64AddSum {
    type Update = i64;

    fn identity_update() -> Self::Update {
        0
    }

    #[inline]
    fn compose(f: Self::Update, g: Self::Update) -> Self::Update {
        f + g
    }

    #[inline]
    fn apply(value: Self::Value, update: &Self::Update, span: u64) -> Self::Value {
        (value as i128 + *update as i128 * span as i128) as i64
    }
}

/// Range ASSIGN over an i64 SUM monoid
///
/// An update overwrites every covered leaf, so a subtree aggregating
/// `span` leaves becomes `e * span`. `None` means no pending
/// assignment; composing keeps the newer assignment.
#[derive(Default, Debug, Clone, Copy)]
pub struct I64AssignSum;

impl Monoid for I64AssignSum {
    type Value = i64;

    fn identity() -> Self::Value {
        0
    }

    #[inline]
    fn combine(a: Self::Value, b: Self::Value) -> Self::Value {
        a + b
    }
}

impl ActionMonoid for I64AssignSum {
    type Update = Option<i64>;

    fn identity_update() -> Self::Update {
        None
    }

    #[inline]
    fn compose(f: Self::Update, g: Self::Update) -> Self::Update {
        f.or(g)
    }

    #[inline]
    fn apply(value: Self::Value, update: &Self::Update, span: u64) -> Self::Value {
        match update {
            Some(v) => (*v as i128 * span as i128) as i64,
            None => value,
        }
    }
}
