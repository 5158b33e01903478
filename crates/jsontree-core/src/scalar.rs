//! Conversion between tree leaves and statically typed scalars.
//!
//! A scalar target accepts either a leaf that already has the right shape
//! (a number for integers and floats, a bool for `bool`, a string for
//! `String`) or a string whose text parses as that type, so both `20` and
//! `"20"` read as the integer `20`. `bool` additionally treats integers as
//! flags: zero is `false`, anything else is `true`.

use serde_json::Number;

use crate::value::Value;

/// A leaf type that can be read from and written to a [`Value`].
///
/// `Default` supplies the zero value substituted by the recovering
/// strategies (`""`, `0`, `0.0`, `false`).
pub trait Scalar: Sized + Default {
    /// Type name used in diagnostics.
    const NAME: &'static str;

    /// Coerce a leaf, returning `None` when it holds no usable value.
    fn from_value(value: &Value) -> Option<Self>;

    /// Wrap the scalar as a leaf.
    fn into_value(self) -> Value;
}

/// Integral view of a number. Floats qualify only when they have no
/// fractional part, so `170.0` reads as an integer but `5.5` does not.
fn integral(n: &Number) -> Option<i128> {
    if let Some(i) = n.as_i64() {
        return Some(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(i128::from(u));
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1.8e19 {
        Some(f as i128)
    } else {
        None
    }
}

macro_rules! integer_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl Scalar for $t {
            const NAME: &'static str = stringify!($t);

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Number(n) => integral(n).and_then(|i| <$t>::try_from(i).ok()),
                    Value::String(s) => s.parse().ok(),
                    _ => None,
                }
            }

            fn into_value(self) -> Value {
                Value::Number(Number::from(self))
            }
        }
    )*};
}

integer_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Scalar for f64 {
    const NAME: &'static str = "f64";

    fn from_value(value: &Value) -> Option<Self> {
        let f = match value {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.parse().ok()?,
            _ => return None,
        };
        f.is_finite().then_some(f)
    }

    fn into_value(self) -> Value {
        Value::from(self)
    }
}

impl Scalar for f32 {
    const NAME: &'static str = "f32";

    fn from_value(value: &Value) -> Option<Self> {
        let f = match value {
            Value::Number(n) => n.as_f64()? as f32,
            Value::String(s) => s.parse().ok()?,
            _ => return None,
        };
        f.is_finite().then_some(f)
    }

    // Widen through the shortest decimal form so 0.1f32 is written as 0.1.
    fn into_value(self) -> Value {
        let widened = self.to_string().parse::<f64>().unwrap_or(f64::from(self));
        Value::from(widened)
    }
}

impl Scalar for bool {
    const NAME: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => s
                .parse::<bool>()
                .ok()
                .or_else(|| i64::from_value(value).map(|flag| flag != 0)),
            Value::Number(_) => i64::from_value(value).map(|flag| flag != 0),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl Scalar for String {
    const NAME: &'static str = "String";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}
