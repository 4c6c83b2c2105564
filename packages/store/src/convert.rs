//! Conversions between tree values and typed Rust values.
//!
//! These two traits are the typed-access contract of the store: every
//! getter is `FromValue` applied to a map entry, every setter is
//! `IntoValue` applied to its operand.

use propstore_tree::Value;
use url::Url;

/// Read a typed value out of a tree node.
///
/// Implementations are total functions over the value sum type: a
/// mismatched variant reads as absent, never a panic.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

/// Convert a typed value into its tree form.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_integer()
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::Integer(self)
    }
}

// Sized and unsigned integers are not stored natively: everything goes
// through the one wide `Integer` variant, widened on write and narrowed by
// `as`-cast on read. Narrowing truncates out-of-range values silently,
// matching the storage rule rather than validating at the edge.
macro_rules! integer_conversions {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> Option<Self> {
                    value.as_integer().map(|i| i as $t)
                }
            }

            impl IntoValue for $t {
                fn into_value(self) -> Value {
                    Value::Integer(self as i64)
                }
            }
        )*
    };
}

integer_conversions!(i8, i16, i32, u8, u16, u32, u64);

impl FromValue for f64 {
    /// Reads a `Float`, or an `Integer` widened to a float.
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Option<Self> {
        f64::from_value(value).map(|f| f as f32)
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::Float(self as f64)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::String(self.to_owned())
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bytes().map(<[u8]>::to_vec)
    }
}

impl IntoValue for Vec<u8> {
    fn into_value(self) -> Value {
        Value::Bytes(self)
    }
}

impl FromValue for Url {
    /// URLs are stored as their string form; a missing entry and an
    /// unparsable string both read as absent.
    fn from_value(value: &Value) -> Option<Self> {
        Url::parse(value.as_str()?).ok()
    }
}

impl IntoValue for Url {
    fn into_value(self) -> Value {
        Value::String(self.into())
    }
}
