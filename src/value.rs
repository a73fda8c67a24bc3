//! The scalar values a [`Tree`][crate::Tree] is ordered by.
//!
//! A tree only ever compares values of one [`ValueFamily`]: numbers with numbers or text with text.
//! Integers and floats share the numeric family and compare exactly by magnitude, so `Int(1)` and
//! `Float(1.0)` are the same key.
//!
//! ```
//! use pbst::{Value, ValueFamily};
//!
//! assert_eq!(Value::from(1), Value::from(1.0));
//! assert!(Value::from(2) > Value::from(1.5));
//! assert!(Value::from("apple") < Value::from("banana"));
//! assert_eq!(Value::from("apple").family(), ValueFamily::Text);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// 2^63, the first float at or beyond which no `i64` can reach.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// A totally ordered scalar stored in a node.
#[derive(Debug, Clone)]
pub enum Value {
    /// A signed integer.
    Int(i64),
    /// A float. `NaN` is representable here but rejected by every tree operation.
    Float(f64),
    /// A string, ordered by its bytes.
    Str(String),
}

/// The kind of values a tree holds. Values of different families are never compared by a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueFamily {
    /// Integers and floats.
    Numeric,
    /// Strings.
    Text,
}

impl fmt::Display for ValueFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => f.write_str("numeric"),
            Self::Text => f.write_str("text"),
        }
    }
}

impl Value {
    /// The family this value belongs to.
    pub fn family(&self) -> ValueFamily {
        match self {
            Self::Int(_) | Self::Float(_) => ValueFamily::Numeric,
            Self::Str(_) => ValueFamily::Text,
        }
    }

    /// Returns the string slice if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a float if it is numeric. Large integers may round.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(x) => Some(*x),
            Self::Str(_) => None,
        }
    }

    /// Rejects values that can't take part in a total order.
    pub(crate) fn check_ordered(&self) -> Result<()> {
        match self {
            Self::Float(x) if x.is_nan() => Err(Error::Unordered(self.clone())),
            _ => Ok(()),
        }
    }
}

/// Compares an integer against a non-`NaN` float without rounding either side.
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    if float.is_nan() {
        // Sorts after everything, like `f64::total_cmp` does for positive NaN.
        return Ordering::Less;
    }
    if float >= I64_BOUND {
        return Ordering::Less;
    }
    if float < -I64_BOUND {
        return Ordering::Greater;
    }

    let whole = float.floor();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal if float > whole => Ordering::Less,
        ordering => ordering,
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b).unwrap_or_else(|| a.total_cmp(b)),
            (Self::Int(a), Self::Float(b)) => cmp_int_float(*a, *b),
            (Self::Float(a), Self::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            // Only reachable outside a tree; numbers sort before text.
            (Self::Str(_), _) => Ordering::Greater,
            (_, Self::Str(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Str(s) => f.write_str(s),
        }
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}
