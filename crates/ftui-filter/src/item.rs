#![forbid(unsafe_code)]

//! Read-only capability the filter needs from content items.
//!
//! The engine never inspects an item beyond three questions: "what is under
//! this name?", "what are your elements?" and "are you a scalar?". Any tree
//! shaped model can participate by answering them. `serde_json::Value` is
//! supported out of the box; other `Serialize` types can go through
//! [`filter_serialize`](crate::filter_serialize).

use std::fmt;

use serde_json::Value;

/// Borrowed view of a scalar leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Number(f64),
    Str(&'a str),
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => fmt_number(n, f),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// Integral values print without a fractional part, `-0` prints as `0`.
/// Magnitudes outside `[1e-6, 1e21)` use exponent form with a signed
/// exponent (`1e+21`, `1.5e-7`).
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else if !(1e-6..1e21).contains(&n.abs()) {
        let exp = format!("{n:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{mantissa}e+{power}")
            }
            _ => f.write_str(&exp),
        }
    } else if n.fract() == 0.0 {
        write!(f, "{n:.0}")
    } else {
        write!(f, "{n}")
    }
}

/// Property access and iteration over a content item.
pub trait Item {
    /// Look up a named property. `None` means absent, never an error.
    fn property(&self, name: &str) -> Option<&Self>;

    /// Iterate elements if this value is a collection.
    fn elements(&self) -> Option<Box<dyn Iterator<Item = &Self> + '_>>;

    /// Scalar view, if this value is a boolean, number or string.
    fn scalar(&self) -> Option<Scalar<'_>>;
}

impl Item for Value {
    fn property(&self, name: &str) -> Option<&Self> {
        match self {
            Value::Object(map) => map.get(name),
            // Numeric segments address sequence elements (`tags.0`).
            Value::Array(items) => name.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    fn elements(&self) -> Option<Box<dyn Iterator<Item = &Self> + '_>> {
        match self {
            Value::Array(items) => Some(Box::new(items.iter())),
            _ => None,
        }
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        match self {
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => n.as_f64().map(Scalar::Number),
            Value::String(s) => Some(Scalar::Str(s)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}
