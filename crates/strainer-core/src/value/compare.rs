//! Comparison semantics shared by eager matching and predicate evaluation.
//!
//! Both entry points of an operator route through these helpers, which is
//! what keeps `Operator::matches` and an evaluated `Predicate` in agreement.

use crate::value::Value;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::cmp::Ordering;

///
/// NumericRepr
///

enum NumericRepr {
    Decimal(Decimal),
    F64(f64),
}

fn numeric_repr(value: &Value) -> Option<NumericRepr> {
    match value {
        Value::Int(v) => Some(NumericRepr::Decimal(Decimal::from(*v))),
        Value::Uint(v) => Some(NumericRepr::Decimal(Decimal::from(*v))),
        Value::Decimal(v) => Some(NumericRepr::Decimal(*v)),
        Value::Float(v) => Some(NumericRepr::F64(*v)),
        _ => None,
    }
}

impl NumericRepr {
    fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Decimal(d) => d.to_f64(),
            Self::F64(f) => Some(*f),
        }
    }
}

// Numeric widening: exact decimals compare exactly, anything involving a
// float falls back to f64 ordering (NaN has no ordering).
fn cmp_numeric(left: &Value, right: &Value) -> Option<Ordering> {
    let left = numeric_repr(left)?;
    let right = numeric_repr(right)?;

    match (&left, &right) {
        (NumericRepr::Decimal(a), NumericRepr::Decimal(b)) => Some(a.cmp(b)),
        _ => left.to_f64()?.partial_cmp(&right.to_f64()?),
    }
}

/// Equality used by every equality-style operator.
///
/// `Null` equals only `Null`. Numeric values widen across `Int`, `Uint`,
/// `Decimal` and `Float`; a `Date` equals the midnight `DateTime` of the
/// same day. Any other cross-variant comparison is unequal.
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        _ => match compare_order(left, right) {
            Some(ordering) => ordering == Ordering::Equal,
            None => left == right,
        },
    }
}

/// Ordering used by LT/LE/GT/GE, Between and dynamic ranges.
///
/// Returns `None` when ordering is undefined: either side is `Null`, the
/// variants are incompatible, or a float is NaN.
#[must_use]
pub fn compare_order(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => None,
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) | (Value::Enum(a), Value::Enum(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::DateTime(b)) => Some(a.and_hms_opt(0, 0, 0)?.cmp(b)),
        (Value::DateTime(a), Value::Date(b)) => Some(a.cmp(&b.and_hms_opt(0, 0, 0)?)),
        _ => cmp_numeric(left, right),
    }
}

/// Case-sensitive substring test; `None` unless both sides are textual.
#[must_use]
pub fn text_contains(haystack: &Value, needle: &Value) -> Option<bool> {
    Some(haystack.as_text()?.contains(needle.as_text()?))
}

/// Case-sensitive prefix test; `None` unless both sides are textual.
#[must_use]
pub fn text_starts_with(haystack: &Value, prefix: &Value) -> Option<bool> {
    Some(haystack.as_text()?.starts_with(prefix.as_text()?))
}
