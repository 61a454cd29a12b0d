//! Comparison operators.
//!
//! An operator is either one of the built-in rules (`BuiltinOperator`) or a
//! parsed dynamic range (`DynamicRangeOperator`). Both expose the same two
//! entry points: `build_predicate` produces a translator-friendly
//! `Predicate`, `matches` evaluates the same rule eagerly.

mod builtin;
mod range;
mod registry;


use crate::{
    error::ErrorClass,
    predicate::{Accessor, Predicate},
    value::Value,
};
use std::fmt;
use thiserror::Error as ThisError;

// re-exports
pub use builtin::{BuiltinOperator, OperatorKind};
pub use range::{
    Clock, DynamicRangeOperator, FixedClock, Period, RangeBound, RangeContext, RelativeDate,
    SystemClock,
};
pub use registry::{OperatorRegistry, SharedRegistry};

///
/// Arity
///
/// Number of criterion values an operator requires.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Arity {
    Fixed(usize),
    Unbounded,
}

impl Arity {
    /// Minimum number of values a caller must supply.
    #[must_use]
    pub const fn required(self) -> usize {
        match self {
            Self::Fixed(n) => n,
            Self::Unbounded => 0,
        }
    }

    #[must_use]
    pub const fn is_nullary(self) -> bool {
        matches!(self, Self::Fixed(0))
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{n}"),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}

///
/// OperatorError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum OperatorError {
    #[error("operator '{operator}' requires {required} value(s), {supplied} supplied")]
    Arity {
        operator: String,
        required: usize,
        supplied: usize,
    },

    #[error("invalid period code '{code}' in relative date '{input}'")]
    InvalidPeriod { code: String, input: String },

    #[error("relative date '{input}' resolves outside the supported calendar range")]
    OffsetOutOfRange { input: String },
}

impl OperatorError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Arity { .. } | Self::OffsetOutOfRange { .. } => ErrorClass::Argument,
            Self::InvalidPeriod { .. } => ErrorClass::InvariantViolation,
        }
    }
}

///
/// Operator
///

#[derive(Clone, Debug, PartialEq)]
pub enum Operator {
    Builtin(BuiltinOperator),
    DynamicRange(DynamicRangeOperator),
}

impl Operator {
    /// All accepted aliases, canonical name first.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Builtin(op) => op.names().to_vec(),
            Self::DynamicRange(op) => op.names(),
        }
    }

    #[must_use]
    pub fn canonical_name(&self) -> &str {
        match self {
            Self::Builtin(op) => op.canonical_name(),
            Self::DynamicRange(op) => op.canonical_name(),
        }
    }

    #[must_use]
    pub const fn arity(&self) -> Arity {
        match self {
            Self::Builtin(op) => op.arity(),
            Self::DynamicRange(_) => Arity::Fixed(0),
        }
    }

    #[must_use]
    pub const fn is_negated(&self) -> bool {
        match self {
            Self::Builtin(op) => op.is_negated(),
            Self::DynamicRange(_) => false,
        }
    }

    /// Build a predicate over `accessor` with `values` captured as parameters.
    pub fn build_predicate(
        &self,
        accessor: impl Into<Accessor>,
        values: &[Value],
    ) -> Result<Predicate, OperatorError> {
        self.check_arity(values.len())?;
        let accessor = accessor.into();

        Ok(match self {
            Self::Builtin(op) => op.build(accessor, values),
            Self::DynamicRange(op) => op.build(accessor),
        })
    }

    /// Evaluate the operator directly against `value`.
    pub fn matches(&self, value: &Value, criteria: &[Value]) -> Result<bool, OperatorError> {
        self.check_arity(criteria.len())?;

        Ok(match self {
            Self::Builtin(op) => op.eval(value, criteria),
            Self::DynamicRange(op) => op.contains(value),
        })
    }

    fn check_arity(&self, supplied: usize) -> Result<(), OperatorError> {
        let required = self.arity().required();
        if supplied < required {
            return Err(OperatorError::Arity {
                operator: self.canonical_name().to_string(),
                required,
                supplied,
            });
        }

        Ok(())
    }
}

impl From<BuiltinOperator> for Operator {
    fn from(op: BuiltinOperator) -> Self {
        Self::Builtin(op)
    }
}

impl From<DynamicRangeOperator> for Operator {
    fn from(op: DynamicRangeOperator) -> Self {
        Self::DynamicRange(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}
