mod parse;
mod relative;

#[cfg(test)]
mod tests;

use crate::{
    operator::OperatorError,
    predicate::{Accessor, CompareOp, Param, Predicate},
    value::{Value, ValueType, compare_order},
};
use std::cmp::Ordering;

pub use relative::{Clock, FixedClock, Period, RangeContext, RelativeDate, SystemClock};

///
/// RangeBound
///
/// One side of a dynamic range. An absent bound is modelled as `None` on
/// the operator, never as an excluded `RangeBound`.
///

#[derive(Clone, Debug, PartialEq)]
pub struct RangeBound {
    pub value: Value,
    pub inclusive: bool,
}

impl RangeBound {
    #[must_use]
    pub const fn inclusive(value: Value) -> Self {
        Self {
            value,
            inclusive: true,
        }
    }

    #[must_use]
    pub const fn exclusive(value: Value) -> Self {
        Self {
            value,
            inclusive: false,
        }
    }
}

///
/// DynamicRangeOperator
///
/// Open or closed interval parsed from range text such as `[0,10)` or
/// `(ct-1d,ct]`. Each parse yields an independent, caller-owned value.
///

#[derive(Clone, Debug, PartialEq)]
pub struct DynamicRangeOperator {
    display_name: String,
    alias: Option<String>,
    parsed_for: Option<ValueType>,
    lower: Option<RangeBound>,
    upper: Option<RangeBound>,
}

impl DynamicRangeOperator {
    #[must_use]
    pub fn new(
        display_name: impl Into<String>,
        lower: Option<RangeBound>,
        upper: Option<RangeBound>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            alias: None,
            parsed_for: None,
            lower,
            upper,
        }
    }

    /// Give the range a name it can be registered and looked up under.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The original range text.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Field type the range text was parsed for, `None` for hand-built ranges.
    #[must_use]
    pub const fn parsed_for(&self) -> Option<ValueType> {
        self.parsed_for
    }

    #[must_use]
    pub fn canonical_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.display_name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(2);
        if let Some(alias) = &self.alias {
            names.push(alias.as_str());
        }
        names.push(self.display_name.as_str());
        names
    }

    #[must_use]
    pub const fn lower(&self) -> Option<&RangeBound> {
        self.lower.as_ref()
    }

    #[must_use]
    pub const fn upper(&self) -> Option<&RangeBound> {
        self.upper.as_ref()
    }

    /// `None` when the lower side is unbounded.
    #[must_use]
    pub fn lower_inclusive(&self) -> Option<bool> {
        self.lower.as_ref().map(|b| b.inclusive)
    }

    /// `None` when the upper side is unbounded.
    #[must_use]
    pub fn upper_inclusive(&self) -> Option<bool> {
        self.upper.as_ref().map(|b| b.inclusive)
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    /// Resolve a registered range again for a field of `value_type`.
    ///
    /// Ranges parsed from text are parsed afresh, so relative bounds follow
    /// `ctx` and the text must fit the field's grammar. Hand-built ranges
    /// apply only when the field accepts every bound value.
    pub fn resolve_for(
        &self,
        value_type: ValueType,
        ctx: &RangeContext,
    ) -> Result<Option<Self>, OperatorError> {
        let resolved = if self.parsed_for.is_some() {
            Self::parse(&self.display_name, value_type, ctx)?
        } else if value_type.supports_dynamic_range()
            && self.bounds().all(|b| value_type.accepts(&b.value))
        {
            Some(self.clone())
        } else {
            None
        };

        Ok(resolved.map(|mut range| {
            range.alias.clone_from(&self.alias);
            range
        }))
    }

    fn bounds(&self) -> impl Iterator<Item = &RangeBound> {
        self.lower.iter().chain(self.upper.iter())
    }

    /// Direct interval test.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        let above = self.lower.as_ref().is_none_or(|b| {
            compare_order(value, &b.value)
                .is_some_and(|o| if b.inclusive { o.is_ge() } else { o == Ordering::Greater })
        });
        let below = self.upper.as_ref().is_none_or(|b| {
            compare_order(value, &b.value)
                .is_some_and(|o| if b.inclusive { o.is_le() } else { o == Ordering::Less })
        });

        above && below
    }

    // Lower bound binds to slot 0, upper bound to slot 1.
    pub(crate) fn build(&self, accessor: Accessor) -> Predicate {
        let mut bounds = Vec::with_capacity(2);

        if let Some(b) = &self.lower {
            let op = if b.inclusive { CompareOp::Gte } else { CompareOp::Gt };
            bounds.push(Predicate::compare(accessor.clone(), op, Param::new(0, b.value.clone())));
        }
        if let Some(b) = &self.upper {
            let op = if b.inclusive { CompareOp::Lte } else { CompareOp::Lt };
            bounds.push(Predicate::compare(accessor, op, Param::new(1, b.value.clone())));
        }

        Predicate::all(bounds)
    }
}
