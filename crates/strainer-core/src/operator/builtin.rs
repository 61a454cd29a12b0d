use crate::{
    operator::Arity,
    predicate::{Accessor, CompareOp, Param, Predicate},
    value::{NULL, Value, compare_order, text_contains, text_starts_with, values_equal},
};
use std::cmp::Ordering;

///
/// OperatorKind
///
/// Closed set of built-in matching rules. Negated variants share a kind
/// with their positive form and differ only in `BuiltinOperator::negate`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OperatorKind {
    Equal,
    OneOf,
    Contains,
    StartsWith,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    Between,
    IsNull,
}

impl OperatorKind {
    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::IsNull => Arity::Fixed(0),
            Self::OneOf => Arity::Unbounded,
            Self::Between => Arity::Fixed(2),
            Self::Equal
            | Self::Contains
            | Self::StartsWith
            | Self::LessThan
            | Self::LessOrEqual
            | Self::GreaterThan
            | Self::GreaterOrEqual => Arity::Fixed(1),
        }
    }

    // Single-criterion comparison each one-value kind lowers to.
    const fn compare_op(self) -> Option<CompareOp> {
        match self {
            Self::Equal => Some(CompareOp::Eq),
            Self::Contains => Some(CompareOp::Contains),
            Self::StartsWith => Some(CompareOp::StartsWith),
            Self::LessThan => Some(CompareOp::Lt),
            Self::LessOrEqual => Some(CompareOp::Lte),
            Self::GreaterThan => Some(CompareOp::Gt),
            Self::GreaterOrEqual => Some(CompareOp::Gte),
            Self::OneOf | Self::Between | Self::IsNull => None,
        }
    }
}

///
/// BuiltinOperator
///
/// One entry of the built-in operator table. Names are matched
/// case-insensitively; the first one is canonical.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BuiltinOperator {
    kind: OperatorKind,
    negate: bool,
    names: &'static [&'static str],
}

impl BuiltinOperator {
    pub const EQUAL: Self = Self::new(
        OperatorKind::Equal,
        false,
        &["EQ", "=", "==", "Equals", "EqualTo"],
    );
    pub const NOT_EQUAL: Self = Self::new(
        OperatorKind::Equal,
        true,
        &["NEQ", "!=", "<>", "NE", "NotEquals", "NotEqualTo"],
    );
    pub const ONE_OF: Self = Self::new(OperatorKind::OneOf, false, &["IN", "OneOf", "AnyOf"]);
    pub const NOT_ONE_OF: Self = Self::new(
        OperatorKind::OneOf,
        true,
        &["NotIn", "NIN", "NotOneOf", "NoneOf"],
    );
    pub const CONTAINS: Self = Self::new(
        OperatorKind::Contains,
        false,
        &["Contains", "CONT", "Like"],
    );
    pub const NOT_CONTAINS: Self = Self::new(
        OperatorKind::Contains,
        true,
        &["NotContains", "NCONT", "NotLike", "DoesNotContain"],
    );
    pub const STARTS_WITH: Self = Self::new(
        OperatorKind::StartsWith,
        false,
        &["StartsWith", "SW", "BeginsWith"],
    );
    pub const NOT_STARTS_WITH: Self = Self::new(
        OperatorKind::StartsWith,
        true,
        &["NotStartWith", "NSW", "NotStartsWith", "NotBeginWith"],
    );
    pub const LESS_THAN: Self = Self::new(OperatorKind::LessThan, false, &["LT", "<", "LessThan"]);
    pub const LESS_OR_EQUAL: Self = Self::new(
        OperatorKind::LessOrEqual,
        false,
        &["LE", "<=", "LTE", "LessOrEqual", "LessThanOrEqual"],
    );
    pub const GREATER_THAN: Self = Self::new(
        OperatorKind::GreaterThan,
        false,
        &["GT", ">", "GreaterThan"],
    );
    pub const GREATER_OR_EQUAL: Self = Self::new(
        OperatorKind::GreaterOrEqual,
        false,
        &["GE", ">=", "GTE", "GreaterOrEqual", "GreaterThanOrEqual"],
    );
    pub const BETWEEN: Self = Self::new(OperatorKind::Between, false, &["Between", "BW"]);
    pub const NOT_BETWEEN: Self = Self::new(OperatorKind::Between, true, &["NotBetween", "NBW"]);
    pub const IS_NULL: Self = Self::new(OperatorKind::IsNull, false, &["IsNull", "NULL"]);
    pub const IS_NOT_NULL: Self = Self::new(
        OperatorKind::IsNull,
        true,
        &["IsNotNull", "NotNull", "NNULL"],
    );

    /// The full built-in table, in registration order.
    pub const ALL: [Self; 16] = [
        Self::EQUAL,
        Self::NOT_EQUAL,
        Self::ONE_OF,
        Self::NOT_ONE_OF,
        Self::CONTAINS,
        Self::NOT_CONTAINS,
        Self::STARTS_WITH,
        Self::NOT_STARTS_WITH,
        Self::LESS_THAN,
        Self::LESS_OR_EQUAL,
        Self::GREATER_THAN,
        Self::GREATER_OR_EQUAL,
        Self::BETWEEN,
        Self::NOT_BETWEEN,
        Self::IS_NULL,
        Self::IS_NOT_NULL,
    ];

    const fn new(kind: OperatorKind, negate: bool, names: &'static [&'static str]) -> Self {
        Self { kind, negate, names }
    }

    /// Built-in operator answering to `alias` (case-insensitive).
    #[must_use]
    pub fn find(alias: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.names.iter().any(|name| name.eq_ignore_ascii_case(alias)))
    }

    #[must_use]
    pub const fn kind(self) -> OperatorKind {
        self.kind
    }

    #[must_use]
    pub const fn is_negated(self) -> bool {
        self.negate
    }

    #[must_use]
    pub const fn arity(self) -> Arity {
        self.kind.arity()
    }

    #[must_use]
    pub const fn names(self) -> &'static [&'static str] {
        self.names
    }

    #[must_use]
    pub const fn canonical_name(self) -> &'static str {
        self.names[0]
    }

    // No criteria supplied must not exclude rows.
    fn passes_through(self, values: &[Value]) -> bool {
        !self.arity().is_nullary() && Value::all_null(values)
    }

    // Arity is checked by the caller; a short slice still reads as Null.
    fn param(values: &[Value], slot: usize) -> Param {
        Param::new(slot, values.get(slot).cloned().unwrap_or_default())
    }

    pub(crate) fn build(self, accessor: Accessor, values: &[Value]) -> Predicate {
        if self.passes_through(values) {
            return Predicate::True;
        }

        let expr = match self.kind {
            OperatorKind::IsNull => Predicate::IsNull { accessor },

            OperatorKind::OneOf => Predicate::any(
                values
                    .iter()
                    .enumerate()
                    .map(|(slot, value)| {
                        let param = Param::new(slot, value.clone());
                        Predicate::compare(accessor.clone(), CompareOp::Eq, param)
                    })
                    .collect(),
            ),

            OperatorKind::Between => {
                let mut bounds = Vec::with_capacity(2);
                let lower = Self::param(values, 0);
                let upper = Self::param(values, 1);

                if !lower.value.is_null() {
                    bounds.push(Predicate::compare(accessor.clone(), CompareOp::Gte, lower));
                }
                if !upper.value.is_null() {
                    bounds.push(Predicate::compare(accessor, CompareOp::Lte, upper));
                }

                Predicate::all(bounds)
            }

            kind => match kind.compare_op() {
                Some(op) => Predicate::compare(accessor, op, Self::param(values, 0)),
                None => Predicate::True,
            },
        };

        if self.negate { Predicate::not(expr) } else { expr }
    }

    pub(crate) fn eval(self, value: &Value, criteria: &[Value]) -> bool {
        if self.passes_through(criteria) {
            return true;
        }

        let first = criteria.first().unwrap_or(&NULL);
        let hit = match self.kind {
            OperatorKind::IsNull => value.is_null(),
            OperatorKind::Equal => values_equal(value, first),
            OperatorKind::OneOf => criteria.iter().any(|c| values_equal(value, c)),
            OperatorKind::Contains => text_contains(value, first).unwrap_or(false),
            OperatorKind::StartsWith => text_starts_with(value, first).unwrap_or(false),
            OperatorKind::LessThan => compare_order(value, first).is_some_and(Ordering::is_lt),
            OperatorKind::LessOrEqual => compare_order(value, first).is_some_and(Ordering::is_le),
            OperatorKind::GreaterThan => compare_order(value, first).is_some_and(Ordering::is_gt),
            OperatorKind::GreaterOrEqual => {
                compare_order(value, first).is_some_and(Ordering::is_ge)
            }
            OperatorKind::Between => {
                let upper = criteria.get(1).unwrap_or(&NULL);

                (first.is_null() || compare_order(value, first).is_some_and(Ordering::is_ge))
                    && (upper.is_null() || compare_order(value, upper).is_some_and(Ordering::is_le))
            }
        };

        hit != self.negate
    }
}
