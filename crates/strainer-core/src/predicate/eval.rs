use crate::{
    predicate::{Accessor, CompareOp, ComparePredicate, Predicate},
    value::{Value, compare_order, text_contains, text_starts_with, values_equal},
};
use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
};

///
/// FieldPresence
///
/// Result of attempting to read a field from a row during predicate
/// evaluation. This distinguishes between a missing field and a
/// present field whose value may be `Null`.
///

#[derive(Clone, Debug, PartialEq)]
pub enum FieldPresence {
    /// Field exists and has a value (including `Value::Null`).
    Present(Value),

    /// Field is not present on the row.
    Missing,
}

///
/// Row
///
/// Abstraction over a row-like value that can expose fields by name.
/// This decouples predicate evaluation from concrete entity types.
///

pub trait Row {
    fn field(&self, name: &str) -> FieldPresence;

    /// The value seen through `Accessor::Identity`.
    fn identity(&self) -> FieldPresence {
        FieldPresence::Missing
    }
}

impl Row for Value {
    fn field(&self, _name: &str) -> FieldPresence {
        FieldPresence::Missing
    }

    fn identity(&self) -> FieldPresence {
        FieldPresence::Present(self.clone())
    }
}

impl Row for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> FieldPresence {
        self.get(name)
            .map_or(FieldPresence::Missing, |v| FieldPresence::Present(v.clone()))
    }
}

impl<S: std::hash::BuildHasher> Row for HashMap<String, Value, S> {
    fn field(&self, name: &str) -> FieldPresence {
        self.get(name)
            .map_or(FieldPresence::Missing, |v| FieldPresence::Present(v.clone()))
    }
}

///
/// FnRow
///
/// Adapts an entity plus a field-extraction function into a `Row`.
///

pub struct FnRow<'a, E, F> {
    entity: &'a E,
    extract: F,
}

impl<'a, E, F> FnRow<'a, E, F>
where
    F: Fn(&E, &str) -> Option<Value>,
{
    pub const fn new(entity: &'a E, extract: F) -> Self {
        Self { entity, extract }
    }
}

impl<E, F> Row for FnRow<'_, E, F>
where
    F: Fn(&E, &str) -> Option<Value>,
{
    fn field(&self, name: &str) -> FieldPresence {
        (self.extract)(self.entity, name).map_or(FieldPresence::Missing, FieldPresence::Present)
    }
}

// A missing field reads as Null so negated comparisons stay the exact
// complement of their positive form.
fn resolve<R: Row + ?Sized>(row: &R, accessor: &Accessor) -> Value {
    let presence = match accessor {
        Accessor::Identity => row.identity(),
        Accessor::Field(name) => row.field(name),
    };

    match presence {
        FieldPresence::Present(value) => value,
        FieldPresence::Missing => Value::Null,
    }
}

///
/// Evaluate a predicate against a single row.
///
/// This function performs **pure runtime evaluation**:
/// - no registry or configuration access
/// - no validation
///
/// Any undefined comparison (null operand, incompatible variants)
/// simply evaluates to `false`.
///
#[must_use]
pub fn eval<R: Row + ?Sized>(row: &R, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::True => true,

        Predicate::And(children) => children.iter().all(|child| eval(row, child)),
        Predicate::Or(children) => children.iter().any(|child| eval(row, child)),
        Predicate::Not(inner) => !eval(row, inner),

        Predicate::Compare(cmp) => eval_compare(row, cmp),

        Predicate::IsNull { accessor } => resolve(row, accessor).is_null(),
    }
}

fn eval_compare<R: Row + ?Sized>(row: &R, cmp: &ComparePredicate) -> bool {
    let ComparePredicate {
        accessor,
        op,
        param,
    } = cmp;

    let actual = resolve(row, accessor);
    let expected = &param.value;

    match op {
        CompareOp::Eq => values_equal(&actual, expected),

        CompareOp::Lt => compare_order(&actual, expected).is_some_and(Ordering::is_lt),
        CompareOp::Lte => compare_order(&actual, expected).is_some_and(Ordering::is_le),
        CompareOp::Gt => compare_order(&actual, expected).is_some_and(Ordering::is_gt),
        CompareOp::Gte => compare_order(&actual, expected).is_some_and(Ordering::is_ge),

        // NOTE: Non-text operands are treated as non-matches.
        CompareOp::Contains => text_contains(&actual, expected).unwrap_or(false),
        CompareOp::StartsWith => text_starts_with(&actual, expected).unwrap_or(false),
    }
}

impl Predicate {
    /// Evaluate this predicate against `row`.
    #[must_use]
    pub fn eval<R: Row + ?Sized>(&self, row: &R) -> bool {
        eval(row, self)
    }
}
