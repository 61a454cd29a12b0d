//! Range text grammar.
//!
//! `(` or `[`, optional lower bound, `,`, optional upper bound, `)` or `]`.
//! Bounds are decimal numbers for numeric targets, and ISO dates or
//! relative-date tokens for temporal targets.

use super::{DynamicRangeOperator, RangeBound, RangeContext, RelativeDate};
use crate::{
    operator::OperatorError,
    value::{Value, ValueType},
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use rust_decimal::Decimal;
use std::{str::FromStr, sync::LazyLock};

const NUMBER: &str = r"-?\d+(?:\.\d+)?";
const DATE_BOUND: &str = r"\d{4}-\d{2}-\d{2}|(?:ct|[be]o[smhdwMy])(?:[+-]\d+[smhdwMy])?";

static NUMERIC_RANGE: LazyLock<Regex> =
    LazyLock::new(|| range_pattern(NUMBER).expect("numeric range pattern"));
static DATE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| range_pattern(DATE_BOUND).expect("date range pattern"));
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("iso date pattern"));

fn range_pattern(bound: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"^\s*([\[(])\s*({bound})?\s*,\s*({bound})?\s*([\])])\s*$"
    ))
}

impl DynamicRangeOperator {
    /// Parse range text for a field of type `value_type`.
    ///
    /// `Ok(None)` means "not a range for this type": the text does not match
    /// the grammar, a bound does not denote a real number or calendar date,
    /// or the type does not support ranges. Errors are reserved for tokens
    /// the grammar accepted but that cannot be resolved.
    pub fn parse(
        text: &str,
        value_type: ValueType,
        ctx: &RangeContext,
    ) -> Result<Option<Self>, OperatorError> {
        let grammar = if value_type.is_numeric() {
            &*NUMERIC_RANGE
        } else if value_type.is_temporal() {
            &*DATE_RANGE
        } else {
            return Ok(None);
        };

        let Some(caps) = grammar.captures(text) else {
            return Ok(None);
        };

        let lower_inclusive = &caps[1] == "[";
        let upper_inclusive = &caps[4] == "]";

        let lower = match caps.get(2) {
            None => None,
            Some(m) => match parse_bound(m.as_str(), value_type, ctx)? {
                Some(value) => Some(bound(value, lower_inclusive)),
                None => return Ok(None),
            },
        };
        let upper = match caps.get(3) {
            None => None,
            Some(m) => match parse_bound(m.as_str(), value_type, ctx)? {
                Some(value) => Some(bound(value, upper_inclusive)),
                None => return Ok(None),
            },
        };

        let mut range = Self::new(text.trim(), lower, upper);
        range.parsed_for = Some(value_type);

        Ok(Some(range))
    }
}

const fn bound(value: Value, inclusive: bool) -> RangeBound {
    RangeBound { value, inclusive }
}

fn parse_bound(
    text: &str,
    value_type: ValueType,
    ctx: &RangeContext,
) -> Result<Option<Value>, OperatorError> {
    if value_type.is_numeric() {
        return Ok(parse_number(text, value_type));
    }

    if ISO_DATE.is_match(text) {
        return Ok(NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .map(|date| temporal(date.and_time(NaiveTime::MIN), value_type)));
    }

    match RelativeDate::parse(text)? {
        Some(relative) => Ok(Some(temporal(relative.resolve(ctx)?, value_type))),
        None => Ok(None),
    }
}

// Keep integral bounds in the field's own representation so translators
// can bind them without conversion.
fn parse_number(text: &str, value_type: ValueType) -> Option<Value> {
    match value_type {
        ValueType::Int => text.parse::<i64>().ok().map(Value::Int),
        ValueType::Uint => text.parse::<u64>().ok().map(Value::Uint),
        ValueType::Float => text.parse::<f64>().ok().map(Value::Float),
        _ => None,
    }
    .or_else(|| Decimal::from_str(text).ok().map(Value::Decimal))
}

fn temporal(t: NaiveDateTime, value_type: ValueType) -> Value {
    match value_type {
        ValueType::Date => Value::Date(t.date()),
        _ => Value::DateTime(t),
    }
}
