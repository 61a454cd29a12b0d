use super::*;
use crate::{operator::OperatorError, value::ValueType};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use rust_decimal::Decimal;
use std::str::FromStr;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 13)
        .unwrap()
        .and_hms_opt(15, 42, 7)
        .unwrap()
}

fn ctx() -> RangeContext {
    RangeContext::new(now(), Weekday::Mon)
}

fn parse(text: &str, ty: ValueType) -> Option<DynamicRangeOperator> {
    DynamicRangeOperator::parse(text, ty, &ctx()).unwrap()
}

#[test]
fn half_open_numeric_range() {
    let op = parse("[0,10)", ValueType::Decimal).unwrap();

    assert!(op.contains(&Value::Int(0)));
    assert!(op.contains(&Value::Float(9.999)));
    assert!(!op.contains(&Value::Int(10)));
    assert!(!op.contains(&Value::Int(-1)));
    assert_eq!(op.lower_inclusive(), Some(true));
    assert_eq!(op.upper_inclusive(), Some(false));
    assert_eq!(op.display_name(), "[0,10)");
}

#[test]
fn integral_bounds_keep_the_field_representation() {
    let op = parse("[1, 5]", ValueType::Int).unwrap();
    assert_eq!(op.lower().unwrap().value, Value::Int(1));

    let op = parse("(1.5,]", ValueType::Int).unwrap();
    assert_eq!(
        op.lower().unwrap().value,
        Value::Decimal(Decimal::from_str("1.5").unwrap())
    );
}

#[test]
fn empty_bound_is_unbounded_not_excluded() {
    let op = parse("(,5]", ValueType::Int).unwrap();

    assert_eq!(op.lower_inclusive(), None);
    assert_eq!(op.upper_inclusive(), Some(true));
    assert!(op.contains(&Value::Int(i64::MIN)));
    assert!(op.contains(&Value::Int(5)));
    assert!(!op.contains(&Value::Int(6)));
}

#[test]
fn fully_unbounded_range_matches_everything() {
    let op = parse("(,)", ValueType::Float).unwrap();

    assert!(op.is_unbounded());
    assert!(op.contains(&Value::Null));
    assert!(op.build(Accessor::Identity).is_true());
}

#[test]
fn relative_date_range_covers_the_last_day() {
    let op = parse("(ct-1d,ct]", ValueType::DateTime).unwrap();
    let two_days_ago = now() - TimeDelta::try_days(2).unwrap();

    assert!(op.contains(&Value::DateTime(now())));
    assert!(!op.contains(&Value::DateTime(two_days_ago)));
}

#[test]
fn date_fields_resolve_to_calendar_days() {
    let op = parse("(ct-1d,ct]", ValueType::Date).unwrap();

    assert!(op.contains(&Value::Date(now().date())));
    assert!(!op.contains(&Value::Date(now().date() - TimeDelta::try_days(2).unwrap())));
}

#[test]
fn current_month_range() {
    let op = parse("[boM,eoM)", ValueType::Date).unwrap();

    assert!(op.contains(&Value::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())));
    assert!(op.contains(&Value::Date(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())));
    assert!(!op.contains(&Value::Date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())));
}

#[test]
fn absolute_dates_parse_for_temporal_targets() {
    let op = parse("[2024-01-01,2024-02-01)", ValueType::DateTime).unwrap();
    let jan = NaiveDate::from_ymd_opt(2024, 1, 31)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();

    assert!(op.contains(&Value::DateTime(jan)));
    assert!(op.contains(&Value::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())));
}

#[test]
fn grammar_mismatches_are_absent() {
    assert_eq!(parse("[a,b]", ValueType::Int), None);
    assert_eq!(parse("0,10", ValueType::Int), None);
    assert_eq!(parse("[ct,]", ValueType::Int), None);
    assert_eq!(parse("[1,2]", ValueType::Date), None);
    assert_eq!(parse("[2024-13-45,]", ValueType::Date), None);
    assert_eq!(parse("[boq,]", ValueType::Date), None);
}

#[test]
fn unsupported_types_are_absent() {
    assert_eq!(parse("[0,10)", ValueType::Text), None);
    assert_eq!(parse("[0,10)", ValueType::Bool), None);
}

#[test]
fn unresolvable_offsets_are_errors() {
    let err =
        DynamicRangeOperator::parse("[ct+99999999999y,]", ValueType::Date, &ctx()).unwrap_err();

    assert!(matches!(err, OperatorError::OffsetOutOfRange { .. }));
}

#[test]
fn predicate_binds_bounds_to_fixed_slots() {
    let op = parse("(,5]", ValueType::Int).unwrap();
    let pred = op.build(Accessor::field("qty"));
    assert_eq!(pred.to_string(), "qty <= $1");

    let pred = op.build(Accessor::Identity);
    for v in [4, 5, 6] {
        assert_eq!(pred.eval(&Value::Int(v)), op.contains(&Value::Int(v)));
    }
}

#[test]
fn aliases_become_canonical() {
    let op = parse("[ct-30d,ct]", ValueType::Date).unwrap().with_alias("LAST30D");

    assert_eq!(op.canonical_name(), "LAST30D");
    assert_eq!(op.names(), vec!["LAST30D", "[ct-30d,ct]"]);
}
