use super::*;
use crate::{
    config::EngineConfig,
    error::ErrorClass,
    operator::{DynamicRangeOperator, FixedClock, Operator, OperatorRegistry},
    value::{TypeTag, Value, ValueType},
};
use chrono::NaiveDate;

fn catalog() -> OperatorCatalog {
    OperatorCatalog::builtin()
}

fn applicable_names(group: &CriteriaPropertyGroup) -> Vec<&str> {
    group
        .operator()
        .map(|op| op.applicable().iter().map(|h| h.name.as_str()).collect())
        .unwrap_or_default()
}

fn age_group() -> CriteriaPropertyGroup {
    CriteriaPropertyGroup::builder(FieldDescriptor::new("age", ValueType::Int).with_label("Age"))
        .null_check(true)
        .build(&catalog())
}

///
/// Applicability
///

#[test]
fn multi_valued_enum_without_second_slot_offers_set_operators_only() {
    let field = FieldDescriptor::new("status", ValueType::Enum).multi_valued();
    let group = CriteriaPropertyGroup::builder(field).build(&catalog());

    assert_eq!(applicable_names(&group), ["IN", "NotIn"]);
    assert!(group.value2().is_none());
}

#[test]
fn null_check_opt_in_adds_null_operators() {
    let field = FieldDescriptor::new("status", ValueType::Enum).multi_valued();
    let group = CriteriaPropertyGroup::builder(field)
        .null_check(true)
        .build(&catalog());

    assert_eq!(applicable_names(&group), ["IsNull", "IsNotNull", "IN", "NotIn"]);
}

#[test]
fn single_valued_number_offers_comparisons_and_ranges() {
    let group = CriteriaPropertyGroup::builder(FieldDescriptor::new("age", ValueType::Int))
        .build(&catalog());

    assert_eq!(
        applicable_names(&group),
        ["EQ", "NEQ", "LT", "LE", "GT", "GE", "Between", "NotBetween"]
    );
}

#[test]
fn ranges_need_the_second_slot() {
    let group = CriteriaPropertyGroup::builder(FieldDescriptor::new("age", ValueType::Int))
        .range(false)
        .build(&catalog());

    assert!(!applicable_names(&group).contains(&"Between"));
    assert!(applicable_names(&group).contains(&"GE"));
}

#[test]
fn text_matching_excludes_enumerated_fields() {
    let text = CriteriaPropertyGroup::builder(FieldDescriptor::new("name", ValueType::Text))
        .build(&catalog());
    let code = CriteriaPropertyGroup::builder(FieldDescriptor::new("code", ValueType::Enum))
        .build(&catalog());

    assert_eq!(
        applicable_names(&text),
        ["EQ", "NEQ", "Contains", "NotContains", "StartsWith", "NotStartWith"]
    );
    assert_eq!(applicable_names(&code), ["EQ", "NEQ"]);
}

#[test]
fn exclusion_is_checked_before_inclusion() {
    let header = OperatorHeader::new("Odd", "Odd", 1)
        .types([TypeTag::Text])
        .exclude_types([TypeTag::Text]);
    let target = ApplicabilityTarget {
        value_type: ValueType::Text,
        multi_valued: false,
        dependent_slots: 1,
        null_check: false,
    };

    assert!(!header.is_applicable(&target));
}

#[test]
fn single_applicable_operator_is_implied() {
    let catalog = OperatorCatalog::new(vec![OperatorHeader::new("EQ", "Equals", 1)]);
    let mut group = CriteriaPropertyGroup::builder(FieldDescriptor::new("flag", ValueType::Bool))
        .build(&catalog);

    assert!(group.operator().is_none());
    assert_eq!(group.current_operator().map(|h| h.name.as_str()), Some("EQ"));
    assert_eq!(
        group.set_operator(Some("EQ")),
        Err(CriteriaError::NoSelector {
            field: "flag".to_string()
        })
    );
}

///
/// Dependent slots
///

#[test]
fn switching_operator_clears_hidden_slots() {
    let mut group = age_group();

    group.set_operator(Some("Between")).unwrap();
    group.value_mut().unwrap().set_value(18);
    group.value2_mut().unwrap().set_value(65);
    assert!(group.value2().unwrap().is_visible());
    assert!(group.value2().unwrap().is_required());

    group.set_operator(Some("EQ")).unwrap();
    let value2 = group.value2().unwrap();
    assert!(!value2.is_visible());
    assert!(!value2.is_required());
    assert!(value2.is_null());
    assert_eq!(group.value().unwrap().value(), &Value::Int(18));

    group.set_operator(Some("IsNull")).unwrap();
    let value = group.value().unwrap();
    assert!(!value.is_visible());
    assert!(value.is_null());
}

#[test]
fn null_check_clears_both_range_slots() {
    let mut group = age_group();

    group.set_operator(Some("Between")).unwrap();
    group.value_mut().unwrap().set_value(18);
    group.value2_mut().unwrap().set_value(65);

    group.set_operator(Some("IsNull")).unwrap();
    for slot in [group.value().unwrap(), group.value2().unwrap()] {
        assert!(slot.is_null());
        assert!(!slot.is_visible());
        assert!(!slot.is_required());
    }
    assert_eq!(
        group.to_criteria(),
        Some(FieldCriteria::new("age", "IsNull", Vec::new()))
    );
}

#[test]
fn dependent_slots_sync_directly() {
    let mut value = ValueSlot::new("age");
    let mut value2 = ValueSlot::new("age2");
    value.set_value(18);
    value2.set_value(65);

    for _ in 0..2 {
        sync_dependent_slots(1, Some(&mut value), Some(&mut value2));

        assert_eq!(value.value(), &Value::Int(18));
        assert!(value.is_visible());
        assert!(value.is_required());
        assert!(value2.is_null());
        assert!(!value2.is_visible());
        assert!(!value2.is_required());
    }

    sync_dependent_slots(2, None, Some(&mut value2));
    assert!(value2.is_visible());
    assert!(value2.is_null());
}

#[test]
fn slot_sync_is_idempotent() {
    let mut group = age_group();

    group.set_operator(Some("GT")).unwrap();
    group.value_mut().unwrap().set_value(3);
    let once = group.clone();
    group.set_operator(Some("GT")).unwrap();

    assert_eq!(group, once);
}

#[test]
fn hidden_selector_hides_every_dependent() {
    let mut group = age_group();
    group.value_mut().unwrap().set_value(7);

    group.set_operator_visible(false);

    assert!(group.current_operator().is_none());
    assert!(group.value().unwrap().is_null());
    assert!(!group.has_value());
}

#[test]
fn selecting_an_inapplicable_operator_is_rejected() {
    let mut group = age_group();
    group.set_operator(Some("LT")).unwrap();

    let err = group.set_operator(Some("Contains")).unwrap_err();

    assert_eq!(err.class(), ErrorClass::Argument);
    assert_eq!(group.current_operator().map(|h| h.name.as_str()), Some("LT"));
}

#[test]
fn selection_accepts_builtin_aliases() {
    let mut group = age_group();

    group.set_operator(Some(">=")).unwrap();

    assert_eq!(group.current_operator().map(|h| h.name.as_str()), Some("GE"));
}

///
/// Defaults
///

#[test]
fn default_operator_follows_cardinality() {
    let single = CriteriaPropertyGroup::builder(FieldDescriptor::new("name", ValueType::Text))
        .build(&catalog());
    let multi =
        CriteriaPropertyGroup::builder(FieldDescriptor::new("tags", ValueType::Text).multi_valued())
            .build(&catalog());
    let valueless = CriteriaPropertyGroup::builder(FieldDescriptor::new("note", ValueType::Text))
        .null_check(true)
        .without_value()
        .build(&catalog());

    assert_eq!(single.default_operator(), Some("EQ"));
    assert_eq!(multi.default_operator(), Some("IN"));
    assert_eq!(valueless.default_operator(), None);
    assert_eq!(valueless.current_operator().map(|h| h.name.as_str()), Some("IsNull"));
}

#[test]
fn default_operator_override_is_selected_on_reset() {
    let mut group =
        CriteriaPropertyGroup::builder(FieldDescriptor::new("name", ValueType::Text))
            .default_operator("StartsWith")
            .build(&catalog());
    assert_eq!(group.default_operator(), Some("StartsWith"));

    group.set_operator(Some("EQ")).unwrap();
    group.value_mut().unwrap().set_value("Jo");
    group.reset();

    assert_eq!(
        group.current_operator().map(|h| h.name.as_str()),
        Some("StartsWith")
    );
    assert!(!group.has_value());
}

///
/// Criteria records
///

#[test]
fn blank_group_produces_no_criteria() {
    let group = age_group();

    assert!(!group.has_value());
    assert_eq!(group.to_criteria(), None);
}

#[test]
fn null_check_has_a_value_without_inputs() {
    let mut group = age_group();
    group.set_operator(Some("IsNotNull")).unwrap();

    assert_eq!(
        group.to_criteria(),
        Some(FieldCriteria::new("age", "IsNotNull", []))
    );
}

#[test]
fn criteria_round_trip_through_another_group() {
    let mut source = age_group();
    source.set_operator(Some("Between")).unwrap();
    source.value_mut().unwrap().set_value(18);
    source.value2_mut().unwrap().set_value(65);
    let criteria = source.to_criteria().unwrap();

    let mut target = age_group();
    target.apply_criteria(&criteria).unwrap();

    assert_eq!(target.to_criteria(), Some(criteria));
    assert_eq!(target.value2().unwrap().value(), &Value::Int(65));
}

#[test]
fn applying_criteria_for_another_field_fails() {
    let mut group = age_group();
    let err = group
        .apply_criteria(&FieldCriteria::new("height", "EQ", [Value::Int(1)]))
        .unwrap_err();

    assert_eq!(
        err,
        CriteriaError::FieldMismatch {
            expected: "age".to_string(),
            actual: "height".to_string()
        }
    );
}

#[test]
fn field_criteria_serializes_to_json() {
    let criteria = FieldCriteria::new("status", "IN", [Value::from("open"), Value::from("new")]);

    let json = serde_json::to_value(&criteria).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "field": "status",
            "operator": "IN",
            "values": [{ "Text": "open" }, { "Text": "new" }],
        })
    );

    let back: FieldCriteria = serde_json::from_value(json).unwrap();
    assert_eq!(back, criteria);
}

#[test]
fn value_less_criteria_omit_values() {
    let json = serde_json::to_string(&FieldCriteria::new("age", "IsNull", [])).unwrap();

    assert_eq!(json, r#"{"field":"age","operator":"IsNull"}"#);
}

///
/// Predicates
///

#[test]
fn group_builds_predicate_through_registry() {
    let mut group = age_group();
    group.set_operator(Some("NotBetween")).unwrap();
    group.value_mut().unwrap().set_value(18);
    group.value2_mut().unwrap().set_value(65);

    let predicate = group
        .build_predicate(&OperatorRegistry::new())
        .unwrap()
        .unwrap();

    assert_eq!(predicate.to_string(), "NOT (age >= $0 AND age <= $1)");
}

#[test]
fn blank_group_builds_no_predicate() {
    let group = age_group();

    assert_eq!(group.build_predicate(&OperatorRegistry::new()), Ok(None));
}

#[test]
fn named_range_flows_from_catalog_to_predicate() {
    let catalog = OperatorCatalog::from_toml_str(
        r#"
        [[operator]]
        name = "LAST7D"
        text = "In The Last Week"
        type = ["temporal"]

        [[operator]]
        name = "EQ"
        text = "On"
        addl-props = 1
        multival = false
        "#,
    )
    .unwrap();

    let now = NaiveDate::from_ymd_opt(2024, 3, 13)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let mut registry = OperatorRegistry::with_config(EngineConfig::default())
        .with_clock(FixedClock(now));
    let ctx = registry.range_context();
    let range = DynamicRangeOperator::parse("[bod-7d,ct]", ValueType::DateTime, &ctx)
        .unwrap()
        .unwrap()
        .with_alias("LAST7D");
    registry.register([Operator::DynamicRange(range)]);

    let created = FieldDescriptor::new("created", ValueType::DateTime);
    let mut group = CriteriaPropertyGroup::builder(created).build(&catalog);
    group.set_operator(Some("last7d")).unwrap();
    assert!(group.value().unwrap().is_null());
    assert!(!group.value().unwrap().is_visible());

    let predicate = group.build_predicate(&registry).unwrap().unwrap();
    assert_eq!(predicate.to_string(), "(created >= $0 AND created <= $1)");
    assert_eq!(
        predicate.params()[0].value,
        Value::DateTime(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap().and_hms_opt(0, 0, 0).unwrap())
    );
}

///
/// Display
///

#[test]
fn display_joins_range_bounds() {
    let mut group = age_group();
    group.set_operator(Some("Between")).unwrap();
    group.value_mut().unwrap().set_value(18);
    group.value2_mut().unwrap().set_value(65);

    let display = group.display().unwrap();
    assert_eq!(display.field, "age");
    assert_eq!(display.label, "Age");
    assert_eq!(display.to_string(), "Age Between 18 and 65");
}

#[test]
fn display_of_open_range_reads_one_sided() {
    let mut group = age_group();
    group.set_operator(Some("Between")).unwrap();
    group.value_mut().unwrap().set_value(18);
    assert_eq!(
        group.display().unwrap().to_string(),
        "Age Greater Than Or Equal To 18"
    );

    group.value_mut().unwrap().clear();
    group.value2_mut().unwrap().set_value(65);
    assert_eq!(
        group.display().unwrap().to_string(),
        "Age Less Than Or Equal To 65"
    );

    group.set_operator(Some("NotBetween")).unwrap();
    group.value2_mut().unwrap().set_value(65);
    assert_eq!(group.display().unwrap().to_string(), "Age Greater Than 65");

    group.value2_mut().unwrap().clear();
    group.value_mut().unwrap().set_value(18);
    assert_eq!(group.display().unwrap().to_string(), "Age Less Than 18");
}

#[test]
fn display_lists_set_members() {
    let field = FieldDescriptor::new("status", ValueType::Enum)
        .with_label("Status")
        .multi_valued();
    let mut group = CriteriaPropertyGroup::builder(field).build(&catalog());
    group
        .value_mut()
        .unwrap()
        .set_values(vec![Value::Enum("open".into()), Value::Enum("new".into())]);

    assert_eq!(group.display().unwrap().to_string(), "Status Is One Of open, new");
}

#[test]
fn display_of_null_check_has_no_values() {
    let mut group = age_group();
    group.set_operator(Some("IsNull")).unwrap();

    assert_eq!(group.display().unwrap().to_string(), "Age Is Null");
}

///
/// Catalog
///

#[test]
fn catalog_lookup_accepts_aliases() {
    let catalog = catalog();

    assert_eq!(catalog.get("neq").map(|h| h.text.as_str()), Some("Does Not Equal"));
    assert_eq!(catalog.get("<>").map(|h| h.name.as_str()), Some("NEQ"));
    assert!(catalog.get("[0,10)").is_none());
}

#[test]
fn catalog_covers_every_builtin() {
    let catalog = catalog();

    for op in crate::operator::BuiltinOperator::ALL {
        let header = catalog.get(op.canonical_name()).unwrap();
        assert_eq!(header.addl_props == 0, op.arity().is_nullary());
    }
}

#[test]
fn catalog_rejects_malformed_documents() {
    let err = OperatorCatalog::from_toml_str("[[operator]]\ntext = \"no name\"").unwrap_err();

    assert!(err.to_string().starts_with("invalid engine configuration"));
}
