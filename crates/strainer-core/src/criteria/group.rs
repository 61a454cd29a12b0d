use crate::{
    criteria::{
        ApplicabilityTarget, CriteriaError, FieldCriteria, FieldCriteriaDisplay, FieldDescriptor,
        OperatorCatalog, OperatorHeader, OperatorProperty, PropertySlot, ValueSlot,
        sync_dependent_slots,
    },
    operator::{BuiltinOperator, OperatorRegistry},
    predicate::{Accessor, Predicate},
    value::Value,
};

///
/// CriteriaPropertyGroup
///
/// Criteria editor state for one field: an optional operator selector and
/// up to two value slots. The selector only exists when more than one
/// operator applies; otherwise the single applicable operator is implied.
///

#[derive(Clone, Debug, PartialEq)]
pub struct CriteriaPropertyGroup {
    field: FieldDescriptor,
    operator: Option<OperatorProperty>,
    implied: Option<OperatorHeader>,
    value: Option<ValueSlot>,
    value2: Option<ValueSlot>,
    default_operator: Option<String>,
    null_check: bool,
}

impl CriteriaPropertyGroup {
    #[must_use]
    pub fn builder(field: FieldDescriptor) -> CriteriaGroupBuilder {
        CriteriaGroupBuilder::new(field)
    }

    #[must_use]
    pub const fn field(&self) -> &FieldDescriptor {
        &self.field
    }

    #[must_use]
    pub const fn operator(&self) -> Option<&OperatorProperty> {
        self.operator.as_ref()
    }

    #[must_use]
    pub const fn value(&self) -> Option<&ValueSlot> {
        self.value.as_ref()
    }

    #[must_use]
    pub const fn value2(&self) -> Option<&ValueSlot> {
        self.value2.as_ref()
    }

    pub const fn value_mut(&mut self) -> Option<&mut ValueSlot> {
        self.value.as_mut()
    }

    pub const fn value2_mut(&mut self) -> Option<&mut ValueSlot> {
        self.value2.as_mut()
    }

    #[must_use]
    pub const fn has_null_check(&self) -> bool {
        self.null_check
    }

    /// Operator a freshly reset group starts with.
    ///
    /// A configured override wins. Otherwise multi-valued fields default to
    /// set membership and everything else to equality; a group without a
    /// value slot has no default.
    #[must_use]
    pub fn default_operator(&self) -> Option<&str> {
        if let Some(name) = self.default_operator.as_deref() {
            return Some(name);
        }
        self.value.as_ref()?;

        let op = if self.field.multi_valued {
            BuiltinOperator::ONE_OF
        } else {
            BuiltinOperator::EQUAL
        };

        Some(op.canonical_name())
    }

    /// Header of the operator currently in effect.
    #[must_use]
    pub fn current_operator(&self) -> Option<&OperatorHeader> {
        match &self.operator {
            Some(op) => op.effective(),
            None => self.implied.as_ref(),
        }
    }

    /// Number of value slots the current operator reads.
    #[must_use]
    pub fn dependent_count(&self) -> u8 {
        self.current_operator().map_or(0, |h| h.addl_props)
    }

    /// Clear every value and go back to the default operator (or the first
    /// applicable one when the default does not apply).
    pub fn reset(&mut self) {
        for slot in self.value.iter_mut().chain(self.value2.iter_mut()) {
            slot.clear();
        }

        let default = self.default_operator().map(str::to_owned);
        if let Some(op) = &mut self.operator {
            let chosen = default.as_deref().is_some_and(|name| op.select(Some(name)));
            if !chosen {
                op.select_first();
            }
        }

        self.sync_dependents();
    }

    pub fn set_operator(&mut self, name: Option<&str>) -> Result<(), CriteriaError> {
        let Some(op) = self.operator.as_mut() else {
            return Err(CriteriaError::NoSelector {
                field: self.field.name.clone(),
            });
        };

        if !op.select(name) {
            return Err(CriteriaError::NotApplicable {
                field: self.field.name.clone(),
                operator: name.unwrap_or_default().to_string(),
            });
        }
        self.sync_dependents();

        Ok(())
    }

    pub fn set_operator_visible(&mut self, visible: bool) {
        if let Some(op) = &mut self.operator {
            op.set_visible(visible);
        }
        self.sync_dependents();
    }

    /// True when the group contributes a criterion: an operator is in
    /// effect and it either reads no values or has a non-blank one.
    #[must_use]
    pub fn has_value(&self) -> bool {
        if self.current_operator().is_none() {
            return false;
        }

        match usize::from(self.dependent_count()) {
            0 => true,
            count => self.dependents().take(count).any(|slot| !slot.is_null()),
        }
    }

    #[must_use]
    pub fn to_criteria(&self) -> Option<FieldCriteria> {
        if !self.has_value() {
            return None;
        }
        let header = self.current_operator()?;

        let values = match header.addl_props {
            0 => Vec::new(),
            1 => self
                .value
                .as_ref()
                .map(|slot| slot.values().to_vec())
                .unwrap_or_default(),
            _ => self.dependents().map(|slot| slot.value().clone()).collect(),
        };

        Some(FieldCriteria::new(&self.field.name, &header.name, values))
    }

    /// Load a criterion produced by `to_criteria`, selecting its operator
    /// and distributing its values over the dependent slots.
    pub fn apply_criteria(&mut self, criteria: &FieldCriteria) -> Result<(), CriteriaError> {
        if criteria.field != self.field.name {
            return Err(CriteriaError::FieldMismatch {
                expected: self.field.name.clone(),
                actual: criteria.field.clone(),
            });
        }

        if self.operator.is_some() {
            self.set_operator(Some(criteria.operator.as_str()))?;
        } else if !self
            .current_operator()
            .is_some_and(|h| h.answers_to(&criteria.operator))
        {
            return Err(CriteriaError::NotApplicable {
                field: self.field.name.clone(),
                operator: criteria.operator.clone(),
            });
        }

        match self.dependent_count() {
            0 => {}
            1 => {
                if let Some(slot) = &mut self.value {
                    slot.set_values(criteria.values.clone());
                }
            }
            _ => {
                let mut values = criteria.values.iter().cloned();
                for slot in self.value.iter_mut().chain(self.value2.iter_mut()) {
                    slot.set_values(values.next().into_iter().collect());
                }
            }
        }
        self.sync_dependents();

        Ok(())
    }

    /// Resolve the current criterion through `registry` and build its
    /// predicate against this group's field. `Ok(None)` when the group
    /// has no value or the registry knows no such operator.
    pub fn build_predicate(
        &self,
        registry: &OperatorRegistry,
    ) -> Result<Option<Predicate>, CriteriaError> {
        let Some(criteria) = self.to_criteria() else {
            return Ok(None);
        };
        let Some(op) = registry.lookup(criteria.operator.as_str(), self.field.value_type)? else {
            return Ok(None);
        };

        let predicate = op.build_predicate(Accessor::field(&self.field.name), &criteria.values)?;
        if registry.config().debug {
            tracing::debug!(field = %self.field.name, %predicate, "criteria predicate built");
        }

        Ok(Some(predicate))
    }

    #[must_use]
    pub fn display(&self) -> Option<FieldCriteriaDisplay> {
        let criteria = self.to_criteria()?;
        let header = self.current_operator()?;

        let values: Vec<String> = criteria
            .values
            .iter()
            .filter(|v| !v.is_null())
            .map(ToString::to_string)
            .collect();

        Some(FieldCriteriaDisplay {
            field: self.field.name.clone(),
            label: self.field.label.clone(),
            operator: self.operator_text(header, &criteria.values),
            range: header.addl_props == 2 && values.len() == 2,
            values,
            and_text: FieldCriteriaDisplay::DEFAULT_AND_TEXT.to_string(),
        })
    }

    // A two-value operator with one blank bound reads as the one-sided
    // comparison it evaluates to.
    fn operator_text(&self, header: &OperatorHeader, values: &[Value]) -> String {
        let lower_only = match values {
            [lower, upper] if header.addl_props == 2 => match (lower.is_null(), upper.is_null()) {
                (false, true) => true,
                (true, false) => false,
                _ => return header.text.clone(),
            },
            _ => return header.text.clone(),
        };

        let negated = BuiltinOperator::find(&header.name).is_some_and(BuiltinOperator::is_negated);
        let one_sided = match (lower_only, negated) {
            (true, false) => BuiltinOperator::GREATER_OR_EQUAL,
            (false, false) => BuiltinOperator::LESS_OR_EQUAL,
            (true, true) => BuiltinOperator::LESS_THAN,
            (false, true) => BuiltinOperator::GREATER_THAN,
        };
        let name = one_sided.canonical_name();

        self.operator
            .as_ref()
            .and_then(|op| op.position(name).and_then(|i| op.applicable().get(i)))
            .map(|h| h.text.clone())
            .or_else(|| OperatorCatalog::builtin().get(name).map(|h| h.text.clone()))
            .unwrap_or_else(|| header.text.clone())
    }

    fn dependents(&self) -> impl Iterator<Item = &ValueSlot> {
        self.value.iter().chain(self.value2.iter())
    }

    fn sync_dependents(&mut self) {
        let count = self.dependent_count();

        sync_dependent_slots(
            count,
            self.value.as_mut().map(|slot| slot as &mut dyn PropertySlot),
            self.value2.as_mut().map(|slot| slot as &mut dyn PropertySlot),
        );
    }
}

///
/// CriteriaGroupBuilder
///

#[derive(Clone, Debug)]
pub struct CriteriaGroupBuilder {
    field: FieldDescriptor,
    null_check: bool,
    range: Option<bool>,
    with_value: bool,
    default_operator: Option<String>,
}

impl CriteriaGroupBuilder {
    #[must_use]
    pub const fn new(field: FieldDescriptor) -> Self {
        Self {
            field,
            null_check: false,
            range: None,
            with_value: true,
            default_operator: None,
        }
    }

    /// Offer `IsNull` / `IsNotNull`.
    #[must_use]
    pub const fn null_check(mut self, enabled: bool) -> Self {
        self.null_check = enabled;
        self
    }

    /// Force the second value slot on or off. By default it exists for
    /// single-valued numeric and temporal fields.
    #[must_use]
    pub const fn range(mut self, enabled: bool) -> Self {
        self.range = Some(enabled);
        self
    }

    /// No value slots at all; only value-less operators can apply.
    #[must_use]
    pub const fn without_value(mut self) -> Self {
        self.with_value = false;
        self
    }

    #[must_use]
    pub fn default_operator(mut self, name: impl Into<String>) -> Self {
        self.default_operator = Some(name.into());
        self
    }

    #[must_use]
    pub fn build(self, catalog: &OperatorCatalog) -> CriteriaPropertyGroup {
        let field = self.field;
        let ordered = field.value_type.is_numeric() || field.value_type.is_temporal();

        let has_value = self.with_value;
        let has_value2 = has_value && self.range.unwrap_or(!field.multi_valued && ordered);

        let target = ApplicabilityTarget {
            value_type: field.value_type,
            multi_valued: field.multi_valued,
            dependent_slots: u8::from(has_value) + u8::from(has_value2),
            null_check: self.null_check,
        };
        let mut applicable: Vec<OperatorHeader> = catalog.applicable(&target).cloned().collect();

        let (operator, implied) = if applicable.len() > 1 {
            (Some(OperatorProperty::new(applicable)), None)
        } else {
            (None, applicable.pop())
        };

        let mut group = CriteriaPropertyGroup {
            value: has_value.then(|| ValueSlot::new(field.name.clone())),
            value2: has_value2.then(|| ValueSlot::new(format!("{}2", field.name))),
            field,
            operator,
            implied,
            default_operator: self.default_operator,
            null_check: self.null_check,
        };
        group.reset();

        group
    }
}
