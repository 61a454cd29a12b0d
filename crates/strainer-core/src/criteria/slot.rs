use crate::value::{NULL, Value, ValueType};

///
/// PropertySlot
///
/// The surface a field framework exposes for one editable value: its
/// current values plus the visible / required flags the criteria group
/// drives.
///

pub trait PropertySlot {
    fn values(&self) -> &[Value];

    fn set_values(&mut self, values: Vec<Value>);

    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);

    fn is_required(&self) -> bool;

    fn set_required(&mut self, required: bool);

    fn clear(&mut self) {
        self.set_values(Vec::new());
    }

    /// Blank means no values or only nulls.
    fn is_null(&self) -> bool {
        Value::all_null(self.values())
    }
}

///
/// FieldDescriptor
///
/// Declared shape of a searchable field.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub value_type: ValueType,
    pub multi_valued: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        let name = name.into();

        Self {
            label: name.clone(),
            name,
            value_type,
            multi_valued: false,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub const fn multi_valued(mut self) -> Self {
        self.multi_valued = true;
        self
    }
}

///
/// ValueSlot
///
/// In-memory `PropertySlot` used by criteria groups that are not bound to
/// an external field framework.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ValueSlot {
    name: String,
    values: Vec<Value>,
    visible: bool,
    required: bool,
}

impl ValueSlot {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            visible: true,
            required: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First value, `Null` when the slot is empty.
    #[must_use]
    pub fn value(&self) -> &Value {
        self.values.first().unwrap_or(&NULL)
    }

    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.values = vec![value.into()];
    }
}

impl PropertySlot for ValueSlot {
    fn values(&self) -> &[Value] {
        &self.values
    }

    fn set_values(&mut self, values: Vec<Value>) {
        self.values = values;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn set_required(&mut self, required: bool) {
        self.required = required;
    }
}
