use crate::value::Value;
use serde::{Deserialize, Serialize};

///
/// FieldCriteria
///
/// Serializable criterion for one field: operator name plus the values it
/// reads, in slot order.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FieldCriteria {
    pub field: String,
    pub operator: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
}

impl FieldCriteria {
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        values: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            values: values.into_iter().collect(),
        }
    }
}
