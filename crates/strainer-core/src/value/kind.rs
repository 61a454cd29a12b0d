use crate::value::Value;
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// TypeTag
///
/// Capability tag attached to a value type. A type carries its own tag plus
/// every broader tag it belongs to, so operator metadata can target either
/// a specific type (`integer`) or a whole family (`numeric`) with a plain
/// membership test.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Boolean,
    Integer,
    Numeric,
    Text,
    Enumerated,
    Date,
    DateTime,
    Temporal,
}

///
/// ValueType
///
/// Declared value type of a field. Drives operator applicability and the
/// target grammar of dynamic range parsing.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Bool,
    Int,
    Uint,
    Float,
    Decimal,
    Text,
    Enum,
    Date,
    DateTime,
}

impl ValueType {
    /// Tag chain for this type, most specific first.
    #[must_use]
    pub const fn tags(self) -> &'static [TypeTag] {
        match self {
            Self::Bool => &[TypeTag::Boolean],
            Self::Int | Self::Uint => &[TypeTag::Integer, TypeTag::Numeric],
            Self::Float | Self::Decimal => &[TypeTag::Numeric],
            Self::Text => &[TypeTag::Text],
            // enumerated values are stored as their textual codes
            Self::Enum => &[TypeTag::Enumerated, TypeTag::Text],
            Self::Date => &[TypeTag::Date, TypeTag::Temporal],
            Self::DateTime => &[TypeTag::DateTime, TypeTag::Temporal],
        }
    }

    #[must_use]
    pub fn has_tag(self, tag: TypeTag) -> bool {
        self.tags().contains(&tag)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Uint | Self::Float | Self::Decimal)
    }

    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }

    /// Whether free-form range text may be parsed into an operator for this type.
    #[must_use]
    pub const fn supports_dynamic_range(self) -> bool {
        self.is_numeric() || self.is_temporal()
    }

    /// Whether `value` can be held by a field of this type. `Null` always can.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        value.value_type().is_none_or(|ty| ty == self)
    }
}
