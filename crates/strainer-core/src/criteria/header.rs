use crate::{
    config::ConfigError,
    operator::BuiltinOperator,
    value::{TypeTag, ValueType},
};
use serde::{Deserialize, Serialize};

///
/// OperatorHeader
///
/// Display text and applicability attributes for one operator.
///
/// addl-props   → number of dependent value slots the operator reads (0..=2)
/// multival     → `false` single-valued fields only, `true` multi-valued only,
///                absent for either
/// null-check   → offered only to groups that opt into null checks
/// type         → capability tags the field must carry one of
/// exclude-type → capability tags the field must carry none of
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OperatorHeader {
    pub name: String,
    pub text: String,

    #[serde(default)]
    pub addl_props: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multival: Option<bool>,

    #[serde(default)]
    pub null_check: bool,

    #[serde(default, rename = "type", skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeTag>,

    #[serde(default, rename = "exclude-type", skip_serializing_if = "Vec::is_empty")]
    pub exclude_types: Vec<TypeTag>,
}

impl OperatorHeader {
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>, addl_props: u8) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            addl_props,
            multival: None,
            null_check: false,
            types: Vec::new(),
            exclude_types: Vec::new(),
        }
    }

    #[must_use]
    pub const fn multival(mut self, multival: bool) -> Self {
        self.multival = Some(multival);
        self
    }

    #[must_use]
    pub const fn null_check(mut self) -> Self {
        self.null_check = true;
        self
    }

    #[must_use]
    pub fn types(mut self, tags: impl IntoIterator<Item = TypeTag>) -> Self {
        self.types = tags.into_iter().collect();
        self
    }

    #[must_use]
    pub fn exclude_types(mut self, tags: impl IntoIterator<Item = TypeTag>) -> Self {
        self.exclude_types = tags.into_iter().collect();
        self
    }

    /// Whether `name` refers to this header, either directly or through a
    /// built-in alias of it (both case-insensitive).
    #[must_use]
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || BuiltinOperator::find(name)
                .is_some_and(|op| self.name.eq_ignore_ascii_case(op.canonical_name()))
    }

    #[must_use]
    pub fn is_applicable(&self, target: &ApplicabilityTarget) -> bool {
        if self.addl_props > target.dependent_slots {
            return false;
        }
        if self.multival.is_some_and(|multi| multi != target.multi_valued) {
            return false;
        }
        if self.null_check && !target.null_check {
            return false;
        }

        let tags = target.value_type.tags();
        if self.exclude_types.iter().any(|tag| tags.contains(tag)) {
            return false;
        }

        self.types.is_empty() || self.types.iter().any(|tag| tags.contains(tag))
    }
}

///
/// ApplicabilityTarget
///
/// What a criteria group offers an operator: the field's declared type and
/// cardinality, how many value slots exist, and whether null checks are on.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ApplicabilityTarget {
    pub value_type: ValueType,
    pub multi_valued: bool,
    pub dependent_slots: u8,
    pub null_check: bool,
}

///
/// OperatorCatalog
///
/// Ordered set of operator headers. The order is the order operators are
/// offered in a selector.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct OperatorCatalog {
    #[serde(default, rename = "operator")]
    headers: Vec<OperatorHeader>,
}

impl OperatorCatalog {
    #[must_use]
    pub const fn new(headers: Vec<OperatorHeader>) -> Self {
        Self { headers }
    }

    /// Headers for the built-in operator table.
    #[must_use]
    pub fn builtin() -> Self {
        use TypeTag::{Enumerated, Numeric, Temporal, Text};

        let ordered = [Numeric, Temporal];

        Self::new(vec![
            OperatorHeader::new("IsNull", "Is Null", 0).null_check(),
            OperatorHeader::new("IsNotNull", "Is Not Null", 0).null_check(),
            OperatorHeader::new("EQ", "Equals", 1).multival(false),
            OperatorHeader::new("NEQ", "Does Not Equal", 1).multival(false),
            OperatorHeader::new("IN", "Is One Of", 1).multival(true),
            OperatorHeader::new("NotIn", "Is Not One Of", 1).multival(true),
            OperatorHeader::new("LT", "Less Than", 1).multival(false).types(ordered),
            OperatorHeader::new("LE", "Less Than Or Equal To", 1).multival(false).types(ordered),
            OperatorHeader::new("GT", "Greater Than", 1).multival(false).types(ordered),
            OperatorHeader::new("GE", "Greater Than Or Equal To", 1)
                .multival(false)
                .types(ordered),
            OperatorHeader::new("Between", "Between", 2).multival(false).types(ordered),
            OperatorHeader::new("NotBetween", "Not Between", 2).multival(false).types(ordered),
            OperatorHeader::new("Contains", "Contains", 1)
                .multival(false)
                .types([Text])
                .exclude_types([Enumerated]),
            OperatorHeader::new("NotContains", "Does Not Contain", 1)
                .multival(false)
                .types([Text])
                .exclude_types([Enumerated]),
            OperatorHeader::new("StartsWith", "Starts With", 1)
                .multival(false)
                .types([Text])
                .exclude_types([Enumerated]),
            OperatorHeader::new("NotStartWith", "Does Not Start With", 1)
                .multival(false)
                .types([Text])
                .exclude_types([Enumerated]),
        ])
    }

    /// Load a catalog from a TOML document of `[[operator]]` tables.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Header answering to `name` (case-insensitive, built-in aliases allowed).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OperatorHeader> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .or_else(|| self.headers.iter().find(|h| h.answers_to(name)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperatorHeader> {
        self.headers.iter()
    }

    pub fn applicable<'a>(
        &'a self,
        target: &'a ApplicabilityTarget,
    ) -> impl Iterator<Item = &'a OperatorHeader> + 'a {
        self.headers.iter().filter(move |h| h.is_applicable(target))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.headers.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}
