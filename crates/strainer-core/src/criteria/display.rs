use std::fmt;

///
/// FieldCriteriaDisplay
///
/// Human-readable rendering of a criterion: field name and label, operator
/// text and formatted values. Two-value operators join their values with
/// `and_text`; set operators list theirs comma-separated.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldCriteriaDisplay {
    pub field: String,
    pub label: String,
    pub operator: String,
    pub values: Vec<String>,
    pub and_text: String,
    pub range: bool,
}

impl FieldCriteriaDisplay {
    pub const DEFAULT_AND_TEXT: &'static str = "and";
}

impl fmt::Display for FieldCriteriaDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, self.operator)?;

        match self.values.as_slice() {
            [] => Ok(()),
            [lower, upper] if self.range => write!(f, " {lower} {} {upper}", self.and_text),
            values => write!(f, " {}", values.join(", ")),
        }
    }
}
