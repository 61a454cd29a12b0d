//! Field criteria groups.
//!
//! A `CriteriaPropertyGroup` bundles the operator selector and up to two
//! value slots for one searchable field. It filters the operator catalog
//! down to what applies to the field, keeps dependent slots in sync with the
//! selected operator, and converts to and from `FieldCriteria` records.

mod display;
mod group;
mod header;
mod property;
mod slot;
mod wire;

#[cfg(test)]
mod tests;

use crate::{error::ErrorClass, operator::OperatorError};
use thiserror::Error as ThisError;

// re-exports
pub use display::FieldCriteriaDisplay;
pub use group::{CriteriaGroupBuilder, CriteriaPropertyGroup};
pub use header::{ApplicabilityTarget, OperatorCatalog, OperatorHeader};
pub use property::{OperatorProperty, sync_dependent_slots};
pub use slot::{FieldDescriptor, PropertySlot, ValueSlot};
pub use wire::FieldCriteria;

///
/// CriteriaError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CriteriaError {
    #[error("operator '{operator}' is not applicable to field '{field}'")]
    NotApplicable { field: String, operator: String },

    #[error("field '{field}' has no operator selector")]
    NoSelector { field: String },

    #[error("criteria for field '{actual}' cannot be applied to field '{expected}'")]
    FieldMismatch { expected: String, actual: String },

    #[error(transparent)]
    Operator(#[from] OperatorError),
}

impl CriteriaError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::NotApplicable { .. } | Self::NoSelector { .. } | Self::FieldMismatch { .. } => {
                ErrorClass::Argument
            }
            Self::Operator(err) => err.class(),
        }
    }
}
