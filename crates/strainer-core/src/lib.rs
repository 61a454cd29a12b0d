//! Core engine for Strainer: values, comparison operators, dynamic ranges,
//! the operator registry, criteria groups, and the predicates they build.
//!
//! Criteria flow from a `CriteriaPropertyGroup` (operator + values for one
//! field) through the `OperatorRegistry` into a `Predicate` tree, which can
//! be evaluated against any `Row` or handed to a query translator.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod criteria;
pub mod error;
pub mod operator;
pub mod predicate;
pub mod value;

pub use error::{Error, ErrorClass};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, clocks, or configuration types are re-exported here.
///

pub mod prelude {
    pub use crate::{
        criteria::{
            CriteriaPropertyGroup, FieldCriteria, FieldDescriptor, OperatorCatalog,
            PropertySlot as _,
        },
        operator::{Operator, OperatorRegistry, SharedRegistry},
        predicate::{Accessor, Predicate, Row as _},
        value::{Value, ValueType},
    };
}
