//! ## Crate layout
//! - `core`: values, operators, dynamic ranges, registry, criteria groups
//!   and predicates.
//!
//! The `prelude` module carries what an application needs to turn field
//! criteria into predicates.

pub use strainer_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use strainer_core::{Error, ErrorClass};

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        config::EngineConfig,
        criteria::{
            CriteriaPropertyGroup, FieldCriteria, FieldCriteriaDisplay, FieldDescriptor,
            OperatorCatalog, PropertySlot as _,
        },
        operator::{Operator, OperatorRegistry, SharedRegistry},
        predicate::{Accessor, Predicate, Row as _},
        value::{Value, ValueType},
    };
    pub use serde::{Deserialize, Serialize};
}
