use crate::{config::ConfigError, criteria::CriteriaError, operator::OperatorError};
use thiserror::Error as ThisError;

///
/// Error
///
/// Crate-level error wrapping every domain error, with a stable
/// classification for callers that only need to branch on the kind.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Operator(#[from] OperatorError),

    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Operator(err) => err.class(),
            Self::Criteria(err) => err.class(),
            Self::Config(_) => ErrorClass::Config,
        }
    }
}

///
/// ErrorClass
///
/// Argument            → the caller broke an operator or selection contract
/// InvariantViolation  → internal inconsistency (e.g. grammar accepted a bad token)
/// Config              → engine configuration could not be loaded
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Argument,
    InvariantViolation,
    Config,
}
