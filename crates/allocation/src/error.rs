//! Engine error model.

use thiserror::Error;

use stockyard_core::{DomainError, ValidationErrors};

/// Fatal allocation failures. These abort the whole document operation; the
/// enclosing transaction is expected to roll back every mutation made so far.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AllocationError {
    /// The store rejected a lot save with validation errors. Not retried.
    #[error("lot failed validation on save: {errors}")]
    InvalidLot { errors: ValidationErrors },

    /// The document lacks the location its type requires.
    #[error("document has no {role} location")]
    MissingLocation { role: &'static str },

    #[error(transparent)]
    Domain(#[from] DomainError),
}
