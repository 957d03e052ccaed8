//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`ModelError`]
//! via `#[from]` (adapters box theirs into [`ModelError::Source`]).

use crate::constraint::FieldPath;
use crate::name::Name;

/// Top-level error for every model use-case.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Failure while reading or writing definitions (IO, parsing).
    #[error("source error")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A structural rule of the schema was broken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("area must not be empty")]
    EmptyArea,

    #[error("service `{0}` is declared more than once")]
    DuplicateService(Name),

    #[error("root service `{0}` is not declared")]
    MissingRoot(Name),

    #[error("operation `{service}.{operation}` is declared more than once")]
    DuplicateOperation { service: Name, operation: Name },

    #[error("locator `{service}.{locator}` is declared more than once")]
    DuplicateLocator { service: Name, locator: Name },

    #[error("locator `{service}.{locator}` parameter `{parameter}` must be an input")]
    LocatorParameterNotInput {
        service: Name,
        locator: Name,
        parameter: Name,
    },

    #[error("parameter `{parameter}` is declared more than once in `{operation}`")]
    DuplicateParameter { operation: Name, parameter: Name },

    #[error("signature `{signature}` is declared more than once in `{operation}`")]
    DuplicateSignature { operation: Name, signature: Name },

    #[error("constraint on `{path}` in `{operation}` does not start at a declared parameter")]
    UnknownConstraintRoot { operation: Name, path: FieldPath },

    #[error("constraint on `{path}` in `{operation}` refers to an output-only parameter")]
    ConstraintOnOutput { operation: Name, path: FieldPath },

    #[error("constraint on `{path}` in `{operation}` disagrees with the parameter's list type")]
    CollectionMismatch { operation: Name, path: FieldPath },

    #[error("constraint on `{path}` in `{operation}` descends into a primitive parameter")]
    PathIntoPrimitive { operation: Name, path: FieldPath },
}

/// A lookup by name found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} `{name}` not found")]
pub struct NotFoundError {
    pub kind: &'static str,
    pub name: String,
}
