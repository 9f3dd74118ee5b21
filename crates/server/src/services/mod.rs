//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Password hashing and identity tokens
//! - `customers` - Registration, login, and customer CRUD
//! - `restaurants` - Restaurant catalog CRUD
//!
//! Every operation returns `Result<T, ServiceError>`: a tagged outcome the
//! HTTP layer pattern-matches instead of inspecting response shapes. No
//! operation lets a store fault propagate as a panic.

pub mod auth;
pub mod customers;
pub mod restaurants;

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Tagged outcome for service operations.
///
/// The recoverable kinds carry the user-facing message; the fault kinds
/// keep their source for logging and are never shown verbatim.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// User-correctable input problem.
    #[error("{0}")]
    Validation(String),

    /// The referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness constraint was violated.
    #[error("{0}")]
    Conflict(String),

    /// Store-level fault.
    #[error("database error: {0}")]
    Repository(RepositoryError),

    /// Credential-machinery fault (hashing or token signing).
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Anything else that should not have happened.
    #[error("{0}")]
    Fault(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            other => Self::Repository(other),
        }
    }
}

/// Whether an optional input field is missing or blank.
pub(crate) fn blank(field: Option<&String>) -> bool {
    field.is_none_or(|s| s.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_conflict_becomes_conflict() {
        let err: ServiceError = RepositoryError::Conflict("duplicate email".to_owned()).into();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn test_repository_corruption_stays_fault() {
        let err: ServiceError = RepositoryError::DataCorruption("bad doc".to_owned()).into();
        assert!(matches!(err, ServiceError::Repository(_)));
    }

    #[test]
    fn test_blank() {
        assert!(blank(None));
        assert!(blank(Some(&String::new())));
        assert!(blank(Some(&"   ".to_string())));
        assert!(!blank(Some(&"x".to_string())));
    }
}
