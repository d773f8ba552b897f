//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::EntityKind;
use crate::ports::AuthError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid reference in field '{field}'")]
    InvalidReference { field: &'static str },

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Forbidden")]
    Forbidden,

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: EntityKind, id: Uuid },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity_type: EntityKind, id: Uuid) -> Self {
        Self::NotFound { entity_type, id }
    }

    pub fn required(field: &str) -> Self {
        Self::Validation(format!("{field} is required"))
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::HashingError(msg) => DomainError::Internal(msg),
            _ => DomainError::Unauthenticated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violations_surface_as_duplicates() {
        let err: DomainError = RepoError::Constraint("email taken".to_string()).into();
        assert!(matches!(err, DomainError::Duplicate(msg) if msg == "email taken"));
    }

    #[test]
    fn store_failures_surface_as_internal() {
        let err: DomainError = RepoError::Connection("refused".to_string()).into();
        assert!(matches!(err, DomainError::Internal(_)));

        let err: DomainError = RepoError::NotFound.into();
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
