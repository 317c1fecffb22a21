//! Domain errors

use thiserror::Error;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Storage/connectivity failure. Unlike the four operational kinds above,
    /// these may succeed if retried by the caller.
    #[error("Infrastructure: {0}")]
    Infra(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.into(),
        }
    }

    /// Whether this error is transient and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Infra(_))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operational_errors_are_not_transient() {
        assert!(!DomainError::Validation("bad date".into()).is_transient());
        assert!(!DomainError::Conflict("overlap".into()).is_transient());
        assert!(!DomainError::Forbidden("not yours".into()).is_transient());
        assert!(!DomainError::not_found("Booking", "id", "abc").is_transient());
    }

    #[test]
    fn infra_errors_are_transient() {
        assert!(DomainError::Infra("connection reset".into()).is_transient());
    }

    #[test]
    fn not_found_display_names_the_entity() {
        let err = DomainError::not_found("Destination", "id", "d-1");
        assert_eq!(err.to_string(), "Not found: Destination with id=d-1");
    }
}
