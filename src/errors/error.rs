use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the hosted platform backing the stores.
///
/// The document database, identity provider, and object storage are all
/// external services; this is the shape their failures take once they cross
/// into the core.
#[derive(Debug, Error, Clone, Serialize)]
pub enum StoreError {
    #[error("Record not found: {0} with key {1}")]
    NotFound(String, String),

    #[error("Conflict error: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store operation timed out")]
    Timeout,

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Domain-level errors
#[derive(Debug, Error, Clone, Serialize)]
pub enum DomainError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Entity not found: {0} with ID {1}")]
    EntityNotFound(String, Uuid),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid status transition for {entity_type} {id}: {from} -> {to}")]
    InvalidStatusTransition {
        entity_type: String,
        id: Uuid,
        from: String,
        to: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("External error: {0}")]
    External(String),
}

/// Service-level errors (application specific)
#[derive(Debug, Error, Clone, Serialize)]
pub enum ServiceError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

/// Validation errors
#[derive(Debug, Error, Clone, Serialize)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    Required { field: String },

    #[error("Field '{field}' must be at least {min} characters")]
    MinLength { field: String, min: usize },

    #[error("Field '{field}' cannot exceed {max} characters")]
    MaxLength { field: String, max: usize },

    #[error("Field '{field}' must be between {min} and {max}")]
    Range {
        field: String,
        min: String,
        max: String,
    },

    #[error("Field '{field}' contains invalid format: {reason}")]
    Format { field: String, reason: String },

    #[error("Field '{field}' contains an invalid value: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Validation error: {0}")]
    Custom(String),
}

impl ValidationError {
    pub fn required(field: &str) -> Self {
        Self::Required {
            field: field.to_string(),
        }
    }

    pub fn min_length(field: &str, min: usize) -> Self {
        Self::MinLength {
            field: field.to_string(),
            min,
        }
    }

    pub fn max_length(field: &str, max: usize) -> Self {
        Self::MaxLength {
            field: field.to_string(),
            max,
        }
    }

    pub fn range<T: fmt::Display>(field: &str, min: T, max: T) -> Self {
        Self::Range {
            field: field.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn format(field: &str, reason: &str) -> Self {
        Self::Format {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_value(field: &str, reason: &str) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn custom(message: &str) -> Self {
        Self::Custom(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_layering() {
        let store = StoreError::NotFound("users".to_string(), "abc".to_string());
        let domain: DomainError = store.into();
        let service: ServiceError = domain.into();
        assert!(service.to_string().contains("Record not found"));
    }

    #[test]
    fn test_status_transition_message() {
        let id = Uuid::new_v4();
        let err = DomainError::InvalidStatusTransition {
            entity_type: "blood_request".to_string(),
            id,
            from: "completed".to_string(),
            to: "accepted".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("completed -> accepted"));
    }

    #[test]
    fn test_errors_serialize_for_presentation() {
        let err = ServiceError::PermissionDenied("requires donor role".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("requires donor role"));
    }
}
