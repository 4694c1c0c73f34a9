mod error;

pub use error::{DomainError, ServiceError, StoreError, ValidationError};

/// Result type for external store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
