use crate::auth::session::Identity;
use crate::errors::ServiceError;
use crate::types::{Permission, Role};
use uuid::Uuid;

/// Represents the authentication context for the current operation
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The profile ID of the authenticated user
    pub user_id: Uuid,

    /// The provider identity the session signed in with
    pub identity: Identity,

    /// The resolved role of the authenticated user
    pub role: Role,
}

impl AuthContext {
    /// Create a new authentication context
    pub fn new(user_id: Uuid, identity: Identity, role: Role) -> Self {
        Self {
            user_id,
            identity,
            role,
        }
    }

    /// Check if user has a specific permission
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.role.has_permission(permission)
    }

    /// Authorize a specific permission, returning an error if not allowed
    pub fn authorize(&self, permission: Permission) -> Result<(), ServiceError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied(format!(
                "User does not have permission: {}",
                permission.as_str()
            )))
        }
    }

    /// Authorize multiple permissions, requiring all of them
    pub fn authorize_all(&self, permissions: &[Permission]) -> Result<(), ServiceError> {
        if self.role.has_permissions(permissions) {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied(
                "User does not have all required permissions".to_string(),
            ))
        }
    }

    /// Verify user is an admin
    pub fn authorize_admin(&self) -> Result<(), ServiceError> {
        if matches!(self.role, Role::Admin) {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied(
                "This action requires administrator privileges".to_string(),
            ))
        }
    }

    /// For operations restricted to the user's own records
    pub fn authorize_self_or_admin(&self, resource_owner_id: &Uuid) -> Result<(), ServiceError> {
        if &self.user_id == resource_owner_id || matches!(self.role, Role::Admin) {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied(
                "You do not have permission to access this resource".to_string(),
            ))
        }
    }
}
