use crate::auth::context::AuthContext;
use crate::auth::session::Identity;
use crate::domains::profile::repository::ProfileStore;
use crate::domains::profile::types::{NewUserProfile, UpdateUserProfile, UserProfile};
use crate::errors::{DomainError, ServiceError, ServiceResult, StoreError};
use crate::types::{PaginatedResult, PaginationParams, Permission, Role};
use crate::validation::Validate;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Profile service for registration and profile maintenance
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Create the profile record for a freshly authenticated identity.
    ///
    /// The identity provider has already created the credential; this stores
    /// the application-side profile next to it. One profile per identity.
    pub async fn register(
        &self,
        identity: Identity,
        new_profile: NewUserProfile,
    ) -> ServiceResult<UserProfile> {
        new_profile.validate()?;

        if self
            .store
            .find_by_identity(&identity)
            .await
            .map_err(DomainError::Store)?
            .is_some()
        {
            return Err(DomainError::Store(StoreError::Conflict(format!(
                "Profile already exists for identity {}",
                identity.uid
            )))
            .into());
        }

        let now = Utc::now();
        let profile = UserProfile {
            id: Uuid::new_v4(),
            identity,
            role: new_profile.role,
            name: new_profile.name,
            email: new_profile.email,
            phone_number: new_profile.phone_number,
            age: new_profile.age,
            blood_group: new_profile.blood_group,
            location: new_profile.location,
            created_at: now,
            updated_at: now,
        };

        let created = self.store.create(profile).await.map_err(DomainError::Store)?;
        log::info!(
            "Registered {} profile for identity {}",
            created.role,
            created.identity.uid
        );
        Ok(created)
    }

    /// Fetch the caller's own profile
    pub async fn my_profile(&self, auth: &AuthContext) -> ServiceResult<UserProfile> {
        auth.authorize(Permission::ViewOwnProfile)?;
        self.store
            .find_by_id(auth.user_id)
            .await
            .map_err(DomainError::Store)?
            .ok_or_else(|| {
                DomainError::EntityNotFound("user_profile".to_string(), auth.user_id).into()
            })
    }

    /// Fetch a profile by identity, for building an auth context after login
    pub async fn profile_for_identity(
        &self,
        identity: &Identity,
    ) -> ServiceResult<Option<UserProfile>> {
        Ok(self
            .store
            .find_by_identity(identity)
            .await
            .map_err(DomainError::Store)?)
    }

    /// Update a profile; permitted for the owner or an admin
    pub async fn update_profile(
        &self,
        profile_id: Uuid,
        update: UpdateUserProfile,
        auth: &AuthContext,
    ) -> ServiceResult<UserProfile> {
        auth.authorize_self_or_admin(&profile_id)?;
        update.validate()?;

        let mut profile = self
            .store
            .find_by_id(profile_id)
            .await
            .map_err(DomainError::Store)?
            .ok_or_else(|| {
                ServiceError::from(DomainError::EntityNotFound(
                    "user_profile".to_string(),
                    profile_id,
                ))
            })?;

        update.apply_to(&mut profile);
        let updated = self
            .store
            .update(profile)
            .await
            .map_err(DomainError::Store)?;
        Ok(updated)
    }

    /// Registered donors, paginated; admin only
    pub async fn list_donors(
        &self,
        params: PaginationParams,
        auth: &AuthContext,
    ) -> ServiceResult<PaginatedResult<UserProfile>> {
        auth.authorize(Permission::ManageUsers)?;
        let (items, total) = self
            .store
            .list_by_role(Role::Donor, params)
            .await
            .map_err(DomainError::Store)?;
        Ok(PaginatedResult::new(items, total, params))
    }
}
