use crate::auth::access::RoleLookup;
use crate::auth::session::Identity;
use crate::domains::profile::types::UserProfile;
use crate::errors::StoreResult;
use crate::types::{PaginationParams, Role};
use async_trait::async_trait;
use uuid::Uuid;

/// Capability over the hosted document store's profile collection.
///
/// The platform owns persistence; the core only describes the operations it
/// needs. Implementations live with the embedder (SDK adapter in production,
/// in-memory maps in tests).
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn create(&self, profile: UserProfile) -> StoreResult<UserProfile>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<UserProfile>>;
    async fn find_by_identity(&self, identity: &Identity) -> StoreResult<Option<UserProfile>>;
    async fn update(&self, profile: UserProfile) -> StoreResult<UserProfile>;
    /// One page of profiles with the given role, plus the unpaginated count
    async fn list_by_role(
        &self,
        role: Role,
        params: PaginationParams,
    ) -> StoreResult<(Vec<UserProfile>, u64)>;
}

// Any profile store can answer the access controller's role lookups.
#[async_trait]
impl<S: ProfileStore + ?Sized> RoleLookup for S {
    async fn role_for(&self, identity: &Identity) -> StoreResult<Option<Role>> {
        Ok(self
            .find_by_identity(identity)
            .await?
            .map(|profile| profile.role))
    }
}
