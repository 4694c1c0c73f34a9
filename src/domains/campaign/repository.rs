use crate::domains::campaign::types::Campaign;
use crate::errors::StoreResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Capability over the hosted store's campaign collection
#[async_trait]
pub trait CampaignStore: Send + Sync {
    async fn create(&self, campaign: Campaign) -> StoreResult<Campaign>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Campaign>>;
    async fn update(&self, campaign: Campaign) -> StoreResult<Campaign>;
    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    /// All campaigns, soonest first
    async fn list(&self) -> StoreResult<Vec<Campaign>>;
}
