use crate::domains::organ_request::types::OrganRequest;
use crate::errors::StoreResult;
use crate::types::PaginationParams;
use async_trait::async_trait;
use uuid::Uuid;

/// Capability over the hosted document store's organ request collection
#[async_trait]
pub trait OrganRequestStore: Send + Sync {
    async fn create(&self, request: OrganRequest) -> StoreResult<OrganRequest>;
    async fn list_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<OrganRequest>>;
    /// One page of requests plus the unpaginated count
    async fn list_all(&self, params: PaginationParams) -> StoreResult<(Vec<OrganRequest>, u64)>;
}
