use crate::domains::request::types::{BloodRequest, RequestStatus};
use crate::errors::StoreResult;
use crate::types::PaginationParams;
use async_trait::async_trait;
use uuid::Uuid;

/// Capability over the hosted store's request collection
#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn create(&self, request: BloodRequest) -> StoreResult<BloodRequest>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<BloodRequest>>;
    async fn update(&self, request: BloodRequest) -> StoreResult<BloodRequest>;

    /// Requests in a given status, oldest first
    async fn list_by_status(&self, status: RequestStatus) -> StoreResult<Vec<BloodRequest>>;

    /// Requests submitted by a patient, oldest first
    async fn list_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<BloodRequest>>;

    /// Requests a donor responded to, filtered by status, oldest first
    async fn list_by_responder(
        &self,
        responder_id: Uuid,
        status: Option<RequestStatus>,
    ) -> StoreResult<Vec<BloodRequest>>;

    /// One page of all requests plus the total count
    async fn list_all(&self, params: PaginationParams) -> StoreResult<(Vec<BloodRequest>, u64)>;
}
