use crate::auth::context::AuthContext;
use crate::domains::compatibility;
use crate::domains::profile::repository::ProfileStore;
use crate::domains::profile::types::UserProfile;
use crate::domains::request::repository::RequestStore;
use crate::domains::request::types::{BloodRequest, NewBloodRequest, RequestStatus};
use crate::errors::{DomainError, ServiceError, ServiceResult, ValidationError};
use crate::types::{BloodGroup, PaginatedResult, PaginationParams, Permission};
use crate::validation::Validate;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Service for the blood request lifecycle
pub struct RequestService {
    requests: Arc<dyn RequestStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl RequestService {
    pub fn new(requests: Arc<dyn RequestStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { requests, profiles }
    }

    async fn profile_of(&self, auth: &AuthContext) -> ServiceResult<UserProfile> {
        self.profiles
            .find_by_id(auth.user_id)
            .await
            .map_err(DomainError::Store)?
            .ok_or_else(|| {
                DomainError::EntityNotFound("user_profile".to_string(), auth.user_id).into()
            })
    }

    async fn request_by_id(&self, id: Uuid) -> ServiceResult<BloodRequest> {
        self.requests
            .find_by_id(id)
            .await
            .map_err(DomainError::Store)?
            .ok_or_else(|| DomainError::EntityNotFound("blood_request".to_string(), id).into())
    }

    fn transition(
        request: &BloodRequest,
        next: RequestStatus,
    ) -> Result<(), ServiceError> {
        if request.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                entity_type: "blood_request".to_string(),
                id: request.id,
                from: request.status.to_string(),
                to: next.to_string(),
            }
            .into())
        }
    }

    /// Submit a new blood request on behalf of the authenticated patient
    pub async fn submit(
        &self,
        new_request: NewBloodRequest,
        auth: &AuthContext,
    ) -> ServiceResult<BloodRequest> {
        auth.authorize(Permission::SubmitRequests)?;
        new_request.validate()?;

        let patient = self.profile_of(auth).await?;

        let now = Utc::now();
        let request = BloodRequest {
            id: Uuid::new_v4(),
            blood_group: new_request.blood_group,
            quantity: new_request.quantity,
            hospital: new_request.hospital,
            contact: new_request.contact,
            patient_id: patient.id,
            patient_name: patient.name.clone(),
            status: RequestStatus::Pending,
            responder_id: None,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .requests
            .create(request)
            .await
            .map_err(DomainError::Store)?;
        log::info!(
            "Patient {} submitted request {} for {}",
            patient.id,
            created.id,
            created.blood_group
        );
        Ok(created)
    }

    /// The authenticated patient's own requests
    pub async fn my_requests(&self, auth: &AuthContext) -> ServiceResult<Vec<BloodRequest>> {
        auth.authorize(Permission::ViewOwnRequests)?;
        Ok(self
            .requests
            .list_by_patient(auth.user_id)
            .await
            .map_err(DomainError::Store)?)
    }

    /// Open requests the authenticated donor is medically eligible to fulfil.
    ///
    /// A donor without a recorded blood group sees an empty list.
    pub async fn open_requests_for(&self, auth: &AuthContext) -> ServiceResult<Vec<BloodRequest>> {
        auth.authorize(Permission::ViewCompatibleRequests)?;

        let donor = self.profile_of(auth).await?;
        let pending = self
            .requests
            .list_by_status(RequestStatus::Pending)
            .await
            .map_err(DomainError::Store)?;

        Ok(compatibility::eligible_requests(donor.blood_group, &pending)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Accept a pending request as the authenticated donor
    pub async fn accept(&self, request_id: Uuid, auth: &AuthContext) -> ServiceResult<BloodRequest> {
        auth.authorize(Permission::AcceptRequests)?;

        let donor = self.profile_of(auth).await?;
        let mut request = self.request_by_id(request_id).await?;

        Self::transition(&request, RequestStatus::Accepted)?;
        Self::check_compatibility(donor.blood_group, request.blood_group)?;

        request.status = RequestStatus::Accepted;
        request.responder_id = Some(donor.id);
        request.updated_at = Utc::now();

        let updated = self
            .requests
            .update(request)
            .await
            .map_err(DomainError::Store)?;
        log::info!("Donor {} accepted request {}", donor.id, updated.id);
        Ok(updated)
    }

    /// Mark an accepted request completed; allowed for its responder or an admin
    pub async fn complete(
        &self,
        request_id: Uuid,
        auth: &AuthContext,
    ) -> ServiceResult<BloodRequest> {
        auth.authorize(Permission::CompleteRequests)?;

        let mut request = self.request_by_id(request_id).await?;
        Self::transition(&request, RequestStatus::Completed)?;

        match request.responder_id {
            Some(responder) => auth.authorize_self_or_admin(&responder)?,
            None => {
                // Accepted requests always carry a responder; treat a gap as
                // store corruption rather than authorize anyone
                return Err(DomainError::Internal(format!(
                    "Accepted request {} has no responder",
                    request.id
                ))
                .into());
            }
        }

        request.status = RequestStatus::Completed;
        request.updated_at = Utc::now();

        let updated = self
            .requests
            .update(request)
            .await
            .map_err(DomainError::Store)?;
        log::info!("Request {} marked completed", updated.id);
        Ok(updated)
    }

    /// The authenticated donor's completed donations
    pub async fn donation_history(&self, auth: &AuthContext) -> ServiceResult<Vec<BloodRequest>> {
        auth.authorize(Permission::ViewDonationHistory)?;
        Ok(self
            .requests
            .list_by_responder(auth.user_id, Some(RequestStatus::Completed))
            .await
            .map_err(DomainError::Store)?)
    }

    /// All requests, paginated; admin only
    pub async fn list_all(
        &self,
        params: PaginationParams,
        auth: &AuthContext,
    ) -> ServiceResult<PaginatedResult<BloodRequest>> {
        auth.authorize(Permission::ViewAllRequests)?;
        let (items, total) = self
            .requests
            .list_all(params)
            .await
            .map_err(DomainError::Store)?;
        Ok(PaginatedResult::new(items, total, params))
    }

    fn check_compatibility(
        donor_group: Option<BloodGroup>,
        requested: BloodGroup,
    ) -> Result<(), ServiceError> {
        let compatible = donor_group
            .map(|group| compatibility::is_compatible(group, requested))
            .unwrap_or(false);
        if compatible {
            Ok(())
        } else {
            Err(DomainError::Validation(ValidationError::invalid_value(
                "blood_group",
                &format!(
                    "donor group {} cannot donate to {}",
                    donor_group.map(|g| g.as_str()).unwrap_or("unset"),
                    requested
                ),
            ))
            .into())
        }
    }
}
