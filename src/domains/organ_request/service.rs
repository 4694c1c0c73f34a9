use crate::auth::context::AuthContext;
use crate::domains::organ_request::repository::OrganRequestStore;
use crate::domains::organ_request::types::{NewOrganRequest, OrganRequest};
use crate::domains::profile::repository::ProfileStore;
use crate::domains::request::types::RequestStatus;
use crate::errors::{DomainError, ServiceResult};
use crate::types::{PaginatedResult, PaginationParams, Permission};
use crate::validation::Validate;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Organ request intake and the admin view over it
pub struct OrganRequestService {
    requests: Arc<dyn OrganRequestStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl OrganRequestService {
    pub fn new(requests: Arc<dyn OrganRequestStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { requests, profiles }
    }

    /// Submit a new organ request on behalf of the authenticated patient
    pub async fn submit(
        &self,
        new_request: NewOrganRequest,
        auth: &AuthContext,
    ) -> ServiceResult<OrganRequest> {
        auth.authorize(Permission::SubmitRequests)?;
        new_request.validate()?;

        let patient = self
            .profiles
            .find_by_id(auth.user_id)
            .await
            .map_err(DomainError::Store)?
            .ok_or_else(|| {
                DomainError::EntityNotFound("user_profile".to_string(), auth.user_id)
            })?;

        let now = Utc::now();
        let request = OrganRequest {
            id: Uuid::new_v4(),
            organ: new_request.organ,
            hospital: new_request.hospital,
            hospital_contact: new_request.hospital_contact,
            patient_id: patient.id,
            patient_name: patient.name.clone(),
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .requests
            .create(request)
            .await
            .map_err(DomainError::Store)?;
        log::info!(
            "Patient {} submitted organ request {} for {}",
            patient.id,
            created.id,
            created.organ
        );
        Ok(created)
    }

    /// The authenticated patient's own organ requests
    pub async fn my_requests(&self, auth: &AuthContext) -> ServiceResult<Vec<OrganRequest>> {
        auth.authorize(Permission::ViewOwnRequests)?;
        Ok(self
            .requests
            .list_by_patient(auth.user_id)
            .await
            .map_err(DomainError::Store)?)
    }

    /// All organ requests, paginated; admin only
    pub async fn list_all(
        &self,
        params: PaginationParams,
        auth: &AuthContext,
    ) -> ServiceResult<PaginatedResult<OrganRequest>> {
        auth.authorize(Permission::ViewAllRequests)?;
        let (items, total) = self
            .requests
            .list_all(params)
            .await
            .map_err(DomainError::Store)?;
        Ok(PaginatedResult::new(items, total, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::Identity;
    use crate::domains::profile::types::UserProfile;
    use crate::errors::StoreResult;
    use crate::types::Role;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryOrganRequestStore {
        requests: Mutex<Vec<OrganRequest>>,
    }

    #[async_trait]
    impl OrganRequestStore for InMemoryOrganRequestStore {
        async fn create(&self, request: OrganRequest) -> StoreResult<OrganRequest> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(request)
        }

        async fn list_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<OrganRequest>> {
            Ok(self
                .requests
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.patient_id == patient_id)
                .cloned()
                .collect())
        }

        async fn list_all(
            &self,
            params: PaginationParams,
        ) -> StoreResult<(Vec<OrganRequest>, u64)> {
            let requests = self.requests.lock().unwrap();
            let total = requests.len() as u64;
            let start = ((params.page.saturating_sub(1)) * params.per_page) as usize;
            let items = requests
                .iter()
                .skip(start)
                .take(params.per_page as usize)
                .cloned()
                .collect();
            Ok((items, total))
        }
    }

    #[derive(Default)]
    struct InMemoryProfileStore {
        profiles: Mutex<HashMap<Uuid, UserProfile>>,
    }

    #[async_trait]
    impl ProfileStore for InMemoryProfileStore {
        async fn create(&self, profile: UserProfile) -> StoreResult<UserProfile> {
            self.profiles
                .lock()
                .unwrap()
                .insert(profile.id, profile.clone());
            Ok(profile)
        }

        async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<UserProfile>> {
            Ok(self.profiles.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_identity(&self, identity: &Identity) -> StoreResult<Option<UserProfile>> {
            Ok(self
                .profiles
                .lock()
                .unwrap()
                .values()
                .find(|p| p.identity.uid == identity.uid)
                .cloned())
        }

        async fn update(&self, profile: UserProfile) -> StoreResult<UserProfile> {
            self.profiles
                .lock()
                .unwrap()
                .insert(profile.id, profile.clone());
            Ok(profile)
        }

        async fn list_by_role(
            &self,
            role: Role,
            params: PaginationParams,
        ) -> StoreResult<(Vec<UserProfile>, u64)> {
            let profiles = self.profiles.lock().unwrap();
            let matching: Vec<UserProfile> = profiles
                .values()
                .filter(|p| p.role == role)
                .cloned()
                .collect();
            let total = matching.len() as u64;
            let start = ((params.page.saturating_sub(1)) * params.per_page) as usize;
            let items = matching
                .into_iter()
                .skip(start)
                .take(params.per_page as usize)
                .collect();
            Ok((items, total))
        }
    }

    struct Fixture {
        service: OrganRequestService,
        profiles: Arc<InMemoryProfileStore>,
    }

    impl Fixture {
        fn new() -> Self {
            let profiles = Arc::new(InMemoryProfileStore::default());
            let service = OrganRequestService::new(
                Arc::new(InMemoryOrganRequestStore::default()),
                profiles.clone(),
            );
            Self { service, profiles }
        }

        async fn add_user(&self, role: Role) -> AuthContext {
            let id = Uuid::new_v4();
            let identity = Identity::new(format!("uid-{}", id), format!("{}@example.com", id));
            let now = Utc::now();
            let profile = UserProfile {
                id,
                identity: identity.clone(),
                role,
                name: "Test User".to_string(),
                email: identity.credential.clone(),
                phone_number: "9876543210".to_string(),
                age: 30,
                blood_group: None,
                location: "Bengaluru".to_string(),
                created_at: now,
                updated_at: now,
            };
            self.profiles.create(profile).await.unwrap();
            AuthContext::new(id, identity, role)
        }
    }

    fn new_request(organ: &str) -> NewOrganRequest {
        NewOrganRequest {
            organ: organ.to_string(),
            hospital: "City Hospital".to_string(),
            hospital_contact: "9876543210".to_string(),
        }
    }

    #[tokio::test]
    async fn test_patient_submits_and_lists_own_organ_requests() {
        let fixture = Fixture::new();
        let patient = fixture.add_user(Role::Patient).await;

        let created = fixture
            .service
            .submit(new_request("Kidney"), &patient)
            .await
            .unwrap();
        assert_eq!(created.status, RequestStatus::Pending);
        assert_eq!(created.patient_name, "Test User");

        let mine = fixture.service.my_requests(&patient).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].organ, "Kidney");
    }

    #[tokio::test]
    async fn test_donor_cannot_submit_organ_request() {
        let fixture = Fixture::new();
        let donor = fixture.add_user(Role::Donor).await;
        assert!(fixture
            .service
            .submit(new_request("Liver"), &donor)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_submit_validates_payload() {
        let fixture = Fixture::new();
        let patient = fixture.add_user(Role::Patient).await;
        assert!(fixture
            .service
            .submit(new_request(""), &patient)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_admin_listing_is_paginated_and_gated() {
        let fixture = Fixture::new();
        let patient = fixture.add_user(Role::Patient).await;
        for organ in ["Kidney", "Liver", "Cornea"] {
            fixture
                .service
                .submit(new_request(organ), &patient)
                .await
                .unwrap();
        }

        let admin = fixture.add_user(Role::Admin).await;
        let params = PaginationParams {
            page: 1,
            per_page: 2,
        };
        let page = fixture.service.list_all(params, &admin).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);

        // Patients and donors may not see the full queue
        assert!(fixture.service.list_all(params, &patient).await.is_err());
        let donor = fixture.add_user(Role::Donor).await;
        assert!(fixture.service.list_all(params, &donor).await.is_err());
    }
}
