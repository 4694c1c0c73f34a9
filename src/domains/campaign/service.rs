use crate::auth::context::AuthContext;
use crate::domains::campaign::repository::CampaignStore;
use crate::domains::campaign::types::{Campaign, NewCampaign, UpdateCampaign};
use crate::errors::{DomainError, ServiceResult};
use crate::types::Permission;
use crate::validation::Validate;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Campaign management; mutations are admin only
pub struct CampaignService {
    store: Arc<dyn CampaignStore>,
}

impl CampaignService {
    pub fn new(store: Arc<dyn CampaignStore>) -> Self {
        Self { store }
    }

    /// Campaigns visible to any authenticated role
    pub async fn list(&self, auth: &AuthContext) -> ServiceResult<Vec<Campaign>> {
        auth.authorize(Permission::ViewCampaigns)?;
        Ok(self.store.list().await.map_err(DomainError::Store)?)
    }

    pub async fn create(
        &self,
        new_campaign: NewCampaign,
        auth: &AuthContext,
    ) -> ServiceResult<Campaign> {
        auth.authorize(Permission::ManageCampaigns)?;
        new_campaign.validate()?;

        let now = Utc::now();
        let campaign = Campaign {
            id: Uuid::new_v4(),
            name: new_campaign.name,
            date: new_campaign.date,
            location: new_campaign.location,
            poster_url: new_campaign.poster_url,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .store
            .create(campaign)
            .await
            .map_err(DomainError::Store)?;
        log::info!("Campaign {} created by {}", created.id, auth.user_id);
        Ok(created)
    }

    pub async fn update(
        &self,
        campaign_id: Uuid,
        update: UpdateCampaign,
        auth: &AuthContext,
    ) -> ServiceResult<Campaign> {
        auth.authorize(Permission::ManageCampaigns)?;
        update.validate()?;

        let mut campaign = self
            .store
            .find_by_id(campaign_id)
            .await
            .map_err(DomainError::Store)?
            .ok_or_else(|| DomainError::EntityNotFound("campaign".to_string(), campaign_id))?;

        update.apply_to(&mut campaign);
        Ok(self
            .store
            .update(campaign)
            .await
            .map_err(DomainError::Store)?)
    }

    pub async fn delete(&self, campaign_id: Uuid, auth: &AuthContext) -> ServiceResult<()> {
        auth.authorize(Permission::ManageCampaigns)?;
        self.store
            .delete(campaign_id)
            .await
            .map_err(DomainError::Store)?;
        log::info!("Campaign {} deleted by {}", campaign_id, auth.user_id);
        Ok(())
    }
}
