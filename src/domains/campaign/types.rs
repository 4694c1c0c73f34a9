use crate::errors::DomainResult;
use crate::validation::{Validate, ValidationBuilder};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A donation campaign managed by administrators.
///
/// Poster images live in external object storage; only the URL is kept here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub location: String,
    pub poster_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCampaign {
    pub name: String,
    pub date: NaiveDate,
    pub location: String,
    pub poster_url: Option<String>,
}

impl Validate for NewCampaign {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("name", Some(self.name.clone()))
            .required()
            .max_length(150)
            .validate()?;

        ValidationBuilder::new("location", Some(self.location.clone()))
            .required()
            .max_length(200)
            .validate()?;

        Ok(())
    }
}

/// Payload for editing a campaign; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCampaign {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub poster_url: Option<String>,
}

impl Validate for UpdateCampaign {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("name", self.name.clone())
            .max_length(150)
            .validate()?;

        ValidationBuilder::new("location", self.location.clone())
            .max_length(200)
            .validate()?;

        Ok(())
    }
}

impl UpdateCampaign {
    pub fn apply_to(&self, campaign: &mut Campaign) {
        if let Some(name) = &self.name {
            campaign.name = name.clone();
        }
        if let Some(date) = self.date {
            campaign.date = date;
        }
        if let Some(location) = &self.location {
            campaign.location = location.clone();
        }
        if let Some(poster_url) = &self.poster_url {
            campaign.poster_url = Some(poster_url.clone());
        }
        campaign.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_campaign_validation() {
        let valid = NewCampaign {
            name: "City Blood Drive".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(),
            location: "Town Hall".to_string(),
            poster_url: None,
        };
        assert!(valid.validate().is_ok());

        let mut unnamed = valid.clone();
        unnamed.name = String::new();
        assert!(unnamed.validate().is_err());
    }
}
