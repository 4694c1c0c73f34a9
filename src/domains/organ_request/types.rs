use crate::domains::request::types::RequestStatus;
use crate::errors::DomainResult;
use crate::validation::{Validate, ValidationBuilder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A patient's request for an organ.
///
/// Unlike blood requests there is no matching table; organs are free-text
/// ("Kidney", "Liver") and coordination happens offline through the hospital
/// contact. The record exists so admins can see and follow up on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganRequest {
    pub id: Uuid,
    pub organ: String,
    pub hospital: String,
    pub hospital_contact: String,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for submitting a new organ request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrganRequest {
    pub organ: String,
    pub hospital: String,
    pub hospital_contact: String,
}

impl Validate for NewOrganRequest {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("organ", Some(self.organ.clone()))
            .required()
            .max_length(100)
            .validate()?;

        ValidationBuilder::new("hospital", Some(self.hospital.clone()))
            .required()
            .max_length(200)
            .validate()?;

        ValidationBuilder::new("hospital_contact", Some(self.hospital_contact.clone()))
            .required()
            .phone()
            .validate()?;

        Ok(())
    }
}
