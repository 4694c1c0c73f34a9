use crate::errors::DomainResult;
use crate::types::BloodGroup;
use crate::validation::{Validate, ValidationBuilder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Request lifecycle status
///
/// `Pending -> Accepted -> Completed`, with `Completed` terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Accepted,
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RequestStatus::Pending),
            "accepted" => Some(RequestStatus::Accepted),
            "completed" => Some(RequestStatus::Completed),
            _ => None,
        }
    }

    /// Whether this status may move to `next`
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Accepted)
                | (RequestStatus::Accepted, RequestStatus::Completed)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A patient's blood request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodRequest {
    pub id: Uuid,
    pub blood_group: BloodGroup,
    pub quantity: String,
    pub hospital: String,
    pub contact: String,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub status: RequestStatus,
    /// The donor who accepted, once one has
    pub responder_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for submitting a new request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBloodRequest {
    pub blood_group: BloodGroup,
    pub quantity: String,
    pub hospital: String,
    pub contact: String,
}

impl Validate for NewBloodRequest {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("quantity", Some(self.quantity.clone()))
            .required()
            .max_length(50)
            .validate()?;

        ValidationBuilder::new("hospital", Some(self.hospital.clone()))
            .required()
            .max_length(200)
            .validate()?;

        ValidationBuilder::new("contact", Some(self.contact.clone()))
            .required()
            .phone()
            .validate()?;

        Ok(())
    }
}
