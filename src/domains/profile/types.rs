use crate::auth::session::Identity;
use crate::errors::DomainResult;
use crate::types::{BloodGroup, Role};
use crate::validation::{Validate, ValidationBuilder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User profile record held in the external document store.
///
/// Created at registration, keyed by the identity provider's uid. Exactly one
/// role per profile. Blood group may be absent (an admin profile, or a donor
/// who has not completed their details yet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub identity: Identity,
    pub role: Role,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub age: u32,
    pub blood_group: Option<BloodGroup>,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a profile at registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserProfile {
    pub role: Role,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub age: u32,
    pub blood_group: Option<BloodGroup>,
    pub location: String,
}

impl Validate for NewUserProfile {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("name", Some(self.name.clone()))
            .required()
            .max_length(100)
            .validate()?;

        ValidationBuilder::new("email", Some(self.email.clone()))
            .required()
            .email()
            .validate()?;

        ValidationBuilder::new("phone_number", Some(self.phone_number.clone()))
            .required()
            .phone()
            .validate()?;

        // Donors must be adults
        ValidationBuilder::new("age", Some(self.age)).min(18).validate()?;

        ValidationBuilder::new("location", Some(self.location.clone()))
            .required()
            .max_length(200)
            .validate()?;

        // Donors and patients register with a blood group; it is what the
        // compatibility matcher runs on
        if matches!(self.role, Role::Donor | Role::Patient) && self.blood_group.is_none() {
            return Err(crate::errors::ValidationError::required("blood_group").into());
        }

        Ok(())
    }
}

/// Payload for profile updates; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserProfile {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub age: Option<u32>,
    pub blood_group: Option<BloodGroup>,
    pub location: Option<String>,
}

impl Validate for UpdateUserProfile {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("name", self.name.clone())
            .max_length(100)
            .validate()?;

        ValidationBuilder::new("phone_number", self.phone_number.clone())
            .phone()
            .validate()?;

        ValidationBuilder::new("age", self.age).min(18).validate()?;

        ValidationBuilder::new("location", self.location.clone())
            .max_length(200)
            .validate()?;

        Ok(())
    }
}

impl UpdateUserProfile {
    /// Apply this update to an existing profile
    pub fn apply_to(&self, profile: &mut UserProfile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(phone) = &self.phone_number {
            profile.phone_number = phone.clone();
        }
        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(group) = self.blood_group {
            profile.blood_group = Some(group);
        }
        if let Some(location) = &self.location {
            profile.location = location.clone();
        }
        profile.updated_at = Utc::now();
    }
}
