use serde::{Deserialize, Serialize};
use std::fmt;

/// Role assigned to a user profile.
///
/// `Unknown` is the fail-soft value: it is what role resolution degrades to
/// when no profile record exists for an authenticated identity. It carries no
/// permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Donor,
    Patient,
    Admin,
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Donor => "donor",
            Role::Patient => "patient",
            Role::Admin => "admin",
            Role::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "donor" => Some(Role::Donor),
            "patient" => Some(Role::Patient),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Check if the role grants a specific permission
    pub fn has_permission(&self, permission: Permission) -> bool {
        match self {
            Role::Admin => true, // Admin has all permissions
            Role::Donor => matches!(
                permission,
                Permission::ViewOwnProfile
                    | Permission::EditOwnProfile
                    | Permission::ViewCompatibleRequests
                    | Permission::AcceptRequests
                    | Permission::CompleteRequests
                    | Permission::ViewDonationHistory
                    | Permission::ViewCampaigns
            ),
            Role::Patient => matches!(
                permission,
                Permission::ViewOwnProfile
                    | Permission::EditOwnProfile
                    | Permission::SubmitRequests
                    | Permission::ViewOwnRequests
                    | Permission::ViewCampaigns
            ),
            // An authenticated session without a profile record can do nothing
            Role::Unknown => false,
        }
    }

    /// Check if the role grants all of the specified permissions
    pub fn has_permissions(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.has_permission(*p))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Individual permissions gating service operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    // Profile
    ViewOwnProfile,
    EditOwnProfile,
    ManageUsers,

    // Requests
    SubmitRequests,
    ViewOwnRequests,
    ViewCompatibleRequests,
    ViewAllRequests,
    AcceptRequests,
    CompleteRequests,

    // Donations
    ViewDonationHistory,

    // Campaigns
    ViewCampaigns,
    ManageCampaigns,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewOwnProfile => "view_own_profile",
            Permission::EditOwnProfile => "edit_own_profile",
            Permission::ManageUsers => "manage_users",
            Permission::SubmitRequests => "submit_requests",
            Permission::ViewOwnRequests => "view_own_requests",
            Permission::ViewCompatibleRequests => "view_compatible_requests",
            Permission::ViewAllRequests => "view_all_requests",
            Permission::AcceptRequests => "accept_requests",
            Permission::CompleteRequests => "complete_requests",
            Permission::ViewDonationHistory => "view_donation_history",
            Permission::ViewCampaigns => "view_campaigns",
            Permission::ManageCampaigns => "manage_campaigns",
        }
    }
}

/// Blood group enumeration
///
/// The eight canonical groups. String conversion is strict: anything outside
/// the enumeration parses to `None`, which downstream code treats as "no
/// compatible requests" rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    ABPositive,
    #[serde(rename = "AB-")]
    ABNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::ABPositive => "AB+",
            BloodGroup::ABNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "A+" => Some(BloodGroup::APositive),
            "A-" => Some(BloodGroup::ANegative),
            "B+" => Some(BloodGroup::BPositive),
            "B-" => Some(BloodGroup::BNegative),
            "AB+" => Some(BloodGroup::ABPositive),
            "AB-" => Some(BloodGroup::ABNegative),
            "O+" => Some(BloodGroup::OPositive),
            "O-" => Some(BloodGroup::ONegative),
            _ => None,
        }
    }

    pub fn all() -> [BloodGroup; 8] {
        [
            BloodGroup::APositive,
            BloodGroup::ANegative,
            BloodGroup::BPositive,
            BloodGroup::BNegative,
            BloodGroup::ABPositive,
            BloodGroup::ABNegative,
            BloodGroup::OPositive,
            BloodGroup::ONegative,
        ]
    }

    pub fn all_variants() -> Vec<&'static str> {
        vec!["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"]
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pagination parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

/// Paginated result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, params: PaginationParams) -> Self {
        // Guard against a zero page size so the division stays meaningful
        let per_page = params.per_page.max(1);
        let total_pages = (total.div_ceil(per_page as u64)) as u32;
        Self {
            items,
            total,
            page: params.page,
            per_page,
            total_pages,
        }
    }
}
