pub mod campaign;
pub mod compatibility;
pub mod organ_request;
pub mod profile;
pub mod request;

pub use campaign::{Campaign, CampaignService, CampaignStore};
pub use compatibility::{can_donate_to, can_receive_from, eligible_requests, is_compatible};
pub use organ_request::{OrganRequest, OrganRequestService, OrganRequestStore};
pub use profile::{ProfileService, ProfileStore, UserProfile};
pub use request::{BloodRequest, RequestService, RequestStatus, RequestStore};
