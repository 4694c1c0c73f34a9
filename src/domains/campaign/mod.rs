pub mod repository;
pub mod service;
pub mod types;

pub use repository::CampaignStore;
pub use service::CampaignService;
pub use types::{Campaign, NewCampaign, UpdateCampaign};
