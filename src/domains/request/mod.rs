pub mod repository;
pub mod service;
pub mod types;

pub use repository::RequestStore;
pub use service::RequestService;
pub use types::{BloodRequest, NewBloodRequest, RequestStatus};
