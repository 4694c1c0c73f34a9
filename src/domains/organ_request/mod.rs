pub mod repository;
pub mod service;
pub mod types;

pub use repository::OrganRequestStore;
pub use service::OrganRequestService;
pub use types::{NewOrganRequest, OrganRequest};
