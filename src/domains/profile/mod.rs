pub mod repository;
pub mod service;
pub mod types;

pub use repository::ProfileStore;
pub use service::ProfileService;
pub use types::{NewUserProfile, UpdateUserProfile, UserProfile};
