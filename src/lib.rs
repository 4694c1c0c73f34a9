//! Core logic for a blood donation coordination application.
//!
//! Two decision procedures sit at the centre: the role-gated access
//! controller (`auth::access`) and the blood-group compatibility matcher
//! (`domains::compatibility`). Around them live the domain services for
//! profiles, blood requests, organ requests, and campaigns. Authentication,
//! persistence, and file storage are delegated to an external hosted platform
//! and reached only through the capability traits each domain declares.

// Public modules
pub mod auth;
pub mod domains;
pub mod errors;
pub mod types;
pub mod validation;

// Re-export the pieces embedders touch most
pub use auth::{
    authorized_area, AccessConfig, AccessController, Area, AuthContext, Identity, RoleResolver,
    RoutePath, RouteState, Session, SessionEvent,
};
pub use types::{BloodGroup, PaginatedResult, PaginationParams, Permission, Role};
