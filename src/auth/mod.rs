pub mod access;
pub mod context;
pub mod session;

// Re-export public items
pub use access::{
    authorized_area, AccessConfig, AccessController, Area, ResolutionTicket, RoleLookup,
    RoleResolver, RoutePath, RouteState,
};
pub use context::AuthContext;
pub use session::{Identity, Session, SessionEvent};
