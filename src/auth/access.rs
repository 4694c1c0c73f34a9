use crate::auth::session::{Identity, Session, SessionEvent};
use crate::errors::{ServiceError, ServiceResult, StoreResult};
use crate::types::Role;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Default ceiling on how long a role lookup may stay in flight before the
/// session degrades to `Role::Unknown`. The hosted platform does not bound
/// this itself.
pub const DEFAULT_ROLE_RESOLUTION_TIMEOUT: Duration = Duration::from_secs(10);

const ADMIN_IDENTITY_ENV: &str = "BLOOD_BRIDGE_ADMIN_IDENTITY";
const ROLE_TIMEOUT_ENV: &str = "BLOOD_BRIDGE_ROLE_TIMEOUT_SECS";

/// Access control configuration supplied by the embedder.
///
/// The designated administrator credential lives here, not in the decision
/// logic: a session whose credential matches it resolves to `Role::Admin`
/// before any store lookup happens.
#[derive(Debug, Clone)]
pub struct AccessConfig {
    /// Credential of the designated administrator, if the deployment has one
    pub admin_identity: Option<String>,

    /// Ceiling for a single role-resolution lookup
    pub role_resolution_timeout: Duration,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            admin_identity: None,
            role_resolution_timeout: DEFAULT_ROLE_RESOLUTION_TIMEOUT,
        }
    }
}

impl AccessConfig {
    pub fn new(admin_identity: impl Into<String>) -> Self {
        Self {
            admin_identity: Some(admin_identity.into()),
            role_resolution_timeout: DEFAULT_ROLE_RESOLUTION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.role_resolution_timeout = timeout;
        self
    }

    /// Load configuration from the environment (and `.env` if present).
    pub fn from_env() -> ServiceResult<Self> {
        dotenv::dotenv().ok();

        let admin_identity = env::var(ADMIN_IDENTITY_ENV).ok().filter(|v| !v.is_empty());

        let role_resolution_timeout = match env::var(ROLE_TIMEOUT_ENV) {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ServiceError::Configuration(format!(
                        "{} must be a number of seconds, got '{}'",
                        ROLE_TIMEOUT_ENV, raw
                    ))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => DEFAULT_ROLE_RESOLUTION_TIMEOUT,
        };

        Ok(Self {
            admin_identity,
            role_resolution_timeout,
        })
    }
}

/// Capability to fetch the stored role for an identity.
///
/// Implemented by the profile store; kept separate so the access controller
/// depends only on the lookup it needs.
#[async_trait]
pub trait RoleLookup: Send + Sync {
    async fn role_for(&self, identity: &Identity) -> StoreResult<Option<Role>>;
}

/// Resolves the effective role for an authenticated identity.
///
/// Never fails and never raises: a missing profile record, a store error, or
/// a lookup that outlives the configured timeout all degrade to
/// `Role::Unknown` with a warning in the log.
pub struct RoleResolver {
    config: AccessConfig,
    lookup: Arc<dyn RoleLookup>,
}

impl RoleResolver {
    pub fn new(config: AccessConfig, lookup: Arc<dyn RoleLookup>) -> Self {
        Self { config, lookup }
    }

    pub async fn resolve_role(&self, identity: &Identity) -> Role {
        // Designated administrator override takes precedence over any stored
        // role record
        if let Some(admin) = &self.config.admin_identity {
            if identity.credential == *admin {
                return Role::Admin;
            }
        }

        match timeout(
            self.config.role_resolution_timeout,
            self.lookup.role_for(identity),
        )
        .await
        {
            Ok(Ok(Some(role))) => role,
            Ok(Ok(None)) => {
                log::warn!("No profile record for identity {}", identity.uid);
                Role::Unknown
            }
            Ok(Err(err)) => {
                log::warn!("Role lookup failed for identity {}: {}", identity.uid, err);
                Role::Unknown
            }
            Err(_) => {
                // Treat expiry like an absent profile
                log::warn!("Role lookup timed out for identity {}", identity.uid);
                Role::Unknown
            }
        }
    }
}

/// Logical destinations the presentation layer can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutePath {
    Landing,
    Login,
    Register,
    DonorDashboard,
    PatientDashboard,
    AdminDashboard,
}

impl RoutePath {
    /// Destinations reachable without an authenticated session
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            RoutePath::Landing | RoutePath::Login | RoutePath::Register
        )
    }
}

/// The role-gated section of the application a session may see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Area {
    Public,
    AdminArea,
    DonorArea,
    PatientArea,
    LoginRedirect,
}

/// Map (session, resolved role, requested path) to the permitted area.
///
/// The admin area always requires an authenticated session holding the admin
/// role; an authenticated session with no resolvable role is sent back to
/// login rather than granted anything.
pub fn authorized_area(session: &Session, role: Role, path: RoutePath) -> Area {
    if !session.is_authenticated() {
        return if path.is_public() {
            Area::Public
        } else {
            Area::LoginRedirect
        };
    }

    match role {
        Role::Admin => Area::AdminArea,
        Role::Donor => Area::DonorArea,
        Role::Patient => Area::PatientArea,
        Role::Unknown => Area::LoginRedirect,
    }
}

/// Routing state while role resolution may still be in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteState {
    /// Role resolution pending; the presentation layer should keep showing a
    /// loading state rather than redirect prematurely
    Unresolved,
    Resolved(Area),
}

/// Token tying a role-resolution result back to the session event that
/// started it. Results carrying a stale ticket are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionTicket(u64);

/// Session-to-area state machine.
///
/// Single-threaded and event-driven: every session change issues a fresh
/// ticket and resets the state to `Unresolved`; completing a resolution with
/// an old ticket is a no-op, which is how a new sign-in supersedes a lookup
/// still in flight for the previous one. There is no terminal state, the
/// decision is re-evaluated on every session or role change.
pub struct AccessController {
    resolver: RoleResolver,
    session: Session,
    generation: u64,
    state: RouteState,
}

impl AccessController {
    pub fn new(config: AccessConfig, lookup: Arc<dyn RoleLookup>) -> Self {
        Self {
            resolver: RoleResolver::new(config, lookup),
            session: Session::anonymous(),
            generation: 0,
            state: RouteState::Unresolved,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> RouteState {
        self.state
    }

    /// Apply a session change event and get a ticket for the resolution that
    /// should follow it.
    pub fn on_session_event(&mut self, event: SessionEvent) -> ResolutionTicket {
        self.session = event.into();
        self.generation += 1;
        self.state = RouteState::Unresolved;
        ResolutionTicket(self.generation)
    }

    /// Record a finished role resolution and re-evaluate the area decision.
    ///
    /// Returns the current state either way; a stale ticket leaves it
    /// untouched.
    pub fn complete_resolution(
        &mut self,
        ticket: ResolutionTicket,
        role: Role,
        path: RoutePath,
    ) -> RouteState {
        if ticket.0 != self.generation {
            log::info!(
                "Ignoring superseded role resolution (ticket {} < generation {})",
                ticket.0,
                self.generation
            );
            return self.state;
        }
        self.state = RouteState::Resolved(authorized_area(&self.session, role, path));
        self.state
    }

    /// Drive a session event through role resolution to an area decision.
    pub async fn navigate(&mut self, event: SessionEvent, path: RoutePath) -> Area {
        let ticket = self.on_session_event(event);
        let role = match self.session.identity().cloned() {
            Some(identity) => self.resolver.resolve_role(&identity).await,
            None => Role::Unknown,
        };
        match self.complete_resolution(ticket, role, path) {
            RouteState::Resolved(area) => area,
            // complete_resolution with a live ticket always resolves
            RouteState::Unresolved => Area::LoginRedirect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;
    use std::collections::HashMap;

    struct MapLookup {
        roles: HashMap<String, Role>,
    }

    impl MapLookup {
        fn new(entries: &[(&str, Role)]) -> Arc<Self> {
            Arc::new(Self {
                roles: entries
                    .iter()
                    .map(|(uid, role)| (uid.to_string(), *role))
                    .collect(),
            })
        }
    }

    #[async_trait]
    impl RoleLookup for MapLookup {
        async fn role_for(&self, identity: &Identity) -> StoreResult<Option<Role>> {
            Ok(self.roles.get(&identity.uid).copied())
        }
    }

    struct FailingLookup;

    #[async_trait]
    impl RoleLookup for FailingLookup {
        async fn role_for(&self, _identity: &Identity) -> StoreResult<Option<Role>> {
            Err(StoreError::Unavailable("store offline".to_string()))
        }
    }

    struct HangingLookup;

    #[async_trait]
    impl RoleLookup for HangingLookup {
        async fn role_for(&self, _identity: &Identity) -> StoreResult<Option<Role>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(None)
        }
    }

    fn donor_identity() -> Identity {
        Identity::new("donor-uid", "donor@example.com")
    }

    #[tokio::test]
    async fn test_resolve_role_from_store() {
        let lookup = MapLookup::new(&[("donor-uid", Role::Donor), ("patient-uid", Role::Patient)]);
        let resolver = RoleResolver::new(AccessConfig::default(), lookup);

        assert_eq!(resolver.resolve_role(&donor_identity()).await, Role::Donor);
        assert_eq!(
            resolver
                .resolve_role(&Identity::new("patient-uid", "patient@example.com"))
                .await,
            Role::Patient
        );
        assert_eq!(
            resolver
                .resolve_role(&Identity::new("stranger", "stranger@example.com"))
                .await,
            Role::Unknown
        );
    }

    #[tokio::test]
    async fn test_admin_override_wins_over_stored_role() {
        // Stored record says donor, but the credential is the designated admin
        let lookup = MapLookup::new(&[("admin-uid", Role::Donor)]);
        let resolver = RoleResolver::new(AccessConfig::new("admin@bloodbridge.org"), lookup);

        let identity = Identity::new("admin-uid", "admin@bloodbridge.org");
        assert_eq!(resolver.resolve_role(&identity).await, Role::Admin);
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_unknown() {
        let resolver = RoleResolver::new(AccessConfig::default(), Arc::new(FailingLookup));
        assert_eq!(
            resolver.resolve_role(&donor_identity()).await,
            Role::Unknown
        );
    }

    #[tokio::test]
    async fn test_lookup_timeout_degrades_to_unknown() {
        let config = AccessConfig::default().with_timeout(Duration::from_millis(50));
        let resolver = RoleResolver::new(config, Arc::new(HangingLookup));
        assert_eq!(
            resolver.resolve_role(&donor_identity()).await,
            Role::Unknown
        );
    }

    #[test]
    fn test_unauthenticated_routing() {
        let session = Session::anonymous();
        assert_eq!(
            authorized_area(&session, Role::Unknown, RoutePath::Landing),
            Area::Public
        );
        assert_eq!(
            authorized_area(&session, Role::Unknown, RoutePath::Register),
            Area::Public
        );
        assert_eq!(
            authorized_area(&session, Role::Unknown, RoutePath::DonorDashboard),
            Area::LoginRedirect
        );
        // An unauthenticated session never reaches the admin area, whatever
        // role value is passed in
        assert_eq!(
            authorized_area(&session, Role::Admin, RoutePath::AdminDashboard),
            Area::LoginRedirect
        );
    }

    #[test]
    fn test_authenticated_routing_by_role() {
        let session = Session::authenticated(donor_identity());
        assert_eq!(
            authorized_area(&session, Role::Donor, RoutePath::DonorDashboard),
            Area::DonorArea
        );
        assert_eq!(
            authorized_area(&session, Role::Patient, RoutePath::PatientDashboard),
            Area::PatientArea
        );
        assert_eq!(
            authorized_area(&session, Role::Admin, RoutePath::AdminDashboard),
            Area::AdminArea
        );
        assert_eq!(
            authorized_area(&session, Role::Unknown, RoutePath::DonorDashboard),
            Area::LoginRedirect
        );
    }

    #[test]
    fn test_reevaluation_is_idempotent_across_role_changes() {
        // Same session, role flips from donor to patient: the decision follows
        // with no stale state
        let session = Session::authenticated(donor_identity());
        assert_eq!(
            authorized_area(&session, Role::Donor, RoutePath::DonorDashboard),
            Area::DonorArea
        );
        assert_eq!(
            authorized_area(&session, Role::Patient, RoutePath::DonorDashboard),
            Area::PatientArea
        );
    }

    #[tokio::test]
    async fn test_controller_navigation() {
        let lookup = MapLookup::new(&[("donor-uid", Role::Donor)]);
        let mut controller = AccessController::new(AccessConfig::default(), lookup);
        assert_eq!(controller.state(), RouteState::Unresolved);

        let area = controller
            .navigate(
                SessionEvent::SignedIn(donor_identity()),
                RoutePath::DonorDashboard,
            )
            .await;
        assert_eq!(area, Area::DonorArea);
        assert_eq!(controller.state(), RouteState::Resolved(Area::DonorArea));

        let area = controller
            .navigate(SessionEvent::SignedOut, RoutePath::DonorDashboard)
            .await;
        assert_eq!(area, Area::LoginRedirect);
    }

    #[tokio::test]
    async fn test_stale_resolution_is_ignored() {
        let _ = env_logger::builder().is_test(true).try_init();
        let lookup = MapLookup::new(&[("donor-uid", Role::Donor)]);
        let mut controller = AccessController::new(AccessConfig::default(), lookup);

        let stale = controller.on_session_event(SessionEvent::SignedIn(donor_identity()));

        // A sign-out lands before the first resolution completes
        let fresh = controller.on_session_event(SessionEvent::SignedOut);
        assert_eq!(controller.state(), RouteState::Unresolved);

        // The late result for the superseded session must not flip the state
        let state = controller.complete_resolution(stale, Role::Donor, RoutePath::DonorDashboard);
        assert_eq!(state, RouteState::Unresolved);

        let state = controller.complete_resolution(fresh, Role::Unknown, RoutePath::DonorDashboard);
        assert_eq!(state, RouteState::Resolved(Area::LoginRedirect));
    }
}
