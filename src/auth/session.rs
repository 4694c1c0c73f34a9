use serde::{Deserialize, Serialize};

/// Opaque handle for a user known to the external identity provider.
///
/// `uid` is the provider's stable identifier and is what profile records are
/// keyed by. `credential` is the sign-in credential (an email address), kept
/// so the designated-administrator override can be matched against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub credential: String,
}

impl Identity {
    pub fn new(uid: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            credential: credential.into(),
        }
    }
}

/// Auth state change emitted by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    SignedIn(Identity),
    SignedOut,
}

/// Local mirror of the provider's session state.
///
/// Always an explicit value handed to the access controller, never ambient
/// global state. Created on a sign-in event, destroyed on sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    /// Session with no authenticated identity
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    /// Session for an authenticated identity
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

impl From<SessionEvent> for Session {
    fn from(event: SessionEvent) -> Self {
        match event {
            SessionEvent::SignedIn(identity) => Session::authenticated(identity),
            SessionEvent::SignedOut => Session::anonymous(),
        }
    }
}
