//! Signed-in identity and the guard that checks it.

use std::sync::{Arc, RwLock};

/// Views a controller can send the user to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    ProductList,
    ProductEdit(String),
}

/// A routing decision returned to the caller instead of performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
}

impl Redirect {
    pub fn to(route: Route) -> Self {
        Self { to: route }
    }
}

/// Who is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Bearer credential sent with every request
    pub token: String,
    pub name: String,
    pub is_admin: bool,
}

/// Shared handle to the current identity. Cloning shares the same slot, so
/// signing out in one place is seen by every controller holding a clone.
#[derive(Debug, Clone, Default)]
pub struct Session {
    identity: Arc<RwLock<Option<Identity>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(identity: Identity) -> Self {
        let session = Self::new();
        session.sign_in(identity);
        session
    }

    pub fn sign_in(&self, identity: Identity) {
        if let Ok(mut slot) = self.identity.write() {
            *slot = Some(identity);
        }
    }

    pub fn sign_out(&self) {
        if let Ok(mut slot) = self.identity.write() {
            *slot = None;
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity.read().ok().and_then(|slot| slot.clone())
    }
}

/// Pre-check run before any data request. Without an identity the caller
/// gets a redirect to the login view and must not touch view state.
pub fn authorize(session: &Session) -> Result<Identity, Redirect> {
    session
        .identity()
        .ok_or_else(|| Redirect::to(Route::Login))
}
