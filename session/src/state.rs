//! In-memory session model.
//!
//! `Session` is what the navigation layer reads; only [`crate::SessionStore`]
//! writes it. `Identity` doubles as the persisted `user` cache snapshot.

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_DOCTOR: &str = "DOCTOR";
pub const ROLE_PATIENT: &str = "PATIENT";

/// The authenticated principal derived from a decoded token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Token subject; the account email.
    pub subject_email: String,
    /// Role names granted by the auth service.
    pub roles: BTreeSet<String>,
}

impl Identity {
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// `ADMIN` or `DOCTOR`.
    #[must_use]
    pub fn has_elevated_role(&self) -> bool {
        self.has_role(ROLE_ADMIN) || self.has_role(ROLE_DOCTOR)
    }
}

/// Current authentication state as seen by views and the route guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub identity: Option<Identity>,
    pub token: Option<String>,
    /// True until the first rehydration pass has finished.
    pub is_loading: bool,
}

impl Session {
    /// Empty session at process start, before rehydration.
    #[must_use]
    pub fn loading() -> Self {
        Self { identity: None, token: None, is_loading: true }
    }

    /// Settled session with nobody logged in.
    #[must_use]
    pub fn signed_out() -> Self {
        Self { identity: None, token: None, is_loading: false }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}
