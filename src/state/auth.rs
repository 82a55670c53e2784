//! Reactive session context for the browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds one [`SessionContext`] and provides it. The wrapped
//! `SessionStore` stays the only writer; after each operation its snapshot is
//! mirrored into a signal so route guards and the header re-render.

use leptos::prelude::*;
use session::{Identity, RegisterProfile, Session, SessionError, SessionStore};

use crate::net::api::HttpAuthApi;
use crate::util::storage::LocalStorage;

pub type BrowserSessionStore = SessionStore<LocalStorage, HttpAuthApi>;

/// Session store plus a read-only reactive mirror of its state.
#[derive(Clone)]
pub struct SessionContext {
    store: BrowserSessionStore,
    state: RwSignal<Session>,
}

impl SessionContext {
    pub fn new(store: BrowserSessionStore) -> Self {
        let state = RwSignal::new(store.snapshot());
        Self { store, state }
    }

    /// Reactive view of the current session.
    pub fn state(&self) -> ReadSignal<Session> {
        self.state.read_only()
    }

    fn sync(&self) {
        self.state.set(self.store.snapshot());
    }

    pub fn rehydrate(&self) {
        self.store.rehydrate();
        self.sync();
    }

    /// # Errors
    ///
    /// See [`SessionStore::login`]; the session is unchanged on error.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        let result = self.store.login(email, password).await;
        self.sync();
        result
    }

    /// # Errors
    ///
    /// See [`SessionStore::register`]; the session is unchanged on error.
    pub async fn register(&self, profile: &RegisterProfile) -> Result<Identity, SessionError> {
        let result = self.store.register(profile).await;
        self.sync();
        result
    }

    pub fn logout(&self) {
        self.store.logout();
        self.sync();
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.store.bearer_token()
    }
}

/// Fetch the provided [`SessionContext`].
///
/// # Panics
///
/// Panics when called outside the tree rendered by `App`.
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
