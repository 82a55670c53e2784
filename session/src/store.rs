//! The session store: single writer of the current `Session`.
//!
//! ARCHITECTURE
//! ============
//! The store is an owned service object, generic over its durable storage and
//! its auth collaborator, and handed to whoever needs it. Clones are cheap
//! handles onto the same state so a UI can move one into a spawned task.
//!
//! FAILURE MODEL
//! =============
//! A token that fails to decode during rehydration resets the session
//! silently. Login and registration either complete fully (token decoded,
//! both keys persisted, identity replaced) or leave memory and storage as they
//! were.

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::auth::{AuthApi, AuthError, LoginRequest, ProfileError, RegisterProfile};
use crate::state::{Identity, Session};
use crate::storage::{KeyValueStore, StorageError, TOKEN_KEY, USER_KEY};
use crate::token::{TokenError, decode_token};

/// Source of "now" in Unix seconds, used for token expiry checks.
pub type Clock = fn() -> i64;

/// Wall-clock time from the OS.
#[must_use]
pub fn system_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

const NETWORK_MESSAGE: &str = "Unable to reach the server. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("issued token is unusable: {0}")]
    Token(#[from] TokenError),
    #[error("could not persist session: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl SessionError {
    /// Text suitable for showing next to a login/registration form.
    ///
    /// Service-provided rejection messages win; otherwise `fallback` is used.
    #[must_use]
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Self::Auth(AuthError::Rejected { message, .. }) if !message.is_empty() => message.clone(),
            Self::Auth(AuthError::Network(_)) => NETWORK_MESSAGE.to_owned(),
            Self::Profile(e) => e.to_string(),
            _ => fallback.to_owned(),
        }
    }
}

/// Owner of the current session and its persisted copy.
#[derive(Clone)]
pub struct SessionStore<S, A> {
    storage: S,
    api: A,
    session: Arc<Mutex<Session>>,
    clock: Clock,
}

impl<S, A> SessionStore<S, A>
where
    S: KeyValueStore,
    A: AuthApi,
{
    /// Create a store in the loading state. Call [`Self::rehydrate`] next.
    pub fn new(storage: S, api: A) -> Self {
        Self { storage, api, session: Arc::new(Mutex::new(Session::loading())), clock: system_now }
    }

    /// Replace the expiry clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn current(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(&self, next: Session) {
        *self.current() = next;
    }

    /// Copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.current().clone()
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.current().identity.clone()
    }

    /// Token to send as `Authorization: Bearer <token>`.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        self.current().token.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.current().is_loading
    }

    /// Whether the current identity holds `ADMIN` or `DOCTOR`.
    #[must_use]
    pub fn has_elevated_role(&self) -> bool {
        self.current().identity.as_ref().is_some_and(Identity::has_elevated_role)
    }

    /// Rebuild the session from durable storage and finish loading.
    ///
    /// Never fails: an unreadable store or undecodable token clears both
    /// persisted keys and settles signed out.
    pub fn rehydrate(&self) -> Session {
        let restored = match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) => match decode_token(&token, (self.clock)()) {
                Ok(claims) => {
                    let identity = claims.into_identity();
                    if let Err(e) = self.write_user_cache(&identity) {
                        log::warn!("session: user cache refresh failed: {e}");
                    }
                    log::debug!("session: restored {}", identity.subject_email);
                    Some((token, identity))
                }
                Err(e) => {
                    log::warn!("session: discarding stored token: {e}");
                    self.clear_persisted();
                    None
                }
            },
            Ok(None) => {
                // A user cache without a token is stale.
                if let Err(e) = self.storage.remove(USER_KEY) {
                    log::warn!("session: could not drop stale user cache: {e}");
                }
                None
            }
            Err(e) => {
                log::warn!("session: storage unreadable: {e}");
                self.clear_persisted();
                None
            }
        };

        let next = match restored {
            Some((token, identity)) => Session { identity: Some(identity), token: Some(token), is_loading: false },
            None => Session::signed_out(),
        };
        self.replace(next.clone());
        next
    }

    /// Log in with credentials and adopt the issued token.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the service rejects the credentials or is
    /// unreachable, the issued token does not decode, or it cannot be
    /// persisted. The session is unchanged on error.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        let request = LoginRequest { email: email.trim().to_owned(), password: password.to_owned() };
        let response = self.api.login(&request).await.inspect_err(|e| {
            log::warn!("session: login failed: {e}");
        })?;
        let identity = self.establish(response.access_token)?;
        log::info!("session: logged in as {}", identity.subject_email);
        Ok(identity)
    }

    /// Create an account and adopt the issued token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Profile`] without calling the service when the
    /// profile is incomplete; otherwise as for [`Self::login`].
    pub async fn register(&self, profile: &RegisterProfile) -> Result<Identity, SessionError> {
        profile.validate()?;
        let response = self.api.register(profile).await.inspect_err(|e| {
            log::warn!("session: registration failed: {e}");
        })?;
        let identity = self.establish(response.access_token)?;
        log::info!("session: registered {}", identity.subject_email);
        Ok(identity)
    }

    /// Forget the current identity and its persisted copy.
    pub fn logout(&self) {
        self.clear_persisted();
        let previous = std::mem::replace(&mut *self.current(), Session::signed_out());
        if let Some(identity) = previous.identity {
            log::info!("session: logged out {}", identity.subject_email);
        }
    }

    /// Decode, persist, then publish `token`. Nothing is published unless
    /// both keys were written.
    fn establish(&self, token: String) -> Result<Identity, SessionError> {
        let identity = decode_token(&token, (self.clock)())?.into_identity();

        if let Err(e) = self.persist(&token, &identity) {
            let previous = self.snapshot();
            self.restore_persisted(&previous);
            return Err(e.into());
        }

        self.replace(Session { identity: Some(identity.clone()), token: Some(token), is_loading: false });
        Ok(identity)
    }

    fn persist(&self, token: &str, identity: &Identity) -> Result<(), StorageError> {
        self.storage.set(TOKEN_KEY, token)?;
        self.write_user_cache(identity)
    }

    fn write_user_cache(&self, identity: &Identity) -> Result<(), StorageError> {
        let snapshot = serde_json::to_string(identity).map_err(|e| StorageError::Write(e.to_string()))?;
        self.storage.set(USER_KEY, &snapshot)
    }

    /// Best-effort rollback after a partial write.
    fn restore_persisted(&self, previous: &Session) {
        match (&previous.token, &previous.identity) {
            (Some(token), Some(identity)) => {
                if let Err(e) = self.persist(token, identity) {
                    log::warn!("session: rollback failed, clearing storage: {e}");
                    self.clear_persisted();
                }
            }
            _ => self.clear_persisted(),
        }
    }

    fn clear_persisted(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                log::warn!("session: could not remove {key}: {e}");
            }
        }
    }
}
