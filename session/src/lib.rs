//! Session lifecycle and route authorization shared by the web client and CLI.
//!
//! This crate owns "who is logged in": it decodes bearer tokens issued by the
//! auth service, keeps the decoded identity in sync with a durable key/value
//! store, and answers route-access questions for the navigation layer. It has
//! no UI or transport dependencies; callers plug in a [`KeyValueStore`] and an
//! [`AuthApi`] implementation for their platform.

pub mod appointments;
pub mod auth;
pub mod guard;
pub mod routes;
pub mod state;
pub mod storage;
pub mod store;
pub mod token;

pub use auth::{AuthApi, AuthError, AuthResponse, Gender, LoginRequest, ProfileError, RegisterProfile};
pub use guard::{Decision, Destination, RoutePolicy, authorize, authorize_path};
pub use state::{Identity, ROLE_ADMIN, ROLE_DOCTOR, ROLE_PATIENT, Session};
pub use storage::{KeyValueStore, MemoryStore, StorageError, TOKEN_KEY, USER_KEY};
pub use store::{Clock, SessionError, SessionStore, system_now};
pub use token::{Claims, TokenError, decode_token};
