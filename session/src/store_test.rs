use super::*;
use crate::auth::{AuthResponse, Gender};
use crate::guard::{Decision, Destination, RoutePolicy, authorize};
use crate::storage::MemoryStore;
use crate::token::test_helpers::{FAR_FUTURE, make_token};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

// =========================================================================
// MockAuth
// =========================================================================

#[derive(Clone)]
enum Reply {
    Token(String),
    Reject(u16, &'static str),
    Offline,
}

#[derive(Clone, Default)]
struct MockAuth {
    replies: RefCell<VecDeque<Reply>>,
    calls: Rc<Cell<u32>>,
}

impl MockAuth {
    fn new(replies: Vec<Reply>) -> Self {
        Self { replies: RefCell::new(replies.into()), calls: Rc::default() }
    }

    fn answer(&self) -> Result<AuthResponse, AuthError> {
        self.calls.set(self.calls.get() + 1);
        match self.replies.borrow_mut().pop_front() {
            Some(Reply::Token(token)) => Ok(AuthResponse { access_token: token, refresh_token: None }),
            Some(Reply::Reject(status, message)) => {
                Err(AuthError::Rejected { status, message: message.to_owned() })
            }
            Some(Reply::Offline) | None => Err(AuthError::Network("connection refused".to_owned())),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for MockAuth {
    async fn login(&self, _request: &LoginRequest) -> Result<AuthResponse, AuthError> {
        self.answer()
    }

    async fn register(&self, _profile: &RegisterProfile) -> Result<AuthResponse, AuthError> {
        self.answer()
    }
}

// =========================================================================
// FlakyStore
// =========================================================================

#[derive(Clone, Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_reads: bool,
    fail_writes_to: Option<&'static str>,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Read("security error".to_owned()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes_to == Some(key) {
            return Err(StorageError::Write("quota exceeded".to_owned()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

// =========================================================================
// Helpers
// =========================================================================

const NOW: i64 = 1_700_000_000;

fn token_with_roles(sub: &str, roles: &[&str]) -> String {
    make_token(&json!({ "sub": sub, "roles": roles, "exp": FAR_FUTURE }))
}

fn token_without_roles(sub: &str) -> String {
    make_token(&json!({ "sub": sub, "exp": FAR_FUTURE }))
}

fn store_with(storage: MemoryStore, replies: Vec<Reply>) -> SessionStore<MemoryStore, MockAuth> {
    SessionStore::new(storage, MockAuth::new(replies)).with_clock(|| NOW)
}

fn stored_user(storage: &MemoryStore) -> Option<Identity> {
    storage.get(USER_KEY).unwrap().map(|raw| serde_json::from_str(&raw).unwrap())
}

fn valid_profile() -> RegisterProfile {
    RegisterProfile {
        first_name: "Grace".to_owned(),
        last_name: "Hopper".to_owned(),
        email: "grace@example.com".to_owned(),
        password: "cobol!".to_owned(),
        confirm_password: "cobol!".to_owned(),
        phone_number: "555-0199".to_owned(),
        date_of_birth: "1986-12-09".to_owned(),
        gender: Gender::Female,
        address: "1 Navy Yard".to_owned(),
        city: "Arlington".to_owned(),
        state: "VA".to_owned(),
        zip_code: "22202".to_owned(),
    }
}

// =========================================================================
// rehydrate
// =========================================================================

#[test]
fn new_store_is_loading_until_rehydrated() {
    let store = store_with(MemoryStore::new(), vec![]);
    assert!(store.is_loading());
    assert_eq!(authorize(RoutePolicy::RequiresAuth, &store.snapshot()), Decision::Wait);

    let session = store.rehydrate();
    assert!(!session.is_loading);
    assert!(!store.is_loading());
}

#[test]
fn rehydrate_without_token_settles_signed_out() {
    let storage = MemoryStore::new();
    let store = store_with(storage.clone(), vec![]);
    assert_eq!(store.rehydrate(), Session::signed_out());
    assert!(storage.is_empty());
}

#[test]
fn rehydrate_drops_user_cache_without_token() {
    let storage = MemoryStore::new();
    storage.set(USER_KEY, r#"{"subjectEmail":"ghost@example.com","roles":["ADMIN"]}"#).unwrap();
    let store = store_with(storage.clone(), vec![]);
    assert!(store.rehydrate().identity.is_none());
    assert!(storage.is_empty());
}

#[test]
fn rehydrate_restores_identity_from_token() {
    let storage = MemoryStore::new();
    let token = token_with_roles("doc@example.com", &["DOCTOR"]);
    storage.set(TOKEN_KEY, &token).unwrap();

    let store = store_with(storage.clone(), vec![]);
    let session = store.rehydrate();

    let identity = session.identity.unwrap();
    assert_eq!(identity.subject_email, "doc@example.com");
    assert!(identity.has_role("DOCTOR"));
    assert_eq!(session.token.as_deref(), Some(token.as_str()));
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some(token.as_str()));
    assert_eq!(stored_user(&storage).unwrap().subject_email, "doc@example.com");
    assert!(store.has_elevated_role());
}

#[test]
fn rehydrate_defaults_missing_roles_to_patient() {
    let storage = MemoryStore::new();
    storage.set(TOKEN_KEY, &token_without_roles("pat@example.com")).unwrap();
    let store = store_with(storage.clone(), vec![]);

    let identity = store.rehydrate().identity.unwrap();
    assert_eq!(identity.roles.iter().map(String::as_str).collect::<Vec<_>>(), vec!["PATIENT"]);
    assert_eq!(stored_user(&storage).unwrap().roles, identity.roles);
}

#[test]
fn rehydrate_ignores_tampered_user_cache() {
    let storage = MemoryStore::new();
    storage.set(TOKEN_KEY, &token_without_roles("pat@example.com")).unwrap();
    storage.set(USER_KEY, r#"{"subjectEmail":"pat@example.com","roles":["ADMIN"]}"#).unwrap();
    let store = store_with(storage.clone(), vec![]);

    let session = store.rehydrate();
    assert_eq!(authorize(RoutePolicy::RequiresAdmin, &session), Decision::RedirectTo(Destination::DefaultAuthenticated));
    assert!(!stored_user(&storage).unwrap().is_admin());
}

#[test]
fn rehydrate_clears_storage_for_malformed_tokens() {
    let missing_sub = make_token(&json!({ "roles": ["ADMIN"] }));
    let cases: [&str; 6] = ["", "garbage", "a.b", "a.!!!.c", "a.aGVsbG8.c", missing_sub.as_str()];
    for bad in cases {
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, bad).unwrap();
        storage.set(USER_KEY, r#"{"subjectEmail":"x@y.z","roles":["ADMIN"]}"#).unwrap();

        let store = store_with(storage.clone(), vec![]);
        let session = store.rehydrate();

        assert!(session.identity.is_none(), "token {bad:?}");
        assert!(session.token.is_none());
        assert!(!session.is_loading);
        assert!(storage.is_empty(), "token {bad:?}");
    }
}

#[test]
fn rehydrate_clears_storage_for_expired_token() {
    let storage = MemoryStore::new();
    storage.set(TOKEN_KEY, &make_token(&json!({ "sub": "a@b.com", "exp": NOW - 60 }))).unwrap();
    let store = store_with(storage.clone(), vec![]);
    assert!(store.rehydrate().identity.is_none());
    assert!(storage.is_empty());
}

#[test]
fn rehydrate_survives_unreadable_storage() {
    let inner = MemoryStore::new();
    inner.set(TOKEN_KEY, &token_without_roles("a@b.com")).unwrap();
    let storage = FlakyStore { inner: inner.clone(), fail_reads: true, fail_writes_to: None };

    let store = SessionStore::new(storage, MockAuth::default()).with_clock(|| NOW);
    let session = store.rehydrate();

    assert_eq!(session, Session::signed_out());
    assert!(inner.is_empty());
}

// =========================================================================
// login
// =========================================================================

#[tokio::test]
async fn login_persists_token_and_identity() {
    let storage = MemoryStore::new();
    let token = token_with_roles("a@b.com", &["ADMIN"]);
    let store = store_with(storage.clone(), vec![Reply::Token(token.clone())]);
    store.rehydrate();

    let identity = store.login(" a@b.com ", "pw").await.unwrap();

    assert_eq!(identity.subject_email, "a@b.com");
    assert_eq!(store.identity(), Some(identity.clone()));
    assert_eq!(store.bearer_token().as_deref(), Some(token.as_str()));
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some(token.as_str()));
    assert_eq!(stored_user(&storage), Some(identity));
}

#[tokio::test]
async fn login_then_admin_route_renders() {
    let store = store_with(MemoryStore::new(), vec![Reply::Token(token_with_roles("a@b.com", &["ADMIN"]))]);
    store.rehydrate();
    store.login("a@b.com", "pw").await.unwrap();
    assert_eq!(authorize(RoutePolicy::RequiresAdmin, &store.snapshot()), Decision::Render);
}

#[tokio::test]
async fn login_roles_round_trip_into_elevation() {
    let cases: [(&[&str], bool); 4] = [
        (&["ADMIN"][..], true),
        (&["DOCTOR"][..], true),
        (&["PATIENT"][..], false),
        (&["PATIENT", "NURSE"][..], false),
    ];
    for (roles, elevated) in cases {
        let store = store_with(MemoryStore::new(), vec![Reply::Token(token_with_roles("a@b.com", roles))]);
        store.rehydrate();
        let identity = store.login("a@b.com", "pw").await.unwrap();

        let expected: Vec<&str> = {
            let mut r = roles.to_vec();
            r.sort_unstable();
            r
        };
        assert_eq!(identity.roles.iter().map(String::as_str).collect::<Vec<_>>(), expected);
        assert_eq!(store.has_elevated_role(), elevated, "{roles:?}");
    }
}

#[tokio::test]
async fn login_without_roles_claim_is_patient() {
    let store = store_with(MemoryStore::new(), vec![Reply::Token(token_without_roles("p@b.com"))]);
    store.rehydrate();
    let identity = store.login("p@b.com", "pw").await.unwrap();
    assert!(identity.has_role("PATIENT"));
    assert!(!store.has_elevated_role());
}

#[tokio::test]
async fn login_and_rehydrate_agree_on_identity() {
    let storage = MemoryStore::new();
    let store = store_with(storage.clone(), vec![Reply::Token(token_without_roles("p@b.com"))]);
    store.rehydrate();
    let from_login = store.login("p@b.com", "pw").await.unwrap();

    let reloaded = store_with(storage, vec![]);
    assert_eq!(reloaded.rehydrate().identity, Some(from_login));
}

#[tokio::test]
async fn rejected_login_leaves_session_untouched() {
    let storage = MemoryStore::new();
    let first = token_with_roles("a@b.com", &["PATIENT"]);
    let store = store_with(storage.clone(), vec![Reply::Token(first.clone()), Reply::Reject(401, "Bad credentials")]);
    store.rehydrate();
    store.login("a@b.com", "pw").await.unwrap();
    let before = store.snapshot();
    let user_before = storage.get(USER_KEY).unwrap();

    let err = store.login("a@b.com", "wrong").await.unwrap_err();

    assert!(matches!(err, SessionError::Auth(AuthError::Rejected { status: 401, .. })));
    assert_eq!(err.display_message("Failed to login."), "Bad credentials");
    assert_eq!(store.snapshot(), before);
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some(first.as_str()));
    assert_eq!(storage.get(USER_KEY).unwrap(), user_before);
}

#[tokio::test]
async fn rejected_login_while_signed_out_stays_signed_out() {
    let storage = MemoryStore::new();
    let store = store_with(storage.clone(), vec![Reply::Reject(401, "")]);
    store.rehydrate();

    let err = store.login("a@b.com", "wrong").await.unwrap_err();

    assert_eq!(err.display_message("Failed to login."), "Failed to login.");
    assert_eq!(store.snapshot(), Session::signed_out());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn offline_login_reports_generic_message() {
    let store = store_with(MemoryStore::new(), vec![Reply::Offline]);
    store.rehydrate();
    let err = store.login("a@b.com", "pw").await.unwrap_err();
    assert!(matches!(err, SessionError::Auth(AuthError::Network(_))));
    assert_eq!(err.display_message("Failed to login."), "Unable to reach the server. Please try again.");
    assert!(store.identity().is_none());
}

#[tokio::test]
async fn undecodable_issued_token_is_a_login_failure() {
    let storage = MemoryStore::new();
    let store = store_with(storage.clone(), vec![Reply::Token("opaque-session-id".to_owned())]);
    store.rehydrate();

    let err = store.login("a@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, SessionError::Token(TokenError::Segments(1))));
    assert!(store.identity().is_none());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn failed_user_cache_write_rolls_back() {
    let inner = MemoryStore::new();
    let storage = FlakyStore { inner: inner.clone(), fail_reads: false, fail_writes_to: Some(USER_KEY) };
    let api = MockAuth::new(vec![Reply::Token(token_without_roles("a@b.com"))]);
    let store = SessionStore::new(storage, api).with_clock(|| NOW);
    store.rehydrate();

    let err = store.login("a@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, SessionError::Storage(StorageError::Write(_))));
    assert!(store.identity().is_none());
    assert!(inner.is_empty());
}

// =========================================================================
// register
// =========================================================================

#[tokio::test]
async fn register_adopts_issued_token() {
    let storage = MemoryStore::new();
    let store = store_with(storage.clone(), vec![Reply::Token(token_without_roles("grace@example.com"))]);
    store.rehydrate();

    let identity = store.register(&valid_profile()).await.unwrap();

    assert_eq!(identity.subject_email, "grace@example.com");
    assert!(identity.has_role("PATIENT"));
    assert_eq!(authorize(RoutePolicy::RequiresAuth, &store.snapshot()), Decision::Render);
    assert!(storage.get(TOKEN_KEY).unwrap().is_some());
}

#[tokio::test]
async fn invalid_profile_never_reaches_service() {
    let api = MockAuth::new(vec![Reply::Token(token_without_roles("grace@example.com"))]);
    let calls = Rc::clone(&api.calls);
    let store = SessionStore::new(MemoryStore::new(), api).with_clock(|| NOW);
    store.rehydrate();

    let profile = RegisterProfile { confirm_password: "different".to_owned(), ..valid_profile() };
    let err = store.register(&profile).await.unwrap_err();

    assert!(matches!(err, SessionError::Profile(ProfileError::PasswordMismatch)));
    assert_eq!(err.display_message("Failed to register. Please try again."), "Passwords do not match");
    assert_eq!(calls.get(), 0);
    assert!(store.identity().is_none());
}

#[tokio::test]
async fn rejected_registration_surfaces_service_message() {
    let store = store_with(MemoryStore::new(), vec![Reply::Reject(400, "Email already registered")]);
    store.rehydrate();
    let err = store.register(&valid_profile()).await.unwrap_err();
    assert_eq!(err.display_message("Failed to register. Please try again."), "Email already registered");
    assert!(store.identity().is_none());
}

// =========================================================================
// logout
// =========================================================================

#[tokio::test]
async fn logout_clears_identity_and_storage() {
    let storage = MemoryStore::new();
    let store = store_with(storage.clone(), vec![Reply::Token(token_with_roles("a@b.com", &["ADMIN"]))]);
    store.rehydrate();
    store.login("a@b.com", "pw").await.unwrap();

    store.logout();

    assert_eq!(store.snapshot(), Session::signed_out());
    assert!(!store.has_elevated_role());
    assert!(storage.is_empty());
    assert_eq!(
        authorize(RoutePolicy::RequiresAuth, &store.snapshot()),
        Decision::RedirectTo(Destination::Login)
    );
}

#[test]
fn logout_when_signed_out_is_harmless() {
    let store = store_with(MemoryStore::new(), vec![]);
    store.rehydrate();
    store.logout();
    assert_eq!(store.snapshot(), Session::signed_out());
}

#[test]
fn clones_share_session_state() {
    let storage = MemoryStore::new();
    storage.set(TOKEN_KEY, &token_without_roles("a@b.com")).unwrap();
    let store = store_with(storage, vec![]);
    let handle = store.clone();

    store.rehydrate();
    assert!(handle.identity().is_some());
    handle.logout();
    assert!(store.identity().is_none());
}
