//! REST helpers for the auth and appointment services.
//!
//! Browser (csr): real HTTP calls via `gloo-net`.
//! Native builds: stubs that report the service as unreachable, since these
//! calls are only meaningful inside the browser.
//!
//! ERROR HANDLING
//! ==============
//! Auth calls return the session crate's `AuthError` so rejections read the
//! same everywhere; appointment reads return display strings and degrade the
//! dashboard instead of failing it.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use session::appointments::Appointment;
use session::auth::{LOGIN_PATH, REGISTER_PATH, endpoint};
use session::{AuthApi, AuthError, AuthResponse, LoginRequest, RegisterProfile};

#[cfg(not(feature = "csr"))]
const UNAVAILABLE: &str = "not available outside the browser";

#[cfg(any(test, feature = "csr"))]
fn appointments_failed_message(status: u16) -> String {
    format!("appointments request failed: {status}")
}

/// `AuthApi` over the browser's `fetch`.
#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AuthError> {
        post_auth(&endpoint(&self.base_url, LOGIN_PATH), request).await
    }

    async fn register(&self, profile: &RegisterProfile) -> Result<AuthResponse, AuthError> {
        post_auth(&endpoint(&self.base_url, REGISTER_PATH), profile).await
    }
}

/// POST `body` as JSON to an auth endpoint and interpret the reply.
async fn post_auth<T: Serialize>(url: &str, body: &T) -> Result<AuthResponse, AuthError> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::post(url)
            .json(body)
            .map_err(|e| AuthError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| AuthError::Network(e.to_string()))?;
        session::auth::parse_auth_response(status, &text)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (url, body);
        Err(AuthError::Network(UNAVAILABLE.to_owned()))
    }
}

/// Fetch the caller's appointments from `GET {base}/appointments`.
///
/// # Errors
///
/// Returns an error string if the request fails, the service answers non-OK,
/// or the body is not an appointment list.
pub async fn fetch_appointments(base_url: &str, token: Option<&str>) -> Result<Vec<Appointment>, String> {
    #[cfg(feature = "csr")]
    {
        let url = endpoint(base_url, session::appointments::APPOINTMENTS_PATH);
        let mut request = gloo_net::http::Request::get(&url);
        if let Some(token) = token {
            request = request.header("Authorization", &session::appointments::bearer_header(token));
        }
        let resp = request.send().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(appointments_failed_message(resp.status()));
        }
        resp.json::<Vec<Appointment>>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (base_url, token);
        Err(UNAVAILABLE.to_owned())
    }
}
