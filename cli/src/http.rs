//! `reqwest` clients for the auth and appointment services.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use reqwest::header::AUTHORIZATION;
use session::appointments::{APPOINTMENTS_PATH, Appointment, bearer_header};
use session::auth::{LOGIN_PATH, REGISTER_PATH, endpoint, parse_auth_response, rejection_message};
use session::{AuthApi, AuthError, AuthResponse, LoginRequest, RegisterProfile};

use crate::CliError;

/// `AuthApi` over HTTP.
#[derive(Clone, Debug)]
pub struct ReqwestAuthApi {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestAuthApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }

    async fn post(&self, path: &str, body: &impl serde::Serialize) -> Result<AuthResponse, AuthError> {
        let url = endpoint(&self.base_url, path);
        tracing::debug!(%url, "auth request");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| AuthError::Network(e.to_string()))?;
        parse_auth_response(status, &text)
    }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for ReqwestAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AuthError> {
        self.post(LOGIN_PATH, request).await
    }

    async fn register(&self, profile: &RegisterProfile) -> Result<AuthResponse, AuthError> {
        self.post(REGISTER_PATH, profile).await
    }
}

/// The `message` field of an error body, else the body itself.
fn service_error_message(body: &str) -> String {
    rejection_message(body).unwrap_or_else(|| body.trim().to_owned())
}

/// `GET {base}/appointments` as the bearer of `token`.
pub async fn fetch_appointments(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
) -> Result<Vec<Appointment>, CliError> {
    let url = endpoint(base_url, APPOINTMENTS_PATH);
    let response = client.get(&url).header(AUTHORIZATION, bearer_header(token)).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        return Err(CliError::Service { status: status.as_u16(), message: service_error_message(&body) });
    }
    Ok(response.json::<Vec<Appointment>>().await?)
}
