//! Auth service wire types and the collaborator trait.
//!
//! ERROR HANDLING
//! ==============
//! Transport implementations only decide "reachable or not"; status and body
//! interpretation lives in [`parse_auth_response`] so the browser and CLI
//! clients report rejections identically.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Join a service base URL and an endpoint path.
#[must_use]
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The service answered with a non-2xx status.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// The service could not be reached.
    #[error("auth service unreachable: {0}")]
    Network(String),
    /// A 2xx response whose body is not an auth response.
    #[error("unexpected auth response: {0}")]
    InvalidResponse(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login/registration body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Other => "OTHER",
        })
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MALE" => Ok(Self::Male),
            "FEMALE" => Ok(Self::Female),
            "OTHER" => Ok(Self::Other),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

/// Registration validation failure, worded for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Please fill all fields")]
    MissingCredentials,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Please fill all fields")]
    MissingContact,
    #[error("Please fill all fields")]
    MissingAddress,
}

/// New-account details sent to `POST /auth/register`.
///
/// `confirm_password` is checked locally and never serialized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
    pub phone_number: String,
    /// ISO date, `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub gender: Gender,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl RegisterProfile {
    /// Check the profile in form order: name, credentials, contact, address.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProfileError`] found.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if blank(&self.first_name) || blank(&self.last_name) {
            return Err(ProfileError::MissingName);
        }
        if blank(&self.email) || self.password.is_empty() || self.confirm_password.is_empty() {
            return Err(ProfileError::MissingCredentials);
        }
        if self.password != self.confirm_password {
            return Err(ProfileError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ProfileError::PasswordTooShort);
        }
        if blank(&self.phone_number) || blank(&self.date_of_birth) {
            return Err(ProfileError::MissingContact);
        }
        if [&self.address, &self.city, &self.state, &self.zip_code].into_iter().any(|v| blank(v)) {
            return Err(ProfileError::MissingAddress);
        }
        Ok(())
    }
}

/// Pull the `message` field out of an error body, if it has one.
#[must_use]
pub fn rejection_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("message")?.as_str()?.trim();
    if message.is_empty() { None } else { Some(message.to_owned()) }
}

/// Interpret an auth endpoint's status and body.
///
/// # Errors
///
/// Returns [`AuthError::Rejected`] for non-2xx statuses and
/// [`AuthError::InvalidResponse`] when a 2xx body does not parse.
pub fn parse_auth_response(status: u16, body: &str) -> Result<AuthResponse, AuthError> {
    if !(200..300).contains(&status) {
        return Err(AuthError::Rejected { status, message: rejection_message(body).unwrap_or_default() });
    }
    serde_json::from_str(body).map_err(|e| AuthError::InvalidResponse(e.to_string()))
}

/// Remote auth collaborator. Implementations perform exactly one request per
/// call with no retry.
#[async_trait::async_trait(?Send)]
pub trait AuthApi {
    /// Exchange credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the service rejects the credentials or
    /// cannot be reached.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AuthError>;

    /// Create an account and receive a token for it.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the service rejects the profile or cannot
    /// be reached.
    async fn register(&self, profile: &RegisterProfile) -> Result<AuthResponse, AuthError>;
}
