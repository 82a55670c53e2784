//! Bearer token decoding.
//!
//! Tokens are compact JWS strings (`header.payload.signature`). The client
//! never verifies the signature, that is the issuing service's job; it only
//! needs the claims to know who is logged in and whether the token is still
//! usable. Decoding is local and synchronous.

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::state::{Identity, ROLE_PATIENT};

/// Error returned by [`decode_token`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token is not three dot-separated segments.
    #[error("expected 3 token segments, found {0}")]
    Segments(usize),
    /// The payload segment is not base64url.
    #[error("token payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The payload decoded but does not match the claims schema.
    #[error("token claims are invalid: {0}")]
    Claims(#[from] serde_json::Error),
    /// The payload is valid JSON but not an object.
    #[error("token claims are not a JSON object")]
    NotAnObject,
    /// `sub` is absent or blank.
    #[error("token has no subject")]
    MissingSubject,
    /// `exp` is at or before the current time.
    #[error("token expired at {exp}")]
    Expired { exp: f64 },
}

/// Claims the client relies on. Anything else in the payload is ignored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Claims {
    /// Account email.
    #[serde(default)]
    pub sub: String,
    /// Granted roles; `None` when the claim is absent or null.
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    /// Expiry, seconds since the Unix epoch. NumericDate may be fractional.
    #[serde(default)]
    pub exp: Option<f64>,
    /// Issued-at, seconds since the Unix epoch.
    #[serde(default)]
    pub iat: Option<f64>,
}

impl Claims {
    /// Build the session identity. A missing `roles` claim means `{PATIENT}`;
    /// an explicit empty list stays empty.
    #[must_use]
    pub fn into_identity(self) -> Identity {
        let roles = self.roles.unwrap_or_else(|| vec![ROLE_PATIENT.to_owned()]);
        Identity { subject_email: self.sub, roles: roles.into_iter().collect() }
    }
}

/// Decode the claims of `token` and check them against `now` (Unix seconds).
///
/// # Errors
///
/// Returns a [`TokenError`] if the token is structurally malformed, its
/// payload is not a claims object, it has no subject, or it has expired.
pub fn decode_token(token: &str, now: i64) -> Result<Claims, TokenError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Segments(segments.len()));
    }

    let payload = URL_SAFE_NO_PAD.decode(segments[1].trim_end_matches('='))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)?;
    if !value.is_object() {
        return Err(TokenError::NotAnObject);
    }
    let claims = Claims::deserialize(value)?;

    if claims.sub.trim().is_empty() {
        return Err(TokenError::MissingSubject);
    }
    #[allow(clippy::cast_precision_loss)]
    let now = now as f64;
    if let Some(exp) = claims.exp {
        if exp <= now {
            return Err(TokenError::Expired { exp });
        }
    }
    Ok(claims)
}

// =============================================================================
// TEST HELPERS
// =============================================================================
