//! Service endpoints baked in at build time.
//!
//! A browser bundle has no process environment, so overrides are read with
//! `option_env!` when the WASM is compiled:
//! - `CAREPOINT_AUTH_API_URL` (default `http://localhost:8081/api`)
//! - `CAREPOINT_APPOINTMENT_API_URL` (default `http://localhost:8082/api`)

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_AUTH_API_URL: &str = "http://localhost:8081/api";
pub const DEFAULT_APPOINTMENT_API_URL: &str = "http://localhost:8082/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub auth_base_url: String,
    pub appointment_base_url: String,
}

impl ApiConfig {
    /// Resolve endpoints from the build environment.
    pub fn from_build_env() -> Self {
        Self::resolve(option_env!("CAREPOINT_AUTH_API_URL"), option_env!("CAREPOINT_APPOINTMENT_API_URL"))
    }

    fn resolve(auth: Option<&str>, appointments: Option<&str>) -> Self {
        Self {
            auth_base_url: base_url_or(auth, DEFAULT_AUTH_API_URL),
            appointment_base_url: base_url_or(appointments, DEFAULT_APPOINTMENT_API_URL),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

fn base_url_or(raw: Option<&str>, default: &str) -> String {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_owned()
}
