//! Application route table.

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

use crate::guard::RoutePolicy;

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const DASHBOARD: &str = "/dashboard";
pub const APPOINTMENTS: &str = "/appointments";
pub const NEW_APPOINTMENT: &str = "/appointments/new";
pub const ADMIN: &str = "/admin";

/// Every navigable path with its access policy.
pub const ROUTES: &[(&str, RoutePolicy)] = &[
    (HOME, RoutePolicy::Public),
    (LOGIN, RoutePolicy::Public),
    (REGISTER, RoutePolicy::Public),
    (DASHBOARD, RoutePolicy::RequiresAuth),
    (APPOINTMENTS, RoutePolicy::RequiresAuth),
    (NEW_APPOINTMENT, RoutePolicy::RequiresAuth),
    (ADMIN, RoutePolicy::RequiresAdmin),
];

/// Drop query, fragment and trailing slashes so `/admin/?x=1` matches `/admin`.
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { HOME } else { trimmed }
}

/// Policy for `path`, `None` when no route matches.
#[must_use]
pub fn policy_for(path: &str) -> Option<RoutePolicy> {
    let path = normalize(path);
    ROUTES.iter().find(|(route, _)| *route == path).map(|(_, policy)| *policy)
}
