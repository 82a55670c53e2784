//! Route authorization decisions.
//!
//! The guard is a pure function of (policy, session). It keeps no state of
//! its own; the navigation layer re-asks whenever the session changes.

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use crate::routes;
use crate::state::Session;

/// Access requirement attached to a navigable view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoutePolicy {
    Public,
    RequiresAuth,
    RequiresAdmin,
}

/// Where a redirect sends the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Destination {
    /// The login view.
    Login,
    /// The landing view for a signed-in user.
    DefaultAuthenticated,
    /// The public home view, used for unknown paths.
    Home,
}

impl Destination {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => routes::LOGIN,
            Self::DefaultAuthenticated => routes::DASHBOARD,
            Self::Home => routes::HOME,
        }
    }
}

/// Outcome of consulting the guard for one view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Rehydration has not finished; show a neutral loading indicator.
    Wait,
    Render,
    RedirectTo(Destination),
}

/// Decide whether a view with `policy` may render for `session`.
///
/// While the session is loading the answer is always [`Decision::Wait`], so
/// no redirect can fire before rehydration completes.
#[must_use]
pub fn authorize(policy: RoutePolicy, session: &Session) -> Decision {
    if session.is_loading {
        return Decision::Wait;
    }
    if policy == RoutePolicy::Public {
        return Decision::Render;
    }
    let Some(identity) = session.identity.as_ref() else {
        return Decision::RedirectTo(Destination::Login);
    };
    if policy == RoutePolicy::RequiresAdmin && !identity.is_admin() {
        return Decision::RedirectTo(Destination::DefaultAuthenticated);
    }
    Decision::Render
}

/// Resolve `path` through the route table and authorize it. Unknown paths
/// go home.
#[must_use]
pub fn authorize_path(path: &str, session: &Session) -> Decision {
    match routes::policy_for(path) {
        Some(policy) => authorize(policy, session),
        None => Decision::RedirectTo(Destination::Home),
    }
}
