//! Route gate for access-controlled pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps a page view and re-runs the session crate's `authorize` whenever the
//! session signal changes, so logging out on a protected page immediately
//! bounces to `/login`.

#[cfg(test)]
#[path = "protected_test.rs"]
mod protected_test;

use leptos::prelude::*;
use leptos_router::components::Redirect;
use session::{Decision, RoutePolicy, authorize};

use crate::state::auth::use_session;

/// Path to navigate to for `decision`, `None` unless it is a redirect.
pub(crate) fn redirect_path(decision: Decision) -> Option<&'static str> {
    match decision {
        Decision::RedirectTo(destination) => Some(destination.path()),
        Decision::Wait | Decision::Render => None,
    }
}

/// Render `children` only when `policy` admits the current session.
#[component]
pub fn Protected(policy: RoutePolicy, children: ChildrenFn) -> impl IntoView {
    let state = use_session().state();

    move || {
        let decision = state.with(|session| authorize(policy, session));
        if let Some(path) = redirect_path(decision) {
            return view! { <Redirect path=path/> }.into_any();
        }
        if decision == Decision::Wait {
            return view! {
                <div class="route-loading" aria-busy="true">
                    <div class="route-loading__spinner"></div>
                </div>
            }
            .into_any();
        }
        children().into_any()
    }
}
