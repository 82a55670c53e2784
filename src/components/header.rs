//! Site header with session-aware navigation.

use leptos::prelude::*;
use leptos_router::components::A;
use session::routes;

use crate::state::auth::use_session;

/// Brand link plus either login/register links or the signed-in user's
/// navigation. The admin link only shows for `ADMIN`.
#[component]
pub fn Header() -> impl IntoView {
    let session = use_session();
    let state = session.state();

    let nav = move || match state.with(|s| s.identity.clone()) {
        Some(identity) => {
            let session = session.clone();
            view! {
                <A href=routes::DASHBOARD>"Dashboard"</A>
                {identity.is_admin().then(|| view! { <A href=routes::ADMIN>"Admin"</A> })}
                <span class="site-header__user">{identity.subject_email}</span>
                // Plain anchor: the router follows it after the store clears.
                <a href=routes::LOGIN class="btn" on:click=move |_| session.logout()>
                    "Logout"
                </a>
            }
            .into_any()
        }
        None => view! {
            <A href=routes::LOGIN>"Login"</A>
            <A href=routes::REGISTER>"Register"</A>
        }
        .into_any(),
    };

    view! {
        <header class="site-header">
            <A href=routes::HOME>"CarePoint"</A>
            <nav class="site-header__nav">{nav}</nav>
        </header>
    }
}
