//! Public landing page.

use leptos::prelude::*;
use leptos_router::components::A;
use session::routes;

use crate::state::auth::use_session;

#[component]
pub fn HomePage() -> impl IntoView {
    let state = use_session().state();
    let signed_in = move || state.with(|s| s.identity.is_some());

    view! {
        <section class="home-page">
            <h1>"CarePoint"</h1>
            <p class="home-page__tagline">"Book and manage your appointments online."</p>
            <Show
                when=signed_in
                fallback=|| view! {
                    <div class="home-page__actions">
                        <A href=routes::LOGIN>"Sign in"</A>
                        <A href=routes::REGISTER>"Create an account"</A>
                    </div>
                }
            >
                <div class="home-page__actions">
                    <A href=routes::DASHBOARD>"Go to your dashboard"</A>
                </div>
            </Show>
        </section>
    }
}
