//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};
use session::{RoutePolicy, SessionStore, routes};

use crate::components::header::Header;
use crate::components::protected::Protected;
use crate::config::ApiConfig;
use crate::net::api::HttpAuthApi;
use crate::pages::{
    admin::AdminPage, dashboard::DashboardPage, home::HomePage, login::LoginPage, register::RegisterPage,
};
use crate::state::auth::SessionContext;
use crate::util::{clock, storage::LocalStorage};

/// Root application component.
///
/// Rehydrates the session before the router mounts, so the first guard
/// decision already sees the persisted identity.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ApiConfig::from_build_env();
    let store = SessionStore::new(LocalStorage, HttpAuthApi::new(config.auth_base_url.clone()))
        .with_clock(clock::now_secs);
    let session = SessionContext::new(store);
    session.rehydrate();

    provide_context(config);
    provide_context(session);

    view! {
        <Title text="CarePoint"/>

        <Router>
            <Header/>
            <main class="page">
                <Routes fallback=|| view! { <Redirect path=routes::HOME/> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! {
                            <Protected policy=RoutePolicy::RequiresAuth>
                                <DashboardPage/>
                            </Protected>
                        }
                    />
                    <Route
                        path=StaticSegment("admin")
                        view=|| view! {
                            <Protected policy=RoutePolicy::RequiresAdmin>
                                <AdminPage/>
                            </Protected>
                        }
                    />
                </Routes>
            </main>
        </Router>
    }
}
