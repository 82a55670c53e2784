//! Admin console.
//!
//! Rendered only behind the `RequiresAdmin` gate. Loads every appointment the
//! service returns for the admin token and shows system-wide counters above
//! the full list.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;
use session::appointments::{Appointment, AppointmentStatus};

use crate::components::appointment_table::AppointmentTable;
use crate::config::ApiConfig;
use crate::net::api::fetch_appointments;
use crate::state::auth::use_session;
use crate::util::clock;

/// System-wide appointment counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct AdminStats {
    pub total: usize,
    /// Appointments dated `today`.
    pub today: usize,
    /// Still `SCHEDULED`.
    pub pending: usize,
    pub completed: usize,
}

/// Count `appointments`; `today` is a `YYYY-MM-DD` date.
pub(crate) fn admin_stats(appointments: &[Appointment], today: &str) -> AdminStats {
    AdminStats {
        total: appointments.len(),
        today: appointments.iter().filter(|a| a.appointment_date == today).count(),
        pending: appointments.iter().filter(|a| a.is_upcoming()).count(),
        completed: appointments.iter().filter(|a| a.status == AppointmentStatus::Completed).count(),
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let state = use_session().state();
    let config = expect_context::<ApiConfig>();

    let appointments = LocalResource::new(move || {
        let base_url = config.appointment_base_url.clone();
        let token = state.with(|s| s.token.clone());
        async move { fetch_appointments(&base_url, token.as_deref()).await }
    });

    let content = move || {
        appointments.get().map(|result| {
            // A failed load shows zero counters and an empty list.
            let list = result.unwrap_or_else(|e| {
                leptos::logging::warn!("admin appointments unavailable: {e}");
                Vec::new()
            });
            let stats = admin_stats(&list, &clock::today_iso());
            view! {
                <div class="stat-grid">
                    <div class="stat-card"><span>"Total Appointments"</span><strong>{stats.total}</strong></div>
                    <div class="stat-card"><span>"Today's Appointments"</span><strong>{stats.today}</strong></div>
                    <div class="stat-card"><span>"Pending"</span><strong>{stats.pending}</strong></div>
                    <div class="stat-card"><span>"Completed"</span><strong>{stats.completed}</strong></div>
                </div>
                <h2>"All Appointments"</h2>
                <AppointmentTable appointments=list/>
            }
        })
    };

    view! {
        <section class="admin-page">
            <h1>"Admin Dashboard"</h1>
            <p class="admin-page__subtitle">"Manage appointments and monitor system activity"</p>
            <Suspense fallback=|| view! {
                <div class="route-loading" aria-busy="true">
                    <div class="route-loading__spinner"></div>
                </div>
            }>
                {content}
            </Suspense>
        </section>
    }
}
