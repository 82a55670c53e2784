//! Authenticated landing page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered only behind the `RequiresAuth` gate. Pulls the caller's
//! appointments with the session bearer token; a failed fetch degrades to an
//! inline notice instead of blocking the page.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use session::appointments::{Appointment, AppointmentStatus};
use session::{Identity, ROLE_ADMIN, ROLE_DOCTOR};

use crate::components::appointment_table::AppointmentTable;
use crate::config::ApiConfig;
use crate::net::api::fetch_appointments;
use crate::state::auth::use_session;

/// Number of appointments listed under the counters.
pub(crate) const RECENT_LIMIT: usize = 5;

/// Patient-facing appointment counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct PatientStats {
    pub upcoming: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub total: usize,
}

pub(crate) fn summarize(appointments: &[Appointment]) -> PatientStats {
    let count = |status: AppointmentStatus| appointments.iter().filter(|a| a.status == status).count();
    PatientStats {
        upcoming: count(AppointmentStatus::Scheduled),
        completed: count(AppointmentStatus::Completed),
        cancelled: count(AppointmentStatus::Cancelled),
        total: appointments.len(),
    }
}

/// The first [`RECENT_LIMIT`] appointments in service order.
pub(crate) fn recent(appointments: &[Appointment]) -> Vec<Appointment> {
    appointments.iter().take(RECENT_LIMIT).cloned().collect()
}

/// Highest-privilege role label for the welcome banner.
pub(crate) fn role_label(identity: &Identity) -> &'static str {
    if identity.has_role(ROLE_ADMIN) {
        "Administrator"
    } else if identity.has_role(ROLE_DOCTOR) {
        "Doctor"
    } else {
        "Patient"
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = use_session().state();
    let config = expect_context::<ApiConfig>();

    let appointments = LocalResource::new(move || {
        let base_url = config.appointment_base_url.clone();
        let token = state.with(|s| s.token.clone());
        async move { fetch_appointments(&base_url, token.as_deref()).await }
    });

    let banner = move || {
        state.with(|s| {
            s.identity.as_ref().map(|identity| {
                let email = identity.subject_email.clone();
                let label = role_label(identity);
                view! {
                    <h1>"Welcome, " {email}</h1>
                    <p class="dashboard__role">{label}</p>
                }
            })
        })
    };

    let staff_tools = move || {
        state
            .with(|s| s.identity.as_ref().is_some_and(Identity::has_elevated_role))
            .then(|| {
                view! {
                    <section class="dashboard__staff">
                        <h2>"Staff tools"</h2>
                        <p>"Review today's schedule and confirm pending visits."</p>
                    </section>
                }
            })
    };

    let summary = move || {
        appointments.get().map(|result| match result {
            Ok(list) => {
                let stats = summarize(&list);
                view! {
                    <div class="stat-grid">
                        <div class="stat-card"><span>"Upcoming"</span><strong>{stats.upcoming}</strong></div>
                        <div class="stat-card"><span>"Completed"</span><strong>{stats.completed}</strong></div>
                        <div class="stat-card"><span>"Cancelled"</span><strong>{stats.cancelled}</strong></div>
                        <div class="stat-card"><span>"Total"</span><strong>{stats.total}</strong></div>
                    </div>
                    <h2>"Recent appointments"</h2>
                    <AppointmentTable appointments=recent(&list)/>
                }
                .into_any()
            }
            Err(e) => {
                leptos::logging::warn!("appointments unavailable: {e}");
                view! { <p class="dashboard__notice">"Failed to load appointments"</p> }.into_any()
            }
        })
    };

    view! {
        <section class="dashboard">
            {banner}
            <Suspense fallback=|| view! { <p class="dashboard__notice">"Loading appointments..."</p> }>
                {summary}
            </Suspense>
            {staff_tools}
        </section>
    }
}
