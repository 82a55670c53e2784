//! Tabular appointment listing shared by the dashboards.

#[cfg(test)]
#[path = "appointment_table_test.rs"]
mod appointment_table_test;

use leptos::prelude::*;
use session::appointments::{Appointment, AppointmentStatus};

/// Badge modifier class for `status`.
pub(crate) fn status_class(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Scheduled => "status-badge status-badge--scheduled",
        AppointmentStatus::Completed => "status-badge status-badge--completed",
        AppointmentStatus::Cancelled => "status-badge status-badge--cancelled",
        _ => "status-badge",
    }
}

/// Wire name of `status`, as the service spells it.
pub(crate) fn status_label(status: AppointmentStatus) -> String {
    serde_json::to_value(status)
        .ok()
        .and_then(|v| v.as_str().map(str::to_owned))
        .unwrap_or_default()
}

#[component]
pub fn AppointmentTable(appointments: Vec<Appointment>) -> impl IntoView {
    if appointments.is_empty() {
        return view! { <p class="appointment-table__empty">"No appointments yet."</p> }.into_any();
    }

    let rows = appointments
        .into_iter()
        .map(|a| {
            let when = format!("{} {}", a.appointment_date, a.appointment_time);
            view! {
                <tr>
                    <td>{a.patient_id}</td>
                    <td>{a.doctor_id}</td>
                    <td>{when}</td>
                    <td>{a.reason.unwrap_or_default()}</td>
                    <td><span class=status_class(a.status)>{status_label(a.status)}</span></td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="appointment-table">
            <thead>
                <tr>
                    <th>"Patient"</th>
                    <th>"Doctor"</th>
                    <th>"Date & Time"</th>
                    <th>"Reason"</th>
                    <th>"Status"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
    .into_any()
}
