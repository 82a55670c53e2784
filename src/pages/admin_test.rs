use super::*;

fn appointment(date: &str, status: AppointmentStatus) -> Appointment {
    Appointment {
        id: format!("{date}-{status:?}"),
        patient_id: "p-1".to_owned(),
        doctor_id: "d-1".to_owned(),
        appointment_date: date.to_owned(),
        appointment_time: "10:00".to_owned(),
        status,
        reason: Some("Checkup".to_owned()),
        notes: None,
    }
}

#[test]
fn admin_stats_counts_today_pending_and_completed() {
    let list = [
        appointment("2026-10-18", AppointmentStatus::Scheduled),
        appointment("2026-10-18", AppointmentStatus::Completed),
        appointment("2026-10-19", AppointmentStatus::Scheduled),
        appointment("2026-10-17", AppointmentStatus::Cancelled),
        appointment("2026-10-18", AppointmentStatus::Confirmed),
    ];
    assert_eq!(
        admin_stats(&list, "2026-10-18"),
        AdminStats { total: 5, today: 3, pending: 2, completed: 1 }
    );
}

#[test]
fn admin_stats_today_matches_exact_date_only() {
    let list = [appointment("2026-10-18T09:00", AppointmentStatus::Scheduled)];
    assert_eq!(admin_stats(&list, "2026-10-18").today, 0);
}

#[test]
fn admin_stats_of_empty_list_is_zero() {
    assert_eq!(admin_stats(&[], "2026-10-18"), AdminStats::default());
}
