use crate::core::calculator::leave::{find_absence, is_on_vacation};
use crate::models::absence::Absence;
use crate::models::event::Event;
use crate::models::event_type::EventType;
use crate::models::status::EmployeeStatus;
use crate::models::user::User;
use chrono::NaiveDate;

/// Most recent event of `user_id` by timestamp.
///
/// Equal instants are ordered by id (insertion order); on a full tie the
/// event that comes first in `events` wins, so a newest-first list keeps
/// its head.
pub fn last_event<'a>(user_id: &str, events: &'a [Event]) -> Option<&'a Event> {
    events
        .iter()
        .filter(|e| e.user_id == user_id)
        .reduce(|best, e| {
            if (e.timestamp, e.id) > (best.timestamp, best.id) {
                e
            } else {
                best
            }
        })
}

/// Classify the employee on `today`.
///
/// Vacation beats absence, absence beats the clock state. An IN left open
/// on a previous day still counts as working.
pub fn employee_status(
    user: &User,
    events: &[Event],
    absences: &[Absence],
    today: NaiveDate,
) -> EmployeeStatus {
    if is_on_vacation(&user.vacations, today) {
        return EmployeeStatus::OnVacation;
    }

    if let Some(abs) = find_absence(&user.id, today, absences) {
        return EmployeeStatus::Absent {
            reason: abs.display_reason(),
        };
    }

    match last_event(&user.id, events) {
        Some(ev) if ev.kind == EventType::In => EmployeeStatus::Working,
        _ => EmployeeStatus::Inactive,
    }
}
