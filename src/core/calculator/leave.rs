//! Vacation and absence lookups.

use crate::models::absence::Absence;
use crate::models::stats::VacationSummary;
use crate::models::user::User;
use crate::models::vacation::VacationRange;
use chrono::NaiveDate;

/// True when `today` falls inside any inclusive vacation range.
pub fn is_on_vacation(vacations: &[VacationRange], today: NaiveDate) -> bool {
    vacations.iter().any(|v| v.contains(today))
}

/// First absence of `user_id` on `date`, in collection order.
pub fn find_absence<'a>(
    user_id: &str,
    date: NaiveDate,
    absences: &'a [Absence],
) -> Option<&'a Absence> {
    absences
        .iter()
        .find(|a| a.user_id == user_id && a.date == date)
}

/// Absences of `user_id` dated inside `[from, to]`.
pub fn count_absences_between(
    user_id: &str,
    absences: &[Absence],
    from: NaiveDate,
    to: NaiveDate,
) -> usize {
    absences
        .iter()
        .filter(|a| a.user_id == user_id && a.date >= from && a.date <= to)
        .count()
}

/// Allowance vs. planned vacation days. `remaining` can go negative when
/// more days are planned than allowed.
pub fn vacation_summary(user: &User) -> VacationSummary {
    let total = user.total_vacation_days as i64;
    let used: i64 = user.vacations.iter().map(VacationRange::days).sum();

    VacationSummary {
        total,
        used,
        remaining: total - used,
    }
}
