use crate::core::calculator::grouping::group_by_day;
use crate::core::calculator::leave::count_absences_between;
use crate::models::absence::Absence;
use crate::models::event::Event;
use crate::models::stats::WeeklyStats;
use crate::models::user::User;
use chrono::{Datelike, Days, NaiveDate};

/// Monday and Sunday of the week containing `today`.
pub fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = today.weekday().num_days_from_monday() as u64;
    let monday = today - Days::new(back);
    (monday, monday + Days::new(6))
}

/// Expected hours for the week.
///
/// Each absence removes one working day worth of hours. A user with zero
/// working days per week has no per-day quota, so any absence drops the
/// target to zero.
pub fn weekly_target(user: &User, on_vacation: bool, absent_days: usize) -> f64 {
    if on_vacation {
        return 0.0;
    }
    if absent_days == 0 {
        return user.weekly_hours;
    }

    let working_days = user.working_days_per_week as i64;
    if working_days == 0 {
        return 0.0;
    }

    let per_day = user.weekly_hours / working_days as f64;
    let remaining = (working_days - absent_days as i64).max(0);
    per_day * remaining as f64
}

/// Completion percentage, 100 for a zero target.
pub fn weekly_percent(total: f64, target: f64) -> f64 {
    if target == 0.0 {
        100.0
    } else {
        (total / target * 100.0).min(100.0)
    }
}

pub fn weekly_stats(
    user: &User,
    events: &[Event],
    on_vacation: bool,
    absences: &[Absence],
    today: NaiveDate,
) -> WeeklyStats {
    let (week_start, week_end) = week_bounds(today);

    let total: f64 = group_by_day(&user.id, events)
        .iter()
        .filter(|d| d.date >= week_start && d.date <= week_end)
        .map(|d| d.worked_hours())
        .sum();

    let absent_days = count_absences_between(&user.id, absences, week_start, week_end);
    let target = weekly_target(user, on_vacation, absent_days);

    WeeklyStats {
        week_start,
        week_end,
        total,
        target,
        percent: weekly_percent(total, target),
        on_vacation,
    }
}
