use crate::core::calculator::grouping::{fold_user_days, group_by_day};
use crate::models::event::Event;
use crate::models::stats::{MonthStats, MonthlySummary};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// "YYYY-MM" key of a calendar day.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Bucket events by the month of their timestamp.
pub fn group_by_month(events: &[Event]) -> BTreeMap<(i32, u32), Vec<&Event>> {
    let mut buckets: BTreeMap<(i32, u32), Vec<&Event>> = BTreeMap::new();
    for ev in events {
        let d = ev.date();
        buckets.entry((d.year(), d.month())).or_default().push(ev);
    }
    buckets
}

/// Per-month totals, most recent month first.
///
/// Days are built per user, so two employees scanning on the same date
/// count as two worked days.
pub fn monthly_summaries(events: &[Event]) -> Vec<MonthlySummary> {
    group_by_month(events)
        .into_iter()
        .rev()
        .map(|((year, month), bucket)| {
            let days = fold_user_days(bucket);

            let total_hours: f64 = days.values().map(|d| d.worked_hours()).sum();
            let days_worked = days.values().filter(|d| d.is_complete()).count();
            let avg_hours_per_day = if days_worked > 0 {
                total_hours / days_worked as f64
            } else {
                0.0
            };

            MonthlySummary {
                month_key: format!("{:04}-{:02}", year, month),
                year,
                month,
                total_hours,
                days_worked,
                avg_hours_per_day,
            }
        })
        .collect()
}

/// Hours and complete days of `user_id` in the month containing `today`.
pub fn current_month_stats(user_id: &str, events: &[Event], today: NaiveDate) -> MonthStats {
    let days: Vec<_> = group_by_day(user_id, events)
        .into_iter()
        .filter(|d| d.date.year() == today.year() && d.date.month() == today.month())
        .collect();

    MonthStats {
        month_key: month_key(today),
        total: days.iter().map(|d| d.worked_hours()).sum(),
        days_worked: days.iter().filter(|d| d.is_complete()).count(),
    }
}
