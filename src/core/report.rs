//! Reporting helpers: date-range filtering, per-day report rows and the
//! merged work history (scans + absences).

use crate::core::calculator::duration::format_hours_decimal;
use crate::core::calculator::grouping::{fold_days, group_by_day};
use crate::models::absence::Absence;
use crate::models::day_group::{DayGroup, HistoryEntry};
use crate::models::event::Event;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Keep events inside `[start 00:00:00.000, end 23:59:59.999]`, compared on
/// each timestamp's own wall clock. A missing bound leaves that side open.
pub fn filter_by_date_range(
    events: &[Event],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<Event> {
    if start.is_none() && end.is_none() {
        return events.to_vec();
    }

    let lower: Option<NaiveDateTime> = start.map(|d| d.and_time(NaiveTime::MIN));
    let upper: Option<NaiveDateTime> = end.and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999));

    events
        .iter()
        .filter(|e| {
            let local = e.timestamp.naive_local();
            lower.is_none_or(|lo| local >= lo) && upper.is_none_or(|hi| local <= hi)
        })
        .cloned()
        .collect()
}

/// Printable line of a detailed report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub date: String,
    pub entry: String,
    pub exit: String,
    pub hours: f64,
}

impl ReportRow {
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.entry.clone(),
            self.exit.clone(),
            format_hours_decimal(self.hours),
        ]
    }
}

pub const REPORT_HEADERS: [&str; 4] = ["Date", "In", "Out", "Hours"];

fn fmt_time(day: &DayGroup, out: bool) -> String {
    let ts = if out { day.out_ts } else { day.in_ts };
    ts.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Rows for an already user-filtered event list, oldest day first, plus
/// the total of all rows.
pub fn report_rows(events: &[Event]) -> (Vec<ReportRow>, f64) {
    let rows: Vec<ReportRow> = fold_days(events)
        .values()
        .map(|day| ReportRow {
            date: day.date.format("%Y-%m-%d").to_string(),
            entry: fmt_time(day, false),
            exit: fmt_time(day, true),
            hours: day.worked_hours(),
        })
        .collect();

    let total = rows.iter().map(|r| r.hours).sum();
    (rows, total)
}

/// Days with scans plus absences on days without scans, newest first.
pub fn work_history(user_id: &str, events: &[Event], absences: &[Absence]) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = group_by_day(user_id, events)
        .into_iter()
        .map(HistoryEntry::Worked)
        .collect();

    for abs in absences.iter().filter(|a| a.user_id == user_id) {
        if !entries.iter().any(|e| e.date() == abs.date) {
            entries.push(HistoryEntry::Absent(abs.clone()));
        }
    }

    entries.sort_by_key(|e| std::cmp::Reverse(e.date()));
    entries
}
