use super::status::EmployeeStatus;
use chrono::NaiveDate;
use serde::Serialize;

/// Hours worked in the current Monday..Sunday week against the quota.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyStats {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total: f64,
    pub target: f64,
    pub percent: f64,
    pub on_vacation: bool,
}

/// Totals for the month containing "today".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthStats {
    pub month_key: String,
    pub total: f64,
    pub days_worked: usize,
}

/// One month bucket of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub month_key: String, // "YYYY-MM"
    pub year: i32,
    pub month: u32,
    pub total_hours: f64,
    pub days_worked: usize,
    pub avg_hours_per_day: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacationSummary {
    pub total: i64,
    pub used: i64,
    pub remaining: i64,
}

/// Everything the dashboard shows for one employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeOverview {
    pub user_id: String,
    pub name: String,
    pub status: EmployeeStatus,
    pub weekly: WeeklyStats,
    pub month: MonthStats,
    pub vacations: VacationSummary,
}
