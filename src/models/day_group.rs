use super::absence::Absence;
use crate::core::calculator::duration::calculate_duration_hours;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

/// IN/OUT pair of one user on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    #[serde(rename = "in")]
    pub in_ts: Option<DateTime<FixedOffset>>,
    #[serde(rename = "out")]
    pub out_ts: Option<DateTime<FixedOffset>>,
}

impl DayGroup {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            in_ts: None,
            out_ts: None,
        }
    }

    /// Elapsed hours, `None` while either endpoint is missing.
    pub fn hours(&self) -> Option<f64> {
        calculate_duration_hours(self.in_ts.as_ref(), self.out_ts.as_ref())
    }

    /// Hours for aggregation: open days count as zero.
    pub fn worked_hours(&self) -> f64 {
        self.hours().unwrap_or(0.0)
    }

    pub fn is_complete(&self) -> bool {
        self.in_ts.is_some() && self.out_ts.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.in_ts.is_some() && self.out_ts.is_none()
    }
}

/// One line of an employee's history: a day with scans or a declared absence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HistoryEntry {
    Worked(DayGroup),
    Absent(Absence),
}

impl HistoryEntry {
    pub fn date(&self) -> NaiveDate {
        match self {
            HistoryEntry::Worked(day) => day.date,
            HistoryEntry::Absent(abs) => abs.date,
        }
    }
}
