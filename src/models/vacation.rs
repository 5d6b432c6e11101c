use chrono::NaiveDate;
use serde::Serialize;

/// Inclusive vacation interval owned by a user.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VacationRange {
    pub id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl VacationRange {
    pub fn new(id: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: id.to_string(),
            start,
            end,
        }
    }

    /// A range with `start > end` contains nothing.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of calendar days covered (0 for malformed ranges).
    pub fn days(&self) -> i64 {
        if self.start > self.end {
            0
        } else {
            (self.end - self.start).num_days() + 1
        }
    }
}
