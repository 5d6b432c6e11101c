use super::event_type::EventType;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

/// A single IN/OUT scan. The timestamp keeps the UTC offset it was
/// recorded with, so the calendar day is the one the employee saw.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Event {
    pub id: i64,
    pub user_id: String,
    pub user_name: String,
    pub timestamp: DateTime<FixedOffset>, // ⇔ events.timestamp (TEXT, RFC 3339)
    pub kind: EventType,                  // ⇔ events.kind ('IN' | 'OUT')
    pub location: String,                 // ⇔ events.location (scanned code)
}

impl Event {
    /// Builds an event that has not been persisted yet (`id = 0`).
    pub fn new(
        user_id: &str,
        user_name: &str,
        timestamp: DateTime<FixedOffset>,
        kind: EventType,
        location: &str,
    ) -> Self {
        Self {
            id: 0,
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            timestamp,
            kind,
            location: location.to_string(),
        }
    }

    /// Calendar day of the event in its own offset.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn date_str(&self) -> String {
        self.date().format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }

    pub fn timestamp_str(&self) -> String {
        self.timestamp.to_rfc3339()
    }
}

/// Parse an ISO-8601 / RFC 3339 timestamp, keeping its offset.
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s.trim()).map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}
