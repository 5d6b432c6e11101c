//! Time utilities: parsing the optional `--at` timestamp of a scan.

use crate::errors::AppResult;
use crate::models::event::parse_timestamp;
use chrono::{DateTime, FixedOffset, Local};

/// Parsed timestamp, or the current local time when none is given.
pub fn timestamp_or_now(input: Option<&String>) -> AppResult<DateTime<FixedOffset>> {
    match input {
        Some(s) => parse_timestamp(s),
        None => Ok(Local::now().fixed_offset()),
    }
}
