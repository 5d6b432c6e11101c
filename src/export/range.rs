// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::utils::date::month_last_day;
use chrono::{Datelike, NaiveDate};

/// Date bounds of a report or export. `None` leaves that side open.
pub type Bounds = (Option<NaiveDate>, Option<NaiveDate>);

fn invalid(msg: &str, raw: &str) -> AppError {
    AppError::InvalidRange(format!("{msg}: '{raw}'"))
}

/// First and last day covered by one period expression.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if !p.is_ascii() {
        return Err(invalid("unsupported range format", p));
    }

    match p.len() {
        4 => {
            if !p.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("invalid year", p));
            }
            let y: i32 = p.parse().map_err(|_| invalid("invalid year", p))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid("invalid year", p))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid("invalid year", p))?;
            Ok((d1, d2))
        }
        7 => {
            let b = p.as_bytes();
            if b[4] != b'-' || !b[..4].iter().chain(&b[5..]).all(u8::is_ascii_digit) {
                return Err(invalid("invalid month", p));
            }
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid("invalid month", p))?;
            let last = month_last_day(d1.year(), d1.month())
                .ok_or_else(|| invalid("invalid month", p))?;
            let d2 = d1
                .with_day(last)
                .ok_or_else(|| invalid("invalid month", p))?;
            Ok((d1, d2))
        }
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid("invalid date", p))?;
            Ok((d, d))
        }
        _ => Err(invalid("unsupported range format", p)),
    }
}

/// Parse `--range`.
///
/// - `all` → no bounds
/// - a single period (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`) → that period
/// - `START:END` with periods on both sides, e.g. `2024-01:2024-03`
/// - `START:` or `:END` → open on the missing side
pub fn parse_range(r: &str) -> AppResult<Bounds> {
    let r = r.trim();
    if r.eq_ignore_ascii_case("all") {
        return Ok((None, None));
    }

    match r.split_once(':') {
        Some((start_raw, end_raw)) => {
            let start = start_raw.trim();
            let end = end_raw.trim();

            let lower = if start.is_empty() {
                None
            } else {
                Some(period_bounds(start)?.0)
            };
            let upper = if end.is_empty() {
                None
            } else {
                Some(period_bounds(end)?.1)
            };

            if let (Some(lo), Some(hi)) = (lower, upper)
                && lo > hi
            {
                return Err(invalid("start is after end", r));
            }
            Ok((lower, upper))
        }
        None => {
            let (d1, d2) = period_bounds(r)?;
            Ok((Some(d1), Some(d2)))
        }
    }
}

/// Parse an optional `--range`, where `None` means everything.
pub fn parse_optional_range(r: Option<&String>) -> AppResult<Bounds> {
    match r {
        Some(s) => parse_range(s),
        None => Ok((None, None)),
    }
}

/// Human title for a range, used in PDF headers.
pub fn describe_range(bounds: &Bounds) -> String {
    match bounds {
        (None, None) => "all records".to_string(),
        (Some(s), None) => format!("from {}", s),
        (None, Some(e)) => format!("until {}", e),
        (Some(s), Some(e)) if s == e => format!("{}", s),
        (Some(s), Some(e)) => format!("{} - {}", s, e),
    }
}
