/// ANSI color helper utilities for terminal output.
use crate::models::status::EmployeeStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Returns formatted grey text for empty / placeholder values.
///
/// Example:
/// `colorize_optional("--:--")` → "<grey>--:--<reset>"
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--:--" || v == crate::core::calculator::duration::OPEN_SESSION {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

pub fn colorize_in_out(value: &str, is_in: bool) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" {
        return format!("{GREY}{value}{RESET}");
    }

    if is_in {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{RED}{value}{RESET}")
    }
}

/// Weekly completion color:
/// \>= 100 → green
/// \>= 50  → yellow
/// otherwise red
pub fn color_for_percent(percent: f64) -> &'static str {
    if percent >= 100.0 {
        GREEN
    } else if percent >= 50.0 {
        YELLOW
    } else {
        RED
    }
}

pub fn color_for_status(status: &EmployeeStatus) -> &'static str {
    match status {
        EmployeeStatus::Working => GREEN,
        EmployeeStatus::OnVacation => YELLOW,
        EmployeeStatus::Absent { .. } => CYAN,
        EmployeeStatus::Inactive => GREY,
    }
}
