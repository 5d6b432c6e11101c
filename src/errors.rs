//! Unified application error type.
//! The store, CLI and export layers all return AppError; the time accounting
//! core never fails and does not use it.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid event type: {0}")]
    InvalidEventType(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User {0} has been deleted")]
    UserDeleted(String),

    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    #[error("Vacation not found: {0}")]
    VacationNotFound(String),

    #[error("Absence not found: {0}")]
    AbsenceNotFound(i64),

    #[error("Workday already completed for {0}")]
    DayCompleted(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
