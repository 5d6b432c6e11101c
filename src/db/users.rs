//! User profiles and their embedded vacation ranges.
//!
//! This is the validation boundary for profile data: the accounting core
//! trusts whatever it receives, so malformed quotas and inverted vacation
//! ranges are rejected here before they are stored.

use crate::errors::{AppError, AppResult};
use crate::models::user::{Role, User};
use crate::models::vacation::VacationRange;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_user(row: &Row) -> rusqlite::Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        role,
        company_id: row.get("company_id")?,
        vacations: Vec::new(),
        weekly_hours: row.get("weekly_hours")?,
        working_days_per_week: row.get("working_days_per_week")?,
        total_vacation_days: row.get("total_vacation_days")?,
        is_deleted: row.get::<_, i32>("is_deleted")? == 1,
        deleted_at: row.get("deleted_at")?,
    })
}

fn map_vacation(row: &Row) -> rusqlite::Result<VacationRange> {
    let parse = |col: &str| -> rusqlite::Result<NaiveDate> {
        let s: String = row.get(col)?;
        NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(s.clone())),
            )
        })
    };

    Ok(VacationRange {
        id: row.get("id")?,
        start: parse("start")?,
        end: parse("end")?,
    })
}

fn load_vacations(conn: &Connection, user_id: &str) -> AppResult<Vec<VacationRange>> {
    let mut stmt =
        conn.prepare("SELECT id, start, end FROM vacations WHERE user_id = ?1 ORDER BY start ASC")?;
    let rows = stmt.query_map([user_id], map_vacation)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn collect_users(conn: &Connection, sql: &str) -> AppResult<Vec<User>> {
    let mut users = {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], map_user)?;
        let mut v = Vec::new();
        for r in rows {
            v.push(r?);
        }
        v
    };

    for u in &mut users {
        u.vacations = load_vacations(conn, &u.id)?;
    }
    Ok(users)
}

/// Fetch one user (deleted or not) with its vacations.
pub fn load_user(conn: &Connection, id: &str) -> AppResult<Option<User>> {
    let user = conn
        .query_row("SELECT * FROM users WHERE id = ?1", [id], map_user)
        .optional()?;

    match user {
        Some(mut u) => {
            u.vacations = load_vacations(conn, &u.id)?;
            Ok(Some(u))
        }
        None => Ok(None),
    }
}

/// Like [`load_user`] but missing users are an error.
pub fn require_user(conn: &Connection, id: &str) -> AppResult<User> {
    load_user(conn, id)?.ok_or_else(|| AppError::UserNotFound(id.to_string()))
}

/// Active (not soft-deleted) users, ordered by name.
pub fn load_users(conn: &Connection) -> AppResult<Vec<User>> {
    collect_users(
        conn,
        "SELECT * FROM users WHERE is_deleted = 0 ORDER BY name COLLATE NOCASE ASC",
    )
}

/// Every user, including soft-deleted ones.
pub fn load_all_users(conn: &Connection) -> AppResult<Vec<User>> {
    collect_users(conn, "SELECT * FROM users ORDER BY name COLLATE NOCASE ASC")
}

pub fn validate_user(user: &User) -> AppResult<()> {
    if user.id.trim().is_empty() {
        return Err(AppError::InvalidValue("user id cannot be empty".into()));
    }
    if user.name.trim().is_empty() {
        return Err(AppError::InvalidValue("user name cannot be empty".into()));
    }
    if !user.email.contains('@') {
        return Err(AppError::InvalidValue(format!("invalid email '{}'", user.email)));
    }
    if !(user.weekly_hours > 0.0 && user.weekly_hours <= 168.0) {
        return Err(AppError::InvalidValue(format!(
            "weekly hours must be in (0, 168], got {}",
            user.weekly_hours
        )));
    }
    if !(1..=7).contains(&user.working_days_per_week) {
        return Err(AppError::InvalidValue(format!(
            "working days per week must be 1..=7, got {}",
            user.working_days_per_week
        )));
    }
    for v in &user.vacations {
        validate_vacation(v)?;
    }
    Ok(())
}

pub fn validate_vacation(v: &VacationRange) -> AppResult<()> {
    if v.start > v.end {
        return Err(AppError::InvalidRange(format!(
            "vacation starts on {} but ends on {}",
            v.start, v.end
        )));
    }
    Ok(())
}

/// Insert or update the profile row. Vacations are managed separately.
pub fn upsert_user(conn: &Connection, user: &User) -> AppResult<()> {
    validate_user(user)?;

    conn.execute(
        "INSERT INTO users (id, name, email, role, company_id, weekly_hours,
                            working_days_per_week, total_vacation_days, is_deleted, deleted_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            email = excluded.email,
            role = excluded.role,
            company_id = excluded.company_id,
            weekly_hours = excluded.weekly_hours,
            working_days_per_week = excluded.working_days_per_week,
            total_vacation_days = excluded.total_vacation_days,
            is_deleted = excluded.is_deleted,
            deleted_at = excluded.deleted_at",
        params![
            user.id,
            user.name,
            user.email,
            user.role.to_db_str(),
            user.company_id,
            user.weekly_hours,
            user.working_days_per_week,
            user.total_vacation_days,
            if user.is_deleted { 1 } else { 0 },
            user.deleted_at,
        ],
    )?;
    Ok(())
}

/// Flag the user as deleted; events, absences and vacations are kept.
pub fn soft_delete_user(conn: &Connection, id: &str) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE users SET is_deleted = 1, deleted_at = ?1 WHERE id = ?2",
        params![Local::now().to_rfc3339(), id],
    )?;
    if changed == 0 {
        return Err(AppError::UserNotFound(id.to_string()));
    }
    Ok(())
}

/// Remove the user and everything recorded for it.
pub fn hard_delete_user(conn: &mut Connection, id: &str) -> AppResult<()> {
    let tx = conn.transaction()?;

    tx.execute("DELETE FROM events WHERE user_id = ?1", [id])?;
    tx.execute("DELETE FROM absences WHERE user_id = ?1", [id])?;
    tx.execute("DELETE FROM vacations WHERE user_id = ?1", [id])?;
    let changed = tx.execute("DELETE FROM users WHERE id = ?1", [id])?;

    if changed == 0 {
        return Err(AppError::UserNotFound(id.to_string()));
    }

    tx.commit()?;
    Ok(())
}

pub fn insert_vacation(conn: &Connection, user_id: &str, v: &VacationRange) -> AppResult<()> {
    validate_vacation(v)?;
    conn.execute(
        "INSERT INTO vacations (id, user_id, start, end) VALUES (?1, ?2, ?3, ?4)",
        params![v.id, user_id, v.start.to_string(), v.end.to_string()],
    )?;
    Ok(())
}

pub fn update_vacation(conn: &Connection, user_id: &str, v: &VacationRange) -> AppResult<()> {
    validate_vacation(v)?;
    let changed = conn.execute(
        "UPDATE vacations SET start = ?1, end = ?2 WHERE id = ?3 AND user_id = ?4",
        params![v.start.to_string(), v.end.to_string(), v.id, user_id],
    )?;
    if changed == 0 {
        return Err(AppError::VacationNotFound(v.id.clone()));
    }
    Ok(())
}

pub fn delete_vacation(conn: &Connection, user_id: &str, id: &str) -> AppResult<()> {
    let changed = conn.execute(
        "DELETE FROM vacations WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    if changed == 0 {
        return Err(AppError::VacationNotFound(id.to_string()));
    }
    Ok(())
}

/// Next free vacation id for a user ("<user>-v<n>").
pub fn next_vacation_id(conn: &Connection, user_id: &str) -> AppResult<String> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM vacations WHERE user_id = ?1",
        [user_id],
        |row| row.get(0),
    )?;

    let mut n = count + 1;
    loop {
        let id = format!("{}-v{}", user_id, n);
        let exists: Option<String> = conn
            .query_row("SELECT id FROM vacations WHERE id = ?1", [&id], |row| row.get(0))
            .optional()?;
        if exists.is_none() {
            return Ok(id);
        }
        n += 1;
    }
}
