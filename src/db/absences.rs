use crate::errors::{AppError, AppResult};
use crate::models::absence::Absence;
use chrono::NaiveDate;
use rusqlite::{Connection, Row, params};

fn map_absence(row: &Row) -> rusqlite::Result<Absence> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(Absence {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date,
        predefined_reason: row.get("predefined_reason")?,
        custom_reason: row.get("custom_reason")?,
        created_at: row.get("created_at")?,
    })
}

fn collect(conn: &Connection, sql: &str, args: &[&dyn rusqlite::ToSql]) -> AppResult<Vec<Absence>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(args, map_absence)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Store a new absence and return its id. The custom reason is dropped
/// unless the predefined reason is "Other".
pub fn insert_absence(conn: &Connection, abs: &Absence) -> AppResult<i64> {
    if abs.predefined_reason.trim().is_empty() {
        return Err(AppError::InvalidValue("absence reason cannot be empty".into()));
    }

    let custom = abs
        .custom_reason
        .as_ref()
        .filter(|_| crate::models::absence::is_other_reason(&abs.predefined_reason));

    conn.execute(
        "INSERT INTO absences (user_id, date, predefined_reason, custom_reason, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            abs.user_id,
            abs.date.to_string(),
            abs.predefined_reason,
            custom,
            abs.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Absences, optionally scoped to one user, newest date first.
pub fn load_absences(conn: &Connection, user_id: Option<&str>) -> AppResult<Vec<Absence>> {
    match user_id {
        Some(uid) => collect(
            conn,
            "SELECT * FROM absences WHERE user_id = ?1 ORDER BY date DESC, id ASC",
            &[&uid],
        ),
        None => collect(conn, "SELECT * FROM absences ORDER BY date DESC, id ASC", &[]),
    }
}

pub fn load_absences_by_date(conn: &Connection, date: &NaiveDate) -> AppResult<Vec<Absence>> {
    collect(
        conn,
        "SELECT * FROM absences WHERE date = ?1 ORDER BY id ASC",
        &[&date.to_string()],
    )
}

pub fn delete_absence(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM absences WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::AbsenceNotFound(id));
    }
    Ok(())
}
