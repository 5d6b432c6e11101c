use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn ensure_migrations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            name       TEXT NOT NULL,
            applied_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Users, their vacation ranges and companies.
fn create_directory_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            tax_id      TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL,
            created_by  TEXT
        );

        CREATE TABLE IF NOT EXISTS users (
            id                    TEXT PRIMARY KEY,
            name                  TEXT NOT NULL,
            email                 TEXT NOT NULL UNIQUE,
            role                  TEXT NOT NULL DEFAULT 'EMPLOYEE' CHECK(role IN ('EMPLOYEE','ADMIN')),
            company_id            TEXT REFERENCES companies(id) ON DELETE SET NULL,
            weekly_hours          REAL NOT NULL DEFAULT 40,
            working_days_per_week INTEGER NOT NULL DEFAULT 5,
            total_vacation_days   INTEGER NOT NULL DEFAULT 30,
            is_deleted            INTEGER NOT NULL DEFAULT 0,
            deleted_at            TEXT
        );

        CREATE TABLE IF NOT EXISTS vacations (
            id       TEXT PRIMARY KEY,
            user_id  TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            start    TEXT NOT NULL,
            end      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_vacations_user ON vacations(user_id);
        "#,
    )?;
    Ok(())
}

/// Attendance scans and declared absences.
fn create_attendance_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            user_name  TEXT NOT NULL,
            timestamp  TEXT NOT NULL,
            kind       TEXT NOT NULL CHECK(kind IN ('IN','OUT')),
            location   TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_events_user_ts ON events(user_id, timestamp);

        CREATE TABLE IF NOT EXISTS absences (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id           TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            date              TEXT NOT NULL,
            predefined_reason TEXT NOT NULL,
            custom_reason     TEXT,
            created_at        TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_absences_user_date ON absences(user_id, date);
        "#,
    )?;
    Ok(())
}

type Migration = (i64, &'static str, fn(&Connection) -> Result<()>);

const MIGRATIONS: &[Migration] = &[
    (1, "directory tables", create_directory_tables),
    (2, "attendance tables", create_attendance_tables),
];

fn is_applied(conn: &Connection, version: i64) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT version FROM schema_migrations WHERE version = ?1",
            [version],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Apply every migration not yet recorded in `schema_migrations`.
/// Returns how many were applied.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;
    ensure_migrations_table(conn)?;

    let mut applied = 0;
    for (version, name, apply) in MIGRATIONS {
        if is_applied(conn, *version)? {
            continue;
        }

        apply(conn).map_err(|e| AppError::Migration(format!("{} ({}): {}", version, name, e)))?;

        conn.execute(
            "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
            params![version, name, chrono::Local::now().to_rfc3339()],
        )?;

        success(format!("Applied migration {}: {}", version, name));
        applied += 1;
    }

    Ok(applied)
}
