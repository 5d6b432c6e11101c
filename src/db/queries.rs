use crate::errors::{AppError, AppResult};
use crate::models::event::{Event, parse_timestamp};
use crate::models::event_type::EventType;
use rusqlite::params;
use rusqlite::{Connection, Result, Row};

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> Result<Event> {
    let ts_str: String = row.get("timestamp")?;
    let timestamp = parse_timestamp(&ts_str).map_err(conversion_error)?;

    let kind_str: String = row.get("kind")?;
    let kind = EventType::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(AppError::InvalidEventType(kind_str.clone())))?;

    Ok(Event {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        user_name: row.get("user_name")?,
        timestamp,
        kind,
        location: row.get("location")?,
    })
}

/// Append one event, returning its row id.
pub fn insert_event(conn: &Connection, ev: &Event) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO events (user_id, user_name, timestamp, kind, location)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ev.user_id,
            ev.user_name,
            ev.timestamp_str(),
            ev.kind.to_db_str(),
            ev.location,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All events, optionally scoped to one user, newest first.
///
/// Ordering is done on the parsed instants: the stored strings may carry
/// different offsets and do not sort chronologically as text.
pub fn load_events(conn: &Connection, user_id: Option<&str>) -> AppResult<Vec<Event>> {
    let mut out = Vec::new();

    match user_id {
        Some(uid) => {
            let mut stmt = conn.prepare("SELECT * FROM events WHERE user_id = ?1")?;
            let rows = stmt.query_map([uid], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare("SELECT * FROM events")?;
            let rows = stmt.query_map([], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
    Ok(out)
}
