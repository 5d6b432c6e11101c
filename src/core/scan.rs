use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_event, load_events};
use crate::db::users::load_user;
use crate::errors::{AppError, AppResult};
use crate::models::event::Event;
use crate::models::event_type::EventType;
use crate::ui::messages::{success, warning};
use chrono::{DateTime, FixedOffset};

/// Maximum scans per user and day: one IN and one OUT.
pub const MAX_SCANS_PER_DAY: usize = 2;

/// Decide the kind of the next scan from the scans already done today.
pub fn next_event_type(
    user_id: &str,
    events: &[Event],
    now: &DateTime<FixedOffset>,
) -> Option<EventType> {
    let today = now.date_naive();
    let done = events
        .iter()
        .filter(|e| e.user_id == user_id && e.date() == today)
        .count();

    match done {
        0 => Some(EventType::In),
        n if n < MAX_SCANS_PER_DAY => Some(EventType::Out),
        _ => None,
    }
}

/// High-level business logic for the `scan` command.
pub struct ScanLogic;

impl ScanLogic {
    pub fn apply(
        pool: &mut DbPool,
        user_id: &str,
        location: &str,
        now: DateTime<FixedOffset>,
    ) -> AppResult<Event> {
        let location = location.trim();
        if location.is_empty() {
            return Err(AppError::InvalidValue("empty location code".into()));
        }

        let user = load_user(&pool.conn, user_id)?
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))?;
        if user.is_deleted {
            return Err(AppError::UserDeleted(user.id));
        }

        let events = load_events(&pool.conn, Some(&user.id))?;
        let kind = next_event_type(&user.id, &events, &now).ok_or_else(|| {
            warning(format!("{} already has an IN and an OUT today.", user.name));
            AppError::DayCompleted(now.date_naive().to_string())
        })?;

        let mut ev = Event::new(&user.id, &user.name, now, kind, location);
        ev.id = insert_event(&pool.conn, &ev)?;

        if let Err(e) = ttlog(
            &pool.conn,
            "scan",
            &user.id,
            &format!("{} at {} ({})", kind.et_as_str(), ev.timestamp_str(), location),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }

        match kind {
            EventType::In => success(format!("Entry registered for {} at {}", user.name, ev.time_str())),
            EventType::Out => success(format!("Exit registered for {} at {}", user.name, ev.time_str())),
        }

        Ok(ev)
    }
}
