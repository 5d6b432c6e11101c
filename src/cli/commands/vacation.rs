use crate::cli::parser::{Commands, VacationAction};
use crate::config::Config;
use crate::core::calculator::leave::vacation_summary;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::users::{
    delete_vacation, insert_vacation, next_vacation_id, require_user, update_vacation,
};
use crate::errors::{AppError, AppResult};
use crate::models::vacation::VacationRange;
use crate::ui::messages::{header, success, warning};
use crate::utils::colors::{RED, RESET};
use crate::utils::date::{parse_date, today};
use crate::utils::table::Table;
use chrono::NaiveDate;
use rusqlite::Connection;

fn date_arg(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Handle `vacation add|edit|remove|list`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Vacation { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            VacationAction::Add { user, start, end } => {
                let u = require_user(&pool.conn, user)?;
                let id = next_vacation_id(&pool.conn, &u.id)?;
                let range = VacationRange::new(&id, date_arg(start)?, date_arg(end)?);

                insert_vacation(&pool.conn, &u.id, &range)?;
                log_op(
                    &pool.conn,
                    "vacation_add",
                    &u.id,
                    &format!("{} {}..{}", id, range.start, range.end),
                );
                success(format!(
                    "Vacation {} added for {}: {} days ({} - {}).",
                    id,
                    u.name,
                    range.days(),
                    range.start,
                    range.end
                ));
            }

            VacationAction::Edit {
                user,
                id,
                start,
                end,
            } => {
                let u = require_user(&pool.conn, user)?;
                let range = VacationRange::new(id, date_arg(start)?, date_arg(end)?);

                update_vacation(&pool.conn, &u.id, &range)?;
                log_op(
                    &pool.conn,
                    "vacation_edit",
                    &u.id,
                    &format!("{} {}..{}", id, range.start, range.end),
                );
                success(format!("Vacation {} updated.", id));
            }

            VacationAction::Remove { user, id } => {
                let u = require_user(&pool.conn, user)?;
                delete_vacation(&pool.conn, &u.id, id)?;
                log_op(&pool.conn, "vacation_del", &u.id, id);
                success(format!("Vacation {} removed.", id));
            }

            VacationAction::List { user } => {
                let u = require_user(&pool.conn, user)?;
                header(format!("Vacations: {}", u.name));

                if u.vacations.is_empty() {
                    println!("No vacations planned.");
                } else {
                    let now = today();
                    let mut table = Table::new(&["ID", "Start", "End", "Days", ""]);
                    for v in &u.vacations {
                        let marker = if v.contains(now) { "ongoing" } else { "" };
                        table.add_row(vec![
                            v.id.clone(),
                            v.start.to_string(),
                            v.end.to_string(),
                            v.days().to_string(),
                            marker.to_string(),
                        ]);
                    }
                    print!("{}", table.render());
                }

                let s = vacation_summary(&u);
                let remaining = if s.remaining < 0 {
                    format!("{RED}{}{RESET}", s.remaining)
                } else {
                    s.remaining.to_string()
                };
                println!(
                    "\nAllowance: {}  Planned: {}  Remaining: {}",
                    s.total, s.used, remaining
                );
            }
        }
    }
    Ok(())
}

fn log_op(conn: &Connection, op: &str, target: &str, msg: &str) {
    if let Err(e) = ttlog(conn, op, target, msg) {
        warning(format!("Failed to write internal log: {}", e));
    }
}
