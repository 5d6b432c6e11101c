use crate::cli::parser::{AbsenceAction, Commands};
use crate::config::Config;
use crate::db::absences::{delete_absence, insert_absence, load_absences, load_absences_by_date};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::users::require_user;
use crate::errors::{AppError, AppResult};
use crate::models::absence::{Absence, PREDEFINED_REASONS, is_other_reason};
use crate::ui::messages::{info, success, warning};
use crate::utils::date::parse_date;
use crate::utils::table::Table;

/// Handle `absence add|list|remove`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Absence { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            AbsenceAction::Add {
                user,
                date,
                reason,
                custom,
            } => {
                let u = require_user(&pool.conn, user)?;
                let day = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;

                if !PREDEFINED_REASONS
                    .iter()
                    .any(|r| r.eq_ignore_ascii_case(reason.trim()))
                {
                    info(format!("Custom reason '{}' stored as typed.", reason));
                }
                if is_other_reason(reason) && custom.is_none() {
                    warning("Reason is 'Other' but no --custom text was given.");
                }

                let abs = Absence::new(&u.id, day, reason.trim(), custom.as_deref());
                let id = insert_absence(&pool.conn, &abs)?;

                if let Err(e) = ttlog(
                    &pool.conn,
                    "absence_add",
                    &u.id,
                    &format!("#{} {} {}", id, day, abs.display_reason()),
                ) {
                    warning(format!("Failed to write internal log: {}", e));
                }
                success(format!(
                    "Absence #{} recorded for {} on {}: {}",
                    id,
                    u.name,
                    day,
                    abs.display_reason()
                ));
            }

            AbsenceAction::List { user, date } => {
                let mut list = match date {
                    Some(d) => {
                        let day = parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?;
                        load_absences_by_date(&pool.conn, &day)?
                    }
                    None => load_absences(&pool.conn, user.as_deref())?,
                };
                if let Some(uid) = user {
                    list.retain(|a| &a.user_id == uid);
                }

                if list.is_empty() {
                    println!("No absences found.");
                    return Ok(());
                }

                let mut table = Table::new(&["ID", "User", "Date", "Reason"]);
                for a in &list {
                    table.add_row(vec![
                        a.id.to_string(),
                        a.user_id.clone(),
                        a.date.to_string(),
                        a.display_reason(),
                    ]);
                }
                print!("{}", table.render());
            }

            AbsenceAction::Remove { id } => {
                delete_absence(&pool.conn, *id)?;
                if let Err(e) = ttlog(&pool.conn, "absence_del", &id.to_string(), "Removed") {
                    warning(format!("Failed to write internal log: {}", e));
                }
                success(format!("Absence #{} removed.", id));
            }
        }
    }
    Ok(())
}
