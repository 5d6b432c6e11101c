use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::core::calculator::duration::format_hours_decimal;
use crate::core::logic::Core;
use crate::db::absences::load_absences;
use crate::db::companies::load_company;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::load_events;
use crate::db::users::{
    hard_delete_user, load_all_users, load_user, load_users, require_user, soft_delete_user,
    upsert_user,
};
use crate::errors::{AppError, AppResult};
use crate::models::user::{Role, User};
use crate::ui::messages::{header, success, warning};
use crate::utils::colors::{GREY, RESET, color_for_percent, color_for_status};
use crate::utils::date::today;
use crate::utils::formatting::{bold, progress_bar};
use crate::utils::table::Table;
use rusqlite::Connection;

/// Handle `user add|list|show|set|delete`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::User { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            UserAction::Add {
                id,
                name,
                email,
                admin,
                company,
                weekly_hours,
                working_days,
                vacation_days,
            } => {
                if load_user(&pool.conn, id)?.is_some() {
                    return Err(AppError::InvalidValue(format!("user '{}' already exists", id)));
                }

                let mut user = User::new(id, name, email);
                if *admin {
                    user.role = Role::Admin;
                }
                if let Some(cid) = company {
                    if load_company(&pool.conn, cid)?.is_none() {
                        return Err(AppError::CompanyNotFound(cid.clone()));
                    }
                    user.company_id = Some(cid.clone());
                }
                user.weekly_hours = weekly_hours.unwrap_or(cfg.default_weekly_hours);
                user.working_days_per_week = working_days.unwrap_or(cfg.default_working_days);
                user.total_vacation_days = vacation_days.unwrap_or(cfg.default_vacation_days);

                upsert_user(&pool.conn, &user)?;
                log_op(&pool.conn, "user_add", &user.id, &format!("Added {}", user.name));
                success(format!("User {} ({}) added.", user.name, user.id));
            }

            UserAction::List { all, company } => {
                let users = if *all {
                    load_all_users(&pool.conn)?
                } else {
                    load_users(&pool.conn)?
                };
                print_users(&users, company.as_deref());
            }

            UserAction::Show { id } => {
                let user = require_user(&pool.conn, id)?;
                print_profile(&pool.conn, &user)?;
            }

            UserAction::Set {
                id,
                name,
                email,
                role,
                weekly_hours,
                working_days,
                vacation_days,
            } => {
                let mut user = require_user(&pool.conn, id)?;

                if let Some(n) = name {
                    user.name = n.trim().to_string();
                }
                if let Some(e) = email {
                    user.email = e.trim().to_lowercase();
                }
                if let Some(r) = role {
                    user.role = Role::from_code(r).ok_or_else(|| AppError::InvalidRole(r.clone()))?;
                }
                if let Some(h) = weekly_hours {
                    user.weekly_hours = *h;
                }
                if let Some(d) = working_days {
                    user.working_days_per_week = *d;
                }
                if let Some(v) = vacation_days {
                    user.total_vacation_days = *v;
                }

                upsert_user(&pool.conn, &user)?;
                log_op(&pool.conn, "user_set", &user.id, "Profile updated");
                success(format!("User {} updated.", user.id));
            }

            UserAction::Delete { id, hard } => {
                if *hard {
                    hard_delete_user(&mut pool.conn, id)?;
                    log_op(&pool.conn, "user_del", id, "Hard delete");
                    success(format!("User {} and all its records deleted.", id));
                } else {
                    soft_delete_user(&pool.conn, id)?;
                    log_op(&pool.conn, "user_del", id, "Soft delete");
                    success(format!("User {} deactivated.", id));
                }
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

fn print_users(users: &[User], company: Option<&str>) {
    let mut table = Table::new(&["ID", "Name", "Email", "Role", "Company", "Hours/wk", "Days/wk"]);

    for u in users
        .iter()
        .filter(|u| company.is_none_or(|c| u.company_id.as_deref() == Some(c)))
    {
        let name = if u.is_deleted {
            format!("{GREY}{} (deleted){RESET}", u.name)
        } else {
            u.name.clone()
        };
        table.add_row(vec![
            u.id.clone(),
            name,
            u.email.clone(),
            u.role.to_db_str().to_string(),
            u.company_id.clone().unwrap_or_else(|| "-".to_string()),
            format!("{}", u.weekly_hours),
            u.working_days_per_week.to_string(),
        ]);
    }

    if table.rows.is_empty() {
        println!("No users found.");
    } else {
        print!("{}", table.render());
    }
}

fn print_profile(conn: &Connection, user: &User) -> AppResult<()> {
    let events = load_events(conn, Some(&user.id))?;
    let absences = load_absences(conn, Some(&user.id))?;
    let ov = Core::build_overview(user, &events, &absences, today());

    header(format!("{} ({})", ov.name, ov.user_id));
    println!("{:<14} {}", "Email:", user.email);
    println!("{:<14} {}", "Role:", user.role.to_db_str());
    if let Some(c) = &user.company_id {
        println!("{:<14} {}", "Company:", c);
    }
    if user.is_deleted {
        println!(
            "{:<14} {GREY}deleted {}{RESET}",
            "State:",
            user.deleted_at.as_deref().unwrap_or("")
        );
    }

    let color = color_for_status(&ov.status);
    println!("{:<14} {}{} {}{RESET}", "Status:", color, ov.status.icon(), ov.status.describe());

    let pc = color_for_percent(ov.weekly.percent);
    println!(
        "{:<14} {} / {}  {}{}{RESET}",
        "This week:",
        format_hours_decimal(ov.weekly.total),
        format_hours_decimal(ov.weekly.target),
        pc,
        progress_bar(ov.weekly.percent, 20)
    );
    println!(
        "{:<14} {} in {} complete days ({})",
        "This month:",
        format_hours_decimal(ov.month.total),
        ov.month.days_worked,
        ov.month.month_key
    );
    println!(
        "{:<14} {} used of {}, {} remaining",
        "Vacations:",
        ov.vacations.used,
        ov.vacations.total,
        bold(&ov.vacations.remaining.to_string())
    );

    Ok(())
}
