use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::core::report::filter_by_date_range;
use crate::db::absences::load_absences;
use crate::db::pool::DbPool;
use crate::db::queries::load_events;
use crate::db::users::{load_users, require_user};
use crate::errors::{AppError, AppResult};
use crate::models::stats::EmployeeOverview;
use crate::ui::messages::header;
use crate::utils::colors::{RESET, color_for_percent, color_for_status};
use crate::utils::date::{parse_date, today};
use crate::utils::formatting::hours_short;
use crate::utils::table::Table;

/// Handle the `status` command: one user, or the whole active staff.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { user, date } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        let day = match date {
            Some(d) => parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => today(),
        };

        let users = match user {
            Some(id) => vec![require_user(&pool.conn, id)?],
            None => load_users(&pool.conn)?,
        };
        if users.is_empty() {
            println!("No users found.");
            return Ok(());
        }

        // scans after the evaluated day must not change its status
        let events = filter_by_date_range(&load_events(&pool.conn, user.as_deref())?, None, Some(day));
        let absences = load_absences(&pool.conn, user.as_deref())?;

        let overviews: Vec<EmployeeOverview> = users
            .iter()
            .map(|u| Core::build_overview(u, &events, &absences, day))
            .collect();

        header(format!("Status on {}", day));
        print_overviews(&overviews);
    }
    Ok(())
}

fn print_overviews(overviews: &[EmployeeOverview]) {
    let mut table = Table::new(&["ID", "Name", "Status", "Week", "%", "Month", "Vacation left"]);

    for ov in overviews {
        let sc = color_for_status(&ov.status);
        let pc = color_for_percent(ov.weekly.percent);
        table.add_row(vec![
            ov.user_id.clone(),
            ov.name.clone(),
            format!("{}{} {}{RESET}", sc, ov.status.icon(), ov.status.describe()),
            format!(
                "{}/{}",
                hours_short(ov.weekly.total),
                hours_short(ov.weekly.target)
            ),
            format!("{}{:.0}%{RESET}", pc, ov.weekly.percent),
            hours_short(ov.month.total),
            ov.vacations.remaining.to_string(),
        ]);
    }

    print!("{}", table.render());
}
