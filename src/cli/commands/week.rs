use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::duration::{format_duration, format_hours_decimal};
use crate::core::calculator::grouping::group_by_day;
use crate::core::calculator::leave::{find_absence, is_on_vacation};
use crate::core::calculator::weekly::weekly_stats;
use crate::db::absences::load_absences;
use crate::db::pool::DbPool;
use crate::db::queries::load_events;
use crate::db::users::require_user;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::header;
use crate::utils::colors::{RESET, YELLOW, color_for_percent, colorize_optional};
use crate::utils::date::{parse_date, today};
use crate::utils::formatting::{progress_bar, separator};
use chrono::Days;

/// Handle the `week` command: hours of each day Monday..Sunday and the quota.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Week { user, date } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let u = require_user(&pool.conn, user)?;

        let day = match date {
            Some(d) => parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => today(),
        };

        let events = load_events(&pool.conn, Some(&u.id))?;
        let absences = load_absences(&pool.conn, Some(&u.id))?;
        let on_vacation = is_on_vacation(&u.vacations, day);
        let stats = weekly_stats(&u, &events, on_vacation, &absences, day);

        header(format!(
            "Weekly hours: {} ({} - {})",
            u.name, stats.week_start, stats.week_end
        ));

        let days = group_by_day(&u.id, &events);
        for offset in 0..7 {
            let d = stats.week_start + Days::new(offset);
            let worked = days.iter().find(|g| g.date == d);

            let detail = if let Some(abs) = find_absence(&u.id, d, &absences) {
                format!("Absent: {}", abs.display_reason())
            } else if u.vacations.iter().any(|v| v.contains(d)) {
                "Vacation".to_string()
            } else {
                match worked {
                    Some(g) => colorize_optional(&format_duration(g.hours())),
                    None => colorize_optional("--:--"),
                }
            };

            println!("{:<10} {}  {}", d.format("%A").to_string(), d, detail);
        }

        println!("{}", separator(&cfg.separator_char, 40));
        if stats.on_vacation {
            println!("{YELLOW}On vacation: no hours expected this week.{RESET}");
        }
        println!(
            "Worked: {}  Target: {}",
            format_hours_decimal(stats.total),
            format_hours_decimal(stats.target)
        );
        println!(
            "{}{}{RESET}",
            color_for_percent(stats.percent),
            progress_bar(stats.percent, 30)
        );
    }
    Ok(())
}
