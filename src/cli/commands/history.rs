use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::duration::format_duration;
use crate::core::report::{filter_by_date_range, work_history};
use crate::db::absences::load_absences;
use crate::db::pool::DbPool;
use crate::db::queries::load_events;
use crate::db::users::require_user;
use crate::errors::AppResult;
use crate::export::range::{describe_range, parse_optional_range};
use crate::models::day_group::HistoryEntry;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, RESET, colorize_in_out, colorize_optional};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { user, range } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let u = require_user(&pool.conn, user)?;
        let (start, end) = parse_optional_range(range.as_ref())?;

        let events = filter_by_date_range(&load_events(&pool.conn, Some(&u.id))?, start, end);
        let mut absences = load_absences(&pool.conn, Some(&u.id))?;
        absences.retain(|a| start.is_none_or(|s| a.date >= s) && end.is_none_or(|e| a.date <= e));

        header(format!("History: {} ({})", u.name, describe_range(&(start, end))));

        let entries = work_history(&u.id, &events, &absences);
        if entries.is_empty() {
            println!("No records found.");
            return Ok(());
        }

        let mut table = Table::new(&["Date", "In", "Out", "Worked"]);
        for entry in &entries {
            match entry {
                HistoryEntry::Worked(day) => {
                    let fmt = |ts: Option<chrono::DateTime<chrono::FixedOffset>>, is_in: bool| {
                        let s = ts
                            .map(|t| t.format("%H:%M").to_string())
                            .unwrap_or_else(|| "--:--".to_string());
                        colorize_in_out(&s, is_in)
                    };
                    table.add_row(vec![
                        day.date.to_string(),
                        fmt(day.in_ts, true),
                        fmt(day.out_ts, false),
                        colorize_optional(&format_duration(day.hours())),
                    ]);
                }
                HistoryEntry::Absent(abs) => {
                    table.add_row(vec![
                        abs.date.to_string(),
                        String::new(),
                        String::new(),
                        format!("{CYAN}Absent: {}{RESET}", abs.display_reason()),
                    ]);
                }
            }
        }
        print!("{}", table.render());
    }
    Ok(())
}
