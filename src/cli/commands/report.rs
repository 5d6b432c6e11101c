use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::duration::format_hours_decimal;
use crate::core::calculator::monthly::{group_by_month, monthly_summaries};
use crate::core::report::{REPORT_HEADERS, filter_by_date_range, report_rows};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::load_events;
use crate::db::users::require_user;
use crate::errors::{AppError, AppResult};
use crate::export::range::{Bounds, describe_range, parse_optional_range};
use crate::export::{ensure_writable, export_monthly_pdf, export_report_pdf, resolve_output_path};
use crate::models::event::Event;
use crate::models::user::User;
use crate::ui::messages::{header, warning};
use crate::utils::date::month_name;
use crate::utils::table::Table;

/// Handle the `report` command (detailed or `--monthly`, optionally as PDF).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        user,
        range,
        monthly,
        pdf,
        force,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let u = require_user(&pool.conn, user)?;
        let bounds = parse_optional_range(range.as_ref())?;

        let events = filter_by_date_range(&load_events(&pool.conn, Some(&u.id))?, bounds.0, bounds.1);
        if events.is_empty() {
            warning(format!("No scans for {} in {}.", u.name, describe_range(&bounds)));
            return Ok(());
        }

        if *monthly {
            print_monthly(&u, &events);
        } else {
            print_detailed(&u, &bounds, &events);
        }

        if let Some(file) = pdf {
            let path = resolve_output_path(file)?;
            ensure_writable(&path, *force)?;

            if *monthly {
                let summaries = monthly_summaries(&events);
                let [summary] = summaries.as_slice() else {
                    return Err(AppError::InvalidRange(
                        "a monthly PDF covers one month, use --range YYYY-MM".into(),
                    ));
                };
                export_monthly_pdf(&u.name, summary, &events, &path)?;
            } else {
                export_report_pdf(&u.name, &bounds, &events, &path)?;
            }

            if let Err(e) = ttlog(
                &pool.conn,
                "report",
                &u.id,
                &format!("PDF written to {}", path.display()),
            ) {
                warning(format!("Failed to write internal log: {}", e));
            }
        }
    }
    Ok(())
}

fn print_detailed(user: &User, bounds: &Bounds, events: &[Event]) {
    header(format!("Attendance report: {} ({})", user.name, describe_range(bounds)));

    let (rows, total) = report_rows(events);
    let mut table = Table::new(&REPORT_HEADERS);
    for r in &rows {
        table.add_row(r.cells());
    }
    table.add_row(vec![
        String::new(),
        String::new(),
        "TOTAL:".to_string(),
        format_hours_decimal(total),
    ]);
    print!("{}", table.render());
}

fn print_monthly(user: &User, events: &[Event]) {
    header(format!("Monthly summary: {}", user.name));

    let mut table = Table::new(&["Month", "Total", "Days", "Avg/day"]);
    for s in monthly_summaries(events) {
        table.add_row(vec![
            format!("{} {}", month_name(s.month), s.year),
            format_hours_decimal(s.total_hours),
            s.days_worked.to_string(),
            format_hours_decimal(s.avg_hours_per_day),
        ]);
    }
    print!("{}", table.render());

    let months = group_by_month(events).len();
    println!("{} month(s), {} scans", months, events.len());
}
