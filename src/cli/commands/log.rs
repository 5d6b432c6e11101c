use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::formatting::separator;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::new(&cfg.database)?;
        let lines = load_log(&pool.conn)?;

        if lines.is_empty() {
            println!("{GREY}Internal log is empty.{RESET}");
            return Ok(());
        }

        println!("{}", separator(&cfg.separator_char, 72));
        for l in lines {
            println!(
                "{GREY}{}{RESET} {CYAN}{:<10}{RESET} {:<14} {}",
                l.date, l.operation, l.target, l.message
            );
        }
        println!("{}", separator(&cfg.separator_char, 72));
    }

    Ok(())
}
