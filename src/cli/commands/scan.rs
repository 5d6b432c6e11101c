use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::scan::ScanLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::time::timestamp_or_now;

/// Handle the `scan` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan { user, location, at } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let now = timestamp_or_now(at.as_ref())?;
        let location = location.as_deref().unwrap_or(&cfg.default_location);

        ScanLogic::apply(&mut pool, user, location, now)?;
    }
    Ok(())
}
