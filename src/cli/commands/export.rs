use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        user,
        force,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        let count =
            ExportLogic::export(&mut pool, *format, file, range.as_ref(), user.as_deref(), *force)?;

        if count > 0
            && let Err(e) = ttlog(
                &pool.conn,
                "export",
                format.as_str(),
                &format!("{} events exported to {}", count, file),
            )
        {
            warning(format!("Failed to write internal log: {}", e));
        }
    }
    Ok(())
}
