//! rClockIn library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (time accounting core, SQLite store, exporters).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::User { .. } => commands::user::handle(&cli.command, cfg),
        Commands::Company { .. } => commands::company::handle(&cli.command, cfg),
        Commands::Vacation { .. } => commands::vacation::handle(&cli.command, cfg),
        Commands::Absence { .. } => commands::absence::handle(&cli.command, cfg),
        Commands::Scan { .. } => commands::scan::handle(&cli.command, cfg),
        Commands::History { .. } => commands::history::handle(&cli.command, cfg),
        Commands::Status { .. } => commands::status::handle(&cli.command, cfg),
        Commands::Week { .. } => commands::week::handle(&cli.command, cfg),
        Commands::Report { .. } => commands::report::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once; --db wins over the configured database
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
