//! rollcall library root.
//! Exposes the CLI parser, the high-level run() function and the modules
//! behind each command.

pub mod backend;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands::RunEnv;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::{AppError, AppResult};
use utils::path::expand_tilde;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, env: &RunEnv) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, env),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg, env),
        Commands::Take { .. } => cli::commands::take::handle(&cli.command, cfg, env),
        Commands::Attendance => cli::commands::attendance::handle(cfg, env),
        Commands::Hours => cli::commands::hours::handle(cfg, env),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, env),
        Commands::Sheets { .. } => cli::commands::sheets::handle(&cli.command, cfg, env),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(Config::config_file);

    // Loaded once, then passed down explicitly
    let mut cfg = Config::load(&config_path)?;
    if let Some(dir) = &cli.workbook {
        cfg.workbook_dir = dir.clone();
    }

    let today = match &cli.today {
        Some(s) => utils::date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
        None => utils::date::today(),
    };

    let env = RunEnv { config_path, today };
    dispatch(&cli, &cfg, &env)
}
