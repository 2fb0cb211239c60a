use super::RunEnv;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This creates:
///  - the config directory (if missing)
///  - the configuration file (kept when it already exists)
///  - the workbook directory
pub fn handle(cli: &Cli, env: &RunEnv) -> AppResult<()> {
    info("Initializing rollcall…");

    let cfg = Config::init_all(&env.config_path, cli.workbook.as_deref())?;

    println!("📄 Config file : {}", env.config_path.display());
    println!("🗂️  Workbook    : {}", cfg.workbook_path().display());
    println!("👥 Roster      : {}", cfg.people_path().display());

    if !cfg.people_path().exists() {
        info("Add members to the roster file as `email,name` lines.");
    }

    success("rollcall initialization completed!");
    Ok(())
}
