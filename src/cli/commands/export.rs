use super::{RunEnv, load_roster, offline_ok, open_context};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::AttendanceLogic;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic, OverviewTable};

pub fn handle(cmd: &Commands, cfg: &Config, env: &RunEnv) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        return offline_ok(export(cfg, env, *format, file, *force));
    }
    Ok(())
}

fn export(
    cfg: &Config,
    env: &RunEnv,
    format: ExportFormat,
    file: &str,
    force: bool,
) -> AppResult<()> {
    let roster = load_roster(cfg)?;
    let ctx = open_context(cfg, env);

    let overview = AttendanceLogic::collect(&ctx, &cfg.attendance, &roster)?;
    ExportLogic::export(&OverviewTable::from(&overview), format, file, force)
}
