use super::{RunEnv, load_roster, offline_ok, open_context, print_overview};
use crate::config::Config;
use crate::core::attendance::AttendanceLogic;
use crate::errors::AppResult;

/// Handle the `attendance` command: the aggregate-and-write pass.
pub fn handle(cfg: &Config, env: &RunEnv) -> AppResult<()> {
    offline_ok(sync(cfg, env))
}

/// Shared with `take`, which always ends with this pass.
pub(crate) fn sync(cfg: &Config, env: &RunEnv) -> AppResult<()> {
    let roster = load_roster(cfg)?;
    let mut ctx = open_context(cfg, env);

    let overview = AttendanceLogic::sync(&mut ctx, &cfg.attendance, &roster)?;
    print_overview(&overview);
    Ok(())
}
