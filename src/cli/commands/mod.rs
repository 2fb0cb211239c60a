pub mod attendance;
pub mod config;
pub mod export;
pub mod hours;
pub mod init;
pub mod sheets;
pub mod take;

use crate::backend::LocalWorkbook;
use crate::config::Config;
use crate::core::attendance::AttendanceOverview;
use crate::core::context::Context;
use crate::core::roster::Roster;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::paint_status_cell;
use crate::utils::formatting::bold;
use crate::utils::table::Table;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Values resolved once from the global flags.
pub struct RunEnv {
    pub config_path: PathBuf,
    pub today: NaiveDate,
}

pub(crate) fn open_context(cfg: &Config, env: &RunEnv) -> Context {
    Context::new(Box::new(LocalWorkbook::new(cfg.workbook_path())), env.today)
}

pub(crate) fn load_roster(cfg: &Config) -> AppResult<Roster> {
    let path = cfg.people_path();
    if !path.exists() {
        return Err(AppError::Config(format!(
            "roster file not found: {}",
            path.display()
        )));
    }
    Roster::load(&path)
}

/// Treat an unreachable backend as a clean exit.
pub(crate) fn offline_ok(result: AppResult<()>) -> AppResult<()> {
    match result {
        Err(AppError::Offline) => {
            println!("Offline");
            Ok(())
        }
        other => other,
    }
}

pub(crate) fn print_overview(overview: &AttendanceOverview) {
    let mut table = Table::new(overview.header.iter().map(|h| bold(h)).collect());
    for row in overview.rows() {
        let painted = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == 0 {
                    cell.clone()
                } else {
                    paint_status_cell(cell)
                }
            })
            .collect();
        table.add_row(painted);
    }
    println!("{}", table.render());
}
