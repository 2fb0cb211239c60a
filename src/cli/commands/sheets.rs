use super::{RunEnv, offline_ok, open_context};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::table::Table;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, env: &RunEnv) -> AppResult<()> {
    if let Commands::Sheets { list, delete, yes } = cmd {
        return offline_ok(manage(cfg, env, *list, delete.as_deref(), *yes));
    }

    Ok(())
}

fn manage(
    cfg: &Config,
    env: &RunEnv,
    list: bool,
    delete: Option<&str>,
    yes: bool,
) -> AppResult<()> {
    let mut ctx = open_context(cfg, env);

    if list {
        let sheets = ctx.backend.list_spreadsheets()?;
        if sheets.is_empty() {
            info("The workbook is empty.");
            return Ok(());
        }

        let mut table = Table::new(vec!["ID".to_string(), "Title".to_string()]);
        for sheet in sheets {
            table.add_row(vec![sheet.id, sheet.title]);
        }
        println!("{}", table.render());
    }

    if let Some(id) = delete {
        let title = ctx
            .backend
            .list_spreadsheets()?
            .into_iter()
            .find(|s| s.id == id)
            .map(|s| s.title)
            .ok_or_else(|| AppError::SpreadsheetNotFound(id.to_string()))?;

        let prompt = format!("Delete '{title}' ({id})? This action is irreversible.");
        if !yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        ctx.backend.delete_spreadsheet(id)?;
        success(format!("Deleted '{title}'."));
    }

    Ok(())
}
