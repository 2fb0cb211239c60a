use super::RunEnv;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, env: &RunEnv) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
            println!("{yaml}");
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            if !env.config_path.exists() {
                cfg.save(&env.config_path)?;
            }

            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            let edited = Command::new(&editor_to_use)
                .arg(&env.config_path)
                .status()
                .is_ok_and(|s| s.success());

            if edited {
                success(format!(
                    "Configuration file edited successfully using '{editor_to_use}'"
                ));
                return Ok(());
            }

            warning(format!(
                "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
            ));

            let fallback = Command::new(&default_editor)
                .arg(&env.config_path)
                .status()
                .is_ok_and(|s| s.success());

            if fallback {
                success(format!(
                    "Configuration file edited successfully using fallback '{default_editor}'"
                ));
            } else {
                return Err(AppError::Config(format!(
                    "failed to edit configuration file using '{default_editor}'"
                )));
            }
        }
    }

    Ok(())
}
