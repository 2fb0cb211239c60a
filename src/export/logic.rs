// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, OverviewTable};
use crate::ui::messages::warning;
use std::path::Path;

/// High-level export of the attendance overview.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `table` to `file` in the given format.
    ///
    /// - `file` must be an absolute path
    /// - an existing file is only replaced with `force` or after confirmation
    pub fn export(
        table: &OverviewTable,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        if table.rows.is_empty() {
            warning("No members to export.");
        }

        match format {
            ExportFormat::Csv => export_csv(table, path),
            ExportFormat::Json => export_json(table, path),
            ExportFormat::Xlsx => export_xlsx(table, path),
        }
    }
}
