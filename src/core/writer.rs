//! Projection of records into header-ordered rows and the sheet writes.

use crate::backend::{SheetBackend, SpreadsheetRef};
use crate::config::WriteMode;
use crate::errors::AppResult;
use crate::models::record::AttendanceRecord;

/// A record that can fill the columns of an overview sheet.
pub trait SheetRow {
    /// Cell text for the column titled `key`, if the record has one.
    fn field(&self, key: &str) -> Option<String>;
}

impl SheetRow for AttendanceRecord {
    fn field(&self, key: &str) -> Option<String> {
        AttendanceRecord::field(self, key)
    }
}

/// One row per record, one cell per header; `default` fills unknown keys.
pub fn project<R: SheetRow>(header: &[String], records: &[R], default: &str) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            header
                .iter()
                .map(|key| record.field(key).unwrap_or_else(|| default.to_string()))
                .collect()
        })
        .collect()
}

/// Row count of a worksheet holding `count` data rows from `first_row` on.
/// At least one data row is kept so the sheet never collapses to its header.
pub fn target_rows(first_row: usize, count: usize) -> usize {
    first_row.saturating_sub(1) + count.max(1)
}

/// Where and how a block of rows goes.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub sheet: &'a SpreadsheetRef,
    pub worksheet: &'a str,
    pub first_row: usize,
    /// Column count used to blank-fill the data row of an empty sheet
    pub width: usize,
    pub mode: WriteMode,
}

/// Resize the worksheet to fit `rows`, then write them.
pub fn write_rows(
    backend: &mut dyn SheetBackend,
    at: Placement<'_>,
    rows: &[Vec<String>],
) -> AppResult<()> {
    backend.resize_rows(at.sheet, at.worksheet, target_rows(at.first_row, rows.len()))?;

    if rows.is_empty() {
        let blank = vec![vec![String::new(); at.width.max(1)]];
        return backend.write_range(at.sheet, at.worksheet, at.first_row, 1, &blank);
    }

    write_block(backend, at, rows)
}

/// Write rows without resizing the worksheet.
pub fn write_block(
    backend: &mut dyn SheetBackend,
    at: Placement<'_>,
    rows: &[Vec<String>],
) -> AppResult<()> {
    match at.mode {
        WriteMode::Batch => backend.write_range(at.sheet, at.worksheet, at.first_row, 1, rows),
        WriteMode::PerCell => {
            for (r, row) in rows.iter().enumerate() {
                for (c, value) in row.iter().enumerate() {
                    backend.update_cell(at.sheet, at.worksheet, at.first_row + r, c + 1, value)?;
                }
            }
            Ok(())
        }
    }
}
