//! Spreadsheet service seam.
//!
//! Every component reaches spreadsheets through [`SheetBackend`]; the
//! shipped implementation is [`local::LocalWorkbook`], a directory of
//! CSV worksheets. Row and column indices are 1-based, as in the
//! spreadsheet service.

pub mod local;

use crate::errors::{AppError, AppResult};
use crate::models::response::ResponseRow;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use local::LocalWorkbook;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetRef {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Reader,
    Writer,
}

/// A share grant on a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub email: String,
    pub role: Role,
    /// Whether a notification mail is sent
    pub notify: bool,
    pub message: Option<String>,
}

pub trait SheetBackend {
    fn list_spreadsheets(&self) -> AppResult<Vec<SpreadsheetRef>>;

    /// Find a spreadsheet by its title.
    fn open(&self, title: &str) -> AppResult<Option<SpreadsheetRef>>;

    fn copy_spreadsheet(&mut self, source: &SpreadsheetRef, title: &str)
    -> AppResult<SpreadsheetRef>;

    fn delete_spreadsheet(&mut self, id: &str) -> AppResult<()>;

    fn share(&mut self, sheet: &SpreadsheetRef, grant: &Permission) -> AppResult<()>;

    /// Every row of a worksheet, as stored.
    fn read_rows(&self, sheet: &SpreadsheetRef, worksheet: &str) -> AppResult<Vec<Vec<String>>>;

    /// Set the row count of a worksheet, truncating or padding with blank rows.
    fn resize_rows(&mut self, sheet: &SpreadsheetRef, worksheet: &str, rows: usize)
    -> AppResult<()>;

    /// Write a rectangular block whose top-left cell is (`top_row`, `left_col`).
    fn write_range(
        &mut self,
        sheet: &SpreadsheetRef,
        worksheet: &str,
        top_row: usize,
        left_col: usize,
        values: &[Vec<String>],
    ) -> AppResult<()>;

    fn update_cell(
        &mut self,
        sheet: &SpreadsheetRef,
        worksheet: &str,
        row: usize,
        col: usize,
        value: &str,
    ) -> AppResult<()>;

    fn open_required(&self, title: &str) -> AppResult<SpreadsheetRef> {
        self.open(title)?
            .ok_or_else(|| AppError::SpreadsheetNotFound(title.to_string()))
    }

    /// Values of one row; empty when the row does not exist.
    fn row_values(
        &self,
        sheet: &SpreadsheetRef,
        worksheet: &str,
        row: usize,
    ) -> AppResult<Vec<String>> {
        let rows = self.read_rows(sheet, worksheet)?;
        Ok(row
            .checked_sub(1)
            .and_then(|i| rows.get(i).cloned())
            .unwrap_or_default())
    }

    /// Rows after the first, keyed by the first row's titles. Fully blank rows are skipped.
    fn records(&self, sheet: &SpreadsheetRef, worksheet: &str) -> AppResult<Vec<ResponseRow>> {
        let rows = self.read_rows(sheet, worksheet)?;
        let Some((header, body)) = rows.split_first() else {
            return Ok(Vec::new());
        };

        let records = body
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|row| {
                let fields: HashMap<String, String> = header
                    .iter()
                    .enumerate()
                    .map(|(i, title)| (title.clone(), row.get(i).cloned().unwrap_or_default()))
                    .collect();
                ResponseRow::new(fields)
            })
            .collect();

        Ok(records)
    }
}
