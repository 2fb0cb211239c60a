//! Directory-backed workbook.
//!
//! Layout:
//!   <root>/<id>/meta.json         {"id": ..., "title": ...}
//!   <root>/<id>/<worksheet>.csv   one file per worksheet
//!   <root>/<id>/permissions.json  share grants

use super::{Permission, SheetBackend, SpreadsheetRef};
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

const META_FILE: &str = "meta.json";
const PERMISSIONS_FILE: &str = "permissions.json";

pub struct LocalWorkbook {
    root: PathBuf,
}

impl LocalWorkbook {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create an empty spreadsheet with the given title.
    pub fn create_spreadsheet(&mut self, title: &str) -> AppResult<SpreadsheetRef> {
        self.ensure_online()?;

        let id = self.free_id(title);
        let sheet = SpreadsheetRef {
            id,
            title: title.to_string(),
        };

        fs::create_dir_all(self.dir(&sheet.id))?;
        self.write_meta(&sheet)?;
        Ok(sheet)
    }

    /// Create or replace a worksheet with the given rows.
    pub fn put_worksheet(
        &mut self,
        sheet: &SpreadsheetRef,
        worksheet: &str,
        rows: &[Vec<String>],
    ) -> AppResult<()> {
        self.ensure_online()?;
        self.save_grid(&self.worksheet_path(sheet, worksheet), rows.to_vec())
    }

    /// Share grants recorded on a spreadsheet.
    pub fn permissions(&self, sheet: &SpreadsheetRef) -> AppResult<Vec<Permission>> {
        let path = self.dir(&sheet.id).join(PERMISSIONS_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn ensure_online(&self) -> AppResult<()> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(AppError::Offline)
        }
    }

    fn dir(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    fn worksheet_path(&self, sheet: &SpreadsheetRef, worksheet: &str) -> PathBuf {
        self.dir(&sheet.id).join(format!("{worksheet}.csv"))
    }

    fn existing_worksheet(&self, sheet: &SpreadsheetRef, worksheet: &str) -> AppResult<PathBuf> {
        let path = self.worksheet_path(sheet, worksheet);
        if path.exists() {
            Ok(path)
        } else {
            Err(AppError::WorksheetNotFound {
                spreadsheet: sheet.title.clone(),
                worksheet: worksheet.to_string(),
            })
        }
    }

    /// Directory name derived from the title, suffixed until unused.
    fn free_id(&self, title: &str) -> String {
        let base: String = title
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let base = if base.is_empty() { "sheet".to_string() } else { base };

        let mut id = base.clone();
        let mut n = 2;
        while self.dir(&id).exists() {
            id = format!("{base}-{n}");
            n += 1;
        }
        id
    }

    fn write_meta(&self, sheet: &SpreadsheetRef) -> AppResult<()> {
        let json = serde_json::to_string_pretty(sheet)?;
        fs::write(self.dir(&sheet.id).join(META_FILE), json)?;
        Ok(())
    }

    fn load_grid(&self, path: &Path) -> AppResult<Vec<Vec<String>>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    /// Rows are padded to the widest one so every worksheet stays rectangular.
    fn save_grid(&self, path: &Path, mut rows: Vec<Vec<String>>) -> AppResult<()> {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in rows.iter_mut() {
            row.resize(width, String::new());
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;
        for row in &rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl SheetBackend for LocalWorkbook {
    fn list_spreadsheets(&self) -> AppResult<Vec<SpreadsheetRef>> {
        self.ensure_online()?;

        let mut sheets = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let meta = entry?.path().join(META_FILE);
            if meta.is_file() {
                let content = fs::read_to_string(meta)?;
                sheets.push(serde_json::from_str::<SpreadsheetRef>(&content)?);
            }
        }
        sheets.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        Ok(sheets)
    }

    fn open(&self, title: &str) -> AppResult<Option<SpreadsheetRef>> {
        Ok(self
            .list_spreadsheets()?
            .into_iter()
            .find(|s| s.title == title))
    }

    fn copy_spreadsheet(
        &mut self,
        source: &SpreadsheetRef,
        title: &str,
    ) -> AppResult<SpreadsheetRef> {
        let copy = self.create_spreadsheet(title)?;

        for entry in fs::read_dir(self.dir(&source.id))? {
            let path = entry?.path();
            let is_worksheet = path.extension().is_some_and(|ext| ext == "csv");
            if is_worksheet && let Some(name) = path.file_name() {
                fs::copy(&path, self.dir(&copy.id).join(name))?;
            }
        }

        Ok(copy)
    }

    fn delete_spreadsheet(&mut self, id: &str) -> AppResult<()> {
        self.ensure_online()?;

        let dir = self.dir(id);
        if !dir.join(META_FILE).is_file() {
            return Err(AppError::SpreadsheetNotFound(id.to_string()));
        }
        fs::remove_dir_all(dir)?;
        Ok(())
    }

    fn share(&mut self, sheet: &SpreadsheetRef, grant: &Permission) -> AppResult<()> {
        self.ensure_online()?;

        let mut grants = self.permissions(sheet)?;
        grants.retain(|g| g.email != grant.email);
        grants.push(grant.clone());

        let json = serde_json::to_string_pretty(&grants)?;
        fs::write(self.dir(&sheet.id).join(PERMISSIONS_FILE), json)?;
        Ok(())
    }

    fn read_rows(&self, sheet: &SpreadsheetRef, worksheet: &str) -> AppResult<Vec<Vec<String>>> {
        self.ensure_online()?;
        let path = self.existing_worksheet(sheet, worksheet)?;
        self.load_grid(&path)
    }

    fn resize_rows(
        &mut self,
        sheet: &SpreadsheetRef,
        worksheet: &str,
        rows: usize,
    ) -> AppResult<()> {
        self.ensure_online()?;
        let path = self.existing_worksheet(sheet, worksheet)?;

        let mut grid = self.load_grid(&path)?;
        let width = grid.iter().map(Vec::len).max().unwrap_or(1).max(1);
        grid.resize_with(rows, || vec![String::new(); width]);
        self.save_grid(&path, grid)
    }

    fn write_range(
        &mut self,
        sheet: &SpreadsheetRef,
        worksheet: &str,
        top_row: usize,
        left_col: usize,
        values: &[Vec<String>],
    ) -> AppResult<()> {
        self.ensure_online()?;
        if top_row == 0 || left_col == 0 {
            return Err(AppError::Backend(format!(
                "range origin must be 1-based, got ({top_row}, {left_col})"
            )));
        }
        let path = self.existing_worksheet(sheet, worksheet)?;

        let mut grid = self.load_grid(&path)?;
        for (r, row) in values.iter().enumerate() {
            let target_row = top_row - 1 + r;
            if grid.len() <= target_row {
                grid.resize_with(target_row + 1, Vec::new);
            }
            let cells = &mut grid[target_row];
            for (c, value) in row.iter().enumerate() {
                let target_col = left_col - 1 + c;
                if cells.len() <= target_col {
                    cells.resize(target_col + 1, String::new());
                }
                cells[target_col] = value.clone();
            }
        }
        self.save_grid(&path, grid)
    }

    fn update_cell(
        &mut self,
        sheet: &SpreadsheetRef,
        worksheet: &str,
        row: usize,
        col: usize,
        value: &str,
    ) -> AppResult<()> {
        self.write_range(sheet, worksheet, row, col, &[vec![value.to_string()]])
    }
}
