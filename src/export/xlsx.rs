// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::{OverviewTable, notify_export_success};
use crate::models::status::Status;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Export XLSX with a styled header, banded rows and status colouring.
pub(crate) fn export_xlsx(table: &OverviewTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Overview").map_err(to_export_error)?;

    // ---------------------------
    // Empty overview
    // ---------------------------
    if table.rows.is_empty() {
        worksheet
            .write(0, 0, "No members")
            .map_err(to_export_error)?;
        workbook.save(path).map_err(to_export_error)?;
        notify_export_success("XLSX (empty overview)", path);
        return Ok(());
    }

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in table.headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, header.as_str(), &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 1).ok();

    let mut col_widths: Vec<usize> = table
        .headers
        .iter()
        .map(|h| UnicodeWidthStr::width(h.as_str()))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, values) in table.rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in values.iter().enumerate() {
            write_xlsx_cell(worksheet, row, col as u16, value, band_color)?;
            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(UnicodeWidthStr::width(value.as_str()));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn status_color(s: &str) -> Option<Color> {
    match Status::from_code(s)? {
        Status::Present => Some(Color::RGB(0xC6EFCE)),
        Status::Excused => Some(Color::RGB(0xFFEB9C)),
        Status::Absent => Some(Color::RGB(0xFFC7CE)),
    }
}

/// Write one cell: counts as numbers, status codes coloured, the rest as text.
fn write_xlsx_cell(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    s: &str,
    bg: Color,
) -> AppResult<()> {
    if let Ok(num) = s.parse::<f64>() {
        let fmt = Format::new()
            .set_align(FormatAlign::Right)
            .set_background_color(bg)
            .set_pattern(FormatPattern::Solid)
            .set_border(FormatBorder::Thin);

        worksheet
            .write_with_format(row, col, num, &fmt)
            .map_err(to_export_error)?;
        return Ok(());
    }

    let fill = if col > 0 { status_color(s) } else { None };
    let fmt = Format::new()
        .set_background_color(fill.unwrap_or(bg))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    worksheet
        .write_with_format(row, col, s, &fmt)
        .map_err(to_export_error)?;

    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
