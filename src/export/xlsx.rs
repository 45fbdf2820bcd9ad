// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::models::table::{CellValue, DataTable};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Export XLSX with a styled header, banded rows and fitted column widths.
pub(crate) fn export_xlsx(table: &DataTable, sheet_name: &str, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(to_app_error)?;

    if table.columns.is_empty() {
        worksheet
            .write(0, 0, "No data available")
            .map_err(to_app_error)?;
        workbook.save(path).map_err(to_app_error)?;
        notify_export_success("XLSX (empty dataset)", path);
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

    for (col, header) in table.columns.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, header.as_str(), &header_format)
            .map_err(to_app_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_app_error)?;

    let mut col_widths: Vec<usize> = table
        .columns
        .iter()
        .map(|h| UnicodeWidthStr::width(h.as_str()))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, cells) in table.rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, cell) in cells.iter().enumerate() {
            write_cell(worksheet, row, col as u16, cell, band)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(cell.as_text().as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, (*w).min(60) as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    workbook.save(path).map_err(to_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    bg: Color,
) -> AppResult<()> {
    let fmt = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    match cell {
        CellValue::Number(n) => {
            let fmt = fmt.set_align(FormatAlign::Right).set_num_format("0.000");
            worksheet
                .write_with_format(row, col, *n, &fmt)
                .map_err(to_app_error)?;
        }
        CellValue::Text(s) => {
            worksheet
                .write_with_format(row, col, s.as_str(), &fmt)
                .map_err(to_app_error)?;
        }
        CellValue::Null => {
            worksheet
                .write_blank(row, col, &fmt)
                .map_err(to_app_error)?;
        }
    }
    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
