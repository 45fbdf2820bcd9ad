//! Table rendering utilities for CLI outputs.

use crate::models::table::DataTable;
use crate::utils::formatting::truncate;
use unicode_width::UnicodeWidthStr;

/// Widest cell allowed before truncation.
pub const MAX_CELL_WIDTH: usize = 32;

pub struct Column {
    pub header: String,
    pub width: usize,
    pub right_align: bool,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Columns sized to the header and every cell, capped at `MAX_CELL_WIDTH`.
    pub fn auto(headers: &[&str], rows: Vec<Vec<String>>, right_align: &[bool]) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let cells = rows
                    .iter()
                    .map(|r| r.get(i).map_or(0, |c| UnicodeWidthStr::width(c.as_str())));
                let width = cells
                    .chain(std::iter::once(UnicodeWidthStr::width(*h)))
                    .max()
                    .unwrap_or(0)
                    .min(MAX_CELL_WIDTH);
                Column {
                    header: h.to_string(),
                    width,
                    right_align: right_align.get(i).copied().unwrap_or(false),
                }
            })
            .collect();
        Self { columns, rows }
    }

    /// Render a stored table: numeric columns are right-aligned.
    pub fn from_data(table: &DataTable) -> Self {
        let headers: Vec<&str> = table.columns.iter().map(String::as_str).collect();
        let numeric: Vec<bool> = (0..table.columns.len())
            .map(|i| table.is_numeric_column(i))
            .collect();
        let rows = table
            .rows
            .iter()
            .map(|r| r.iter().map(|c| c.as_text()).collect())
            .collect();
        Self::auto(&headers, rows, &numeric)
    }

    fn cell(text: &str, col: &Column) -> String {
        let text = truncate(text, col.width);
        let pad = col.width.saturating_sub(UnicodeWidthStr::width(text.as_str()));
        if col.right_align {
            format!("{}{} ", " ".repeat(pad), text)
        } else {
            format!("{}{} ", text, " ".repeat(pad))
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&Self::cell(&col.header, col));
        }
        out.push('\n');

        // Separator
        for col in &self.columns {
            out.push_str(&"-".repeat(col.width));
            out.push(' ');
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let text = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&Self::cell(text, col));
            }
            out.push('\n');
        }

        out
    }
}
