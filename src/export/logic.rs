// src/export/logic.rs

use crate::core::explorer::{ColumnFilter, apply_filters};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::store::{load_hours, load_table};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::xlsx::export_xlsx;
use crate::models::hours::HOURS_TABLE;
use crate::ui::messages::warning;
use std::path::Path;

/// High-level table export.
pub struct ExportLogic;

impl ExportLogic {
    /// Export `table` (optionally filtered) to `file`.
    ///
    /// The `hours` table is read with the period-key filter, like every other view of it.
    /// Returns the number of rows written.
    pub fn export(
        pool: &DbPool,
        table: &str,
        format: ExportFormat,
        file: &str,
        filters: &[ColumnFilter],
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        let data = if table == HOURS_TABLE {
            load_hours(pool)?.ok_or_else(|| AppError::TableNotFound(table.to_string()))?
        } else {
            load_table(pool, table, None)?
        };
        let data = apply_filters(&data, filters)?;

        if data.is_empty() {
            warning("No rows match the selected filters.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&data, path)?,
            ExportFormat::Json => export_json(&data, path)?,
            ExportFormat::Xlsx => {
                let sheet: String = table.chars().take(31).collect();
                export_xlsx(&data, &sheet, path)?
            }
        }

        if let Err(e) = ttlog(
            &pool.conn,
            "export",
            &path.display().to_string(),
            &format!("{} rows of '{table}' as {}", data.len(), format.as_str()),
        ) {
            log::warn!("failed to write internal log: {e}");
        }

        Ok(data.len())
    }
}
