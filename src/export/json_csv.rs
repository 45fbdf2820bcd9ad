// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::models::table::DataTable;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed, one object per row.
pub(crate) fn export_json(table: &DataTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(&table.records())?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV with the table columns as header.
pub(crate) fn export_csv(table: &DataTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(&table.columns)?;

    for row in &table.rows {
        wtr.write_record(row.iter().map(|c| c.as_text()))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
