//! Allocation CSV upload: delimiter sniffing, numeric coercion, replace-all save.

use crate::core::normalize::parse_decimal;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::store::save_table;
use crate::errors::AppResult;
use crate::models::allocation::{ALLOCATION_TABLE, NUMERIC_COLUMNS};
use crate::models::table::{CellValue, DataTable};
use crate::utils::delimited::read_delimited;
use std::io::Read;

/// Parse an allocation CSV. The five numeric columns are coerced to numbers
/// (unparsable → 0); every other column stays text.
pub fn parse_allocation<R: Read>(reader: R, source: &str) -> AppResult<DataTable> {
    let mut table = read_delimited(reader, source)?;

    let numeric: Vec<usize> = NUMERIC_COLUMNS
        .iter()
        .filter_map(|c| table.column_index(c))
        .collect();
    if numeric.len() < NUMERIC_COLUMNS.len() {
        log::warn!(
            "{source}: only {} of {} numeric allocation columns present",
            numeric.len(),
            NUMERIC_COLUMNS.len()
        );
    }

    for row in &mut table.rows {
        for &i in &numeric {
            row[i] = CellValue::Number(parse_decimal(&row[i].as_text()));
        }
    }

    Ok(table)
}

pub struct AllocationLogic;

impl AllocationLogic {
    /// Replace the `allocation` table. Returns the number of rows stored.
    pub fn upload(pool: &mut DbPool, table: &DataTable, source: &str) -> AppResult<usize> {
        let n = save_table(pool, ALLOCATION_TABLE, table)?;

        if let Err(e) = ttlog(
            &pool.conn,
            "upload",
            source,
            &format!("Allocation replaced with {n} rows"),
        ) {
            log::warn!("failed to write internal log: {e}");
        }

        Ok(n)
    }
}
