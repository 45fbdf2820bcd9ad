//! Named-table persistence: replace-all saves, full-scan loads, enumeration
//! and the last-ingest timestamp.
//!
//! Every save is a single transaction (drop, recreate, insert), so another
//! connection sees either the previous table or the new one, never a gap.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::hours::{COL_PERIOD, HOURS_TABLE};
use crate::models::table::{CellValue, DataTable};
use chrono::Local;
use rusqlite::types::{Value, ValueRef};
use rusqlite::{Connection, OptionalExtension, Transaction, params_from_iter};

pub const METADATA_TABLE: &str = "metadata";
pub const LOG_TABLE: &str = "log";

/// Timestamp format stored in `metadata.updated_at`.
pub const UPDATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A table as reported by [`list_tables`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    pub name: String,
    pub rows: i64,
    pub columns: usize,
    /// `log` and `metadata` are bookkeeping, not data.
    pub internal: bool,
}

/// Double-quote an SQL identifier.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Table names are restricted to `[A-Za-z0-9_]` and may not shadow SQLite's own.
pub fn validate_table_name(name: &str) -> AppResult<()> {
    let ok = !name.is_empty()
        && !name.to_ascii_lowercase().starts_with("sqlite_")
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if ok {
        Ok(())
    } else {
        Err(AppError::InvalidTable(name.to_string()))
    }
}

pub fn table_exists(conn: &Connection, name: &str) -> AppResult<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Replace `name` with the content of `table`. Returns the number of rows written.
pub fn save_table(pool: &mut DbPool, name: &str, table: &DataTable) -> AppResult<usize> {
    let tx = pool.conn.transaction()?;
    let written = replace_in_tx(&tx, name, table)?;
    tx.commit()?;

    log::info!("saved {written} rows into '{name}'");
    Ok(written)
}

/// Replace the `hours` table and stamp `metadata` in the same transaction.
/// Returns the stored timestamp.
pub fn save_hours(pool: &mut DbPool, table: &DataTable) -> AppResult<String> {
    let now = Local::now().format(UPDATED_AT_FORMAT).to_string();

    let tx = pool.conn.transaction()?;
    let written = replace_in_tx(&tx, HOURS_TABLE, table)?;
    tx.execute(&format!("DELETE FROM {}", quote_ident(METADATA_TABLE)), [])?;
    tx.execute(
        &format!(
            "INSERT INTO {} (updated_at) VALUES (?1)",
            quote_ident(METADATA_TABLE)
        ),
        [&now],
    )?;
    tx.commit()?;

    log::info!("saved {written} rows into '{HOURS_TABLE}' at {now}");
    Ok(now)
}

fn replace_in_tx(tx: &Transaction<'_>, name: &str, table: &DataTable) -> AppResult<usize> {
    validate_table_name(name)?;
    if name == LOG_TABLE || name == METADATA_TABLE {
        return Err(AppError::InvalidTable(format!("{name} is reserved")));
    }
    if table.columns.is_empty() {
        return Err(AppError::InvalidTable(format!("{name}: no columns to store")));
    }

    let numeric: Vec<bool> = (0..table.columns.len())
        .map(|i| table.is_numeric_column(i))
        .collect();

    let col_defs: Vec<String> = table
        .columns
        .iter()
        .zip(&numeric)
        .map(|(c, &n)| format!("{} {}", quote_ident(c), if n { "REAL" } else { "TEXT" }))
        .collect();

    let qname = quote_ident(name);
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {qname};
         CREATE TABLE {qname} ({});",
        col_defs.join(", ")
    ))?;

    let placeholders: Vec<String> = (1..=table.columns.len()).map(|i| format!("?{i}")).collect();
    let col_list: Vec<String> = table.columns.iter().map(|c| quote_ident(c)).collect();
    let mut stmt = tx.prepare(&format!(
        "INSERT INTO {qname} ({}) VALUES ({})",
        col_list.join(", "),
        placeholders.join(", ")
    ))?;

    for row in &table.rows {
        let values = row.iter().zip(&numeric).map(|(cell, &n)| to_sql_value(cell, n));
        stmt.execute(params_from_iter(values))?;
    }

    Ok(table.rows.len())
}

fn to_sql_value(cell: &CellValue, numeric_column: bool) -> Value {
    match cell {
        CellValue::Null => Value::Null,
        CellValue::Number(n) if numeric_column => Value::Real(*n),
        CellValue::Number(_) => Value::Text(cell.as_text()),
        CellValue::Text(s) if numeric_column && s.trim().is_empty() => Value::Null,
        CellValue::Text(s) => Value::Text(s.clone()),
    }
}

/// Full scan of `name` in insertion order. With `period_column`, rows whose
/// value there is not a valid `MM/YYYY` key are left out.
pub fn load_table(
    pool: &DbPool,
    name: &str,
    period_column: Option<&str>,
) -> AppResult<DataTable> {
    validate_table_name(name)?;
    if !table_exists(&pool.conn, name)? {
        return Err(AppError::TableNotFound(name.to_string()));
    }

    let mut sql = format!("SELECT * FROM {}", quote_ident(name));
    if let Some(col) = period_column {
        sql.push_str(&format!(" WHERE valid_period_key({})", quote_ident(col)));
    }
    sql.push_str(" ORDER BY rowid");

    let mut stmt = pool.conn.prepare(&sql)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let width = columns.len();
    let mut table = DataTable::new(columns);

    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(width);
        for i in 0..width {
            cells.push(match row.get_ref(i)? {
                ValueRef::Null => CellValue::Null,
                ValueRef::Integer(v) => CellValue::Number(v as f64),
                ValueRef::Real(v) => CellValue::Number(v),
                ValueRef::Text(t) => CellValue::Text(String::from_utf8_lossy(t).into_owned()),
                ValueRef::Blob(b) => CellValue::Text(format!("<{} bytes>", b.len())),
            });
        }
        table.rows.push(cells);
    }

    log::debug!("loaded {} rows from '{name}'", table.len());
    Ok(table)
}

/// The `hours` table with invalid period keys filtered out, or `None`
/// before the first ingest.
pub fn load_hours(pool: &DbPool) -> AppResult<Option<DataTable>> {
    if !table_exists(&pool.conn, HOURS_TABLE)? {
        return Ok(None);
    }
    load_table(pool, HOURS_TABLE, Some(COL_PERIOD)).map(Some)
}

/// Load a table if it exists.
pub fn load_optional(pool: &DbPool, name: &str) -> AppResult<Option<DataTable>> {
    if !table_exists(&pool.conn, name)? {
        return Ok(None);
    }
    load_table(pool, name, None).map(Some)
}

/// All user tables, alphabetically, with row and column counts.
pub fn list_tables(pool: &DbPool) -> AppResult<Vec<TableInfo>> {
    let names: Vec<String> = {
        let mut stmt = pool.conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name ASC",
        )?;
        stmt.query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<_>>()?
    };

    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let q = quote_ident(&name);
        let rows: i64 = pool
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {q}"), [], |r| r.get(0))?;
        let columns = pool
            .conn
            .prepare(&format!("SELECT * FROM {q} LIMIT 0"))?
            .column_count();
        let internal = name == LOG_TABLE || name == METADATA_TABLE;
        out.push(TableInfo {
            name,
            rows,
            columns,
            internal,
        });
    }
    Ok(out)
}

/// Timestamp of the last hours ingest; `None` when nothing was ever ingested.
pub fn get_last_update(pool: &DbPool) -> AppResult<Option<String>> {
    if !table_exists(&pool.conn, HOURS_TABLE)? || !table_exists(&pool.conn, METADATA_TABLE)? {
        return Ok(None);
    }

    let last = pool
        .conn
        .query_row(
            "SELECT updated_at FROM metadata ORDER BY updated_at DESC LIMIT 1",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(last)
}
