//! Normalization of raw worksheet cells into the canonical `hours` shape.

use crate::errors::{AppError, AppResult};
use crate::models::hours::{COL_HOURS, COL_MINUTES, COL_MONTH, COL_PERIOD, COL_YEAR};
use crate::models::table::{CellValue, DataTable};
use regex::Regex;
use std::sync::LazyLock;

static PERIOD_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/\d{4}$").expect("valid period regex"));

/// Parse a number that may use a decimal comma ("1,5" → 1.5).
/// Anything unparsable becomes 0.0.
pub fn parse_decimal(raw: &str) -> f64 {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Round to 3 decimals, ties to even (2.0625 → 2.062).
pub fn round3(v: f64) -> f64 {
    (v * 1000.0).round_ties_even() / 1000.0
}

/// Trim and left-pad with zeros to two characters ("7" → "07").
pub fn pad_month(raw: &str) -> String {
    format!("{:0>2}", raw.trim())
}

/// `MM/YYYY` key for a month/year pair.
pub fn period_key(month: &str, year: &str) -> String {
    format!("{}/{}", pad_month(month), year.trim())
}

/// True for `MM/YYYY` keys with a month between 01 and 12.
pub fn is_valid_period_key(key: &str) -> bool {
    PERIOD_KEY.is_match(key)
}

/// Sort key for period strings: (year, month). Invalid keys sort last.
pub fn period_sort_key(key: &str) -> (String, String) {
    match key.split_once('/') {
        Some((m, y)) => (y.to_string(), m.to_string()),
        None => ("~".to_string(), key.to_string()),
    }
}

/// Turn a text-only worksheet into the typed `hours` table.
///
/// - `HORAS_EM_MINUTOS` and `MINUTO` (when present) become numbers, rounded to 3 decimals
/// - `MES` and `ANO` are trimmed
/// - `MES_ANO` is derived with a zero-padded month (appended or overwritten)
pub fn normalize_hours(mut table: DataTable) -> AppResult<DataTable> {
    let month_idx = required(&table, COL_MONTH)?;
    let year_idx = required(&table, COL_YEAR)?;
    let hours_idx = required(&table, COL_HOURS)?;
    let minutes_idx = table.column_index(COL_MINUTES);
    let period_idx = table.ensure_column(COL_PERIOD);

    for row in &mut table.rows {
        row[hours_idx] = CellValue::Number(round3(parse_decimal(&row[hours_idx].as_text())));

        if let Some(i) = minutes_idx {
            row[i] = CellValue::Number(round3(parse_decimal(&row[i].as_text())));
        }

        let month = row[month_idx].as_text().trim().to_string();
        let year = row[year_idx].as_text().trim().to_string();
        row[period_idx] = CellValue::Text(period_key(&month, &year));
        row[month_idx] = CellValue::Text(month);
        row[year_idx] = CellValue::Text(year);
    }

    log::debug!("normalized {} hours rows", table.len());
    Ok(table)
}

fn required(table: &DataTable, column: &str) -> AppResult<usize> {
    table
        .column_index(column)
        .ok_or_else(|| AppError::MissingColumn(column.to_string()))
}
