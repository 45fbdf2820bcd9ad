//! Generic table explorer: per-column filters over any stored table.

use crate::core::normalize::parse_decimal;
use crate::errors::{AppError, AppResult};
use crate::models::table::{CellValue, DataTable};
use std::collections::BTreeSet;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// `COL=a,b`: exact match against any of the values.
    AnyOf(Vec<String>),
    /// `COL~text`: case-insensitive substring.
    Contains(String),
    /// `COL>=n`
    AtLeast(f64),
    /// `COL<=n`
    AtMost(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFilter {
    pub column: String,
    pub op: FilterOp,
}

impl FromStr for ColumnFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidFilter(s.to_string());

        let pos = s.find(['=', '~', '>', '<']).ok_or_else(invalid)?;
        let column = s[..pos].trim().to_string();
        if column.is_empty() {
            return Err(invalid());
        }

        let rest = &s[pos..];
        let op = if let Some(v) = rest.strip_prefix(">=") {
            FilterOp::AtLeast(parse_bound(v).ok_or_else(invalid)?)
        } else if let Some(v) = rest.strip_prefix("<=") {
            FilterOp::AtMost(parse_bound(v).ok_or_else(invalid)?)
        } else if let Some(v) = rest.strip_prefix('~') {
            FilterOp::Contains(v.trim().to_lowercase())
        } else if let Some(v) = rest.strip_prefix('=') {
            FilterOp::AnyOf(v.split(',').map(|x| x.trim().to_string()).collect())
        } else {
            return Err(invalid());
        };

        Ok(ColumnFilter { column, op })
    }
}

fn parse_bound(v: &str) -> Option<f64> {
    v.trim().replace(',', ".").parse::<f64>().ok()
}

impl ColumnFilter {
    fn accepts(&self, cell: &CellValue) -> bool {
        match &self.op {
            FilterOp::AnyOf(values) => {
                let text = cell.as_text();
                values.iter().any(|v| *v == text.trim())
            }
            FilterOp::Contains(needle) => cell.as_text().to_lowercase().contains(needle),
            FilterOp::AtLeast(min) => numeric(cell).is_some_and(|v| v >= *min),
            FilterOp::AtMost(max) => numeric(cell).is_some_and(|v| v <= *max),
        }
    }
}

fn numeric(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) if !s.trim().is_empty() => Some(parse_decimal(s)),
        _ => None,
    }
}

/// Rows of `table` accepted by every filter. Unknown columns are an error.
pub fn apply_filters(table: &DataTable, filters: &[ColumnFilter]) -> AppResult<DataTable> {
    let resolved: Vec<(usize, &ColumnFilter)> = filters
        .iter()
        .map(|f| {
            table
                .column_index(&f.column)
                .map(|i| (i, f))
                .ok_or_else(|| AppError::InvalidFilter(format!("unknown column '{}'", f.column)))
        })
        .collect::<AppResult<_>>()?;

    let mut out = DataTable::new(table.columns.clone());
    out.rows = table
        .rows
        .iter()
        .filter(|row| resolved.iter().all(|(i, f)| f.accepts(&row[*i])))
        .cloned()
        .collect();
    Ok(out)
}

/// Sorted distinct text values of a column (the choices a filter can take).
pub fn distinct_values(table: &DataTable, column: &str) -> AppResult<Vec<String>> {
    let idx = table
        .column_index(column)
        .ok_or_else(|| AppError::InvalidFilter(format!("unknown column '{column}'")))?;
    Ok(table
        .rows
        .iter()
        .map(|r| r[idx].as_text())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect())
}
