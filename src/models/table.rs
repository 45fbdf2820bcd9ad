//! In-memory tabular payload shared by the sheet client, the normalizer,
//! the store and the exporters.

use std::fmt;

/// A single cell. The store maps `Number` to REAL and `Text` to TEXT.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text view of the cell; numbers are rendered without trailing zeros.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Integral values print as integers, everything else with up to 3 decimals.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        let s = format!("{:.3}", n);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Column-named rows. Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl DataTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a text-only table, padding short rows and truncating long ones.
    /// Blank or repeated header names are made unique.
    pub fn from_strings(columns: Vec<String>, body: Vec<Vec<String>>) -> Self {
        let columns = unique_columns(columns);
        let width = columns.len();
        let rows = body
            .into_iter()
            .map(|mut r| {
                r.resize(width, String::new());
                r.into_iter().map(CellValue::Text).collect()
            })
            .collect();
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Append a column filled with `Null`, or return the existing index.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(CellValue::Null);
        }
        self.columns.len() - 1
    }

    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Null);
        self.rows.push(row);
    }

    /// Text value of `column` in `row`, empty when the column is absent.
    pub fn text(&self, row: usize, column: &str) -> String {
        self.column_index(column)
            .and_then(|i| self.rows.get(row).map(|r| r[i].as_text()))
            .unwrap_or_default()
    }

    /// True when every non-empty cell of the column is a number.
    pub fn is_numeric_column(&self, idx: usize) -> bool {
        let mut seen = false;
        for row in &self.rows {
            match &row[idx] {
                CellValue::Number(_) => seen = true,
                CellValue::Null => {}
                CellValue::Text(s) if s.trim().is_empty() => {}
                CellValue::Text(_) => return false,
            }
        }
        seen
    }

    /// Keep only the named columns, in the given order.
    pub fn project(&self, names: &[String]) -> Self {
        let idx: Vec<usize> = names
            .iter()
            .filter_map(|n| self.column_index(n))
            .collect();
        Self {
            columns: idx.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| idx.iter().map(|&i| r[i].clone()).collect())
                .collect(),
        }
    }

    /// Rows as `column -> value` maps, used by the JSON exporter.
    pub fn records(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|r| {
                self.columns
                    .iter()
                    .zip(r)
                    .map(|(c, v)| {
                        let json = match v {
                            CellValue::Null => serde_json::Value::Null,
                            CellValue::Number(n) => serde_json::Number::from_f64(*n)
                                .map(serde_json::Value::Number)
                                .unwrap_or(serde_json::Value::Null),
                            CellValue::Text(s) => serde_json::Value::String(s.clone()),
                        };
                        (c.clone(), json)
                    })
                    .collect()
            })
            .collect()
    }
}

/// `""` becomes `column_N` (1-based) and repeats get a `_2`, `_3`, ... suffix.
fn unique_columns(columns: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(columns.len());
    for (i, c) in columns.into_iter().enumerate() {
        let base = if c.trim().is_empty() {
            format!("column_{}", i + 1)
        } else {
            c
        };
        let mut name = base.clone();
        let mut n = 2;
        while out.contains(&name) {
            name = format!("{base}_{n}");
            n += 1;
        }
        out.push(name);
    }
    out
}
