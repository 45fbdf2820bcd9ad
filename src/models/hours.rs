//! Typed view over the `hours` table.

use crate::models::table::DataTable;
use serde::Serialize;

pub const HOURS_TABLE: &str = "hours";

pub const COL_PROFESSIONAL: &str = "PROFISSIONAL";
pub const COL_CLIENT: &str = "CLIENTE_CONCATENADO";
pub const COL_AREA: &str = "AREA";
pub const COL_MONTH: &str = "MES";
pub const COL_YEAR: &str = "ANO";
pub const COL_PERIOD: &str = "MES_ANO";
pub const COL_HOURS: &str = "HORAS_EM_MINUTOS";
pub const COL_MINUTES: &str = "MINUTO";

/// One logged time entry.
///
/// `hours` is the sheet's `HORAS_EM_MINUTOS` column: decimal hours already
/// derived from the raw `minutes` by the spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoursRecord {
    pub professional: String,
    pub client: String,
    pub area: String,
    pub month: String,
    pub year: String,
    pub period: String,
    pub hours: f64,
    pub minutes: f64,
}

impl HoursRecord {
    pub fn from_table(table: &DataTable) -> Vec<HoursRecord> {
        let num = |row: usize, col: &str| {
            table
                .column_index(col)
                .and_then(|i| table.rows[row][i].as_f64())
                .unwrap_or(0.0)
        };

        (0..table.len())
            .map(|i| HoursRecord {
                professional: table.text(i, COL_PROFESSIONAL),
                client: table.text(i, COL_CLIENT),
                area: table.text(i, COL_AREA),
                month: table.text(i, COL_MONTH),
                year: table.text(i, COL_YEAR),
                period: table.text(i, COL_PERIOD),
                hours: num(i, COL_HOURS),
                minutes: num(i, COL_MINUTES),
            })
            .collect()
    }
}
