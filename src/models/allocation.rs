//! Typed view over the `allocation` table.

use crate::models::table::DataTable;
use serde::Serialize;

pub const ALLOCATION_TABLE: &str = "allocation";

pub const COL_PROFESSIONAL: &str = "PROFISSIONAL";
pub const COL_CLIENT: &str = "CLIENTE";
pub const COL_PREVIOUS_MONTH: &str = "MES_ANTERIOR";
pub const COL_CURRENT_MONTH: &str = "MES_ATUAL";
pub const COL_NEXT_MONTH: &str = "PROXIMO_MES";
pub const COL_TOTAL_HOURS: &str = "HORAS_TOTAIS";
pub const COL_MONTHLY_HOURS: &str = "HORAS_MES";

/// Columns coerced to numbers on upload.
pub const NUMERIC_COLUMNS: [&str; 5] = [
    COL_PREVIOUS_MONTH,
    COL_CURRENT_MONTH,
    COL_NEXT_MONTH,
    COL_TOTAL_HOURS,
    COL_MONTHLY_HOURS,
];

/// One planned allocation for a professional/client pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationRecord {
    pub professional: String,
    pub client: String,
    /// Percentage of the current month allocated to this client.
    pub current_month_pct: f64,
    /// Monthly hour budget of the professional.
    pub monthly_hours: f64,
}

impl AllocationRecord {
    pub fn allocated_hours(&self) -> f64 {
        allocated_hours(self.current_month_pct, self.monthly_hours)
    }

    pub fn from_table(table: &DataTable) -> Vec<AllocationRecord> {
        let num = |row: usize, col: &str| {
            table
                .column_index(col)
                .and_then(|i| table.rows[row][i].as_f64())
                .unwrap_or(0.0)
        };

        (0..table.len())
            .map(|i| AllocationRecord {
                professional: table.text(i, COL_PROFESSIONAL),
                client: table.text(i, COL_CLIENT),
                current_month_pct: num(i, COL_CURRENT_MONTH),
                monthly_hours: num(i, COL_MONTHLY_HOURS),
            })
            .collect()
    }
}

/// `(percentage / 100) * monthly budget`
pub fn allocated_hours(percentage: f64, monthly_hours: f64) -> f64 {
    (percentage / 100.0) * monthly_hours
}

/// Hours left on an allocation, never negative.
pub fn remaining_hours(allocated: f64, spent: f64) -> f64 {
    (allocated - spent).max(0.0)
}
