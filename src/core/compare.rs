//! Allocated vs. spent hours per professional/client pair.

use crate::core::dashboard::Selection;
use crate::core::normalize::round3;
use crate::models::allocation::{AllocationRecord, remaining_hours};
use crate::models::hours::HoursRecord;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub professional: String,
    pub client: String,
    pub current_month_pct: f64,
    pub monthly_hours: f64,
    pub allocated: f64,
    pub spent: f64,
    pub remaining: f64,
}

impl ComparisonRow {
    pub fn label(&self) -> String {
        format!("{} / {}", self.professional, self.client)
    }
}

/// Left join of allocations on the spent hours of `hours` (already filtered).
///
/// Allocations are kept in their stored order, restricted to the selected
/// professionals and clients. Pairs without logged hours count as 0 spent.
pub fn compare(
    allocations: &[AllocationRecord],
    hours: &[HoursRecord],
    selection: &Selection,
) -> Vec<ComparisonRow> {
    let mut spent: HashMap<(&str, &str), f64> = HashMap::new();
    for h in hours {
        *spent
            .entry((h.professional.as_str(), h.client.as_str()))
            .or_insert(0.0) += h.hours;
    }

    allocations
        .iter()
        .filter(|a| {
            selection.professionals.contains(&a.professional)
                && selection.clients.contains(&a.client)
        })
        .map(|a| {
            let allocated = a.allocated_hours();
            let used = round3(
                spent
                    .get(&(a.professional.as_str(), a.client.as_str()))
                    .copied()
                    .unwrap_or(0.0),
            );
            ComparisonRow {
                professional: a.professional.clone(),
                client: a.client.clone(),
                current_month_pct: a.current_month_pct,
                monthly_hours: a.monthly_hours,
                allocated,
                spent: used,
                remaining: round3(remaining_hours(allocated, used)),
            }
        })
        .collect()
}
