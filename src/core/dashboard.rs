//! Aggregates behind the `summary` command and the HTML report.

use crate::core::compare::{ComparisonRow, compare};
use crate::core::normalize::{period_sort_key, round3};
use crate::models::allocation::AllocationRecord;
use crate::models::hours::HoursRecord;
use crate::models::table::DataTable;
use std::collections::{BTreeMap, BTreeSet};

/// User-supplied filters. An empty list selects every value present in the data.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub professionals: Vec<String>,
    pub clients: Vec<String>,
    pub periods: Vec<String>,
}

/// Filters resolved against the data: explicit sets of accepted values.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub professionals: BTreeSet<String>,
    pub clients: BTreeSet<String>,
    pub periods: BTreeSet<String>,
}

impl Filters {
    pub fn resolve(&self, records: &[HoursRecord]) -> Selection {
        fn pick(
            wanted: &[String],
            records: &[HoursRecord],
            f: impl Fn(&HoursRecord) -> &str,
        ) -> BTreeSet<String> {
            if wanted.is_empty() {
                records.iter().map(|r| f(r).to_string()).collect()
            } else {
                wanted.iter().map(|w| w.trim().to_string()).collect()
            }
        }

        Selection {
            professionals: pick(&self.professionals, records, |r| r.professional.as_str()),
            clients: pick(&self.clients, records, |r| r.client.as_str()),
            periods: pick(&self.periods, records, |r| r.period.as_str()),
        }
    }
}

impl Selection {
    pub fn matches(&self, r: &HoursRecord) -> bool {
        self.professionals.contains(&r.professional)
            && self.clients.contains(&r.client)
            && self.periods.contains(&r.period)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    pub records: usize,
    pub total_hours: f64,
    pub professionals: usize,
}

/// Professional × client sums. Missing pairs are zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossTab {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub kpis: Kpis,
    pub by_professional: Vec<(String, f64)>,
    pub by_client: Vec<(String, f64)>,
    pub by_period: Vec<(String, f64)>,
    pub by_area: Vec<(String, f64)>,
    pub crosstab: CrossTab,
    /// Present when an allocation table has been uploaded.
    pub comparison: Option<Vec<ComparisonRow>>,
    /// The hours rows that passed the filters, all columns.
    pub filtered: DataTable,
}

impl Dashboard {
    pub fn build(
        hours: &DataTable,
        allocations: Option<&[AllocationRecord]>,
        filters: &Filters,
    ) -> Self {
        let records = HoursRecord::from_table(hours);
        let selection = filters.resolve(&records);

        let mut filtered = DataTable::new(hours.columns.clone());
        let mut kept: Vec<HoursRecord> = Vec::new();
        for (row, rec) in hours.rows.iter().zip(records) {
            if selection.matches(&rec) {
                filtered.rows.push(row.clone());
                kept.push(rec);
            }
        }

        let mut by_period = group_sum(&kept, |r| r.period.as_str());
        by_period.sort_by(|a, b| period_sort_key(&a.0).cmp(&period_sort_key(&b.0)));

        Dashboard {
            kpis: kpis(&kept),
            by_professional: sorted_desc(group_sum(&kept, |r| r.professional.as_str())),
            by_client: sorted_desc(group_sum(&kept, |r| r.client.as_str())),
            by_period,
            by_area: sorted_desc(group_sum(&kept, |r| r.area.as_str())),
            crosstab: crosstab(&kept),
            comparison: allocations.map(|a| compare(a, &kept, &selection)),
            filtered,
        }
    }
}

pub fn kpis(records: &[HoursRecord]) -> Kpis {
    Kpis {
        records: records.len(),
        total_hours: round3(records.iter().map(|r| r.hours).sum()),
        professionals: records
            .iter()
            .map(|r| r.professional.as_str())
            .collect::<BTreeSet<_>>()
            .len(),
    }
}

/// Sum of hours per key, keys in ascending order, sums rounded to 3 decimals.
pub fn group_sum<F>(records: &[HoursRecord], key: F) -> Vec<(String, f64)>
where
    F: Fn(&HoursRecord) -> &str,
{
    let mut acc: BTreeMap<String, f64> = BTreeMap::new();
    for r in records {
        *acc.entry(key(r).to_string()).or_insert(0.0) += r.hours;
    }
    acc.into_iter().map(|(k, v)| (k, round3(v))).collect()
}

/// Largest total first; ties keep key order.
fn sorted_desc(mut groups: Vec<(String, f64)>) -> Vec<(String, f64)> {
    groups.sort_by(|a, b| b.1.total_cmp(&a.1));
    groups
}

pub fn crosstab(records: &[HoursRecord]) -> CrossTab {
    let rows: Vec<String> = records
        .iter()
        .map(|r| r.professional.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let columns: Vec<String> = records
        .iter()
        .map(|r| r.client.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut values = vec![vec![0.0; columns.len()]; rows.len()];
    for r in records {
        let (Ok(i), Ok(j)) = (
            rows.binary_search(&r.professional),
            columns.binary_search(&r.client),
        ) else {
            continue;
        };
        values[i][j] += r.hours;
    }
    for row in &mut values {
        for v in row.iter_mut() {
            *v = round3(*v);
        }
    }

    CrossTab {
        rows,
        columns,
        values,
    }
}
