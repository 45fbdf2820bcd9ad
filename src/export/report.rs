//! The dashboard rendered as a static HTML report.

use crate::core::dashboard::{Dashboard, Filters};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::store::{get_last_update, load_hours, load_optional};
use crate::errors::{AppError, AppResult};
use crate::export::ensure_writable;
use crate::export::html::HtmlReport;
use crate::export::notify_export_success;
use crate::models::allocation::{ALLOCATION_TABLE, AllocationRecord};
use crate::models::table::format_number;
use crate::utils::fmt_hours;
use crate::utils::formatting::fmt_hours_unit;
use std::path::Path;

pub const REPORT_TITLE: &str = "Hours Dashboard";

/// Lay out a computed dashboard as an HTML document.
pub fn build_report(dash: &Dashboard, last_update: Option<&str>, filters: &Filters) -> HtmlReport {
    let mut doc = HtmlReport::new(REPORT_TITLE);

    doc.note(&format!(
        "Last update: {} · Generated: {}",
        last_update.unwrap_or("never"),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    for (label, values) in [
        ("Professionals", &filters.professionals),
        ("Clients", &filters.clients),
        ("Periods", &filters.periods),
    ] {
        if !values.is_empty() {
            doc.note(&format!("{label}: {}", values.join(", ")));
        }
    }

    doc.kpis(&[
        ("Records", dash.kpis.records.to_string()),
        ("Total hours", fmt_hours_unit(dash.kpis.total_hours)),
        ("Professionals", dash.kpis.professionals.to_string()),
    ]);

    doc.heading("Hours by professional");
    doc.bar_chart(&dash.by_professional);
    doc.heading("Hours by client");
    doc.bar_chart(&dash.by_client);
    doc.heading("Hours by period");
    doc.bar_chart(&dash.by_period);
    doc.heading("Hours by area");
    doc.bar_chart(&dash.by_area);

    doc.heading("Hours by professional × client");
    doc.number_grid(
        "Professional",
        &dash.crosstab.rows,
        &dash.crosstab.columns,
        &dash.crosstab.values,
    );

    if let Some(rows) = &dash.comparison {
        doc.heading("Allocated vs spent");
        let series: Vec<(String, f64, f64)> = rows
            .iter()
            .map(|r| (r.label(), r.spent, r.remaining))
            .collect();
        doc.stacked_chart(&series);

        let headers: Vec<String> = [
            "Professional",
            "Client",
            "Current month %",
            "Monthly hours",
            "Allocated",
            "Spent",
            "Remaining",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let body: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                vec![
                    r.professional.clone(),
                    r.client.clone(),
                    format_number(r.current_month_pct),
                    format_number(r.monthly_hours),
                    fmt_hours(r.allocated),
                    fmt_hours(r.spent),
                    fmt_hours(r.remaining),
                ]
            })
            .collect();
        doc.table(&headers, &body, &[false, false, true, true, true, true, true]);
    }

    doc.heading("Filtered data");
    let numeric: Vec<bool> = (0..dash.filtered.columns.len())
        .map(|i| dash.filtered.is_numeric_column(i))
        .collect();
    let body: Vec<Vec<String>> = dash
        .filtered
        .rows
        .iter()
        .map(|r| r.iter().map(|c| c.as_text()).collect())
        .collect();
    doc.table(&dash.filtered.columns, &body, &numeric);

    doc
}

pub struct ReportLogic;

impl ReportLogic {
    /// Build the dashboard from the store and write it to `file`.
    pub fn generate(pool: &DbPool, filters: &Filters, file: &str, force: bool) -> AppResult<()> {
        let path = Path::new(file);

        let hours = load_hours(pool)?.ok_or_else(|| {
            AppError::TableNotFound("hours (run `hourboard fetch` first)".to_string())
        })?;
        let allocations = load_optional(pool, ALLOCATION_TABLE)?
            .map(|t| AllocationRecord::from_table(&t));
        let last_update = get_last_update(pool)?;

        let dash = Dashboard::build(&hours, allocations.as_deref(), filters);
        let doc = build_report(&dash, last_update.as_deref(), filters);

        ensure_writable(path, force)?;
        doc.save(path)?;
        notify_export_success("HTML report", path);

        if let Err(e) = ttlog(
            &pool.conn,
            "report",
            &path.display().to_string(),
            &format!("HTML report with {} rows", dash.kpis.records),
        ) {
            log::warn!("failed to write internal log: {e}");
        }

        Ok(())
    }
}
