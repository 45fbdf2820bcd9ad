use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dashboard::{Dashboard, Filters};
use crate::db::pool::DbPool;
use crate::db::store::{load_hours, load_optional};
use crate::errors::AppResult;
use crate::models::allocation::{ALLOCATION_TABLE, AllocationRecord};
use crate::models::table::format_number;
use crate::ui::chart::stacked_chart;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{RESET, color_for_remaining};
use crate::utils::fmt_hours;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Compare { filters } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        let Some(hours) = load_hours(&pool)? else {
            warning("No data available. Run `hourboard fetch` to load it.");
            return Ok(());
        };
        let Some(alloc) = load_optional(&pool, ALLOCATION_TABLE)? else {
            warning("No allocation loaded. Use `hourboard upload FILE.csv`.");
            return Ok(());
        };
        let allocations = AllocationRecord::from_table(&alloc);

        let dash = Dashboard::build(&hours, Some(allocations.as_slice()), &Filters::from(filters));
        let rows = dash.comparison.unwrap_or_default();

        if rows.is_empty() {
            warning("No allocation matches the selected filters.");
            return Ok(());
        }

        header("Allocated vs spent");
        let series: Vec<(String, f64, f64)> = rows
            .iter()
            .map(|r| (r.label(), r.spent, r.remaining))
            .collect();
        print!("{}", stacked_chart(&series, cfg.bar_width));

        println!();
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
        let table = Table::auto(
            &[
                "PROFESSIONAL",
                "CLIENT",
                "CUR_MONTH_%",
                "MONTH_HOURS",
                "ALLOCATED",
                "SPENT",
                "REMAINING",
            ],
            body,
            &[false, false, true, true, true, true, true],
        );

        // Color whole lines by remaining hours.
        let rendered = table.render();
        let mut lines = rendered.lines();
        for l in lines.by_ref().take(2) {
            println!("{l}");
        }
        for (line, r) in lines.zip(&rows) {
            println!("{}{}{}", color_for_remaining(r.remaining), line, RESET);
        }
    }

    Ok(())
}
