use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dashboard::{CrossTab, Dashboard, Filters};
use crate::db::pool::DbPool;
use crate::db::store::{get_last_update, load_hours};
use crate::errors::AppResult;
use crate::models::table::format_number;
use crate::ui::chart::bar_chart;
use crate::ui::messages::{header, info, warning};
use crate::utils::colors::{CYAN, GREEN, RESET};
use crate::utils::formatting::fmt_hours_unit;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { filters, rows } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        let Some(hours) = load_hours(&pool)? else {
            warning("No data available. Run `hourboard fetch` to load it.");
            return Ok(());
        };

        let dash = Dashboard::build(&hours, None, &Filters::from(filters));

        if let Some(last) = get_last_update(&pool)? {
            info(format!("Last update: {last}"));
        }

        println!(
            "\n{CYAN}Records:{RESET} {GREEN}{}{RESET}   {CYAN}Total hours:{RESET} {GREEN}{}{RESET}   {CYAN}Professionals:{RESET} {GREEN}{}{RESET}",
            dash.kpis.records,
            fmt_hours_unit(dash.kpis.total_hours),
            dash.kpis.professionals
        );

        if dash.kpis.records == 0 {
            warning("No rows match the selected filters.");
            return Ok(());
        }

        let w = cfg.bar_width;
        header("Hours by professional");
        print!("{}", bar_chart(&dash.by_professional, w));
        header("Hours by client");
        print!("{}", bar_chart(&dash.by_client, w));
        header("Hours by period");
        print!("{}", bar_chart(&dash.by_period, w));
        header("Hours by area");
        print!("{}", bar_chart(&dash.by_area, w));

        header("Hours by professional × client");
        print!("{}", crosstab_table(&dash.crosstab).render());

        if *rows {
            header("Filtered data");
            print!("{}", Table::from_data(&dash.filtered).render());
        }
    }

    Ok(())
}

fn crosstab_table(ct: &CrossTab) -> Table {
    let mut headers: Vec<&str> = vec!["PROFESSIONAL"];
    headers.extend(ct.columns.iter().map(String::as_str));

    let rows: Vec<Vec<String>> = ct
        .rows
        .iter()
        .zip(&ct.values)
        .map(|(name, vals)| {
            let mut line = vec![name.clone()];
            line.extend(vals.iter().map(|v| format_number(*v)));
            line
        })
        .collect();

    let mut align = vec![false];
    align.extend(std::iter::repeat_n(true, ct.columns.len()));
    Table::auto(&headers, rows, &align)
}
