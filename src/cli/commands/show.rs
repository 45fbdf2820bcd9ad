use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::explorer::{ColumnFilter, apply_filters, distinct_values};
use crate::db::pool::DbPool;
use crate::db::store::{load_hours, load_table};
use crate::errors::{AppError, AppResult};
use crate::models::hours::HOURS_TABLE;
use crate::ui::messages::{info, warning};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show {
        table,
        filters,
        columns,
        limit,
        distinct,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        let data = if table == HOURS_TABLE {
            load_hours(&pool)?.ok_or_else(|| AppError::TableNotFound(table.clone()))?
        } else {
            load_table(&pool, table, None)?
        };

        let parsed: Vec<ColumnFilter> = filters
            .iter()
            .map(|f| f.parse())
            .collect::<AppResult<_>>()?;
        let data = apply_filters(&data, &parsed)?;

        if let Some(col) = distinct {
            for v in distinct_values(&data, col)? {
                println!("{v}");
            }
            return Ok(());
        }

        let data = if columns.is_empty() {
            data
        } else {
            for c in columns {
                if data.column_index(c).is_none() {
                    return Err(AppError::InvalidFilter(format!("unknown column '{c}'")));
                }
            }
            data.project(columns)
        };

        if data.is_empty() {
            warning(format!("No rows in '{table}' match the filters."));
            return Ok(());
        }

        let total = data.len();
        let mut shown = data;
        if *limit > 0 && total > *limit {
            shown.rows.truncate(*limit);
        }

        print!("{}", Table::from_data(&shown).render());
        info(format!("{} of {} rows", shown.len(), total));
    }

    Ok(())
}
