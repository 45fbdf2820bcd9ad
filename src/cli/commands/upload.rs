use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::allocation::{AllocationLogic, parse_allocation};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::table::DataTable;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;
use std::fs::File;

const PREVIEW_ROWS: usize = 10;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Upload { file, preview } = cmd {
        let table = File::open(file)
            .map_err(AppError::from)
            .and_then(|f| parse_allocation(f, file))
            .map_err(|e| AppError::InputFile {
                path: file.clone(),
                source: Box::new(e),
            })?;

        info("Preview:");
        let mut head = DataTable::new(table.columns.clone());
        head.rows = table.rows.iter().take(PREVIEW_ROWS).cloned().collect();
        print!("{}", Table::from_data(&head).render());

        if *preview {
            info(format!("{} rows read, nothing saved (--preview).", table.len()));
            return Ok(());
        }

        let mut pool = DbPool::new(&cfg.database)?;
        let n = AllocationLogic::upload(&mut pool, &table, file)?;
        success(format!("Allocation updated successfully. {n} records loaded."));
    }

    Ok(())
}
