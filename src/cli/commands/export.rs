use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::explorer::ColumnFilter;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        table,
        format,
        file,
        filters,
        force,
    } = cmd
    {
        let parsed: Vec<ColumnFilter> = filters
            .iter()
            .map(|f| f.parse())
            .collect::<AppResult<_>>()?;

        let pool = DbPool::new(&cfg.database)?;
        ExportLogic::export(&pool, table, *format, file, &parsed, *force)?;
    }
    Ok(())
}
