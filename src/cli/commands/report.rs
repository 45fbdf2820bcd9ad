use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dashboard::Filters;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ReportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        file,
        filters,
        force,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        ReportLogic::generate(&pool, &Filters::from(filters), file, *force)?;
    }
    Ok(())
}
