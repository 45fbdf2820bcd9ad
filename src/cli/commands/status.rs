use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::store::{get_last_update, load_optional, table_exists};
use crate::errors::AppResult;
use crate::models::allocation::ALLOCATION_TABLE;
use crate::models::hours::HOURS_TABLE;
use crate::ui::messages::{info, warning};

/// Hours freshness and allocation presence.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    if table_exists(&pool.conn, HOURS_TABLE)? {
        let last = get_last_update(&pool)?.unwrap_or_else(|| "unknown".to_string());
        info(format!("Hours: last update {last}"));
    } else {
        warning("Hours: no data found. Run `hourboard fetch` for the first load.");
    }

    match load_optional(&pool, ALLOCATION_TABLE)? {
        Some(t) => info(format!("Allocation: {} records loaded.", t.len())),
        None => warning("Allocation: none loaded. Use `hourboard upload FILE.csv`."),
    }

    Ok(())
}
