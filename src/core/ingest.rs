//! fetch → normalize → store.

use crate::core::normalize::normalize_hours;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::store::save_hours;
use crate::errors::AppResult;
use crate::sheets::SheetSource;

#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    pub rows: usize,
    pub updated_at: String,
}

pub struct IngestLogic;

impl IngestLogic {
    /// Pull `worksheet` from `source`, normalize it and replace the `hours` table.
    pub fn fetch_and_store(
        pool: &mut DbPool,
        source: &dyn SheetSource,
        worksheet: &str,
    ) -> AppResult<IngestOutcome> {
        let raw = source.fetch_worksheet(worksheet)?;
        let table = normalize_hours(raw)?;
        let updated_at = save_hours(pool, &table)?;

        if let Err(e) = ttlog(
            &pool.conn,
            "fetch",
            worksheet,
            &format!("Hours replaced with {} rows", table.len()),
        ) {
            log::warn!("failed to write internal log: {e}");
        }

        Ok(IngestOutcome {
            rows: table.len(),
            updated_at,
        })
    }
}
