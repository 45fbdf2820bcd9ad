use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ingest::IngestLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::sheets::SheetSource;
use crate::sheets::auth::Credentials;
use crate::sheets::client::SheetsClient;
use crate::sheets::file::CsvSheetSource;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Fetch {
        worksheet,
        from_file,
    } = cmd
    {
        let worksheet = worksheet.clone().unwrap_or_else(|| cfg.worksheet.clone());

        let source: Box<dyn SheetSource> = match from_file {
            Some(path) => {
                info(format!("Reading worksheet from {path}…"));
                Box::new(CsvSheetSource::new(path))
            }
            None => {
                info(format!("Fetching worksheet '{worksheet}' from Google Sheets…"));
                Box::new(SheetsClient::new(cfg, Credentials::resolve(cfg)?)?)
            }
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let outcome = IngestLogic::fetch_and_store(&mut pool, source.as_ref(), &worksheet)?;

        success(format!(
            "Data updated successfully. {} records loaded ({}).",
            outcome.rows, outcome.updated_at
        ));
    }

    Ok(())
}
