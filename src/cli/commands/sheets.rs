use crate::config::Config;
use crate::errors::AppResult;
use crate::sheets::SheetSource;
use crate::sheets::auth::Credentials;
use crate::sheets::client::SheetsClient;

/// List worksheet titles of the configured spreadsheet; the configured one is marked.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let client = SheetsClient::new(cfg, Credentials::resolve(cfg)?)?;

    println!("📑 Worksheets of {}:", cfg.sheet_id);
    for title in client.list_worksheets()? {
        let mark = if title == cfg.worksheet { "*" } else { " " };
        println!(" {mark} {title}");
    }

    Ok(())
}
