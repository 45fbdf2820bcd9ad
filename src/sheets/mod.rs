//! Spreadsheet access: the Google Sheets v4 client and a local CSV stand-in.

pub mod auth;
pub mod client;
pub mod file;
pub mod service_account;

use crate::errors::AppResult;
use crate::models::table::DataTable;

/// A place worksheets can be read from.
pub trait SheetSource {
    /// Titles of all worksheets in the spreadsheet.
    fn list_worksheets(&self) -> AppResult<Vec<String>>;

    /// Header row plus string-valued body rows of one worksheet.
    fn fetch_worksheet(&self, worksheet: &str) -> AppResult<DataTable>;
}
