//! Local CSV export of a worksheet, read through the same pipeline as the API.

use crate::errors::AppResult;
use crate::models::table::DataTable;
use crate::sheets::SheetSource;
use crate::utils::delimited::read_delimited;
use std::fs::File;
use std::path::PathBuf;

pub struct CsvSheetSource {
    path: PathBuf,
}

impl CsvSheetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SheetSource for CsvSheetSource {
    /// A CSV file holds exactly one worksheet, named after the file stem.
    fn list_worksheets(&self) -> AppResult<Vec<String>> {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(vec![stem])
    }

    fn fetch_worksheet(&self, _worksheet: &str) -> AppResult<DataTable> {
        let file = File::open(&self.path)?;
        read_delimited(file, &self.path.display().to_string())
    }
}
