//! Unified application error type.
//! All modules (db, sheets, core, cli, export) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Invalid table name: {0}")]
    InvalidTable(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    // ---------------------------
    // Spreadsheet service
    // ---------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Spreadsheet service error: {0}")]
    Sheets(String),

    #[error("Missing credentials: {0}")]
    Credentials(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Missing column '{0}' in source data")]
    MissingColumn(String),

    #[error("Empty worksheet: {0}")]
    EmptyWorksheet(String),

    #[error("Invalid filter expression: {0}")]
    InvalidFilter(String),

    #[error("Error reading CSV '{path}': {source}")]
    InputFile {
        path: String,
        source: Box<AppError>,
    },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
