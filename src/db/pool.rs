//! SQLite connection wrapper (one connection per command).

use crate::core::normalize::is_valid_period_key;
use crate::db::initialize::init_db;
use crate::errors::AppResult;
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use std::fs;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open (or create) the database file, register SQL helpers and apply
    /// pending migrations.
    pub fn new(path: &str) -> AppResult<Self> {
        let path = Path::new(path);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        register_functions(&conn)?;
        init_db(&conn)?;
        log::debug!("opened database {}", path.display());
        Ok(Self { conn })
    }
}

/// `valid_period_key(text)`: true for `MM/YYYY` keys with month 01..12.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "valid_period_key",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let valid = ctx
                .get_raw(0)
                .as_str()
                .map(is_valid_period_key)
                .unwrap_or(false);
            Ok(valid)
        },
    )
}
