use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub sheet_id: String,
    #[serde(default = "default_worksheet")]
    pub worksheet: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub access_token_command: Option<String>,
    /// Service-account key file (`credentials.json`).
    #[serde(default)]
    pub credentials_path: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

fn default_worksheet() -> String {
    "HORAS_V2".to_string()
}
fn default_api_base_url() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_bar_width() -> usize {
    40
}

/// Every key `Config` serializes, used by `config --check`.
pub const CONFIG_FIELDS: [&str; 10] = [
    "database",
    "sheet_id",
    "worksheet",
    "api_base_url",
    "api_key",
    "access_token",
    "access_token_command",
    "credentials_path",
    "timeout_secs",
    "bar_width",
];

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            sheet_id: String::new(),
            worksheet: default_worksheet(),
            api_base_url: default_api_base_url(),
            api_key: None,
            access_token: None,
            access_token_command: None,
            credentials_path: None,
            timeout_secs: default_timeout_secs(),
            bar_width: default_bar_width(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var("HOURBOARD_HOME") {
            return expand_tilde(&dir);
        }
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("hourboard")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".hourboard")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("hourboard.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("hourboard.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            log::debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// Keys from `CONFIG_FIELDS` absent in the config file.
    pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
        let content = fs::read_to_string(path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&content)?;
        let map = value.as_mapping().cloned().unwrap_or_default();

        Ok(CONFIG_FIELDS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(*k))
            .collect())
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was set up.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file (never overwrite an existing one)
        if !is_test && !Self::config_file().exists() {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}
