//! Credential resolution for the Sheets API.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::sheets::service_account::ServiceAccountKey;
use crate::utils::path::expand_tilde;
use std::path::PathBuf;
use std::process::Command;

/// Environment variable that overrides every configured credential.
pub const TOKEN_ENV: &str = "HOURBOARD_ACCESS_TOKEN";

#[derive(Debug, Clone, PartialEq)]
pub enum Credentials {
    /// OAuth2 access token sent as `Authorization: Bearer`.
    Bearer(String),
    /// API key sent as the `key` query parameter (link-shared sheets only).
    ApiKey(String),
    /// Service-account key, exchanged for a bearer token when the client is built.
    ServiceAccount(ServiceAccountKey),
}

impl Credentials {
    /// Resolution order: env token, configured token, service-account key,
    /// token command, API key.
    pub fn resolve(cfg: &Config) -> AppResult<Self> {
        if let Ok(token) = std::env::var(TOKEN_ENV)
            && !token.trim().is_empty()
        {
            log::debug!("using access token from {TOKEN_ENV}");
            return Ok(Credentials::Bearer(token.trim().to_string()));
        }

        if let Some(token) = non_empty(&cfg.access_token) {
            log::debug!("using access token from configuration");
            return Ok(Credentials::Bearer(token));
        }

        if let Some(path) = service_account_path(cfg) {
            log::debug!("using service account key {}", path.display());
            return Ok(Credentials::ServiceAccount(ServiceAccountKey::from_file(&path)?));
        }

        if let Some(cmd) = non_empty(&cfg.access_token_command) {
            log::debug!("running access token command: {cmd}");
            return Ok(Credentials::Bearer(run_token_command(&cmd)?));
        }

        if let Some(key) = non_empty(&cfg.api_key) {
            log::debug!("using API key from configuration");
            return Ok(Credentials::ApiKey(key));
        }

        Err(AppError::Credentials(format!(
            "set {TOKEN_ENV}, or one of access_token / credentials_path / access_token_command / api_key in {}",
            Config::config_file().display()
        )))
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// The configured `credentials_path`, or `credentials.json` in the config
/// directory when that file exists.
fn service_account_path(cfg: &Config) -> Option<PathBuf> {
    if let Some(p) = non_empty(&cfg.credentials_path) {
        return Some(expand_tilde(&p));
    }
    let fallback = Config::config_dir().join("credentials.json");
    fallback.exists().then_some(fallback)
}

/// Run a shell command (e.g. `gcloud auth print-access-token`) and take its stdout.
pub fn run_token_command(cmd: &str) -> AppResult<String> {
    let output = if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", cmd]).output()?
    } else {
        Command::new("sh").args(["-c", cmd]).output()?
    };

    if !output.status.success() {
        return Err(AppError::Credentials(format!(
            "access token command failed ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(AppError::Credentials(
            "access token command printed nothing".to_string(),
        ));
    }
    Ok(token)
}
