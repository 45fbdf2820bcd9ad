//! Read-only Google Sheets v4 client.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::table::DataTable;
use crate::sheets::SheetSource;
use crate::sheets::auth::Credentials;
use crate::sheets::service_account::SHEETS_READONLY_SCOPE;
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<JsonValue>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// What goes on the wire once credentials are resolved.
enum Auth {
    Bearer(String),
    ApiKey(String),
}

pub struct SheetsClient {
    http: Client,
    base_url: String,
    sheet_id: String,
    auth: Auth,
}

impl SheetsClient {
    pub fn new(cfg: &Config, credentials: Credentials) -> AppResult<Self> {
        if cfg.sheet_id.trim().is_empty() {
            return Err(AppError::Config("sheet_id is not set".to_string()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .user_agent(concat!("hourboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let auth = match credentials {
            Credentials::Bearer(token) => Auth::Bearer(token),
            Credentials::ApiKey(key) => Auth::ApiKey(key),
            Credentials::ServiceAccount(key) => {
                Auth::Bearer(key.fetch_token(&http, SHEETS_READONLY_SCOPE)?)
            }
        };

        Ok(Self {
            http,
            base_url: cfg.api_base_url.trim_end_matches('/').to_string(),
            sheet_id: cfg.sheet_id.trim().to_string(),
            auth,
        })
    }

    /// `{base}/spreadsheets/{id}` followed by the given path segments, percent-encoded.
    fn url(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&format!("{}/spreadsheets", self.base_url))
            .map_err(|e| AppError::Config(format!("invalid api_base_url: {e}")))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| AppError::Config("api_base_url cannot be a base".to_string()))?;
            path.push(&self.sheet_id);
            for s in segments {
                path.push(s);
            }
        }
        Ok(url)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Auth::Bearer(token) => req.bearer_auth(token),
            Auth::ApiKey(key) => req.query(&[("key", key.as_str())]),
        }
    }

    fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        log::debug!("GET {url}");
        let resp = self.authorize(self.http.get(url).query(query)).send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            let excerpt: String = body.chars().take(300).collect();
            return Err(AppError::Sheets(format!("{status}: {}", excerpt.trim())));
        }

        Ok(resp.json::<T>()?)
    }
}

impl SheetSource for SheetsClient {
    fn list_worksheets(&self) -> AppResult<Vec<String>> {
        let meta: SpreadsheetMeta =
            self.get_json(self.url(&[])?, &[("fields", "sheets.properties.title")])?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    fn fetch_worksheet(&self, worksheet: &str) -> AppResult<DataTable> {
        let url = self.url(&["values", worksheet])?;
        let range: ValueRange = self.get_json(
            url,
            &[
                ("majorDimension", "ROWS"),
                ("valueRenderOption", "FORMATTED_VALUE"),
            ],
        )?;

        log::info!(
            "fetched {} raw rows from worksheet '{}'",
            range.values.len(),
            worksheet
        );
        values_to_table(worksheet, range.values)
    }
}

/// First row is the header. The API drops trailing empty cells, so the header
/// is widened to the longest row; the extra columns get `column_N` names.
pub fn values_to_table(worksheet: &str, values: Vec<Vec<JsonValue>>) -> AppResult<DataTable> {
    let width = values.iter().map(Vec::len).max().unwrap_or(0);

    let mut rows = values.into_iter().map(|r| {
        r.into_iter()
            .map(|v| match v {
                JsonValue::String(s) => s,
                JsonValue::Null => String::new(),
                other => other.to_string(),
            })
            .collect::<Vec<String>>()
    });

    let header = rows
        .next()
        .ok_or_else(|| AppError::EmptyWorksheet(worksheet.to_string()))?;
    let mut header: Vec<String> = header.into_iter().map(|h| h.trim().to_string()).collect();
    header.resize(width, String::new());

    Ok(DataTable::from_strings(header, rows.collect()))
}
