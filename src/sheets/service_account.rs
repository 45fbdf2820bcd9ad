//! Service-account sign-in: a signed RS256 assertion exchanged at the key's
//! `token_uri` for a short-lived bearer token.

use crate::errors::{AppError, AppResult};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// The fields of a downloaded service-account key (`credentials.json`) we need.
#[derive(Clone, PartialEq, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

// Keeps the private key out of debug logs.
impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Credentials(format!("cannot read service account key {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            AppError::Credentials(format!(
                "{} is not a service account key: {e}",
                path.display()
            ))
        })
    }

    /// JWT asking for `scope`, valid for one hour from `issued_at` (unix seconds).
    pub fn assertion(&self, scope: &str, issued_at: i64) -> AppResult<String> {
        let claims = Claims {
            iss: &self.client_email,
            scope,
            aud: &self.token_uri,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| AppError::Credentials(format!("invalid service account private key: {e}")))?;
        encode(&header, &claims, &key)
            .map_err(|e| AppError::Credentials(format!("cannot sign token assertion: {e}")))
    }

    /// Trade a fresh assertion for a bearer token.
    pub fn fetch_token(&self, http: &Client, scope: &str) -> AppResult<String> {
        let assertion = self.assertion(scope, chrono::Utc::now().timestamp())?;
        log::debug!(
            "requesting access token for {} from {}",
            self.client_email,
            self.token_uri
        );

        let resp = http
            .post(&self.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            let excerpt: String = body.chars().take(300).collect();
            return Err(AppError::Credentials(format!(
                "token exchange failed ({status}): {}",
                excerpt.trim()
            )));
        }

        let token: TokenResponse = resp.json()?;
        if token.access_token.trim().is_empty() {
            return Err(AppError::Credentials(
                "token endpoint returned an empty access token".to_string(),
            ));
        }
        Ok(token.access_token)
    }
}
