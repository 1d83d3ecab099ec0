//! Stored access token handling.
//!
//! Tokens are acquired and refreshed by an external component; this module
//! only reads the stored token file and detects whether usable credentials
//! exist. Every failure mode collapses into `ApiError::AuthRequired`.

use std::fs;
use std::path::Path;

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const CREATION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The token file as the auth component writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    /// UTC, "%Y-%m-%d %H:%M:%S".
    #[serde(default)]
    pub creation_time: String,
    /// Token lifetime in milliseconds.
    #[serde(default)]
    pub expires: i64,
}

impl StoredToken {
    /// Load and check the stored token. Absent, malformed, empty and
    /// expired tokens are all `AuthRequired`.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let raw = fs::read_to_string(path)
            .map_err(|err| ApiError::AuthRequired(format!("token file unreadable: {err}")))?;
        let token: Self = serde_json::from_str(&raw)
            .map_err(|err| ApiError::AuthRequired(format!("token file malformed: {err}")))?;

        if token.access_token.is_empty() {
            return Err(ApiError::AuthRequired("stored token is empty".into()));
        }
        if token.is_expired() {
            return Err(ApiError::AuthRequired("stored token has expired".into()));
        }
        Ok(token)
    }

    /// An unparseable creation time counts as expired; better to defer to
    /// the auth component than to send a token of unknown age.
    pub fn is_expired(&self) -> bool {
        let Ok(created) = NaiveDateTime::parse_from_str(&self.creation_time, CREATION_TIME_FORMAT) else {
            return true;
        };
        let age_ms = (Utc::now() - created.and_utc()).num_milliseconds();
        age_ms > self.expires
    }
}
