//! Remote bookmark API client.
//!
//! Speaks the REST surface of the remote bookmark service with a bearer
//! token. All list endpoints share the `{"items": [...]}` envelope; a
//! missing or null `items` field decodes to an empty list. Bookmarks are
//! the only paginated resource, exposed through [`PageSource`] so the
//! aggregation loop stays independent of HTTP details.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use droplet_core::cache::ItemsEnvelope;
use droplet_core::models::{Bookmark, Collection, Tag};

use crate::error::ApiError;
use crate::pages::PageSource;
use crate::token::StoredToken;

/// Default base URL for the remote bookmark API.
const DEFAULT_BASE_URL: &str = "https://api.raindrop.io/rest/v1";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "droplet/0.1";

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Remote bookmark API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    token: StoredToken,
}

impl ApiClient {
    pub fn new(config: ApiConfig, token: StoredToken) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ApiError::Network(Arc::new(e)))?;

        Ok(Self { http, config, token })
    }

    async fn get_items<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        tracing::debug!(%path, "querying remote bookmark store");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token.access_token)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == 401 || status == 403 {
            return Err(ApiError::AuthRequired(format!("remote rejected token: HTTP {}", status.as_u16())));
        }
        if status == 429 {
            return Err(ApiError::RateLimited);
        }
        if status.is_client_error() || status.is_server_error() {
            return Err(ApiError::HttpStatus { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        let envelope: ItemsEnvelope<T> =
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(envelope.items.unwrap_or_default())
    }

    /// One page of the full bookmark listing (collection 0 = everything).
    pub async fn bookmarks_page(&self, page: usize, per_page: usize) -> Result<Vec<Bookmark>, ApiError> {
        self.get_items(
            "raindrops/0",
            &[("perpage", per_page.to_string()), ("page", page.to_string())],
        )
        .await
    }

    /// Top-level collections: roots only.
    pub async fn collections_top(&self) -> Result<Vec<Collection>, ApiError> {
        self.get_items("collections", &[]).await
    }

    /// Sublevel collections: every non-root, any depth.
    pub async fn collections_sub(&self) -> Result<Vec<Collection>, ApiError> {
        self.get_items("collections/childrens", &[]).await
    }

    pub async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.get_items("tags/0", &[]).await
    }
}

#[async_trait]
impl PageSource for ApiClient {
    type Item = Bookmark;

    async fn fetch_page(&self, page: usize, per_page: usize) -> Result<Vec<Bookmark>, ApiError> {
        self.bookmarks_page(page, per_page).await
    }
}
