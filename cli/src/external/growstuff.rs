//! Growstuff API client for fetching crop plantings
//!
//! Talks to the public `/crops/<slug>.json` endpoint. One request per lookup;
//! retrying is up to the caller.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::CropRecord;

use super::CropSource;
use crate::config::ApiConfig;
use crate::error::{AppResult, FetchError};

/// Longest slice of an error body kept in a transient error
const ERROR_BODY_LIMIT: usize = 200;

/// Growstuff API client
#[derive(Clone)]
pub struct GrowstuffClient {
    client: Client,
    base_url: String,
}

impl GrowstuffClient {
    /// Create a new GrowstuffClient from API configuration
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new GrowstuffClient with custom base URL and default settings
    pub fn with_base_url(base_url: impl Into<String>) -> AppResult<Self> {
        Self::new(&ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        })
    }

    /// URL of a crop's JSON document.
    ///
    /// The slug is percent-encoded as a single path segment, so characters
    /// like `/` or `?` stay part of the crop name.
    pub fn crop_url(&self, slug: &str) -> String {
        format!("{}/crops/{}.json", self.base_url, urlencoding::encode(slug))
    }

    /// Fetch a crop and its plantings by slug
    pub async fn get_crop(&self, slug: &str) -> Result<CropRecord, FetchError> {
        let url = self.crop_url(slug);
        tracing::debug!(%url, "Fetching crop");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "Growstuff request failed");
            FetchError::transient(format!("Growstuff request failed: {}", e))
        })?;

        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "Growstuff responded");

        if status == StatusCode::NOT_FOUND {
            tracing::info!("No Growstuff crop matches slug {:?}", slug);
            return Err(FetchError::NotFound {
                slug: slug.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            tracing::warn!(%url, status = status.as_u16(), "Growstuff API error");
            return Err(FetchError::Transient {
                status: Some(status.as_u16()),
                message: format!("{} - {}", status, body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transient(format!("Failed to read crop response: {}", e)))?;

        CropRecord::from_json(&body).map_err(|e| {
            tracing::warn!(%url, error = %e, "Growstuff sent an unexpected crop document");
            FetchError::MalformedResponse(e.to_string())
        })
    }
}

#[async_trait]
impl CropSource for GrowstuffClient {
    async fn fetch_crop(&self, slug: &str) -> Result<CropRecord, FetchError> {
        self.get_crop(slug).await
    }
}
