//! API client for the Picsum photo listing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://picsum.photos";
pub const PAGE: u32 = 1;
pub const LIMIT: u32 = 30;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Opaque photo identifier. Upstream sends strings, older fixtures use
/// integers; both end up as text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawPhotoId", into = "String")]
pub struct PhotoId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPhotoId {
    Text(String),
    Int(i64),
}

impl From<RawPhotoId> for PhotoId {
    fn from(raw: RawPhotoId) -> Self {
        match raw {
            RawPhotoId::Text(s) => PhotoId(s),
            RawPhotoId::Int(n) => PhotoId(n.to_string()),
        }
    }
}

impl From<PhotoId> for String {
    fn from(id: PhotoId) -> Self {
        id.0
    }
}

impl From<&str> for PhotoId {
    fn from(s: &str) -> Self {
        PhotoId(s.to_string())
    }
}

impl From<String> for PhotoId {
    fn from(s: String) -> Self {
        PhotoId(s)
    }
}

impl From<u64> for PhotoId {
    fn from(n: u64) -> Self {
        PhotoId(n.to_string())
    }
}

impl PhotoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub author: String,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "url")]
    pub page_url: String,
    pub download_url: String,
}

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Request Error: {0}")]
    RequestError(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Picsum API Error ({status}): {body}")]
    StatusError { status: u16, body: String },
    #[error("Parse Error: {0}")]
    ParseError(String),
}

/// Anything that can hand the gallery one page of photos.
#[allow(async_fn_in_trait)]
pub trait PhotoSource {
    async fn fetch_page(&self) -> Result<Vec<Photo>, FetchError>;
}

pub struct PicsumClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl Default for PicsumClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PicsumClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client with a custom API base URL. Mainly used for testing.
    pub fn with_base_url(base_url: String) -> Self {
        PicsumClient {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn list_url(&self) -> String {
        format!("{}/v2/list?page={}&limit={}", self.base_url, PAGE, LIMIT)
    }

    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self)))]
    pub async fn list_photos(&self) -> Result<Vec<Photo>, FetchError> {
        let url = self.list_url();
        tracing::debug!("Fetching photo page from {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FetchError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| self.map_transport(e))?;
        let photos: Vec<Photo> =
            serde_json::from_str(&body).map_err(|e| FetchError::ParseError(e.to_string()))?;

        tracing::info!("Fetched {} photos", photos.len());
        Ok(photos)
    }

    fn map_transport(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::RequestError(err.to_string())
        }
    }
}

impl PhotoSource for PicsumClient {
    async fn fetch_page(&self) -> Result<Vec<Photo>, FetchError> {
        self.list_photos().await
    }
}
