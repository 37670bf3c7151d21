//! Remote photo API: record type, request URLs, and the transport seam.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Album identifier as served by the photo endpoint.
pub type AlbumId = u64;

const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/photos";

/// Base URL for the photo listing. Override with `PHOTO_API_URL` env var for dev/testing.
pub fn endpoint_url() -> String {
    std::env::var("PHOTO_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string())
}

/// Errors from a single fetch attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A photo record as returned by the remote source.
///
/// Pass-through data: the store never validates or rewrites these fields,
/// it only reads `album_id` for filtering.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Photo {
    #[serde(rename = "albumId")]
    pub album_id: AlbumId,
    pub id: u64,
    pub title: String,
    pub url: String,
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: String,
}

/// Trait for fetching the raw photo listing body.
///
/// Abstracts over the HTTP layer so tests can script responses and capture
/// request URLs without a live server.
#[async_trait]
pub trait PhotoTransport: Send + Sync {
    /// GET `url` and return the response body as text.
    async fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed transport used outside of tests.
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PhotoTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        // No status check: an error body that isn't a photo array surfaces
        // as a decode error downstream.
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        resp.text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

/// Build the listing URL, repeating `albumId=<id>` once per filter entry.
/// An empty filter produces the bare endpoint with no query string.
pub fn build_photos_url(base_url: &str, album_ids: &[AlbumId]) -> String {
    let mut url = base_url.to_string();
    for (i, id) in album_ids.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str("albumId=");
        url.push_str(&id.to_string());
    }
    url
}

/// Fetch and decode the photo listing in one step.
pub async fn fetch_photo_list(
    transport: &dyn PhotoTransport,
    base_url: &str,
    album_ids: &[AlbumId],
) -> Result<Vec<Photo>, FetchError> {
    let url = build_photos_url(base_url, album_ids);
    let body = transport.get(&url).await?;
    let photos: Vec<Photo> = serde_json::from_str(&body)?;
    Ok(photos)
}
