//! Content loading for specification and policy documents.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::error::{CreatorError, CreatorResult};

/// Reads raw text from a named location.
#[async_trait]
pub trait ContentLoader: Send + Sync {
    /// Fetch the full contents of `location`.
    async fn fetch(&self, location: &str) -> CreatorResult<String>;
}

/// Whether `location` is an HTTP(S) URL rather than a local path.
pub fn is_url(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Loader for local files and HTTP(S) URLs.
#[derive(Debug, Clone, Default)]
pub struct FileReader {
    client: reqwest::Client,
}

impl FileReader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_url(&self, location: &str) -> CreatorResult<String> {
        let response = self.client.get(location).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CreatorError::LocationNotFound(location.to_string()));
        }
        if !status.is_success() {
            return Err(CreatorError::Fetch {
                location: location.to_string(),
                message: format!("unexpected status {}", status),
            });
        }

        Ok(response.text().await?)
    }

    async fn fetch_file(&self, location: &str) -> CreatorResult<String> {
        tokio::fs::read_to_string(location)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    CreatorError::LocationNotFound(location.to_string())
                }
                _ => CreatorError::Io(e),
            })
    }
}

#[async_trait]
impl ContentLoader for FileReader {
    async fn fetch(&self, location: &str) -> CreatorResult<String> {
        debug!("Fetching content from {}", location);
        if is_url(location) {
            self.fetch_url(location).await
        } else {
            self.fetch_file(location).await
        }
    }
}
