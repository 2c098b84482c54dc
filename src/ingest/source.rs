//! Remote post sources
//!
//! A [`PostSource`] produces the raw CSV export of the published
//! spreadsheet. Ingestion issues exactly one `fetch_csv` per cache miss.

use crate::{BlogError, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Default per-request timeout for the spreadsheet export
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Producer of raw spreadsheet text
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch the full CSV export
    async fn fetch_csv(&self) -> Result<String>;

    /// Human-readable origin, for logs
    fn describe(&self) -> String;
}

/// Published spreadsheet reachable over HTTP
pub struct HttpSource {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, FETCH_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ipfo-blog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PostSource for HttpSource {
    async fn fetch_csv(&self) -> Result<String> {
        info!(url = %self.url, "Fetching blog posts from source");

        let response = self
            .client
            .get(&self.url)
            .header(header::ACCEPT, "text/csv, text/plain;q=0.9, */*;q=0.1")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| BlogError::SourceUnavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BlogError::SourceUnavailable(format!(
                "source returned HTTP {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BlogError::SourceUnavailable(format!("failed to read body: {}", e)))?;

        debug!(bytes = body.len(), "Source response received");
        Ok(body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Local CSV export, for offline previews of a sheet
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PostSource for FileSource {
    async fn fetch_csv(&self) -> Result<String> {
        info!(path = %self.path.display(), "Reading blog posts from file");

        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            BlogError::SourceUnavailable(format!("cannot read {}: {}", self.path.display(), e))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_http_source_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/posts.csv")
            .with_status(200)
            .with_header("content-type", "text/csv")
            .with_body("ID,Title\n1,Hello\n")
            .create_async()
            .await;

        let source = HttpSource::new(format!("{}/posts.csv", server.url())).unwrap();
        let body = source.fetch_csv().await.unwrap();

        assert_eq!(body, "ID,Title\n1,Hello\n");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_source_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/posts.csv")
            .with_status(500)
            .create_async()
            .await;

        let source = HttpSource::new(format!("{}/posts.csv", server.url())).unwrap();
        let err = source.fetch_csv().await.unwrap_err();

        assert!(err.is_empty_state());
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_http_source_unreachable() {
        // Port 9 (discard) on localhost is almost never listening
        let source = HttpSource::with_timeout("http://127.0.0.1:9/posts.csv", Duration::from_secs(2))
            .unwrap();
        let err = source.fetch_csv().await.unwrap_err();
        assert!(matches!(err, BlogError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_file_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("posts.csv");
        std::fs::write(&path, "ID\nx\n").unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.fetch_csv().await.unwrap(), "ID\nx\n");

        let missing = FileSource::new(dir.path().join("missing.csv"));
        assert!(missing.fetch_csv().await.unwrap_err().is_empty_state());
    }
}
