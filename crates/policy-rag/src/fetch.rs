//! Document fetching with share-link normalization
//!
//! A locator is either an `http(s)` URL or a local filesystem path; both are
//! sources of the same capability and feed the same extraction path.

use regex::Regex;
use reqwest::Client;
use std::time::Duration;

use crate::error::{Error, Result};

/// Raw document bytes plus the signals format detection needs.
///
/// Ephemeral: lives only within the fetch-and-extract stage.
#[derive(Debug, Clone)]
pub struct DocumentBytes {
    /// Raw byte buffer
    pub data: Vec<u8>,
    /// Transport-reported content type, possibly absent or wrong
    pub content_type: Option<String>,
    /// Locator the bytes were actually read from (post-rewrite for share links)
    pub locator: String,
}

/// Resolves a document locator to raw bytes
pub struct DocumentFetcher {
    client: Client,
}

impl DocumentFetcher {
    /// Create a new fetcher with a transport-level timeout
    pub fn new(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self { client }
    }

    /// Fetch the document behind a locator.
    ///
    /// Google Drive share links are rewritten to their direct-download form
    /// before any request is made; an unrecognized Drive link fails with
    /// `InvalidLocator` without touching the network.
    pub async fn fetch(&self, locator: &str) -> Result<DocumentBytes> {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            self.fetch_url(locator).await
        } else {
            self.read_local(locator).await
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<DocumentBytes> {
        let url = if url.contains("drive.google.com") {
            let file_id = extract_drive_file_id(url).ok_or_else(|| {
                Error::InvalidLocator("unrecognized Google Drive link format".to_string())
            })?;
            format!("https://drive.google.com/uc?export=download&id={}", file_id)
        } else {
            url.to_string()
        };

        tracing::info!("fetching document from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::Fetch(format!(
                "HTTP {} fetching {}",
                response.status(),
                url
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let data = response
            .bytes()
            .await
            .map_err(|e| Error::Fetch(format!("reading response body failed: {}", e)))?
            .to_vec();

        Ok(DocumentBytes {
            data,
            content_type,
            locator: url,
        })
    }

    async fn read_local(&self, path: &str) -> Result<DocumentBytes> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| Error::InvalidLocator(format!("cannot read {}: {}", path, e)))?;

        // No transport hint for local files; detection falls back to the extension.
        Ok(DocumentBytes {
            data,
            content_type: None,
            locator: path.to_string(),
        })
    }
}

/// Extract the file id embedded in a Google Drive share link.
///
/// Two link shapes are recognized: `/file/d/<id>` paths and `id=<id>`
/// query parameters.
pub fn extract_drive_file_id(url: &str) -> Option<String> {
    let patterns = [
        r"https://drive\.google\.com/file/d/([a-zA-Z0-9_-]+)",
        r"id=([a-zA-Z0-9_-]+)",
    ];

    for pattern in patterns {
        let re = Regex::new(pattern).expect("static pattern compiles");
        if let Some(captures) = re.captures(url) {
            return Some(captures[1].to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_file_path_link() {
        let url = "https://drive.google.com/file/d/1AbC_d-9xYz/view?usp=sharing";
        assert_eq!(extract_drive_file_id(url), Some("1AbC_d-9xYz".to_string()));
    }

    #[test]
    fn extracts_id_from_query_parameter_link() {
        let url = "https://drive.google.com/open?id=9zYx-C_bA1";
        assert_eq!(extract_drive_file_id(url), Some("9zYx-C_bA1".to_string()));
    }

    #[test]
    fn rejects_link_without_id() {
        assert_eq!(extract_drive_file_id("https://drive.google.com/drive/my-drive"), None);
    }

    #[tokio::test]
    async fn unrecognized_drive_link_is_invalid_locator() {
        let fetcher = DocumentFetcher::new(5);
        let result = fetcher
            .fetch("https://drive.google.com/drive/my-drive")
            .await;
        assert!(matches!(result, Err(Error::InvalidLocator(_))));
    }

    #[tokio::test]
    async fn reads_local_path_without_type_hint() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"policy wording").unwrap();

        let fetcher = DocumentFetcher::new(5);
        let document = fetcher.fetch(file.path().to_str().unwrap()).await.unwrap();

        assert_eq!(document.data, b"policy wording");
        assert!(document.content_type.is_none());
    }

    #[tokio::test]
    async fn missing_local_path_is_invalid_locator() {
        let fetcher = DocumentFetcher::new(5);
        let result = fetcher.fetch("/nonexistent/policy.pdf").await;
        assert!(matches!(result, Err(Error::InvalidLocator(_))));
    }
}
