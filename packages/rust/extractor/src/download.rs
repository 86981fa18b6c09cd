//! Google Drive document download.
//!
//! Uses the direct `uc?export=download` endpoint. Large files answer with an
//! HTML confirmation page instead of the file (no `Content-Disposition`
//! header); those are reported as [`AdvisorError::Download`] and skipped by
//! the caller.

use std::path::PathBuf;
use std::time::Duration;

use itmo_advisor_shared::{AdvisorError, Result};
use reqwest::Client;
use reqwest::header::CONTENT_DISPOSITION;
use tracing::{debug, instrument};

/// User-Agent string for download requests.
const USER_AGENT: &str = concat!("itmo-advisor-bot/", env!("CARGO_PKG_VERSION"));

/// Default timeout in seconds for a single download.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default document host.
pub const DEFAULT_DRIVE_BASE_URL: &str = "https://drive.google.com";

/// Configuration for [`DriveClient`].
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Base URL of the document host (overridable for tests).
    pub base_url: String,
    /// Timeout for each request in seconds.
    pub timeout_secs: u64,
    /// Keep a copy of every downloaded file as `<dir>/<id>.pdf`.
    pub cache_dir: Option<PathBuf>,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DRIVE_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache_dir: None,
        }
    }
}

/// Downloads curriculum documents by Drive file id.
pub struct DriveClient {
    client: Client,
    base_url: String,
    cache_dir: Option<PathBuf>,
}

impl DriveClient {
    /// Create a client with the given options.
    pub fn new(opts: DownloadOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()
            .map_err(|e| AdvisorError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: opts.base_url.trim_end_matches('/').to_string(),
            cache_dir: opts.cache_dir,
        })
    }

    /// Download the document bytes for `file_id`.
    #[instrument(skip(self))]
    pub async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
        let url = format!("{}/uc?export=download&id={file_id}", self.base_url);
        debug!(%url, "downloading document");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AdvisorError::Network(format!("{url}: {e}")))?;

        if !response.headers().contains_key(CONTENT_DISPOSITION) {
            return Err(self.confirmation_required(file_id).await);
        }

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Network(format!("{url}: HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AdvisorError::Network(format!("{url}: failed to read body: {e}")))?
            .to_vec();

        if let Some(dir) = &self.cache_dir {
            let path = dir.join(format!("{file_id}.pdf"));
            std::fs::create_dir_all(dir).map_err(|e| AdvisorError::io(dir, e))?;
            std::fs::write(&path, &bytes).map_err(|e| AdvisorError::io(&path, e))?;
            debug!(?path, bytes = bytes.len(), "document cached");
        }

        Ok(bytes)
    }

    /// The direct link returned a page instead of the file. Probe the view
    /// page so an outright HTTP failure is reported as such; anything else
    /// needs a browser.
    async fn confirmation_required(&self, file_id: &str) -> AdvisorError {
        let view_url = format!("{}/file/d/{file_id}/view", self.base_url);

        match self.client.get(&view_url).send().await {
            Err(e) => AdvisorError::Network(format!("{view_url}: {e}")),
            Ok(resp) if !resp.status().is_success() => {
                AdvisorError::Network(format!("{view_url}: HTTP {}", resp.status()))
            }
            Ok(_) => AdvisorError::download(
                file_id,
                "could not download via direct link; interactive Google Drive confirmation required",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, cache_dir: Option<PathBuf>) -> DriveClient {
        DriveClient::new(DownloadOptions {
            base_url: server.uri(),
            timeout_secs: 5,
            cache_dir,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn downloads_attachment() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/uc"))
            .and(query_param("export", "download"))
            .and(query_param("id", "doc1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Disposition", "attachment; filename=\"plan.pdf\"")
                    .set_body_bytes(b"%PDF-1.4 fake".to_vec()),
            )
            .mount(&server)
            .await;

        let bytes = client_for(&server, None).download("doc1").await.unwrap();
        assert_eq!(bytes, b"%PDF-1.4 fake");
    }

    #[tokio::test]
    async fn confirmation_page_is_download_error() {
        let server = MockServer::start().await;

        Mock::given(path("/uc"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<html>virus scan warning</html>"),
            )
            .mount(&server)
            .await;

        Mock::given(path("/file/d/big/view"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>viewer</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server, None).download("big").await.unwrap_err();
        assert!(matches!(err, AdvisorError::Download { ref file_id, .. } if file_id == "big"));
    }

    #[tokio::test]
    async fn missing_view_page_is_network_error() {
        let server = MockServer::start().await;

        Mock::given(path("/uc"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        Mock::given(path("/file/d/gone/view"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server, None).download("gone").await.unwrap_err();
        assert!(matches!(err, AdvisorError::Network(_)));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn cache_dir_keeps_a_copy() {
        let server = MockServer::start().await;

        Mock::given(path("/uc"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Disposition", "attachment")
                    .set_body_bytes(b"bytes".to_vec()),
            )
            .mount(&server)
            .await;

        let dir = std::env::temp_dir().join(format!("itmo-advisor-pdfs-{}", std::process::id()));
        client_for(&server, Some(dir.clone()))
            .download("cached")
            .await
            .unwrap();

        let saved = std::fs::read(dir.join("cached.pdf")).expect("cached file");
        assert_eq!(saved, b"bytes");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
