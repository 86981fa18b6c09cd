//! Curriculum link discovery.
//!
//! Fetches each program's public page and collects the Google Drive file ids
//! of the curriculum documents linked from it. The result feeds the
//! extraction stage as `drive_links.json`.

mod parser;

use std::time::Duration;

use itmo_advisor_shared::{AdvisorError, DocumentLinkSet, Program, Result};
use reqwest::Client;
use tracing::{info, instrument, warn};

pub use parser::extract_drive_ids;

/// Maximum number of redirects to follow when fetching a program page.
const MAX_REDIRECTS: usize = 5;

/// Default timeout in seconds for fetching a program page.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// User-Agent string for discovery requests.
pub const USER_AGENT: &str = concat!("itmo-advisor-bot/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Discovery options
// ---------------------------------------------------------------------------

/// Configuration for the discovery process.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Timeout for HTTP requests in seconds.
    pub timeout_secs: u64,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Discover document ids for every configured program page.
///
/// Pages are fetched one after another. A failing page is logged and
/// recorded with an empty id list so the remaining programs still run.
pub async fn discover_all(
    pages: &[(Program, String)],
    opts: &DiscoveryOptions,
) -> Result<DocumentLinkSet> {
    let client = build_client(opts)?;
    let mut links = DocumentLinkSet::new();

    for (program, url) in pages {
        let ids = match discover_program(&client, url).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(%program, %url, error = %e, "failed to fetch program page");
                Vec::new()
            }
        };
        info!(%program, ids = ids.len(), "program page scanned");
        links.insert(*program, ids);
    }

    Ok(links)
}

/// Fetch one program page and return the Drive file ids it links to.
#[instrument(skip(client))]
pub async fn discover_program(client: &Client, url: &str) -> Result<Vec<String>> {
    let html = fetch_page(client, url).await?;
    Ok(extract_drive_ids(&html).into_iter().collect())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a reqwest client with appropriate settings.
pub fn build_client(opts: &DiscoveryOptions) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(Duration::from_secs(opts.timeout_secs))
        .build()
        .map_err(|e| AdvisorError::Network(format!("failed to build HTTP client: {e}")))
}

async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AdvisorError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AdvisorError::Network(format!("{url}: HTTP {status}")));
    }

    response
        .text()
        .await
        .map_err(|e| AdvisorError::Network(format!("{url}: failed to read body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn discover_program_with_mock_server() {
        let server = wiremock::MockServer::start().await;
        let page = std::fs::read_to_string("../../../fixtures/html/program_page.html")
            .expect("read fixture");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/program/master/ai"))
            .and(wiremock::matchers::header("user-agent", USER_AGENT))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(page))
            .mount(&server)
            .await;

        let client = build_client(&DiscoveryOptions::default()).unwrap();
        let url = format!("{}/program/master/ai", server.uri());
        let ids = discover_program(&client, &url).await.unwrap();

        assert_eq!(ids, vec!["1AbCdEf_plan-2025", "1ZyXwV_electives"]);
    }

    #[tokio::test]
    async fn discover_program_http_error() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = build_client(&DiscoveryOptions::default()).unwrap();
        let err = discover_program(&client, &server.uri()).await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn failing_page_yields_empty_list() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::path("/ai"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(
                r#"<a href="https://drive.google.com/file/d/planA/view">plan</a>"#,
            ))
            .mount(&server)
            .await;

        wiremock::Mock::given(wiremock::matchers::path("/ai_product"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let pages = vec![
            (Program::Ai, format!("{}/ai", server.uri())),
            (Program::AiProduct, format!("{}/ai_product", server.uri())),
        ];
        let links = discover_all(&pages, &DiscoveryOptions::default())
            .await
            .unwrap();

        assert_eq!(links[&Program::Ai], vec!["planA"]);
        assert!(links[&Program::AiProduct].is_empty());
    }

    #[tokio::test]
    async fn unreachable_host_is_not_fatal() {
        let pages = vec![(Program::Ai, "http://127.0.0.1:9/ai".to_string())];
        let opts = DiscoveryOptions { timeout_secs: 2 };
        let links = discover_all(&pages, &opts).await.unwrap();
        assert!(links[&Program::Ai].is_empty());
    }
}
