//! # Question Page Crawler
//!
//! Fetches question pages over HTTP and reads the list of page links a batch
//! should visit. This is the network edge of the pipeline.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: request timeout, redirects and request headers
//! - `PageFetcher`: performs a single fetch attempt for one page
//! - `input::read_links`: loads eligible page links from a CSV export
//!
//! Retries and delays between attempts are decided by the pipeline; the
//! fetcher only reports what one attempt did.

mod config;
mod error;
pub mod input;

pub use config::{CrawlerConfig, CrawlerConfigBuilder};
pub use error::FetchError;
pub use input::{links_from_reader, read_links};

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, redirect::Policy};
use tracing::{debug, instrument};
use url::Url;

/// HTTP fetcher for question pages
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Create a fetcher from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        let accept = HeaderValue::from_str(&config.accept)
            .map_err(|e| FetchError::ClientSetup(format!("invalid Accept header: {}", e)))?;
        headers.insert(ACCEPT, accept);

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.request_timeout())
            .redirect(Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch the markup of one page in a single attempt
    ///
    /// # Errors
    ///
    /// Transport faults and timeouts yield [`FetchError::Http`]; any
    /// non-success status yields [`FetchError::Status`].
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        debug!("Fetching {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status_code: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::time::Duration;

    fn fetcher() -> PageFetcher {
        let config = CrawlerConfig::builder()
            .request_timeout(Duration::from_secs(2))
            .build();
        PageFetcher::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/discussions/view/1")
            .match_header("accept", mockito::Matcher::Regex("text/html".to_string()))
            .match_header("user-agent", mockito::Matcher::Regex("Mozilla".to_string()))
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html>ok</html>")
            .expect(1)
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/discussions/view/1", server.url())).unwrap();
        let body = fetcher().fetch(&url).await.unwrap();
        assert_eq!(body, "<html>ok</html>");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/missing", server.url())).unwrap();
        let result = fetcher().fetch(&url).await;
        assert!(matches!(
            result,
            Err(FetchError::Status {
                status_code: 404,
                ..
            })
        ));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_connection_fault() {
        let url = Url::parse("http://127.0.0.1:9/unreachable").unwrap();
        let result = fetcher().fetch(&url).await;
        assert!(matches!(result, Err(FetchError::Http(_))));
    }
}
