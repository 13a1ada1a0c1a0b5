//! HTTP page source.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use super::{FetchError, PageSource};
use crate::config::HttpConfig;

/// Fetches result pages over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Arc<Client>,
}

impl HttpPageSource {
    /// Create a source with default settings
    pub fn new() -> Result<Self, FetchError> {
        Self::from_config(&HttpConfig::default())
    }

    /// Create a source with the configured user agent and timeouts
    pub fn from_config(config: &HttpConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
        })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        let url = reqwest::Url::parse(location)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", location, e)))?;

        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "text/html")
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to fetch {}: {}", location, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: location.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to read response: {}", e)))?;

        tracing::debug!("Fetched {} bytes from {}", body.len(), location);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/scholar")
            .match_query(mockito::Matcher::UrlEncoded("q".into(), "kubernetes".into()))
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<html><body>ok</body></html>")
            .create_async()
            .await;

        let source = HttpPageSource::new().unwrap();
        let body = source
            .fetch(&format!("{}/scholar?q=kubernetes", server.url()))
            .await
            .unwrap();

        assert_eq!(body, "<html><body>ok</body></html>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/scholar")
            .with_status(503)
            .create_async()
            .await;

        let source = HttpPageSource::new().unwrap();
        let err = source
            .fetch(&format!("{}/scholar", server.url()))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let source = HttpPageSource::new().unwrap();
        let err = source.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[test]
    fn test_from_config() {
        let config = HttpConfig {
            timeout_secs: 5,
            connect_timeout_secs: 2,
            user_agent: "scholar-cites-test".to_string(),
        };
        assert!(HttpPageSource::from_config(&config).is_ok());
    }
}
