use super::Fetcher;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;
use url::Url;

/// [`Fetcher`] backed by a pooled `reqwest` client.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use nguonc_http::{Fetcher, HttpFetcher};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpFetcher::new(Duration::from_secs(10))?;
/// let url = "https://phim.nguonc.com/api/films/search?keyword=hai".parse()?;
/// let results = fetcher.get_json(&url).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a client that asks for JSON and gives up on requests that take
    /// longer than `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .or_raise(|| ErrorKind::Network("could not build HTTP client".to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip_all, fields(url = %url))]
    async fn get_json(&self, url: &Url) -> Result<Value> {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(err) if err.is_timeout() => return Err(err).or_raise(|| ErrorKind::Timeout),
            Err(err) => {
                let message = err.to_string();
                return Err(err).or_raise(|| ErrorKind::Network(message));
            },
        };
        let status = response.status();
        if !status.is_success() {
            // The body is diagnostic only; failing to read it is not worth reporting.
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "Upstream returned an error status");
            exn::bail!(ErrorKind::status(status.as_u16(), &body));
        }
        response.json::<Value>().await.or_raise(|| ErrorKind::InvalidJson)
    }
}
