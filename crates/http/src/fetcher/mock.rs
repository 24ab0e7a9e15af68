//! In-memory fetcher for testing.

use super::Fetcher;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use url::Url;

/// A canned answer for one URL.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Json(Value),
    Status(u16, String),
    /// Wait (on the tokio clock) before answering.
    Delayed(Duration, Box<MockResponse>),
}

/// In-memory [`Fetcher`] for testing.
///
/// Routes are matched on the full URL string. Unknown URLs answer `404`.
/// Every request is recorded, so tests can assert on what was (or was not)
/// fetched.
///
/// # Examples
///
/// ```
/// use nguonc_http::Fetcher;
/// use nguonc_http::fetcher::MockFetcher;
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = MockFetcher::default().with_json("https://api.test/a", json!({"ok": true}));
/// let json = fetcher.get_json(&"https://api.test/a".parse()?).await?;
/// assert_eq!(json["ok"], true);
/// assert!(fetcher.get_json(&"https://api.test/b".parse()?).await.is_err());
/// assert_eq!(fetcher.requests().len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockFetcher {
    routes: Mutex<HashMap<String, MockResponse>>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn with_response(self, url: impl Into<String>, response: MockResponse) -> Self {
        self.respond(url, response);
        self
    }

    pub fn with_json(self, url: impl Into<String>, json: Value) -> Self {
        self.with_response(url, MockResponse::Json(json))
    }

    pub fn with_status(self, url: impl Into<String>, code: u16, body: impl Into<String>) -> Self {
        self.with_response(url, MockResponse::Status(code, body.into()))
    }

    /// Replaces the answer for `url` on an already shared fetcher.
    pub fn respond(&self, url: impl Into<String>, response: MockResponse) {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner).insert(url.into(), response);
    }

    /// Every requested URL, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// How many times `url` was requested.
    pub fn request_count(&self, url: &str) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).iter().filter(|r| *r == url).count()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get_json(&self, url: &Url) -> Result<Value> {
        let key = url.as_str().to_string();
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(key.clone());
        let route = self.routes.lock().unwrap_or_else(PoisonError::into_inner).get(&key).cloned();
        let mut response = route.unwrap_or_else(|| MockResponse::Status(404, format!("no route for {key}")));
        loop {
            match response {
                MockResponse::Json(json) => return Ok(json),
                MockResponse::Status(code, body) => exn::bail!(ErrorKind::status(code, &body)),
                MockResponse::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    response = *inner;
                },
            }
        }
    }
}
