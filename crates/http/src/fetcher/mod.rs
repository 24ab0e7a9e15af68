//! The [`Fetcher`] trait and its implementations.

#[cfg(feature = "mock")]
mod mock;
mod remote;

#[cfg(feature = "mock")]
pub use self::mock::{MockFetcher, MockResponse};
pub use self::remote::HttpFetcher;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

/// Fetches JSON documents from the upstream catalog.
///
/// Implementations report non-2xx responses as
/// [`Status`](crate::error::ErrorKind::Status) and never retry on their own;
/// retry and fallback policy belongs to the caller.
///
/// # Examples
///
/// ```
/// use nguonc_http::{Fetcher, error::Result};
/// use url::Url;
///
/// async fn title_of(fetcher: &dyn Fetcher, url: &Url) -> Result<Option<String>> {
///     let json = fetcher.get_json(url).await?;
///     Ok(json.pointer("/movie/name").and_then(|v| v.as_str()).map(str::to_string))
/// }
/// ```
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Name of the fetcher (used for logging only).
    fn name(&self) -> &str;

    /// `GET` the URL and parse the response body as JSON.
    async fn get_json(&self, url: &Url) -> Result<Value>;
}
