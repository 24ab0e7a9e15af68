use std::num::NonZeroUsize;
use std::time::Duration as StdDuration;

use exn::ResultExt;
use nguonc_extract::models::StreamKind;
use serde::{Deserialize, Serialize};
use time::Duration;
use url::Url;

use crate::error::{ErrorKind, Result};

const DEFAULT_BASE_URL: &str = "https://phim.nguonc.com";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_HTTP_CAPACITY: usize = 150;
const DEFAULT_HTTP_TTL_SECS: u64 = 5 * 60;
const DEFAULT_DETAIL_CAPACITY: usize = 400;
const DEFAULT_DETAIL_TTL_SECS: u64 = 60 * 60;

/// Everything the catalog core can be configured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub cache: CacheSettings,
    /// Stream type [`choose_stream`](nguonc_extract::choose_stream) favours
    /// when picking what to play.
    pub preferred_stream_type: StreamKind,
    /// Emit per-operation diagnostic events. Never changes behaviour.
    pub debug_log: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            cache: CacheSettings::default(),
            preferred_stream_type: StreamKind::Embed,
            debug_log: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Scheme and host of the upstream API; paths are appended to it.
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ApiSettings {
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url).or_raise(|| ErrorKind::Invalid {
            field: "api.base_url",
            reason: format!("'{}' is not a URL", self.base_url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            exn::bail!(ErrorKind::Invalid {
                field: "api.base_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        Ok(url)
    }

    pub fn timeout(&self) -> StdDuration {
        StdDuration::from_millis(self.timeout_ms)
    }
}

/// Sizes and freshness windows of the two caches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Raw JSON responses, keyed by request URL.
    pub http_capacity: usize,
    pub http_ttl_secs: u64,
    /// Normalized details, keyed by `slug:<x>` / `id:<x>`.
    pub detail_capacity: usize,
    /// Also used as the HTTP window for detail endpoints.
    pub detail_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            http_capacity: DEFAULT_HTTP_CAPACITY,
            http_ttl_secs: DEFAULT_HTTP_TTL_SECS,
            detail_capacity: DEFAULT_DETAIL_CAPACITY,
            detail_ttl_secs: DEFAULT_DETAIL_TTL_SECS,
        }
    }
}

impl CacheSettings {
    pub fn http_capacity(&self) -> Result<NonZeroUsize> {
        non_zero("cache.http_capacity", self.http_capacity)
    }

    pub fn detail_capacity(&self) -> Result<NonZeroUsize> {
        non_zero("cache.detail_capacity", self.detail_capacity)
    }

    pub fn http_ttl(&self) -> Duration {
        seconds(self.http_ttl_secs)
    }

    pub fn detail_ttl(&self) -> Duration {
        seconds(self.detail_ttl_secs)
    }
}

fn non_zero(field: &'static str, value: usize) -> Result<NonZeroUsize> {
    match NonZeroUsize::new(value) {
        Some(value) => Ok(value),
        None => exn::bail!(ErrorKind::Invalid {
            field,
            reason: "must be greater than zero".to_string(),
        }),
    }
}

fn seconds(secs: u64) -> Duration {
    Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX))
}

impl Settings {
    /// Checks every value that the type system does not already constrain.
    pub fn validate(&self) -> Result<()> {
        self.api.base_url()?;
        if self.api.timeout_ms == 0 {
            exn::bail!(ErrorKind::Invalid {
                field: "api.timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        self.cache.http_capacity()?;
        self.cache.detail_capacity()?;
        Ok(())
    }
}
