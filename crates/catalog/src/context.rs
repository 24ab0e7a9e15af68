use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::{Mutex, MutexGuard, PoisonError};

use nguonc_cache::{BoundedCache, Timed};
use nguonc_config::Settings;
use nguonc_extract::models::NormalizedDetail;
use nguonc_http::{FetcherHandle, HttpFetcher};
use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde_json::Value;
use time::Duration;
use tracing::instrument;
use url::Url;

use crate::api::Endpoints;
use crate::error::{ErrorKind, Result};

type Rng = Box<dyn RngCore + Send>;

/// One plugin instance: settings, the upstream fetcher, and the two caches.
///
/// Every operation is a method on this context; nothing is shared between
/// separate instances. Cache locks are only ever held for a lookup or an
/// insert and never across an `.await`, so a `Catalog` can be shared between
/// tasks behind an [`Arc`](std::sync::Arc).
///
/// # Examples
///
/// ```no_run
/// use nguonc_catalog::Catalog;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = nguonc_config::load(None)?;
/// let catalog = Catalog::from_settings(settings)?;
/// for item in catalog.search("hải tặc").await {
///     println!("{}: {}", item.id, item.title);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Catalog {
    pub(crate) settings: Settings,
    pub(crate) endpoints: Endpoints,
    fetcher: FetcherHandle,
    /// Raw JSON keyed by request URL.
    http_cache: Mutex<BoundedCache<String, Timed<Value>>>,
    /// Normalized details keyed by `slug:<x>` / `id:<x>`.
    detail_cache: Mutex<BoundedCache<String, Timed<NormalizedDetail>>>,
    rng: Mutex<Rng>,
}

impl Catalog {
    /// Builds a catalog around an existing fetcher.
    pub fn new(settings: Settings, fetcher: FetcherHandle) -> Result<Self> {
        let configuration = |err: nguonc_config::error::Error| err.raise(ErrorKind::Configuration);
        settings.validate().map_err(configuration)?;
        let base = settings.api.base_url().map_err(configuration)?;
        let http_capacity = settings.cache.http_capacity().map_err(configuration)?;
        let detail_capacity = settings.cache.detail_capacity().map_err(configuration)?;
        tracing::debug!(fetcher = fetcher.name(), %base, "Creating catalog");
        Ok(Self {
            endpoints: Endpoints::new(base),
            fetcher,
            http_cache: Mutex::new(BoundedCache::new(http_capacity)),
            detail_cache: Mutex::new(BoundedCache::new(detail_capacity)),
            rng: Mutex::new(Box::new(StdRng::from_os_rng())),
            settings,
        })
    }

    /// Builds a catalog that talks to the configured upstream over HTTP.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let fetcher = HttpFetcher::new(settings.api.timeout()).map_err(ErrorKind::fetch)?;
        Self::new(settings, std::sync::Arc::new(fetcher))
    }

    /// Replaces the randomness source used to pick the home banner.
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether a normalized detail is cached under `key` (`slug:<x>` or
    /// `id:<x>`), fresh or not. Does not affect eviction order.
    pub fn has_cached_detail(&self, key: &str) -> bool {
        lock(&self.detail_cache).contains(key)
    }

    /// Fetches JSON through the URL cache.
    ///
    /// A fresh cache hit is returned without a request. Otherwise the fetch is
    /// bounded by the configured timeout, and only a successful response is
    /// cached (for `ttl`).
    pub(crate) async fn http_json(&self, url: Url, ttl: Duration) -> Result<Value> {
        if let Some(json) = self.cached_json(&url) {
            return Ok(json);
        }
        let json = self.fetch_json(&url).await?;
        self.store_json(&url, json.clone(), ttl);
        Ok(json)
    }

    /// A fresh response cached for `url`, if any.
    pub(crate) fn cached_json(&self, url: &Url) -> Option<Value> {
        let json = lock(&self.http_cache).get(url.as_str()).filter(|e| e.is_fresh()).map(|e| e.value.clone());
        if json.is_some() {
            tracing::trace!(%url, "HTTP cache hit");
        }
        json
    }

    /// Fetches `url` upstream without reading or filling the URL cache.
    #[instrument(level = "debug", skip_all, fields(url = %url))]
    pub(crate) async fn fetch_json(&self, url: &Url) -> Result<Value> {
        let timeout = self.settings.api.timeout();
        match tokio::time::timeout(timeout, self.fetcher.get_json(url)).await {
            Ok(response) => response.map_err(ErrorKind::fetch),
            Err(_elapsed) => {
                tracing::debug!(timeout_ms = self.settings.api.timeout_ms, "Upstream request timed out");
                exn::bail!(ErrorKind::Timeout);
            },
        }
    }

    pub(crate) fn store_json(&self, url: &Url, json: Value, ttl: Duration) {
        lock(&self.http_cache).set(url.as_str().to_string(), Timed::new(json, ttl));
    }

    pub(crate) fn fresh_detail(&self, key: &str) -> Option<NormalizedDetail> {
        lock(&self.detail_cache).get(key).filter(|e| e.is_fresh()).map(|e| e.value.clone())
    }

    pub(crate) fn store_detail(&self, key: String, detail: NormalizedDetail) {
        let ttl = self.settings.cache.detail_ttl();
        lock(&self.detail_cache).set(key, Timed::new(detail, ttl));
    }

    /// Uniformly picks one element of `pool`.
    pub(crate) fn pick<T: Clone>(&self, pool: &[T]) -> Option<T> {
        let mut rng = lock(&self.rng);
        pool.choose(&mut *rng).cloned()
    }
}

impl Debug for Catalog {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Catalog")
            .field("settings", &self.settings)
            .field("fetcher", &self.fetcher.name())
            .field("http_cache", &*lock(&self.http_cache))
            .field("detail_cache", &*lock(&self.detail_cache))
            .finish_non_exhaustive()
    }
}

/// Cache contents stay consistent even if a holder panicked, so a poisoned
/// lock is still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
