//! Detail resolution: turning an ambiguous subject into a [`NormalizedDetail`].

use derive_more::Display;
use exn::OptionExt;
use nguonc_extract::models::NormalizedDetail;
use nguonc_extract::{first_list_entry, normalize_detail, search_hit_slug};
use tracing::instrument;
use url::Url;

use crate::Catalog;
use crate::error::{Error, ErrorKind, Result};

/// One interpretation of a subject.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The subject is a slug.
    #[display("slug")]
    Slug,
    /// The subject is a catalog id.
    #[display("id")]
    Id,
    /// The subject is free text; the first search hit's slug is used.
    #[display("search")]
    Search,
}

impl Strategy {
    /// The order strategies are attempted in.
    pub const CHAIN: [Strategy; 3] = [Self::Slug, Self::Id, Self::Search];
}

/// Runs `attempt` for each strategy in turn and returns the first success.
///
/// Failures are logged as they happen; if nothing succeeds, every strategy's
/// error is handed back, labelled, in the order they were tried.
pub(crate) async fn first_success<S, T, F, Fut>(
    strategies: impl IntoIterator<Item = S>,
    mut attempt: F,
) -> std::result::Result<T, Vec<(S, Error)>>
where
    S: Copy + std::fmt::Display,
    F: FnMut(S) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut failures = Vec::new();
    for strategy in strategies {
        match attempt(strategy).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                tracing::debug!(%strategy, error = %*err, "Resolution strategy failed");
                failures.push((strategy, err));
            },
        }
    }
    Err(failures)
}

impl Catalog {
    /// Resolves `subject` (a slug, a catalog id, or free text) to a detail
    /// record, trying each [`Strategy`] in order.
    ///
    /// Details are cached under the key of the strategy that fetched them
    /// (`slug:<x>` or `id:<x>`). When a search hit leads to the record, it is
    /// cached under the hit's slug rather than under `subject`.
    #[instrument(skip(self))]
    pub async fn resolve_detail(&self, subject: &str) -> Result<NormalizedDetail> {
        if subject.trim().is_empty() {
            exn::bail!(ErrorKind::not_found(subject));
        }
        match first_success(Strategy::CHAIN, |strategy| self.attempt(strategy, subject)).await {
            Ok(detail) => Ok(detail),
            Err(failures) => {
                let attempts = failures.iter().map(|(strategy, err)| format!("{strategy}: {}", **err)).collect();
                tracing::info!(subject, "No resolution strategy succeeded");
                exn::bail!(ErrorKind::NotFound {
                    subject: subject.to_string(),
                    attempts,
                })
            },
        }
    }

    async fn attempt(&self, strategy: Strategy, subject: &str) -> Result<NormalizedDetail> {
        match strategy {
            Strategy::Slug => self.detail_by_slug(subject).await,
            Strategy::Id => self.detail_by_id(subject).await,
            Strategy::Search => {
                let slug = self.search_first_slug(subject).await?;
                tracing::debug!(subject, %slug, "Search hit, retrying as slug");
                self.detail_by_slug(&slug).await
            },
        }
    }

    async fn detail_by_slug(&self, slug: &str) -> Result<NormalizedDetail> {
        let url = self.endpoints.detail_by_slug(slug);
        self.detail(format!("slug:{slug}"), url, Some(slug)).await
    }

    async fn detail_by_id(&self, id: &str) -> Result<NormalizedDetail> {
        let url = self.endpoints.detail_by_id(id);
        self.detail(format!("id:{id}"), url, None).await
    }

    async fn detail(&self, key: String, url: Url, slug_hint: Option<&str>) -> Result<NormalizedDetail> {
        if let Some(detail) = self.fresh_detail(&key) {
            tracing::trace!(%key, "Detail cache hit");
            return Ok(detail);
        }
        let (json, fetched) = match self.cached_json(&url) {
            Some(json) => (json, false),
            None => (self.fetch_json(&url).await?, true),
        };
        let detail = normalize_detail(&json, slug_hint).ok_or_raise(|| ErrorKind::EmptyDetail)?;
        // Payloads without a movie record stay out of both caches.
        if fetched {
            self.store_json(&url, json, self.settings.cache.detail_ttl());
        }
        self.store_detail(key, detail.clone());
        Ok(detail)
    }

    async fn search_first_slug(&self, query: &str) -> Result<String> {
        let json = self.http_json(self.endpoints.search(query), self.settings.cache.http_ttl()).await?;
        first_list_entry(&json).and_then(search_hit_slug).ok_or_raise(|| ErrorKind::not_found(query))
    }
}
