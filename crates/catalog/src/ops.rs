//! Public catalog operations.
//!
//! Read operations never fail: any internal error is logged and degrades to an
//! empty or absent result, so that one broken title cannot take down an
//! aggregate view. [`Catalog::play`] is the exception; with nothing to play,
//! the caller has to be told why.

use std::collections::HashSet;

use nguonc_extract::models::{BriefItem, Kind, NormalizedDetail, Stream};
use nguonc_extract::{PLUGIN_ID, choose_stream, extract_streams, normalize_list};
use nguonc_ids::{CompositeId, decode};
use tracing::instrument;

use crate::Catalog;
use crate::error::{ErrorKind, Result};
use crate::lists::{current_year, list_genres};
use crate::models::{
    DiscoverKind, DiscoverRequest, EpisodeRef, Home, HomeRequest, ItemDetail, PlayRequest, Season, Section,
    StreamServer, StreamServers,
};

const UNTITLED: &str = "Không có tiêu đề";
const STREAM_SERVER_NAME: &str = "Nguonc";
const TRENDING_SEEDS: [&str; 2] = ["hot", "top"];

impl Catalog {
    /// Free-text search. Empty on a blank query or any failure.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Vec<BriefItem> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let url = self.endpoints.search(query);
        match self.http_json(url, self.settings.cache.http_ttl()).await {
            Ok(json) => {
                let items = normalize_list(&json);
                diagnostic!(self, results = items.len(), "search");
                items
            },
            Err(err) => {
                tracing::warn!(error = %*err, "Search failed");
                Vec::new()
            },
        }
    }

    /// Full view of the title behind `global_id`; `None` when it cannot be
    /// resolved.
    #[instrument(skip(self))]
    pub async fn get_item(&self, global_id: &str) -> Option<ItemDetail> {
        if global_id.is_empty() {
            return None;
        }
        let id = decode(global_id);
        let detail = self.resolve_logged(&id.subject).await?;
        let item = item_detail(&id.subject, &detail);
        diagnostic!(self, title = %item.title, kind = %item.kind, "get_item");
        Some(item)
    }

    /// Candidate streams for the episode and server encoded in `global_id`.
    ///
    /// An episode that no server carries yields a server entry with no
    /// streams; an unresolvable title yields no servers at all.
    #[instrument(skip(self))]
    pub async fn get_streams(&self, global_id: &str) -> StreamServers {
        if global_id.is_empty() {
            return StreamServers::default();
        }
        let id = decode(global_id);
        let Some(detail) = self.resolve_logged(&id.subject).await else {
            return StreamServers::default();
        };
        let streams = extract_streams(&detail, id.episode_number, id.server_index as usize);
        diagnostic!(self, episode = id.episode_number, streams = streams.len(), "get_streams");
        StreamServers {
            servers: vec![StreamServer {
                name: STREAM_SERVER_NAME.to_string(),
                streams,
            }],
        }
    }

    /// The single stream to play for a request.
    ///
    /// `episode_index` (0-based) and `server_index` override what is encoded
    /// in the identifier. The configured stream type is preferred.
    #[instrument(skip(self))]
    pub async fn play(&self, request: PlayRequest) -> Result<Stream> {
        if request.global_id.is_empty() {
            exn::bail!(ErrorKind::InvalidArguments("globalId is required".to_string()));
        }
        let id = decode(&request.global_id);
        let episode = match request.episode_index {
            Some(index) => index.saturating_add(1),
            None => id.episode_number,
        };
        let server = request.server_index.unwrap_or(id.server_index);
        let detail = self.resolve_detail(&id.subject).await?;
        let streams = extract_streams(&detail, episode, server as usize);
        let preferred = self.settings.preferred_stream_type;
        let Some(stream) = choose_stream(&streams, preferred) else {
            exn::bail!(ErrorKind::NoStreams(id.subject));
        };
        diagnostic!(self, episode, server, url = %stream.url, "play");
        Ok(stream.clone())
    }

    /// Browse by genre, trending or recent titles.
    ///
    /// Seed queries are searched in order until twice `limit` items have been
    /// gathered; the result is deduplicated by id and cut to `limit`.
    #[instrument(skip(self))]
    pub async fn discover(&self, request: DiscoverRequest) -> Vec<BriefItem> {
        let seeds: Vec<String> = match (request.kind, request.genre) {
            (DiscoverKind::Genre, Some(genre)) => vec![genre],
            (DiscoverKind::Trending, _) => TRENDING_SEEDS.iter().map(|s| s.to_string()).collect(),
            (DiscoverKind::New, _) => {
                let year = current_year();
                (0..3).map(|back| (year - back).to_string()).collect()
            },
            _ => Vec::new(),
        };
        let wanted = request.limit.saturating_mul(2);
        let mut items = Vec::new();
        for seed in &seeds {
            items.extend(self.search(seed).await);
            if items.len() >= wanted {
                break;
            }
        }
        let mut items = unique_by_id(items);
        items.truncate(request.limit);
        items
    }

    /// One section per genre for the first `rows` genres, plus a banner picked
    /// at random from everything shown.
    #[instrument(skip(self))]
    pub async fn get_home(&self, request: HomeRequest) -> Home {
        let mut sections = Vec::new();
        for genre in list_genres().into_iter().take(request.rows) {
            let discover = DiscoverRequest {
                kind: DiscoverKind::Genre,
                genre: Some(genre.clone()),
                limit: request.limit,
            };
            let items = self.discover(discover).await;
            sections.push(Section { title: genre, items });
        }
        let pool = unique_by_id(sections.iter().flat_map(|s| s.items.iter().cloned()).collect());
        let banner = self.pick(&pool);
        diagnostic!(self, sections = sections.len(), banner = banner.is_some(), "get_home");
        Home { banner, sections }
    }

    async fn resolve_logged(&self, subject: &str) -> Option<NormalizedDetail> {
        match self.resolve_detail(subject).await {
            Ok(detail) => Some(detail),
            Err(err) => {
                tracing::warn!(subject, error = %*err, "Could not resolve title");
                None
            },
        }
    }
}

fn item_detail(subject: &str, detail: &NormalizedDetail) -> ItemDetail {
    let movie = &detail.movie;
    let slug = movie.slug.as_deref().unwrap_or(subject);
    let kind = movie.kind();
    let backdrop = if movie.thumb_url.is_empty() { &movie.poster_url } else { &movie.thumb_url };
    ItemDetail {
        id: format!("{PLUGIN_ID}:{slug}"),
        plugin_id: PLUGIN_ID.to_string(),
        kind,
        title: movie.title().unwrap_or(UNTITLED).to_string(),
        year: movie.year,
        overview: movie.description.clone(),
        poster: movie.poster_url.clone(),
        backdrop: backdrop.clone(),
        seasons: (kind == Kind::Series).then(|| vec![season(slug, detail)]),
    }
}

/// A single season listing the first server's episodes.
fn season(slug: &str, detail: &NormalizedDetail) -> Season {
    let items = detail.episodes.first().map(|server| server.items.as_slice()).unwrap_or_default();
    let episodes = items
        .iter()
        .zip(1u32..)
        .filter_map(|(item, position)| {
            let number = item.number().unwrap_or(position);
            let id = CompositeId::new(slug, number, 0).qualify(PLUGIN_ID).ok()?;
            let label = item.name.clone().unwrap_or_else(|| position.to_string());
            Some(EpisodeRef {
                episode_number: number,
                id,
                title: format!("Tập {label}"),
            })
        })
        .collect();
    Season {
        season_number: 1,
        episodes,
    }
}

fn unique_by_id(items: Vec<BriefItem>) -> Vec<BriefItem> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.id.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Endpoints;
    use crate::testing::*;
    use nguonc_extract::models::StreamKind;
    use nguonc_http::fetcher::MockFetcher;
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    fn series_catalog(slug: &str, episodes: u32) -> (Catalog, Arc<MockFetcher>) {
        let fetcher = Arc::new(MockFetcher::default().with_json(slug_url(slug), series_detail(slug, episodes)));
        (catalog_with(settings(), fetcher.clone()), fetcher)
    }

    #[tokio::test]
    async fn test_search_normalizes_results() {
        let fetcher = Arc::new(MockFetcher::default().with_json(search_url("hai"), search_results(&["a", "b"])));
        let catalog = catalog_with(settings(), fetcher);
        let ids: Vec<String> = catalog.search("hai").await.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["phim-nguonc:a", "phim-nguonc:b"]);
    }

    #[rstest]
    #[case::blank("  ")]
    #[case::upstream_failure("broken")]
    #[tokio::test]
    async fn test_search_degrades_to_empty(#[case] query: &str) {
        let fetcher = Arc::new(MockFetcher::default().with_status(search_url("broken"), 500, "down"));
        let catalog = catalog_with(settings(), fetcher);
        assert!(catalog.search(query).await.is_empty());
    }

    #[tokio::test]
    async fn test_get_item_for_series() {
        let (catalog, _) = series_catalog("abc", 2);
        let item = catalog.get_item("phim-nguonc:abc").await.unwrap();
        assert_eq!(item.id, "phim-nguonc:abc");
        assert_eq!(item.kind, Kind::Series);
        assert_eq!(item.title, "Title abc");
        assert_eq!(item.year, Some(2024));
        assert_eq!(item.overview, "Plot");
        assert_eq!(item.backdrop, "https://img.test/abc.jpg");
        let seasons = item.seasons.unwrap();
        assert_eq!(seasons.len(), 1);
        let episode = &seasons[0].episodes[1];
        assert_eq!(episode.episode_number, 2);
        assert_eq!(episode.id, "phim-nguonc:abc::E2::server=0");
        assert_eq!(episode.title, "Tập 2");
    }

    #[tokio::test]
    async fn test_get_item_for_movie_without_title() {
        let fetcher = Arc::new(MockFetcher::default().with_json(slug_url("m"), json!({"movie": {"slug": "m"}})));
        let catalog = catalog_with(settings(), fetcher);
        let item = catalog.get_item("m").await.unwrap();
        assert_eq!(item.kind, Kind::Movie);
        assert_eq!(item.title, UNTITLED);
        assert_eq!(item.seasons, None);
    }

    #[rstest]
    #[case::empty("")]
    #[case::unknown("phim-nguonc:missing")]
    #[tokio::test]
    async fn test_get_item_absent(#[case] global_id: &str) {
        let catalog = catalog_with(settings(), Arc::new(MockFetcher::default()));
        assert_eq!(catalog.get_item(global_id).await, None);
    }

    #[tokio::test]
    async fn test_get_streams_for_encoded_episode_and_server() {
        let (catalog, _) = series_catalog("abc", 3);
        let result = catalog.get_streams("phim-nguonc:abc::E2::server=1").await;
        assert_eq!(result.servers.len(), 1);
        assert_eq!(result.servers[0].name, "Nguonc");
        let urls: Vec<&str> = result.servers[0].streams.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://embed.test/1/2", "https://hls.test/1/2.m3u8", "https://hls.test/0/2.m3u8"]
        );
    }

    #[tokio::test]
    async fn test_get_streams_for_unmatched_episode_is_empty() {
        let (catalog, _) = series_catalog("abc", 3);
        let result = catalog.get_streams("phim-nguonc:abc::E9").await;
        assert_eq!(result.servers.len(), 1);
        assert!(result.servers[0].streams.is_empty());
    }

    #[tokio::test]
    async fn test_get_streams_for_unknown_title_has_no_servers() {
        let catalog = catalog_with(settings(), Arc::new(MockFetcher::default()));
        assert_eq!(catalog.get_streams("phim-nguonc:missing").await, StreamServers::default());
    }

    #[rstest]
    #[case::encoded(None, None, StreamKind::Embed, "https://embed.test/0/1")]
    #[case::overrides(Some(2), Some(1), StreamKind::Embed, "https://embed.test/1/3")]
    #[case::hls_preference(None, None, StreamKind::M3u8, "https://hls.test/0/1.m3u8")]
    #[tokio::test]
    async fn test_play(
        #[case] episode_index: Option<u32>,
        #[case] server_index: Option<u32>,
        #[case] preferred: StreamKind,
        #[case] expected: &str,
    ) {
        let fetcher = Arc::new(MockFetcher::default().with_json(slug_url("abc"), series_detail("abc", 3)));
        let mut settings = settings();
        settings.preferred_stream_type = preferred;
        let catalog = catalog_with(settings, fetcher);
        let request = PlayRequest {
            global_id: "phim-nguonc:abc".to_string(),
            server_index,
            episode_index,
        };
        assert_eq!(catalog.play(request).await.unwrap().url, expected);
    }

    #[tokio::test]
    async fn test_play_errors_propagate() {
        let (catalog, _) = series_catalog("abc", 1);
        let err = catalog.play(PlayRequest::default()).await.unwrap_err();
        assert!(matches!(*err, ErrorKind::InvalidArguments(_)));

        let missing = PlayRequest {
            global_id: "phim-nguonc:missing".to_string(),
            ..PlayRequest::default()
        };
        let err = catalog.play(missing).await.unwrap_err();
        assert!(matches!(*err, ErrorKind::NotFound { .. }));

        let no_episode = PlayRequest {
            global_id: "phim-nguonc:abc::E5".to_string(),
            ..PlayRequest::default()
        };
        let err = catalog.play(no_episode).await.unwrap_err();
        assert_eq!(*err, ErrorKind::NoStreams("abc".to_string()));
    }

    #[tokio::test]
    async fn test_discover_trending_stops_once_enough_gathered() {
        let fetcher = Arc::new(
            MockFetcher::default()
                .with_json(search_url("hot"), search_results(&["a", "b", "a", "c"]))
                .with_json(search_url("top"), search_results(&["d"])),
        );
        let catalog = catalog_with(settings(), fetcher.clone());
        let request = DiscoverRequest {
            kind: DiscoverKind::Trending,
            genre: None,
            limit: 2,
        };
        let ids: Vec<String> = catalog.discover(request).await.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["phim-nguonc:a", "phim-nguonc:b"]);
        assert_eq!(fetcher.request_count(&search_url("top")), 0);
    }

    #[tokio::test]
    async fn test_discover_merges_seeds_and_dedupes() {
        let fetcher = Arc::new(
            MockFetcher::default()
                .with_json(search_url("hot"), search_results(&["a", "b"]))
                .with_json(search_url("top"), search_results(&["b", "c"])),
        );
        let catalog = catalog_with(settings(), fetcher);
        let request = DiscoverRequest {
            kind: DiscoverKind::Trending,
            genre: None,
            limit: 10,
        };
        let ids: Vec<String> = catalog.discover(request).await.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["phim-nguonc:a", "phim-nguonc:b", "phim-nguonc:c"]);
    }

    #[tokio::test]
    async fn test_discover_new_searches_recent_years() {
        let fetcher = Arc::new(MockFetcher::default());
        let catalog = catalog_with(settings(), fetcher.clone());
        let request = DiscoverRequest {
            kind: DiscoverKind::New,
            genre: None,
            limit: 5,
        };
        assert!(catalog.discover(request).await.is_empty());
        let year = current_year();
        let expected: Vec<String> = (0..3).map(|back| search_url(&(year - back).to_string())).collect();
        assert_eq!(fetcher.requests(), expected);
    }

    #[rstest]
    #[case::unknown_kind(DiscoverKind::Unknown, Some("Hài"))]
    #[case::genre_without_name(DiscoverKind::Genre, None)]
    #[tokio::test]
    async fn test_discover_without_seeds(#[case] kind: DiscoverKind, #[case] genre: Option<&str>) {
        let fetcher = Arc::new(MockFetcher::default());
        let catalog = catalog_with(settings(), fetcher.clone());
        let request = DiscoverRequest {
            kind,
            genre: genre.map(str::to_string),
            limit: 5,
        };
        assert!(catalog.discover(request).await.is_empty());
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_get_home_sections_and_banner() {
        let api = Endpoints::new(BASE.parse().unwrap());
        let genres = list_genres();
        let fetcher = Arc::new(
            MockFetcher::default()
                .with_json(api.search(&genres[0]).as_str(), search_results(&["a", "b"]))
                .with_json(api.search(&genres[1]).as_str(), search_results(&["b", "c"])),
        );
        let catalog = catalog_with(settings(), fetcher.clone());
        let home = catalog.get_home(HomeRequest { rows: 2, limit: 14 }).await;
        let titles: Vec<&str> = home.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec![genres[0].as_str(), genres[1].as_str()]);
        assert_eq!(fetcher.requests().len(), 2);
        let banner = home.banner.unwrap();
        assert!(["phim-nguonc:a", "phim-nguonc:b", "phim-nguonc:c"].contains(&banner.id.as_str()));
    }

    #[tokio::test]
    async fn test_get_home_without_results_has_no_banner() {
        let catalog = catalog_with(settings(), Arc::new(MockFetcher::default()));
        let home = catalog.get_home(HomeRequest::default()).await;
        assert_eq!(home.sections.len(), 3);
        assert!(home.sections.iter().all(|s| s.items.is_empty()));
        assert_eq!(home.banner, None);
    }
}
