//! Shared fixtures for the catalog's unit tests.

use std::sync::Arc;

use nguonc_config::Settings;
use nguonc_http::fetcher::MockFetcher;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};

use crate::Catalog;

pub const BASE: &str = "https://api.test";

pub fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.api.base_url = BASE.to_string();
    settings
}

pub fn catalog_with(settings: Settings, fetcher: Arc<MockFetcher>) -> Catalog {
    Catalog::new(settings, fetcher).unwrap().with_rng(StdRng::seed_from_u64(7))
}

pub fn slug_url(slug: &str) -> String {
    format!("{BASE}/api/film/{slug}")
}

pub fn id_url(id: &str) -> String {
    format!("{BASE}/api/film?id={id}")
}

pub fn search_url(query: &str) -> String {
    format!("{BASE}/api/films/search?keyword={query}")
}

/// A two-server series detail payload; episode `n` plays `embed-<server>-<n>`
/// and `hls-<server>-<n>.m3u8`.
pub fn series_detail(slug: &str, episodes: u32) -> Value {
    let server = |index: u32| {
        let items: Vec<Value> = (1..=episodes)
            .map(|n| {
                json!({
                    "name": n.to_string(),
                    "slug": format!("tap-{n}"),
                    "embed": format!("https://embed.test/{index}/{n}"),
                    "m3u8": format!("https://hls.test/{index}/{n}.m3u8"),
                })
            })
            .collect();
        json!({"server_name": format!("Server #{index}"), "items": items})
    };
    json!({
        "status": "success",
        "movie": {
            "id": format!("id-{slug}"),
            "name": format!("Title {slug}"),
            "slug": slug,
            "original_name": format!("Original {slug}"),
            "description": "<p>Plot</p>",
            "total_episodes": episodes,
            "thumb_url": format!("https://img.test/{slug}.jpg"),
            "category": [{"name": "Hành Động"}, {"name": "2024"}],
            "episodes": [server(0), server(1)],
        }
    })
}

/// A search payload whose entries have the given slugs.
pub fn search_results(slugs: &[&str]) -> Value {
    let items: Vec<Value> = slugs.iter().map(|slug| json!({"slug": slug, "name": slug})).collect();
    json!({"status": "success", "items": items})
}
