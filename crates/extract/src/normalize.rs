//! Field-level normalization of list entries and detail records.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::instrument;

use crate::PLUGIN_ID;
use crate::envelope::{DetailEnvelope, ListEnvelope};
use crate::json::{as_int, as_number, first, first_text, names, strip_html, text, truthy, year_from_names};
use crate::models::{BriefItem, EpisodeItem, Kind, MovieRecord, NormalizedDetail, Server};

const SLUG_FIELDS: &[&str] = &["slug", "id", "movie.slug", "slug_name"];
const TITLE_FIELDS: &[&str] = &["name", "title", "origin_name", "original_name", "vn_name"];
const EPISODE_COUNT_FIELDS: &[&str] = &["total_episodes", "episode_total"];
const CATEGORY_FIELDS: &[&str] = &["category", "categories"];
const DESCRIPTION_FIELDS: &[&str] = &["description", "content"];

/// Normalizes a list payload in any supported [`ListEnvelope`].
///
/// Entries that are not objects, or that carry nothing usable as a slug, are
/// skipped: without a slug there is no identifier to hand back.
///
/// # Examples
///
/// ```rust
/// use nguonc_extract::normalize_list;
/// use serde_json::json;
///
/// let items = normalize_list(&json!({"data": {"items": [{"slug": "a", "name": "A"}]}}));
/// assert_eq!(items[0].id, "phim-nguonc:a");
/// assert!(normalize_list(&json!({"status": "error"})).is_empty());
/// ```
#[instrument(level = "trace", skip(json))]
pub fn normalize_list(json: &Value) -> Vec<BriefItem> {
    let Some((envelope, entries)) = ListEnvelope::detect(json) else {
        tracing::debug!("List payload matched no known envelope");
        return Vec::new();
    };
    tracing::trace!(?envelope, entries = entries.len(), "Detected list envelope");
    entries.iter().filter_map(normalize_brief).collect()
}

/// The first raw entry of a list payload, in any supported envelope.
pub fn first_list_entry(json: &Value) -> Option<&Value> {
    ListEnvelope::detect(json).and_then(|(_, entries)| entries.first())
}

/// Maps one raw list entry to a [`BriefItem`].
pub fn normalize_brief(raw: &Value) -> Option<BriefItem> {
    if !raw.is_object() {
        return None;
    }
    let slug = first_text(raw, SLUG_FIELDS)?;
    let categories = first(raw, CATEGORY_FIELDS);
    let genres = categories.map(|c| names(Some(c)));
    let poster = first_text(raw, &["poster_url", "thumb_url", "poster", "image"]).unwrap_or_default();
    Some(BriefItem {
        id: format!("{PLUGIN_ID}:{slug}"),
        plugin_id: PLUGIN_ID.to_string(),
        kind: kind(raw),
        title: first_text(raw, TITLE_FIELDS).unwrap_or_else(|| slug.clone()),
        year: year(raw, &["year", "publish_year"], genres.as_deref().unwrap_or_default()),
        backdrop: poster.clone(),
        poster,
        genres: genres.filter(|g| !g.is_empty()),
        rating: first(raw, &["tmdb.vote_average"]).and_then(Value::as_f64),
        description: description(raw),
        meta: meta(raw),
    })
}

fn kind(raw: &Value) -> Kind {
    match first(raw, EPISODE_COUNT_FIELDS).and_then(as_number) {
        Some(count) => Kind::from_episode_count(count),
        None => Kind::Movie,
    }
}

/// Explicit year fields win; otherwise the first year-looking category name.
fn year(raw: &Value, fields: &[&str], categories: &[String]) -> Option<i32> {
    first(raw, fields)
        .and_then(as_int)
        .and_then(|y| i32::try_from(y).ok())
        .or_else(|| year_from_names(categories))
}

fn description(raw: &Value) -> String {
    first_text(raw, DESCRIPTION_FIELDS).map(|d| strip_html(&d)).unwrap_or_default()
}

fn meta(raw: &Value) -> BTreeMap<String, Value> {
    [
        ("current_episode", &["current_episode", "episode_current"][..]),
        ("time", &["modified.time", "updated_at", "time"][..]),
        ("quality", &["quality"][..]),
        ("language", &["lang", "language"][..]),
    ]
    .into_iter()
    .filter_map(|(key, fields)| first(raw, fields).map(|v| (key.to_string(), v.clone())))
    .collect()
}

/// Normalizes a detail payload into a [`NormalizedDetail`].
///
/// `slug_hint` fills in the slug when the record itself does not carry one
/// (typical of lookups by id). Returns `None` when no movie record can be
/// located in any [`DetailEnvelope`].
#[instrument(level = "trace", skip(json))]
pub fn normalize_detail(json: &Value, slug_hint: Option<&str>) -> Option<NormalizedDetail> {
    let container = DetailEnvelope::container(json)?;
    let (envelope, record) = DetailEnvelope::detect(container)?;
    tracing::trace!(?envelope, "Located movie record");
    let categories = names(first(record, CATEGORY_FIELDS));
    let poster = first_text(record, &["poster_url", "thumb_url", "poster"]).unwrap_or_default();
    let movie = MovieRecord {
        slug: first_text(record, &["slug"]).or_else(|| slug_hint.map(str::to_string)),
        id: first_text(record, &["_id", "id"]),
        name: first_text(record, &["name", "title", "origin_name", "original_name"]),
        original_name: first_text(record, &["origin_name", "original_name", "name"]),
        description: description(record),
        total_episodes: first(record, EPISODE_COUNT_FIELDS)
            .and_then(as_int)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(1),
        thumb_url: poster.clone(),
        poster_url: poster,
        year: year(record, &["year", "release_year", "publish_year"], &categories),
        countries: names(first(record, &["country", "countries"])),
        categories,
    };
    Some(NormalizedDetail {
        movie,
        episodes: servers(container, record),
    })
}

/// The server list from the container, or failing that from the record.
///
/// Non-object servers and items are kept as empty placeholders so that
/// positional indices (`server=<n>`, episode position) stay aligned with
/// upstream.
fn servers(container: &Value, record: &Value) -> Vec<Server> {
    let episodes = [container.get("episodes"), record.get("episodes")].into_iter().flatten().find(|v| truthy(v));
    let Some(Value::Array(servers)) = episodes else {
        return Vec::new();
    };
    servers
        .iter()
        .map(|server| Server {
            name: first_text(server, &["server_name", "name"]),
            items: match server.get("items") {
                Some(Value::Array(items)) => items.iter().map(episode_item).collect(),
                _ => Vec::new(),
            },
        })
        .collect()
}

fn episode_item(raw: &Value) -> EpisodeItem {
    let url = |field: &str| raw.get(field).and_then(text).filter(|u| !u.trim().is_empty());
    EpisodeItem {
        name: raw.get("name").and_then(text),
        slug: raw.get("slug").and_then(text),
        m3u8: url("m3u8"),
        embed: url("embed"),
    }
}

/// Candidate slug for a raw search hit.
///
/// A namespaced id (`<ns>:<slug>`) yields the part after the namespace;
/// otherwise the hit's own `slug`, then its bare `id`.
pub fn search_hit_slug(raw: &Value) -> Option<String> {
    let id = first_text(raw, &["id"]);
    if let Some((_, slug)) = id.as_deref().and_then(|id| id.split_once(':'))
        && !slug.is_empty()
    {
        return Some(slug.to_string());
    }
    first_text(raw, &["slug"]).or(id)
}
