//! Shapes exchanged with the host application.

use nguonc_extract::models::{BriefItem, Kind, Stream};
use serde::{Deserialize, Serialize};

/// Full view of one title.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetail {
    pub id: String,
    pub plugin_id: String,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub overview: String,
    pub poster: String,
    pub backdrop: String,
    /// Only present for series.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasons: Option<Vec<Season>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub season_number: u32,
    pub episodes: Vec<EpisodeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeRef {
    pub episode_number: u32,
    /// Plugin-qualified composite identifier of the episode.
    pub id: String,
    pub title: String,
}

/// Result of [`get_streams`](crate::Catalog::get_streams).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamServers {
    pub servers: Vec<StreamServer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamServer {
    pub name: String,
    pub streams: Vec<Stream>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayRequest {
    pub global_id: String,
    /// Overrides the server encoded in `global_id`.
    pub server_index: Option<u32>,
    /// 0-based; overrides the episode encoded in `global_id`.
    pub episode_index: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoverKind {
    Genre,
    Trending,
    New,
    /// Anything else; discovers nothing.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiscoverRequest {
    #[serde(rename = "type")]
    pub kind: DiscoverKind,
    pub genre: Option<String>,
    pub limit: usize,
}

impl Default for DiscoverRequest {
    fn default() -> Self {
        Self {
            kind: DiscoverKind::Unknown,
            genre: None,
            limit: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HomeRequest {
    pub rows: usize,
    pub limit: usize,
}

impl Default for HomeRequest {
    fn default() -> Self {
        Self { rows: 3, limit: 14 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Home {
    pub banner: Option<BriefItem>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub items: Vec<BriefItem>,
}

/// A `{slug, name}` pair, as used by the country and year lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub slug: String,
    pub name: String,
}

impl ListEntry {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct YearsRequest {
    /// Defaults to 2010.
    pub from: Option<i32>,
    /// Defaults to the current year.
    pub to: Option<i32>,
}
