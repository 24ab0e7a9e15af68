use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Whether a title is a one-off or has multiple episodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Movie,
    Series,
}

impl Kind {
    /// More than one episode makes a series.
    pub fn from_episode_count(count: impl Into<f64>) -> Self {
        if count.into() > 1.0 { Self::Series } else { Self::Movie }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Movie => "movie",
            Kind::Series => "series",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Catalog summary of a single title, as shown in search results and rows.
///
/// Only ever produced by [`normalize_brief`](crate::normalize_brief).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefItem {
    /// Plugin-qualified identifier, `<plugin>:<slug>`.
    pub id: String,
    pub plugin_id: String,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub poster: String,
    pub backdrop: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub description: String,
    /// Free-form extras (`current_episode`, `time`, `quality`, `language`).
    pub meta: BTreeMap<String, Value>,
}
