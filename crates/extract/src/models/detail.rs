use serde::Serialize;

use super::Kind;

/// The canonical shape of a title's detail payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedDetail {
    pub movie: MovieRecord,
    /// Mirror servers, in upstream order. Indices are significant: they are
    /// what the `server=<n>` part of a composite identifier refers to.
    pub episodes: Vec<Server>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MovieRecord {
    pub slug: Option<String>,
    /// Alternate (usually numeric or hash) catalog id.
    pub id: Option<String>,
    pub name: Option<String>,
    pub original_name: Option<String>,
    /// Plain text, HTML stripped.
    pub description: String,
    pub total_episodes: u32,
    pub poster_url: String,
    pub thumb_url: String,
    pub year: Option<i32>,
    pub categories: Vec<String>,
    pub countries: Vec<String>,
}

impl MovieRecord {
    pub fn kind(&self) -> Kind {
        Kind::from_episode_count(self.total_episodes)
    }

    /// Display title: name, then original name.
    pub fn title(&self) -> Option<&str> {
        self.name.as_deref().or(self.original_name.as_deref())
    }
}

/// One mirror source and the episodes it offers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Server {
    pub name: Option<String>,
    pub items: Vec<EpisodeItem>,
}

impl Server {
    /// Finds the item for a 1-based episode number.
    ///
    /// Items are matched by their numeric `name` first; when no name matches,
    /// the item at position `episode_number - 1` is used instead (which may
    /// not exist).
    pub fn episode(&self, episode_number: u32) -> Option<&EpisodeItem> {
        self.items.iter().find(|item| item.number() == Some(episode_number)).or_else(|| {
            let index = usize::try_from(episode_number.checked_sub(1)?).ok()?;
            self.items.get(index)
        })
    }
}

/// A single episode on a single server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EpisodeItem {
    /// Usually the episode number ("1", "02"), sometimes a label ("Full").
    pub name: Option<String>,
    pub slug: Option<String>,
    pub m3u8: Option<String>,
    pub embed: Option<String>,
}

impl EpisodeItem {
    /// The episode number, when `name` is numeric.
    pub fn number(&self) -> Option<u32> {
        self.name.as_deref()?.trim().parse().ok()
    }
}
