use std::convert::Infallible;
use std::str::FromStr;

use crate::consts::{EPISODE_TOKEN, SEPARATOR, SERVER_TOKEN};
use crate::error::{ErrorKind, Result};

/// A decoded identifier: which title, which episode, which mirror.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeId {
    /// Slug or numeric id; ambiguous until resolution succeeds.
    pub subject: String,
    /// 1-based episode number.
    pub episode_number: u32,
    /// 0-based mirror server index.
    pub server_index: u32,
}

impl CompositeId {
    pub fn new(subject: impl Into<String>, episode_number: u32, server_index: u32) -> Self {
        Self {
            subject: subject.into(),
            episode_number,
            server_index,
        }
    }

    /// Identifier for the first episode on the first server.
    pub fn title(subject: impl Into<String>) -> Self {
        Self::new(subject, 1, 0)
    }

    /// Encodes this identifier, see [`encode`].
    pub fn encode(&self) -> Result<String> {
        encode(&self.subject, self.episode_number, self.server_index)
    }

    /// Encodes this identifier behind a `<namespace>:` prefix.
    pub fn qualify(&self, namespace: &str) -> Result<String> {
        Ok(format!("{namespace}:{}", self.encode()?))
    }
}

impl FromStr for CompositeId {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(decode(s))
    }
}

/// Packs a subject, episode number and server index into one string.
///
/// # Examples
///
/// ```rust
/// use nguonc_ids::encode;
///
/// assert_eq!(encode("one-piece", 12, 1).unwrap(), "one-piece::E12::server=1");
/// assert!(encode("", 1, 0).is_err());
/// ```
pub fn encode(subject: &str, episode_number: u32, server_index: u32) -> Result<String> {
    if subject.is_empty() {
        exn::bail!(ErrorKind::EmptySubject);
    }
    Ok(format!("{subject}{SEPARATOR}E{episode_number}{SEPARATOR}server={server_index}"))
}

/// Reconstructs a [`CompositeId`] from any string. Never fails.
///
/// An optional `<namespace>:` prefix is discarded without validation. Trailing
/// `::` segments set the episode (`E<n>`) or server (`server=<n>`), matched
/// case-insensitively; anything else is ignored. An episode of `0` is not a
/// valid episode and falls back to `1`.
///
/// # Examples
///
/// ```rust
/// use nguonc_ids::{CompositeId, decode};
///
/// assert_eq!(decode("phim-nguonc:slug-only"), CompositeId::new("slug-only", 1, 0));
/// assert_eq!(decode("ns:title::e3::SERVER=2::junk"), CompositeId::new("title", 3, 2));
/// ```
pub fn decode(global_id: &str) -> CompositeId {
    let remainder = strip_namespace(global_id);
    let mut segments = remainder.split(SEPARATOR);
    let subject = segments.next().unwrap_or_default().to_string();
    let mut id = CompositeId::title(subject);
    for segment in segments {
        if let Some(captures) = EPISODE_TOKEN.captures(segment) {
            id.episode_number = captures[1].parse::<u32>().ok().filter(|n| *n > 0).unwrap_or(1);
        } else if let Some(captures) = SERVER_TOKEN.captures(segment) {
            id.server_index = captures[1].parse::<u32>().unwrap_or(0);
        }
    }
    id
}

/// Drops everything up to (and including) the first colon, unless that colon
/// opens a `::` separator, in which case the string carries no namespace.
fn strip_namespace(global_id: &str) -> &str {
    match global_id.find(':') {
        Some(pos) if !global_id[pos..].starts_with(SEPARATOR) => &global_id[pos + 1..],
        _ => global_id,
    }
}
