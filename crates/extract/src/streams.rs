use std::collections::HashSet;

use crate::consts::{EMBED_QUALITY, M3U8_QUALITY, MIRROR_QUALITY_PREFIX};
use crate::models::{NormalizedDetail, Stream, StreamKind};

/// Builds the candidate streams for one episode of a title.
///
/// The preferred server contributes its embed player and its HLS playlist (in
/// that order, both when both exist); every other server contributes its HLS
/// playlist as an untyped mirror labelled `server-<index>`. The result is
/// deduplicated on `(url, quality)`, so an identical mirror URL survives when
/// its label differs from the primary entry's.
///
/// An episode that no server carries yields an empty list.
pub fn extract_streams(detail: &NormalizedDetail, episode_number: u32, preferred_server: usize) -> Vec<Stream> {
    let mut streams = Vec::new();
    if let Some(item) = detail.episodes.get(preferred_server).and_then(|s| s.episode(episode_number)) {
        if let Some(embed) = &item.embed {
            streams.push(Stream::new(embed, EMBED_QUALITY, Some(StreamKind::Embed)));
        }
        if let Some(m3u8) = &item.m3u8 {
            streams.push(Stream::new(m3u8, M3U8_QUALITY, Some(StreamKind::M3u8)));
        }
    }
    let mirrors = detail.episodes.iter().enumerate().filter(|(index, _)| *index != preferred_server);
    for (index, server) in mirrors {
        if let Some(m3u8) = server.episode(episode_number).and_then(|item| item.m3u8.as_ref()) {
            streams.push(Stream::new(m3u8, format!("{MIRROR_QUALITY_PREFIX}{index}"), None));
        }
    }
    tracing::trace!(episode_number, preferred_server, candidates = streams.len(), "Extracted streams");
    dedupe_streams(streams)
}

/// Drops every stream whose `(url, quality)` pair was already seen, keeping
/// the first occurrence and the relative order of the rest.
pub fn dedupe_streams(streams: Vec<Stream>) -> Vec<Stream> {
    let mut seen = HashSet::new();
    streams
        .into_iter()
        .filter(|stream| seen.insert((stream.url.clone(), stream.quality.clone())))
        .collect()
}

/// Picks the stream to play.
///
/// The first stream of the preferred type wins. With an HLS preference an
/// untyped mirror pointing at a `.m3u8` playlist also qualifies. Failing that,
/// the first stream is returned.
pub fn choose_stream(streams: &[Stream], preferred: StreamKind) -> Option<&Stream> {
    let matches = |stream: &&Stream| match stream.kind {
        Some(kind) => kind == preferred,
        None => preferred == StreamKind::M3u8 && stream.url.contains(".m3u8"),
    };
    streams.iter().find(matches).or_else(|| streams.first())
}
