use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// How a stream URL is meant to be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    /// Direct HLS playlist.
    M3u8,
    /// Third-party player page to be embedded.
    Embed,
}

impl StreamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamKind::M3u8 => "m3u8",
            StreamKind::Embed => "embed",
        }
    }
}

impl FromStr for StreamKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "m3u8" | "hls" => Self::M3u8,
            "embed" => Self::Embed,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "stream_type",
                value: s.to_string(),
            }),
        })
    }
}

impl Display for StreamKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A playable candidate. Built fresh on every request, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stream {
    pub url: String,
    pub quality: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<StreamKind>,
}

impl Stream {
    pub fn new(url: impl Into<String>, quality: impl Into<String>, kind: Option<StreamKind>) -> Self {
        Self {
            url: url.into(),
            quality: quality.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("m3u8", StreamKind::M3u8)]
    #[case(" HLS ", StreamKind::M3u8)]
    #[case("Embed", StreamKind::Embed)]
    fn test_stream_kind_from_str(#[case] input: &str, #[case] expected: StreamKind) {
        assert_eq!(input.parse::<StreamKind>().unwrap(), expected);
    }

    #[test]
    fn test_stream_kind_rejects_unknown() {
        let err = "dash".parse::<StreamKind>().unwrap_err();
        assert!(matches!(*err, ErrorKind::ParseError { field: "stream_type", .. }));
    }

    #[test]
    fn test_untyped_stream_omits_type_when_serialized() {
        let typed = serde_json::to_value(Stream::new("u", "HD", Some(StreamKind::Embed))).unwrap();
        assert_eq!(typed, serde_json::json!({"url": "u", "quality": "HD", "type": "embed"}));
        let untyped = serde_json::to_value(Stream::new("u", "server-1", None)).unwrap();
        assert_eq!(untyped, serde_json::json!({"url": "u", "quality": "server-1"}));
    }
}
