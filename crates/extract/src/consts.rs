use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// First plausible release year inside free text such as category names.
regex!(YEAR_REGEX, r"\b(?:19|20)\d{2}\b");

/// Quality label of the primary embed stream.
pub(crate) const EMBED_QUALITY: &str = "HD";
/// Quality label of the primary HLS stream.
pub(crate) const M3U8_QUALITY: &str = "auto";
/// Quality label prefix of mirror streams, followed by the server index.
pub(crate) const MIRROR_QUALITY_PREFIX: &str = "server-";
