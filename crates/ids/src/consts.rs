use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

regex!(EPISODE_TOKEN, r"(?i)^E(\d+)$");
regex!(SERVER_TOKEN, r"(?i)^server=(\d+)$");

pub(crate) const SEPARATOR: &str = "::";
