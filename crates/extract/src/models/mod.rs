mod brief;
mod detail;
mod stream;

pub use self::brief::{BriefItem, Kind};
pub use self::detail::{EpisodeItem, MovieRecord, NormalizedDetail, Server};
pub use self::stream::{Stream, StreamKind};
