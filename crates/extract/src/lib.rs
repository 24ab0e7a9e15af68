//! Normalization of upstream catalog JSON into a stable model.
//!
//! The upstream API has changed its response shapes over time and is not
//! consistent between endpoints. Rather than deserializing into rigid structs,
//! every payload is treated as a [`serde_json::Value`] and matched against ordered
//! shape matchers and field fallback chains:
//!
//! - [`normalize_list`] turns any supported list envelope into [`BriefItem`]s.
//! - [`normalize_detail`] locates the movie record and its mirror servers.
//! - [`extract_streams`] and [`choose_stream`] turn a [`NormalizedDetail`]
//!   into playable candidates.
//!
//! [`BriefItem`]: models::BriefItem
//! [`NormalizedDetail`]: models::NormalizedDetail

mod consts;
mod envelope;
pub mod error;
mod json;
pub mod models;
mod normalize;
mod streams;

pub use crate::envelope::{DetailEnvelope, ListEnvelope};
pub use crate::json::strip_html;
pub use crate::normalize::{first_list_entry, normalize_brief, normalize_detail, normalize_list, search_hit_slug};
pub use crate::streams::{choose_stream, dedupe_streams, extract_streams};

/// Namespace prefixed to every identifier handed to the host.
pub const PLUGIN_ID: &str = "phim-nguonc";
