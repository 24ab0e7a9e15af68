//! Catalog operations for the `phim-nguonc` source.
//!
//! A [`Catalog`] owns everything one plugin instance needs: settings, the
//! upstream fetcher, and its two caches (raw JSON by URL, normalized details
//! by slug or id). On top of that it offers:
//!
//! - detail resolution with a slug → id → search fallback chain
//!   ([`Catalog::resolve_detail`]);
//! - the host-facing operations (`search`, `get_item`, `get_streams`, `play`,
//!   `discover`, `get_home`) and the static browse lists;
//! - [`dispatch`], which maps host requests onto those operations.

/// Per-operation diagnostic event, emitted only when `debug_log` is enabled.
macro_rules! diagnostic {
    ($catalog:expr, $($field:tt)+) => {
        if $catalog.settings.debug_log {
            tracing::debug!($($field)+);
        }
    };
}

mod api;
mod context;
pub mod dispatch;
pub mod error;
mod lists;
pub mod models;
mod ops;
mod resolve;
#[cfg(test)]
mod testing;

pub use crate::context::Catalog;
pub use crate::lists::{list_countries, list_genres, list_years};
pub use crate::resolve::Strategy;
