//! Layered configuration.
//!
//! Settings are resolved from compiled defaults, then an optional file
//! (TOML, YAML or JSON, chosen by extension), then `NGUONC_`-prefixed
//! environment variables, with `__` separating nested keys:
//!
//! ```text
//! NGUONC_API__TIMEOUT_MS=5000
//! NGUONC_PREFERRED_STREAM_TYPE=m3u8
//! ```

pub mod error;
mod load;
mod settings;

pub use crate::load::{default_path, load};
pub use crate::settings::{ApiSettings, CacheSettings, Settings};
