//! Composite identifiers for titles, episodes and mirror servers.
//!
//! The host application only ever hands back opaque strings. Everything the
//! catalog needs to locate a playable episode is packed into that string:
//!
//! ```text
//! [<namespace>:]<subject>::E<episode>::server=<index>
//! ```
//!
//! The `subject` is either a slug or a numeric catalog id; which one is only
//! known once the resolver has tried both.

mod codec;
mod consts;
pub mod error;

pub use crate::codec::{CompositeId, decode, encode};
