//! JSON-over-HTTP fetching.
//!
//! Everything above this crate talks to the upstream catalog through the
//! [`Fetcher`] trait, so tests can swap the network for an in-memory
//! `MockFetcher` (behind the `mock` feature).

pub mod error;
pub mod fetcher;

pub use crate::fetcher::{Fetcher, HttpFetcher};
use std::sync::Arc;

pub type FetcherHandle = Arc<dyn Fetcher>;
