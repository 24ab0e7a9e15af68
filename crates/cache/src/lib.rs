//! In-memory caches for upstream catalog responses.
//!
//! This crate provides the process-lifetime caches that sit in front of the
//! upstream catalog API. Nothing here is the source of truth: every entry can
//! be refetched, and nothing survives a restart.
//!
//! # Architecture
//! - [`BoundedCache`]: a capacity-limited key/value store with recency-based
//!   (LRU) eviction. Reads count as use.
//! - [`Timed`]: the envelope callers store as the cached value. Freshness is
//!   judged by the *caller* on every read; the cache itself never expires
//!   anything, so a stale entry stays put until it is overwritten or pushed
//!   out by LRU pressure.

mod lru;
mod timed;

pub use crate::lru::BoundedCache;
pub use crate::timed::Timed;
