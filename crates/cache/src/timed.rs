use time::{Duration, UtcDateTime};

/// A cached value with the moment it was stored and how long it stays usable.
///
/// [`BoundedCache`](crate::BoundedCache) never looks inside this; callers
/// decide on every read whether the entry is still fresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<V> {
    pub value: V,
    pub inserted_at: UtcDateTime,
    pub ttl: Duration,
}

impl<V> Timed<V> {
    /// Stamps `value` with the current time.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self::at(value, UtcDateTime::now(), ttl)
    }

    pub fn at(value: V, inserted_at: UtcDateTime, ttl: Duration) -> Self {
        Self { value, inserted_at, ttl }
    }

    pub fn age_at(&self, now: UtcDateTime) -> Duration {
        now - self.inserted_at
    }

    /// An entry is fresh while its age is strictly below its TTL.
    pub fn is_fresh_at(&self, now: UtcDateTime) -> bool {
        self.age_at(now) < self.ttl
    }

    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(UtcDateTime::now())
    }

    pub fn into_value(self) -> V {
        self.value
    }
}
