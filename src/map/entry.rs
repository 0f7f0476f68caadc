//! Stored value plus its expiry deadline.

use std::time::{Duration, Instant};

/// Represents a stored value with its absolute expiry time.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    /// The caller-supplied value
    pub value: V,
    /// When this entry expires (None = never expires)
    pub expires_at: Option<Instant>,
}

impl<V> Entry<V> {
    /// Creates an entry that expires `ttl` after `now`.
    ///
    /// A deadline past the range of `Instant` leaves the entry without expiry.
    pub fn with_ttl(value: V, now: Instant, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: now.checked_add(ttl),
        }
    }

    /// Creates an entry with an explicit deadline.
    pub fn with_deadline(value: V, expires_at: Instant) -> Self {
        Self {
            value,
            expires_at: Some(expires_at),
        }
    }

    /// Checks if this entry has expired.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against a caller-supplied clock reading.
    ///
    /// An entry is expired only once `now` is strictly after its deadline.
    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.map(|exp| now > exp).unwrap_or(false)
    }

    /// Returns the remaining lifetime, or None if the entry never expires.
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|exp| exp.saturating_duration_since(Instant::now()))
    }
}
