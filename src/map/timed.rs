//! Thread-Safe Expiring Map
//!
//! This module implements [`TimedMap`], a `HashMap` guarded by a single
//! `RwLock` where every entry carries an absolute expiry deadline.
//!
//! ## Design Decisions
//!
//! 1. **One lock per map**: there is no per-key or per-shard locking.
//! 2. **Lazy expiry**: reads ignore expired entries but never remove them.
//!    Expired entries are dropped only by [`TimedMap::delete`] or
//!    [`TimedMap::purge`].
//! 3. **Single critical section for read-modify-write**: `set_expiration`
//!    and `reset` look up and rewrite the entry under one write guard, so a
//!    concurrent `delete` can never be undone by a stale write.
//!
//! ## Locking
//!
//! ```text
//! read  (shared)    : get, ttl, dump, len
//! write (exclusive) : set, delete, set_expiration, reset, purge
//! ```

use crate::map::entry::Entry;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// A generic key/value map whose entries expire `default_ttl` after they
/// were last set or reset.
///
/// Values are handed out by clone. To share one allocation between the map
/// and its readers, store an `Arc<T>`.
///
/// # Example
///
/// ```
/// use timedmap::TimedMap;
/// use std::time::Duration;
///
/// let sessions = TimedMap::new(Duration::from_secs(60));
///
/// sessions.set("alice", "token-1");
/// assert_eq!(sessions.get("alice"), Some("token-1"));
///
/// assert!(sessions.delete("alice"));
/// assert_eq!(sessions.get("alice"), None);
/// ```
pub struct TimedMap<K, V> {
    default_ttl: Duration,
    entries: RwLock<HashMap<K, Entry<V>>>,
}

impl<K, V> std::fmt::Debug for TimedMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedMap")
            .field("default_ttl", &self.default_ttl)
            .field("entries", &self.read().len())
            .finish()
    }
}

impl<K, V> TimedMap<K, V> {
    /// Creates an empty map.
    ///
    /// A zero `default_ttl` is accepted; such entries expire as soon as the
    /// clock moves past the moment they were set.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            default_ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the TTL applied by `set` and `reset`.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns the number of stored entries, including expired ones that
    /// have not been purged yet.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if nothing is stored, expired or not.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panicking caller cannot leave the map half-updated, so a poisoned
    // lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<K, Entry<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, Entry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K: Eq + Hash, V> TimedMap<K, V> {
    /// Inserts or overwrites `key`, restarting its TTL.
    pub fn set(&self, key: K, value: V) {
        let entry = Entry::with_ttl(value, Instant::now(), self.default_ttl);
        self.write().insert(key, entry);
    }

    /// Removes `key`.
    ///
    /// # Returns
    ///
    /// Returns `true` only if the entry existed and had not expired.
    /// An expired entry is still removed, but reported as `false`.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut entries = self.write();
        match entries.remove(key) {
            Some(entry) if entry.is_expired() => {
                trace!("delete dropped an already expired entry");
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Overwrites the deadline of an existing entry.
    ///
    /// The deadline may lie in the past, which expires the entry at once.
    /// Expired-but-present entries are updated too, which revives them.
    ///
    /// # Returns
    ///
    /// Returns `false` without touching the map if `key` is absent.
    pub fn set_expiration<Q>(&self, key: &Q, expires_at: Instant) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.rewrite_deadline(key, Some(expires_at))
    }

    /// Restarts the TTL of an existing entry from now.
    ///
    /// Same absence semantics as [`TimedMap::set_expiration`].
    pub fn reset<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.rewrite_deadline(key, Instant::now().checked_add(self.default_ttl))
    }

    fn rewrite_deadline<Q>(&self, key: &Q, expires_at: Option<Instant>) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut entries = self.write();
        match entries.get_mut(key) {
            Some(entry) => {
                entry.expires_at = expires_at;
                trace!(?expires_at, "entry deadline rewritten");
                true
            }
            None => false,
        }
    }

    /// Removes every entry that has expired.
    ///
    /// Holds the write lock for a full scan of the map, so this blocks all
    /// other callers and should be run sparingly.
    ///
    /// # Returns
    ///
    /// Returns the number of entries removed.
    pub fn purge(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.write();
        let before = entries.len();

        entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - entries.len();
        if removed > 0 {
            debug!(
                removed = removed,
                remaining = entries.len(),
                "Expired entries purged"
            );
        }
        removed
    }

    /// Returns the remaining lifetime of a live entry.
    ///
    /// `None` if the key is absent or expired. A live entry whose deadline
    /// overflowed the clock reports `Duration::MAX`.
    pub fn ttl<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entries = self.read();
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.remaining().unwrap_or(Duration::MAX))
    }
}

impl<K: Eq + Hash, V: Clone> TimedMap<K, V> {
    /// Gets the value for a key.
    ///
    /// Returns `None` if the key doesn't exist or has expired. Expired
    /// entries are left in place.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entries = self.read();
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => Some(entry.value.clone()),
            _ => None,
        }
    }
}

impl<K: Eq + Hash + Clone, V: Clone> TimedMap<K, V> {
    /// Copies every live key/value pair into a new `HashMap`.
    ///
    /// The snapshot is independent of the map. Expired entries are skipped
    /// but not removed.
    pub fn dump(&self) -> HashMap<K, V> {
        let now = Instant::now();
        let entries = self.read();

        entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }
}
