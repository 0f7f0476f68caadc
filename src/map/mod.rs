//! Expiring Map Module
//!
//! This module provides [`TimedMap`], a thread-safe key/value map whose
//! entries expire a fixed time after they were last set or reset.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               TimedMap<K, V>                 │
//! │   default_ttl                                │
//! │   RwLock<HashMap<K, Entry<V>>>               │
//! │      Entry { value: V, expires_at: Instant } │
//! └──────────────────────────────────────────────┘
//!                      ▲
//!                      │ purge() (caller-triggered)
//!                 application code
//! ```
//!
//! ## Features
//!
//! - **Generic**: any `Eq + Hash` key, any value type
//! - **RwLock**: concurrent readers, exclusive writers
//! - **Lazy Expiry**: expired entries are invisible to reads but stay in
//!   memory until `delete` or `purge` removes them
//! - **No background work**: maintenance happens only when the caller
//!   runs [`TimedMap::purge`]
//!
//! ## Example
//!
//! ```
//! use timedmap::map::TimedMap;
//! use std::time::{Duration, Instant};
//!
//! let map = TimedMap::new(Duration::from_secs(30));
//! map.set(10, "ten");
//! map.set(20, "twenty");
//!
//! // Expire key 10 right away
//! map.set_expiration(&10, Instant::now() - Duration::from_secs(1));
//!
//! assert_eq!(map.get(&10), None);
//! assert_eq!(map.dump().len(), 1);
//! assert_eq!(map.purge(), 1);
//! ```

pub mod entry;
pub mod timed;

pub use entry::Entry;
pub use timed::TimedMap;
