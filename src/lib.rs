//! # timedmap - A Thread-Safe Expiring Key/Value Map
//!
//! `timedmap` provides [`TimedMap`], a generic in-process map whose entries
//! expire after a default time-to-live. It is meant for transient data such
//! as session tokens, rate-limit counters and short-lived cache entries.
//!
//! ## Expiry Model
//!
//! Expiry is lazy. An expired entry is never returned by [`TimedMap::get`]
//! or [`TimedMap::dump`], but it stays in memory until one of these happens:
//! 1. [`TimedMap::delete`] removes it (reporting `false`)
//! 2. [`TimedMap::purge`] sweeps every expired entry at once
//!
//! There is no background sweeper. Long-running owners should call `purge`
//! periodically; it takes the write lock for a full scan.
//!
//! ## Quick Start
//!
//! ```
//! use timedmap::TimedMap;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let sessions: Arc<TimedMap<String, Arc<str>>> =
//!     Arc::new(TimedMap::new(Duration::from_secs(900)));
//!
//! sessions.set("alice".to_string(), Arc::from("token-1"));
//!
//! // Keep the session alive
//! assert!(sessions.reset("alice"));
//!
//! let token = sessions.get("alice");
//! assert_eq!(token.as_deref(), Some("token-1"));
//! ```
//!
//! ## Module Overview
//!
//! - [`map`]: the expiring map and its entry type

pub mod map;

pub use map::{Entry, TimedMap};

/// Version of timedmap
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
