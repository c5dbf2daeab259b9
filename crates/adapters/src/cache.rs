// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-adapter availability caching.
//!
//! The cached value is copied out under the shared lock so callers never
//! retain pointers into the cache — `get` below returns an owned clone,
//! never a guard or reference.

use std::time::Duration;

use chrono::{DateTime, Utc};
use ntm_core::{Availability, Clock, Version};
use parking_lot::RwLock;

/// TTL appropriate for a CLI tool probed by spawning a process.
pub const CLI_TOOL_TTL: Duration = Duration::from_secs(5 * 60);

/// TTL appropriate for a tool backed by a long-running daemon.
pub const DAEMON_TOOL_TTL: Duration = Duration::from_secs(30);

/// TTL-bounded cache of one adapter's last-probed [`Availability`].
pub struct AvailabilityCache<C: Clock> {
    ttl: Duration,
    clock: C,
    state: RwLock<Option<Availability>>,
}

impl<C: Clock> AvailabilityCache<C> {
    pub fn new(ttl: Duration, clock: C) -> Self {
        Self { ttl, clock, state: RwLock::new(None) }
    }

    /// Returns the cached value if present and not yet expired.
    pub fn get(&self) -> Option<Availability> {
        let guard = self.state.read();
        match guard.as_ref() {
            Some(entry) if !self.is_expired(entry.last_checked) => Some(entry.clone()),
            _ => None,
        }
    }

    /// Stores a freshly probed value, stamping it with the current time.
    pub fn store(&self, available: bool, compatible: bool, version: Option<Version>, path: Option<String>) -> Availability {
        let entry = Availability {
            available,
            compatible,
            version,
            path,
            last_checked: self.clock.now(),
        };
        *self.state.write() = Some(entry.clone());
        entry
    }

    /// Explicit invalidation. Idempotent on an already-empty cache.
    pub fn invalidate(&self) {
        *self.state.write() = None;
    }

    fn is_expired(&self, last_checked: DateTime<Utc>) -> bool {
        let age = self.clock.now() - last_checked;
        age.to_std().map(|age| age > self.ttl).unwrap_or(false)
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
