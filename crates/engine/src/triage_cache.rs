// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The triage cache: a read-through cache over the external issue-graph
//! tool's `--robot-triage` response.
//!
//! Uses a single `parking_lot::Mutex` guarding both the cached value and its
//! staleness check, rather than the adapter availability cache's `RwLock`
//! (reads there never mutate state; a triage refetch does, so there is no
//! independent read path worth a shared lock).

use std::time::Duration;

use chrono::{DateTime, Utc};
use ntm_adapters::adapter::AdapterContext;
use ntm_adapters::issue_graph::{IssueGraphAdapter, Triage};
use ntm_adapters::ToolAdapterError;
use ntm_core::{Clock, SystemClock};
use parking_lot::Mutex;

/// Default TTL for a cached triage response. No specific value is mandated
/// for this cache; five minutes matches the CLI-tool adapter-availability
/// TTL since both probe the same subprocess-backed tool — an open-question
/// resolution recorded in DESIGN.md.
pub const DEFAULT_TRIAGE_TTL: Duration = Duration::from_secs(5 * 60);

struct Entry {
    triage: Triage,
    cached_at: DateTime<Utc>,
}

/// Read-through cache over [`IssueGraphAdapter::triage`].
pub struct TriageCache<C: Clock = SystemClock> {
    adapter: IssueGraphAdapter,
    ttl: Duration,
    clock: C,
    entry: Mutex<Option<Entry>>,
}

impl TriageCache<SystemClock> {
    pub fn new(adapter: IssueGraphAdapter) -> Self {
        Self::with_clock(adapter, DEFAULT_TRIAGE_TTL, SystemClock)
    }
}

impl<C: Clock> TriageCache<C> {
    pub fn with_clock(adapter: IssueGraphAdapter, ttl: Duration, clock: C) -> Self {
        Self { adapter, ttl, clock, entry: Mutex::new(None) }
    }

    /// Returns the cached triage response if still fresh, otherwise probes
    /// the adapter, caches the result, and returns it.
    pub async fn get(&self, ctx: &AdapterContext) -> Result<Triage, ToolAdapterError> {
        {
            let guard = self.entry.lock();
            if let Some(entry) = guard.as_ref() {
                if !self.is_expired(entry.cached_at) {
                    return Ok(entry.triage.clone());
                }
            }
        }
        let triage = self.adapter.triage(ctx).await?;
        *self.entry.lock() = Some(Entry { triage: triage.clone(), cached_at: self.clock.now() });
        Ok(triage)
    }

    /// Explicit invalidation. Idempotent on an already-empty cache.
    pub fn invalidate(&self) {
        *self.entry.lock() = None;
    }

    fn is_expired(&self, cached_at: DateTime<Utc>) -> bool {
        let age = self.clock.now() - cached_at;
        age.to_std().map(|age| age > self.ttl).unwrap_or(false)
    }
}

#[cfg(test)]
#[path = "triage_cache_tests.rs"]
mod tests;
