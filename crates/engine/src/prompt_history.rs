// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session-scoped prompt history: an append-only in-memory
//! log of [`PromptEntry`] per session, redacted on entry per the configured
//! [`Redactor`] policy.
//!
//! Follows a `runtime_states: Mutex<HashMap<String, _>>` shape: one
//! process-wide map keyed by session name, guarded by a single lock, rather
//! than a lock-per-session — prompt history is low-contention relative to
//! the assignment store.

use ntm_core::{Clock, IdGen, PromptEntry, PromptSource, Redactor, SystemClock, UuidIdGen};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Per-session append-only prompt log, redacting content as it is recorded.
pub struct PromptHistory<C: Clock = SystemClock, G: IdGen = UuidIdGen> {
    clock: C,
    id_gen: G,
    redactor: Box<dyn Redactor>,
    sessions: Mutex<HashMap<String, Vec<PromptEntry>>>,
}

impl PromptHistory<SystemClock, UuidIdGen> {
    pub fn new(redactor: Box<dyn Redactor>) -> Self {
        Self::with_clock_and_ids(SystemClock, UuidIdGen, redactor)
    }
}

impl<C: Clock, G: IdGen> PromptHistory<C, G> {
    pub fn with_clock_and_ids(clock: C, id_gen: G, redactor: Box<dyn Redactor>) -> Self {
        Self { clock, id_gen, redactor, sessions: Mutex::new(HashMap::new()) }
    }

    /// Records a prompt for `session`, applying the configured redaction
    /// policy to `content` before it ever enters the log.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &self,
        session: &str,
        content: &str,
        targets: Vec<u32>,
        source: PromptSource,
        template: Option<String>,
        file_path: Option<String>,
    ) -> PromptEntry {
        let entry = PromptEntry {
            id: self.id_gen.next(),
            session: session.to_string(),
            timestamp: self.clock.now(),
            content: self.redactor.redact(content),
            targets,
            source,
            template,
            file_path,
        };
        self.sessions.lock().entry(session.to_string()).or_default().push(entry.clone());
        entry
    }

    /// All prompts recorded for `session`, oldest first.
    pub fn history(&self, session: &str) -> Vec<PromptEntry> {
        self.sessions.lock().get(session).cloned().unwrap_or_default()
    }

    /// The most recently recorded prompt for `session`, if any.
    pub fn last(&self, session: &str) -> Option<PromptEntry> {
        self.sessions.lock().get(session).and_then(|entries| entries.last().cloned())
    }

    /// Drops all recorded prompts for `session`. Idempotent on a session
    /// with no recorded history.
    pub fn clear_session(&self, session: &str) {
        self.sessions.lock().remove(session);
    }
}

#[cfg(test)]
#[path = "prompt_history_tests.rs"]
mod tests;
