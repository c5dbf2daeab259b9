// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires the closed loop together: Assignment Store, Score
//! Tracker, Tool Adapter Registry, Handoff Generator/Writer, and the
//! session-scoped caches, as one per-session handle.
//!
//! Follows a `Runtime`/`RuntimeDeps` split: `OrchestratorDeps` bundles the
//! externally-supplied collaborators (adapters, event sink, redactor) while
//! `Orchestrator` itself owns the derived state. Callers build the adapter
//! registry and event emitter; the orchestrator owns the store, tracker,
//! generator, writer, and caches built from them.

use std::path::PathBuf;
use std::sync::Arc;

use ntm_adapters::ToolAdapterRegistry;
use ntm_core::{Clock, EventEmitter, NoOpRedactor, Redactor, SystemClock, UuidIdGen};
use ntm_handoff::{Generator, HandoffWriter};
use ntm_storage::{AssignmentStore, ScoreTracker};

use crate::prompt_history::PromptHistory;

/// Caller-supplied collaborators an [`Orchestrator`] is built from.
pub struct OrchestratorDeps {
    pub adapters: ToolAdapterRegistry,
    pub emitter: Arc<dyn EventEmitter>,
    pub redactor: Box<dyn Redactor>,
}

impl Default for OrchestratorDeps {
    fn default() -> Self {
        Self { adapters: ToolAdapterRegistry::new(), emitter: ntm_core::default_emitter(), redactor: Box::new(NoOpRedactor) }
    }
}

/// Filesystem roots the orchestrator persists under.
pub struct OrchestratorConfig {
    pub data_dir: PathBuf,
    pub scores_path: PathBuf,
}

impl OrchestratorConfig {
    /// Resolves both roots from `data_dir`.
    pub fn under(data_dir: PathBuf) -> Self {
        let scores_path = data_dir.join("analytics").join("scores.jsonl");
        Self { data_dir, scores_path }
    }
}

/// The closed loop for one session: assignment store, score tracker, tool
/// adapter registry, handoff generator/writer, and session-scoped caches.
pub struct Orchestrator<C: Clock = SystemClock> {
    pub session: String,
    pub assignments: AssignmentStore<C>,
    pub scores: ScoreTracker<C>,
    pub adapters: ToolAdapterRegistry,
    pub generator: Generator<C>,
    pub writer: HandoffWriter<C>,
    pub prompts: PromptHistory<C, UuidIdGen>,
}

impl Orchestrator<SystemClock> {
    pub fn open(config: OrchestratorConfig, session: &str, deps: OrchestratorDeps) -> Self {
        Self::open_with_clock(config, session, deps, SystemClock)
    }
}

impl<C: Clock> Orchestrator<C> {
    pub fn open_with_clock(config: OrchestratorConfig, session: &str, deps: OrchestratorDeps, clock: C) -> Self {
        let assignments = AssignmentStore::open_with_clock(&config.data_dir, session, deps.emitter, clock.clone());
        let scores = ScoreTracker::open_with_clock(&config.scores_path, clock.clone());
        let generator = Generator::with_clock(clock.clone());
        let writer = HandoffWriter::with_clock(config.data_dir.join("handoffs"), clock.clone());
        let prompts = PromptHistory::with_clock_and_ids(clock, UuidIdGen, deps.redactor);
        Self { session: session.to_string(), assignments, scores, adapters: deps.adapters, generator, writer, prompts }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
