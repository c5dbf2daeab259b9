// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Assignment Store: the authoritative in-memory +
//! on-disk record of every bead assignment for one session, with centralized
//! state transitions and event emission as their side effect.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ntm_core::{
    AgentType, Assignment, AssignmentStats, AssignmentStatus, Clock, EventEmitter, PaneIndex,
    SystemClock, WebhookEvent,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::atomic::{load_json_with_fallback, write_json_atomic};
use crate::error::StoreError;

const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AssignmentFile {
    #[serde(default = "default_schema_version")]
    version: u32,
    session: String,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    assignments: BTreeMap<String, Assignment>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(0, 0).unwrap_or_default()
}

impl Default for AssignmentFile {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            session: String::new(),
            updated_at: epoch(),
            assignments: BTreeMap::new(),
        }
    }
}

/// A per-session persistent ledger of bead→agent assignments. All transitions are centralized here; event emission is a side
/// effect of a valid transition, never of a read.
pub struct AssignmentStore<C: Clock = SystemClock> {
    session: String,
    path: PathBuf,
    clock: C,
    emitter: Arc<dyn EventEmitter>,
    state: RwLock<AssignmentFile>,
}

impl AssignmentStore<SystemClock> {
    /// Opens (lazily creating) the store for `session` under `base_dir`,
    /// loading `<base_dir>/<session or "general">/assignments.json` with
    /// `.bak` fallback.
    pub fn open(base_dir: &Path, session: &str, emitter: Arc<dyn EventEmitter>) -> Self {
        Self::open_with_clock(base_dir, session, emitter, SystemClock)
    }
}

impl<C: Clock> AssignmentStore<C> {
    pub fn open_with_clock(
        base_dir: &Path,
        session: &str,
        emitter: Arc<dyn EventEmitter>,
        clock: C,
    ) -> Self {
        let dir_name = if session.is_empty() { "general" } else { session };
        let path = base_dir.join(dir_name).join("assignments.json");
        let session_owned = session.to_string();
        let file = load_json_with_fallback(&path, {
            let session_owned = session_owned.clone();
            move || AssignmentFile {
                version: SCHEMA_VERSION,
                session: session_owned.clone(),
                updated_at: epoch(),
                assignments: BTreeMap::new(),
            }
        });
        Self {
            session: session_owned,
            path,
            clock,
            emitter,
            state: RwLock::new(file),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, file: &AssignmentFile) {
        if let Err(e) = write_json_atomic(&self.path, file) {
            tracing::error!(path = %self.path.display(), error = %e, "failed to persist assignment store");
        }
    }

    fn emit(&self, kind: &str, pane_index: PaneIndex, agent_type: &AgentType, message: impl Into<String>) {
        self.emitter.emit(WebhookEvent::new(kind, &self.session, pane_index, agent_type.as_str(), message));
    }

    /// No other assignment for `pane` is `working` — the condition that
    /// gates `agent_idle` emission.
    fn pane_is_idle(&self, file: &AssignmentFile, pane: PaneIndex, excluding_bead: &str) -> bool {
        !file
            .assignments
            .values()
            .any(|a| a.pane_index == pane && a.bead_id != excluding_bead && a.status == AssignmentStatus::Working)
    }

    /// `Assign(beadId, title, pane, agentType, agentName, prompt) →
    /// Assignment`: sets status `assigned`; persists; emits `bead_assigned`.
    /// Reassignment supersedes the prior live record in-place: the old
    /// record's status becomes `reassigned` rather than being replaced
    /// wholesale.
    #[allow(clippy::too_many_arguments)]
    pub fn assign(
        &self,
        bead_id: impl Into<String>,
        bead_title: impl Into<String>,
        pane_index: PaneIndex,
        agent_type: AgentType,
        agent_name: Option<String>,
        prompt: impl Into<String>,
    ) -> Assignment {
        let bead_id = bead_id.into();
        let now = self.clock.now();
        let mut file = self.state.write();
        if let Some(existing) = file.assignments.get_mut(&bead_id) {
            existing.status = AssignmentStatus::Reassigned;
        }
        let assignment = Assignment::new(bead_id.clone(), bead_title, pane_index, agent_type, agent_name, prompt, now);
        file.assignments.insert(bead_id, assignment.clone());
        file.updated_at = now;
        self.persist(&file);
        drop(file);
        self.emit("bead_assigned", pane_index, &assignment.agent_type, format!("bead {} assigned", assignment.bead_id));
        assignment
    }

    /// `UpdateStatus(beadId, newStatus)`: validates the transition, stamps
    /// the matching timestamp, persists, and emits the per-status event
    /// (plus a conditional `agent_idle`).
    pub fn update_status(&self, bead_id: &str, new_status: AssignmentStatus) -> Result<Assignment, StoreError> {
        let now = self.clock.now();
        let mut file = self.state.write();
        let current_status;
        let pane_index;
        let agent_type;
        {
            let assignment = file
                .assignments
                .get(bead_id)
                .ok_or_else(|| StoreError::NotFound { bead_id: bead_id.to_string() })?;
            current_status = assignment.status;
            pane_index = assignment.pane_index;
            agent_type = assignment.agent_type.clone();
            if !current_status.can_transition_to(new_status) {
                return Err(StoreError::InvalidTransition {
                    bead_id: bead_id.to_string(),
                    from: current_status,
                    to: new_status,
                });
            }
        }
        {
            let assignment = file
                .assignments
                .get_mut(bead_id)
                .ok_or_else(|| StoreError::NotFound { bead_id: bead_id.to_string() })?;
            assignment.status = new_status;
            match new_status {
                AssignmentStatus::Working => assignment.started_at = Some(now),
                AssignmentStatus::Completed => assignment.completed_at = Some(now),
                AssignmentStatus::Failed => assignment.failed_at = Some(now),
                AssignmentStatus::Assigned => {
                    assignment.retry_count += 1;
                    assignment.fail_reason = None;
                }
                AssignmentStatus::Reassigned => {}
            }
        }
        file.updated_at = now;
        self.persist(&file);
        let idle = current_status == AssignmentStatus::Working && self.pane_is_idle(&file, pane_index, bead_id);
        let updated = file.assignments.get(bead_id).cloned();
        drop(file);

        self.emit_transition_events(new_status, pane_index, &agent_type, bead_id, idle);
        updated.ok_or_else(|| StoreError::NotFound { bead_id: bead_id.to_string() })
    }

    fn emit_transition_events(
        &self,
        new_status: AssignmentStatus,
        pane_index: PaneIndex,
        agent_type: &AgentType,
        bead_id: &str,
        pane_idle: bool,
    ) {
        match new_status {
            AssignmentStatus::Assigned => {
                self.emit("bead_assigned", pane_index, agent_type, format!("bead {bead_id} re-assigned"));
            }
            AssignmentStatus::Working => {
                self.emit("agent_busy", pane_index, agent_type, format!("bead {bead_id} in progress"));
            }
            AssignmentStatus::Completed => {
                self.emit("bead_completed", pane_index, agent_type, format!("bead {bead_id} completed"));
                self.emit("agent_completed", pane_index, agent_type, format!("agent completed bead {bead_id}"));
                if pane_idle {
                    self.emit("agent_idle", pane_index, agent_type, "pane has no working assignments");
                }
            }
            AssignmentStatus::Failed => {
                self.emit("bead_failed", pane_index, agent_type, format!("bead {bead_id} failed"));
                self.emit("agent_error", pane_index, agent_type, format!("agent failed bead {bead_id}"));
                if pane_idle {
                    self.emit("agent_idle", pane_index, agent_type, "pane has no working assignments");
                }
            }
            AssignmentStatus::Reassigned => {}
        }
    }

    pub fn mark_working(&self, bead_id: &str) -> Result<Assignment, StoreError> {
        self.update_status(bead_id, AssignmentStatus::Working)
    }

    pub fn mark_completed(&self, bead_id: &str) -> Result<Assignment, StoreError> {
        self.update_status(bead_id, AssignmentStatus::Completed)
    }

    /// `MarkFailed(beadId, reason)`: as `update_status` plus records
    /// `fail_reason`.
    pub fn mark_failed(&self, bead_id: &str, reason: impl Into<String>) -> Result<Assignment, StoreError> {
        self.update_status(bead_id, AssignmentStatus::Failed)?;
        let mut file = self.state.write();
        let assignment = file
            .assignments
            .get_mut(bead_id)
            .ok_or_else(|| StoreError::NotFound { bead_id: bead_id.to_string() })?;
        assignment.fail_reason = Some(reason.into());
        let updated = assignment.clone();
        self.persist(&file);
        Ok(updated)
    }

    /// `Reassign(beadId, newPane, newAgentType, newAgentName) → Assignment`:
    /// valid only from `working`; supersedes the record, carrying the
    /// original prompt forward; emits the reassignment as two events (old →
    /// `reassigned`; new → `assigned`).
    pub fn reassign(
        &self,
        bead_id: &str,
        new_pane: PaneIndex,
        new_agent_type: AgentType,
        new_agent_name: Option<String>,
    ) -> Result<Assignment, StoreError> {
        let now = self.clock.now();
        let mut file = self.state.write();
        let (old_pane, old_agent_type, title, prompt) = {
            let existing = file
                .assignments
                .get(bead_id)
                .ok_or_else(|| StoreError::NotFound { bead_id: bead_id.to_string() })?;
            if existing.status != AssignmentStatus::Working {
                return Err(StoreError::InvalidTransition {
                    bead_id: bead_id.to_string(),
                    from: existing.status,
                    to: AssignmentStatus::Reassigned,
                });
            }
            (existing.pane_index, existing.agent_type.clone(), existing.bead_title.clone(), existing.prompt.clone())
        };
        if let Some(existing) = file.assignments.get_mut(bead_id) {
            existing.status = AssignmentStatus::Reassigned;
        }
        let new_assignment =
            Assignment::new(bead_id.to_string(), title, new_pane, new_agent_type, new_agent_name, prompt, now);
        file.assignments.insert(bead_id.to_string(), new_assignment.clone());
        file.updated_at = now;
        self.persist(&file);
        let pane_idle = self.pane_is_idle(&file, old_pane, bead_id);
        drop(file);

        // No event directly for the old → reassigned transition; the new assignment's
        // `bead_assigned` is the only event the companion transition emits,
        // plus an `agent_idle` for the vacated pane if applicable.
        if pane_idle {
            self.emit("agent_idle", old_pane, &old_agent_type, "pane has no working assignments");
        }
        self.emit("bead_assigned", new_pane, &new_assignment.agent_type, format!("bead {bead_id} reassigned"));
        Ok(new_assignment)
    }

    pub fn get(&self, bead_id: &str) -> Option<Assignment> {
        self.state.read().assignments.get(bead_id).cloned()
    }

    pub fn list(&self) -> Vec<Assignment> {
        self.state.read().assignments.values().cloned().collect()
    }

    pub fn list_by_pane(&self, pane: PaneIndex) -> Vec<Assignment> {
        self.state.read().assignments.values().filter(|a| a.pane_index == pane).cloned().collect()
    }

    pub fn list_by_status(&self, status: AssignmentStatus) -> Vec<Assignment> {
        self.state.read().assignments.values().filter(|a| a.status == status).cloned().collect()
    }

    /// Live assignments: `assigned` or `working`.
    pub fn list_active(&self) -> Vec<Assignment> {
        self.state
            .read()
            .assignments
            .values()
            .filter(|a| matches!(a.status, AssignmentStatus::Assigned | AssignmentStatus::Working))
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> AssignmentStats {
        let file = self.state.read();
        let mut stats = AssignmentStats::default();
        stats.total = file.assignments.len();
        for a in file.assignments.values() {
            match a.status {
                AssignmentStatus::Assigned => stats.assigned += 1,
                AssignmentStatus::Working => stats.working += 1,
                AssignmentStatus::Completed => stats.completed += 1,
                AssignmentStatus::Failed => stats.failed += 1,
                AssignmentStatus::Reassigned => stats.reassigned += 1,
            }
        }
        stats
    }

    /// Administrative removal; persists immediately.
    pub fn remove(&self, bead_id: &str) -> Result<(), StoreError> {
        let mut file = self.state.write();
        file.assignments
            .remove(bead_id)
            .ok_or_else(|| StoreError::NotFound { bead_id: bead_id.to_string() })?;
        file.updated_at = self.clock.now();
        self.persist(&file);
        Ok(())
    }

    /// Administrative wipe; idempotent on an already-empty store.
    pub fn clear(&self) {
        let mut file = self.state.write();
        file.assignments.clear();
        file.updated_at = self.clock.now();
        self.persist(&file);
    }
}

#[cfg(test)]
#[path = "assignments_tests.rs"]
mod tests;
