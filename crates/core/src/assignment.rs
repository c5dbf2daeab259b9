// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Assignment entity and its lifecycle state machine.

use crate::agent::AgentType;
use crate::id::PaneIndex;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an [`Assignment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Assigned,
    Working,
    Completed,
    Failed,
    Reassigned,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "assigned",
            AssignmentStatus::Working => "working",
            AssignmentStatus::Completed => "completed",
            AssignmentStatus::Failed => "failed",
            AssignmentStatus::Reassigned => "reassigned",
        }
    }

    /// `completed` and `reassigned` are terminal; no further transition is valid.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AssignmentStatus::Completed | AssignmentStatus::Reassigned)
    }

    /// Validates a transition against the lifecycle DAG in :
    ///
    /// ```text
    ///           ┌─────► working ─────► completed (terminal)
    /// assigned ─┤           │
    ///           │           ├─────► failed ─────► assigned (retry)
    ///           │           │
    ///           │           └─────► reassigned (terminal, new record replaces)
    ///           └─► failed ─► assigned (retry)
    /// ```
    pub fn can_transition_to(&self, next: AssignmentStatus) -> bool {
        use AssignmentStatus::*;
        matches!(
            (self, next),
            (Assigned, Working)
                | (Assigned, Failed)
                | (Working, Completed)
                | (Working, Failed)
                | (Working, Reassigned)
                | (Failed, Assigned)
        )
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bead→agent assignment within one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub bead_id: String,
    pub bead_title: String,
    pub pane_index: PaneIndex,
    pub agent_type: AgentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    pub status: AssignmentStatus,
    pub prompt: String,
    pub assigned_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_reason: Option<String>,
    #[serde(default)]
    pub retry_count: u32,
}

impl Assignment {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bead_id: impl Into<String>,
        bead_title: impl Into<String>,
        pane_index: PaneIndex,
        agent_type: AgentType,
        agent_name: Option<String>,
        prompt: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            bead_id: bead_id.into(),
            bead_title: bead_title.into(),
            pane_index,
            agent_type,
            agent_name,
            status: AssignmentStatus::Assigned,
            prompt: prompt.into(),
            assigned_at: now,
            started_at: None,
            completed_at: None,
            failed_at: None,
            fail_reason: None,
            retry_count: 0,
        }
    }
}

/// Aggregate counts returned by `AssignmentStore::stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentStats {
    pub total: usize,
    pub assigned: usize,
    pub working: usize,
    pub completed: usize,
    pub failed: usize,
    pub reassigned: usize,
}

#[cfg(test)]
#[path = "assignment_tests.rs"]
mod tests;
