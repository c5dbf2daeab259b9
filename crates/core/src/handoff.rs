// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Handoff entity: a validated continuity snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall completion state of a handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandoffStatus {
    Complete,
    Partial,
    Blocked,
}

impl std::fmt::Display for HandoffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandoffStatus::Complete => "complete",
            HandoffStatus::Partial => "partial",
            HandoffStatus::Blocked => "blocked",
        };
        write!(f, "{s}")
    }
}

/// Coarse outcome classification, independent of [`HandoffStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandoffOutcome {
    #[serde(rename = "succeeded")]
    Succeeded,
    #[serde(rename = "partial+")]
    PartialPositive,
    #[serde(rename = "partial-")]
    PartialNegative,
}

impl std::fmt::Display for HandoffOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandoffOutcome::Succeeded => "succeeded",
            HandoffOutcome::PartialPositive => "partial+",
            HandoffOutcome::PartialNegative => "partial-",
        };
        write!(f, "{s}")
    }
}

/// File changes observed during the session, split by operation kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChanges {
    #[serde(default)]
    pub created: Vec<String>,
    #[serde(default)]
    pub modified: Vec<String>,
    #[serde(default)]
    pub deleted: Vec<String>,
}

/// A single reservation carried in a [`ReservationTransfer`] block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferredReservation {
    pub path_pattern: String,
    pub exclusive: bool,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Attached when file reservations are present and an outgoing agent name is
/// known, so the incoming agent can re-claim them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationTransfer {
    pub reservations: Vec<TransferredReservation>,
    pub ttl_seconds: u64,
    pub grace_period_seconds: u64,
}

/// A validated continuity snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Handoff {
    pub session: String,
    pub goal: String,
    pub now: String,
    pub status: HandoffStatus,
    pub outcome: HandoffOutcome,
    #[serde(default)]
    pub done_this_session: Vec<String>,
    #[serde(default)]
    pub blockers: Vec<String>,
    /// Keyed map of decision -> rationale.
    #[serde(default)]
    pub decisions: BTreeMap<String, String>,
    #[serde(default)]
    pub next: Vec<String>,
    #[serde(default)]
    pub files: FileChanges,
    #[serde(default)]
    pub active_beads: Vec<String>,
    #[serde(default)]
    pub agent_mail_threads: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_transfer: Option<ReservationTransfer>,
    #[serde(default)]
    pub tokens_pct: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: u32,
}

pub const HANDOFF_SCHEMA_VERSION: u32 = 1;

#[cfg(test)]
#[path = "handoff_tests.rs"]
mod tests;
