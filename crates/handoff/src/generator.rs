// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Handoff Generator: assembles a validated [`Handoff`]
//! from free-form agent output, a structured transcript stream, or explicit
//! caller-supplied goal/now, then enriches it with git state and (best
//! effort) external-collaborator state.
//!
//! `goal`/`now` are caller-supplied when known; when absent they fall back
//! to the analyzer's single-valued `accomplishment`/`next_step` fields. Which
//! analyzer field feeds which required Handoff field is a judgment call
//! recorded in DESIGN.md.

use std::io::BufRead;
use std::path::Path;

use ntm_core::{Clock, FileReservation, Handoff, HandoffOutcome, HandoffStatus, SystemClock, HANDOFF_SCHEMA_VERSION};

use crate::analyzer::{analyze_output, Analysis};
use crate::error::HandoffError;
use crate::git::enrich_with_git_state as run_git_enrichment;
use crate::transcript::{generate_from_transcript, TranscriptSummary};

/// Caller-supplied fields that take precedence over anything the analyzer
/// would derive from agent output.
#[derive(Debug, Clone, Default)]
pub struct ExplicitFields {
    pub goal: Option<String>,
    pub now_action: Option<String>,
    pub active_beads: Vec<String>,
    pub agent_mail_threads: Vec<String>,
    pub tokens_pct: f64,
}

/// Assembles validated [`Handoff`]s from analyzed agent output.
pub struct Generator<C: Clock = SystemClock> {
    clock: C,
}

impl Generator<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl Default for Generator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Generator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Builds a [`Handoff`] from a free-form text blob via `analyzeOutput`.
    pub fn from_output(&self, session: &str, text: &str, explicit: &ExplicitFields) -> Handoff {
        let analysis = analyze_output(text);
        self.build(session, &analysis, explicit)
    }

    /// `GenerateFromTranscript`: parses the line-delimited
    /// JSON transcript, analyzes the last assistant record (if any) for
    /// continuity signal, and folds in the transcript's own file-mutation
    /// tracking and collected error strings as additional blockers.
    pub fn from_transcript<R: BufRead>(
        &self,
        session: &str,
        reader: R,
        explicit: &ExplicitFields,
    ) -> Result<Handoff, HandoffError> {
        let summary = generate_from_transcript(reader)?;
        let mut analysis = summary.last_assistant_text.as_deref().map(analyze_output).unwrap_or_default();
        append_transcript_errors(&mut analysis, &summary);

        let mut handoff = self.build(session, &analysis, explicit);
        handoff.files.modified = summary.files_modified.clone();
        Ok(handoff)
    }

    fn build(&self, session: &str, analysis: &Analysis, explicit: &ExplicitFields) -> Handoff {
        let now = self.clock.now();
        let goal = explicit.goal.clone().or_else(|| analysis.accomplishment.clone()).unwrap_or_default();
        let now_action = explicit.now_action.clone().or_else(|| analysis.next_step.clone()).unwrap_or_default();
        let (status, outcome) = infer_status(&analysis.blockers, &goal);

        Handoff {
            session: session.to_string(),
            goal,
            now: now_action,
            status,
            outcome,
            done_this_session: analysis.accomplishment.clone().into_iter().collect(),
            blockers: analysis.blockers.clone(),
            decisions: analysis.decisions.clone(),
            next: analysis.next_step.clone().into_iter().collect(),
            files: Default::default(),
            active_beads: explicit.active_beads.clone(),
            agent_mail_threads: explicit.agent_mail_threads.clone(),
            reservation_transfer: None,
            tokens_pct: explicit.tokens_pct,
            created_at: now,
            updated_at: now,
            version: HANDOFF_SCHEMA_VERSION,
        }
    }

    /// `EnrichWithGitState`: folds modified/untracked files
    /// into `files`. Best-effort: a failing git invocation is already
    /// swallowed inside [`crate::git`]. Branch and recent commits have no
    /// slot in the persisted YAML schema, so they are logged for operator visibility
    /// rather than stored — an Open Question resolution recorded in
    /// DESIGN.md.
    pub async fn enrich_with_git_state(&self, handoff: &mut Handoff, repo_dir: &Path) {
        let git_state = run_git_enrichment(repo_dir).await;
        let touched = !git_state.modified.is_empty() || !git_state.untracked.is_empty();
        merge_unique(&mut handoff.files.modified, git_state.modified);
        merge_unique(&mut handoff.files.created, git_state.untracked);
        if touched {
            handoff.updated_at = self.clock.now();
        }
        tracing::debug!(branch = ?git_state.branch, commits = git_state.recent_commits.len(), "git enrichment applied");
    }

    /// Attaches a [`ntm_core::ReservationTransfer`] block when reservations
    /// are present and an outgoing agent name is known.
    pub fn attach_reservation_transfer(
        &self,
        handoff: &mut Handoff,
        reservations: &[FileReservation],
        agent_name: Option<&str>,
        ttl_seconds: u64,
        grace_period_seconds: u64,
    ) {
        if reservations.is_empty() || agent_name.is_none() {
            return;
        }
        handoff.reservation_transfer = Some(ntm_core::ReservationTransfer {
            reservations: reservations
                .iter()
                .map(|r| ntm_core::TransferredReservation {
                    path_pattern: r.path_pattern.clone(),
                    exclusive: r.exclusive,
                    reason: r.reason.clone(),
                    expires_at: r.expires_at,
                })
                .collect(),
            ttl_seconds,
            grace_period_seconds,
        });
        handoff.updated_at = self.clock.now();
    }
}

/// In-order, de-duplicated append.
fn merge_unique(into: &mut Vec<String>, from: Vec<String>) {
    for item in from {
        if !into.contains(&item) {
            into.push(item);
        }
    }
}

/// Transcript-collected error strings become additional blockers, since
/// `analyzeOutput` only ever sees the last assistant record and would
/// otherwise miss errors surfaced by earlier tool calls.
fn append_transcript_errors(analysis: &mut Analysis, summary: &TranscriptSummary) {
    for error in &summary.errors {
        if analysis.blockers.len() >= 5 {
            break;
        }
        if !analysis.blockers.contains(error) {
            analysis.blockers.push(error.clone());
        }
    }
}

/// Status inference:
/// 1. Any blockers → `blocked` / `partial-`.
/// 2. Non-empty goal → `complete` / `succeeded`.
/// 3. Else → `partial` / `partial+`.
fn infer_status(blockers: &[String], goal: &str) -> (HandoffStatus, HandoffOutcome) {
    if !blockers.is_empty() {
        (HandoffStatus::Blocked, HandoffOutcome::PartialNegative)
    } else if !goal.is_empty() {
        (HandoffStatus::Complete, HandoffOutcome::Succeeded)
    } else {
        (HandoffStatus::Partial, HandoffOutcome::PartialPositive)
    }
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
