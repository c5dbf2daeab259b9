// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The summary aggregator: rolls multiple agents' handoffs for
//! one session into a single cross-agent view, for the administrative CLI
//! and for dispatch decisions that need a session-wide picture rather than
//! one agent's.

use std::collections::BTreeMap;

use ntm_core::{Handoff, HandoffStatus};

/// A cross-agent rollup of every handoff recorded for a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub session: String,
    pub agent_count: usize,
    pub blocked_count: usize,
    pub done_this_session: Vec<String>,
    pub blockers: Vec<String>,
    pub next: Vec<String>,
    pub decisions: BTreeMap<String, String>,
    pub average_tokens_pct: f64,
}

/// Aggregates `handoffs` — expected to be the latest handoff per agent
/// within one session — into a [`SessionSummary`]. Lists are de-duplicated
/// in first-seen order; later handoffs' decisions overwrite earlier ones on
/// key collision, a last-writer-wins convention for merged maps.
pub fn aggregate(session: &str, handoffs: &[Handoff]) -> SessionSummary {
    let mut summary = SessionSummary { session: session.to_string(), ..Default::default() };
    if handoffs.is_empty() {
        return summary;
    }

    summary.agent_count = handoffs.len();
    summary.blocked_count = handoffs.iter().filter(|h| h.status == HandoffStatus::Blocked).count();

    let mut tokens_sum = 0.0;
    for handoff in handoffs {
        merge_unique(&mut summary.done_this_session, &handoff.done_this_session);
        merge_unique(&mut summary.blockers, &handoff.blockers);
        merge_unique(&mut summary.next, &handoff.next);
        for (what, why) in &handoff.decisions {
            summary.decisions.insert(what.clone(), why.clone());
        }
        tokens_sum += handoff.tokens_pct;
    }
    summary.average_tokens_pct = tokens_sum / handoffs.len() as f64;
    summary
}

fn merge_unique(into: &mut Vec<String>, from: &[String]) {
    for item in from {
        if !into.contains(item) {
            into.push(item.clone());
        }
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
