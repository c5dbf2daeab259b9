// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Utc;
use ntm_core::{FileChanges, HandoffOutcome};

fn handoff(status: HandoffStatus, tokens_pct: f64) -> Handoff {
    Handoff {
        session: "session-a".to_string(),
        goal: "ship the thing".to_string(),
        now: "writing tests".to_string(),
        status,
        outcome: HandoffOutcome::Succeeded,
        done_this_session: Vec::new(),
        blockers: Vec::new(),
        decisions: BTreeMap::new(),
        next: Vec::new(),
        files: FileChanges::default(),
        active_beads: Vec::new(),
        agent_mail_threads: Vec::new(),
        reservation_transfer: None,
        tokens_pct,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        version: 1,
    }
}

#[test]
fn aggregate_over_no_handoffs_yields_a_zeroed_summary() {
    let summary = aggregate("session-a", &[]);
    assert_eq!(summary.session, "session-a");
    assert_eq!(summary.agent_count, 0);
    assert_eq!(summary.average_tokens_pct, 0.0);
}

#[test]
fn agent_count_and_blocked_count_are_tallied() {
    let handoffs = vec![
        handoff(HandoffStatus::Complete, 10.0),
        handoff(HandoffStatus::Blocked, 20.0),
        handoff(HandoffStatus::Blocked, 30.0),
    ];
    let summary = aggregate("session-a", &handoffs);
    assert_eq!(summary.agent_count, 3);
    assert_eq!(summary.blocked_count, 2);
}

#[test]
fn average_tokens_pct_is_the_mean_across_handoffs() {
    let handoffs = vec![handoff(HandoffStatus::Complete, 10.0), handoff(HandoffStatus::Complete, 30.0)];
    let summary = aggregate("session-a", &handoffs);
    assert_eq!(summary.average_tokens_pct, 20.0);
}

#[test]
fn lists_are_deduplicated_in_first_seen_order() {
    let mut first = handoff(HandoffStatus::Complete, 0.0);
    first.done_this_session = vec!["wrote parser".to_string(), "wrote tests".to_string()];
    let mut second = handoff(HandoffStatus::Complete, 0.0);
    second.done_this_session = vec!["wrote tests".to_string(), "shipped docs".to_string()];

    let summary = aggregate("session-a", &[first, second]);
    assert_eq!(summary.done_this_session, vec!["wrote parser".to_string(), "wrote tests".to_string(), "shipped docs".to_string()]);
}

#[test]
fn later_handoffs_decisions_win_on_key_collision() {
    let mut first = handoff(HandoffStatus::Complete, 0.0);
    first.decisions.insert("db".to_string(), "use sqlite".to_string());
    let mut second = handoff(HandoffStatus::Complete, 0.0);
    second.decisions.insert("db".to_string(), "use postgres".to_string());

    let summary = aggregate("session-a", &[first, second]);
    assert_eq!(summary.decisions.get("db"), Some(&"use postgres".to_string()));
}

#[test]
fn blockers_and_next_merge_across_all_handoffs() {
    let mut first = handoff(HandoffStatus::Blocked, 0.0);
    first.blockers = vec!["waiting on review".to_string()];
    first.next = vec!["ping reviewer".to_string()];
    let mut second = handoff(HandoffStatus::Complete, 0.0);
    second.blockers = vec!["waiting on review".to_string()];
    second.next = vec!["merge".to_string()];

    let summary = aggregate("session-a", &[first, second]);
    assert_eq!(summary.blockers, vec!["waiting on review".to_string()]);
    assert_eq!(summary.next, vec!["ping reviewer".to_string(), "merge".to_string()]);
}
