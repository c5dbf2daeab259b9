// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ntm_core::FakeClock;

fn fixed_clock() -> FakeClock {
    let clock = FakeClock::new();
    clock.set("2026-01-05T10:00:00Z".parse().unwrap());
    clock
}

#[test]
fn explicit_fields_take_precedence_over_analyzer() {
    let gen = Generator::with_clock(fixed_clock());
    let explicit = ExplicitFields { goal: Some("ship the thing".to_string()), now_action: Some("write tests".to_string()), ..Default::default() };
    let handoff = gen.from_output("session-a", "Done: something else entirely\nNext: other thing", &explicit);
    assert_eq!(handoff.goal, "ship the thing");
    assert_eq!(handoff.now, "write tests");
}

#[test]
fn analyzer_fills_goal_and_now_when_explicit_absent() {
    let gen = Generator::with_clock(fixed_clock());
    let explicit = ExplicitFields::default();
    let handoff = gen.from_output("session-a", "Done: shipped the fix\nNext: write regression tests", &explicit);
    assert_eq!(handoff.goal, "shipped the fix");
    assert_eq!(handoff.now, "write regression tests");
    assert_eq!(handoff.status, HandoffStatus::Complete);
    assert_eq!(handoff.outcome, HandoffOutcome::Succeeded);
}

#[test]
fn blockers_force_blocked_status_regardless_of_goal() {
    let gen = Generator::with_clock(fixed_clock());
    let explicit = ExplicitFields::default();
    let handoff = gen.from_output("session-a", "Done: shipped the fix\nError: disk full", &explicit);
    assert_eq!(handoff.status, HandoffStatus::Blocked);
    assert_eq!(handoff.outcome, HandoffOutcome::PartialNegative);
    assert_eq!(handoff.blockers, vec!["disk full".to_string()]);
}

#[test]
fn no_goal_and_no_blockers_yields_partial() {
    let gen = Generator::with_clock(fixed_clock());
    let explicit = ExplicitFields::default();
    let handoff = gen.from_output("session-a", "just some unstructured text", &explicit);
    assert_eq!(handoff.status, HandoffStatus::Partial);
    assert_eq!(handoff.outcome, HandoffOutcome::PartialPositive);
}

#[test]
fn from_transcript_folds_file_mutations_and_errors_into_blockers() {
    let gen = Generator::with_clock(fixed_clock());
    let transcript = concat!(
        r#"{"role":"tool","tool_calls":[{"name":"Edit","file_path":"src/lib.rs"}]}"#, "\n",
        r#"{"role":"assistant","content":"Error: compile failed\nDone: refactored the module\nNext: rerun the suite"}"#, "\n",
    );
    let explicit = ExplicitFields::default();
    let handoff = gen.from_transcript("session-b", transcript.as_bytes(), &explicit).unwrap();
    assert_eq!(handoff.goal, "refactored the module");
    assert_eq!(handoff.now, "rerun the suite");
    assert!(handoff.blockers.contains(&"compile failed".to_string()));
    assert_eq!(handoff.files.modified, vec!["src/lib.rs".to_string()]);
}

#[tokio::test]
async fn enrich_with_git_state_merges_files_without_duplicates() {
    let gen = Generator::with_clock(fixed_clock());
    let mut handoff = gen.from_output("session-a", "Done: thing\nNext: thing", &ExplicitFields::default());
    handoff.files.modified.push("already-there.rs".to_string());

    let dir = tempfile::tempdir().unwrap();
    // A non-git directory yields an empty GitState; merge is a no-op and
    // updated_at is left untouched.
    let before = handoff.updated_at;
    gen.enrich_with_git_state(&mut handoff, dir.path()).await;
    assert_eq!(handoff.files.modified, vec!["already-there.rs".to_string()]);
    assert_eq!(handoff.updated_at, before);
}

#[test]
fn attach_reservation_transfer_requires_reservations_and_agent_name() {
    let gen = Generator::with_clock(fixed_clock());
    let mut handoff = gen.from_output("session-a", "Done: thing\nNext: thing", &ExplicitFields::default());
    let reservation = ntm_core::FileReservation {
        path_pattern: "src/**".to_string(),
        exclusive: true,
        reason: "refactor".to_string(),
        expires_at: None,
    };

    gen.attach_reservation_transfer(&mut handoff, &[], Some("agent-a"), 300, 60);
    assert!(handoff.reservation_transfer.is_none());

    gen.attach_reservation_transfer(&mut handoff, std::slice::from_ref(&reservation), None, 300, 60);
    assert!(handoff.reservation_transfer.is_none());

    gen.attach_reservation_transfer(&mut handoff, std::slice::from_ref(&reservation), Some("agent-a"), 300, 60);
    let transfer = handoff.reservation_transfer.as_ref().unwrap();
    assert_eq!(transfer.reservations.len(), 1);
    assert_eq!(transfer.ttl_seconds, 300);
    assert_eq!(transfer.grace_period_seconds, 60);
}
