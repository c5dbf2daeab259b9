// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ntm_core::{AgentType, FakeClock, PaneIndex};
use ntm_handoff::ExplicitFields;

fn open(dir: &std::path::Path) -> Orchestrator<FakeClock> {
    let config = OrchestratorConfig::under(dir.to_path_buf());
    Orchestrator::open_with_clock(config, "session-a", OrchestratorDeps::default(), FakeClock::new())
}

#[test]
fn scores_path_sits_under_the_shared_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = OrchestratorConfig::under(dir.path().to_path_buf());
    assert_eq!(config.scores_path, dir.path().join("analytics").join("scores.jsonl"));
}

#[test]
fn assignments_persist_under_the_shared_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = open(dir.path());

    let assignment = orchestrator.assignments.assign("bd-1", "fix the bug", PaneIndex(0), AgentType::Claude, None, "fix it");
    assert_eq!(assignment.bead_id, "bd-1");
    assert!(orchestrator.assignments.get("bd-1").is_some());
    assert!(dir.path().join("session-a").join("assignments.json").exists());
}

#[test]
fn writer_persists_handoffs_under_a_handoffs_subdirectory_of_the_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = open(dir.path());

    let handoff = orchestrator.generator.from_output(
        "session-a",
        "Accomplished: wired the orchestrator together.",
        &ExplicitFields::default(),
    );
    let path = orchestrator.writer.write_manual(&handoff, "wired orchestrator").unwrap();
    assert!(path.starts_with(dir.path().join("handoffs")));
    assert!(path.exists());
}

#[test]
fn prompt_history_is_scoped_to_the_session_it_is_recorded_under() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = open(dir.path());

    orchestrator.prompts.record("session-a", "do the thing", vec![0], ntm_core::PromptSource::Cli, None, None);
    assert_eq!(orchestrator.prompts.history("session-a").len(), 1);
    assert!(orchestrator.prompts.history("session-b").is_empty());
}

#[test]
fn adapters_registry_starts_empty_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = open(dir.path());
    assert!(orchestrator.adapters.names().is_empty());
}
