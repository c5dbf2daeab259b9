//! End-to-end scenario 1 (spec.md §8): Assign -> MarkWorking -> MarkCompleted.

use predicates::str::contains;

use crate::prelude::Sandbox;

#[test]
fn assign_then_working_then_completed_persists_terminal_status() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["assign", "bd-1", "Fix auth", "--pane", "1", "--agent-type", "claude", "--prompt", "fix it"])
        .assert()
        .success()
        .stdout(contains("assigned bd-1 to pane 1"));

    sandbox
        .cmd()
        .args(["mark", "working", "bd-1"])
        .assert()
        .success()
        .stdout(contains("bd-1 is now working"));

    sandbox
        .cmd()
        .args(["mark", "completed", "bd-1"])
        .assert()
        .success()
        .stdout(contains("bd-1 is now completed"));

    sandbox
        .cmd()
        .args(["status", "--stats"])
        .assert()
        .success()
        .stdout(contains("total=1"))
        .stdout(contains("completed=1"));
}

#[test]
fn failed_assignment_records_reason_and_stats() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["assign", "bd-2", "Flaky test", "--pane", "2", "--agent-type", "codex", "--prompt", "investigate"])
        .assert()
        .success();

    sandbox.cmd().args(["mark", "working", "bd-2"]).assert().success();

    sandbox
        .cmd()
        .args(["mark", "failed", "bd-2", "--reason", "out of context"])
        .assert()
        .success()
        .stdout(contains("bd-2 is now failed"));

    sandbox
        .cmd()
        .args(["status", "--stats"])
        .assert()
        .success()
        .stdout(contains("failed=1"));
}
