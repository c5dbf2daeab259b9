//! End-to-end scenario 2 (spec.md §8): an out-of-DAG transition is rejected
//! and leaves the assignment's status unchanged.

use predicates::str::contains;

use crate::prelude::Sandbox;

#[test]
fn assigned_to_completed_directly_is_rejected() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["assign", "bd-2", "Add caching", "--pane", "3", "--agent-type", "gemini", "--prompt", "cache it"])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["mark", "completed", "bd-2"])
        .assert()
        .failure()
        .stderr(contains("cannot transition bead bd-2 from assigned to completed"));

    sandbox
        .cmd()
        .args(["status", "--stats"])
        .assert()
        .success()
        .stdout(contains("assigned=1"))
        .stdout(contains("completed=0"));
}

#[test]
fn unknown_bead_is_not_found() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["mark", "working", "no-such-bead"])
        .assert()
        .failure()
        .stderr(contains("bead no-such-bead not found"));
}
