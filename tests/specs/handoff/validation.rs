//! `ntm handoff write` surfaces `ValidationFailed` and writes nothing when
//! the assembled Handoff violates an invariant (spec.md's testable property
//! on `goal`/`now`/`session`).

use predicates::str::contains;

use crate::prelude::Sandbox;

#[test]
fn empty_goal_and_now_reject_the_write() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["handoff", "write", "s8"])
        .write_stdin("nothing resembling an accomplishment or a next step here")
        .assert()
        .failure()
        .stderr(contains("handoff failed validation"))
        .stderr(contains("goal must not be empty"))
        .stderr(contains("now must not be empty"));

    assert!(!sandbox.dir.path().join("handoffs").join("s8").exists());
}

#[test]
fn session_violating_the_slug_pattern_rejects_the_write() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["handoff", "write", "s 9", "--goal", "ship it", "--now", "tag it"])
        .write_stdin("irrelevant")
        .assert()
        .failure()
        .stderr(contains("must match ^[A-Za-z0-9_-]+$"));
}
