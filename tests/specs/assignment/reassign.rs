//! `ntm reassign`: valid only from `working`, supersedes the record.

use predicates::str::contains;

use crate::prelude::Sandbox;

#[test]
fn reassign_from_working_moves_bead_to_new_pane_and_agent() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["assign", "bd-3", "Refactor parser", "--pane", "1", "--agent-type", "claude", "--prompt", "refactor"])
        .assert()
        .success();
    sandbox.cmd().args(["mark", "working", "bd-3"]).assert().success();

    sandbox
        .cmd()
        .args(["reassign", "bd-3", "--pane", "4", "--agent-type", "codex"])
        .assert()
        .success()
        .stdout(contains("bd-3 reassigned to pane 4 (codex)"));

    sandbox
        .cmd()
        .args(["status", "--pane", "4"])
        .assert()
        .success()
        .stdout(contains("bd-3"))
        .stdout(contains("codex"));
}

#[test]
fn reassign_before_working_is_rejected() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["assign", "bd-4", "Write docs", "--pane", "1", "--agent-type", "claude", "--prompt", "document"])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["reassign", "bd-4", "--pane", "2", "--agent-type", "gemini"])
        .assert()
        .failure()
        .stderr(contains("cannot transition bead bd-4"));
}
