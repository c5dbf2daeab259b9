//! `ntm handoff write`: analyzes stdin, builds a Handoff, and persists it
//! under `<data-dir>/handoffs/<session>/`.

use predicates::str::{contains, ends_with};

use crate::prelude::Sandbox;

#[test]
fn manual_write_lands_under_session_directory_with_slugged_filename() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["handoff", "write", "s5", "--description", "wire protocol"])
        .write_stdin("Accomplished: wired up the new transport.\nNext: add integration tests.\n")
        .assert()
        .success()
        .stdout(contains("wrote handoff to"))
        .stdout(contains("/handoffs/s5/"))
        .stdout(ends_with(".yaml\n"));

    let session_dir = sandbox.dir.path().join("handoffs").join("s5");
    let entries: Vec<_> = std::fs::read_dir(&session_dir).expect("session dir").collect();
    assert_eq!(entries.len(), 1, "exactly one handoff file should exist");
    let name = entries.into_iter().next().unwrap().unwrap().file_name();
    assert!(name.to_string_lossy().ends_with("_wire-protocol.yaml"));
}

#[test]
fn auto_write_uses_auto_handoff_filename_convention() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["handoff", "write", "s6", "--auto"])
        .write_stdin("Accomplished: refactored the store.\nNext: nothing further.\n")
        .assert()
        .success()
        .stdout(contains("auto-handoff-"));
}

#[test]
fn explicit_goal_and_now_override_the_analyzer() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["handoff", "write", "s7", "--goal", "ship the release", "--now", "cut the tag"])
        .write_stdin("no recognizable markers here at all")
        .assert()
        .success()
        .stdout(contains("wrote handoff to"));
}
