//! End-to-end scenario 4 (spec.md §8): an ascending run of completion
//! scores classifies as `improving`.

use predicates::str::contains;

use crate::prelude::Sandbox;

#[test]
fn ascending_scores_classify_as_improving() {
    let sandbox = Sandbox::new();

    for completion in ["0.5", "0.55", "0.6", "0.7", "0.75", "0.8"] {
        sandbox
            .cmd()
            .args(["score", "record", "s3", "--agent-type", "claude", "--completion", completion])
            .assert()
            .success();
    }

    sandbox
        .cmd()
        .args(["score", "trend", "--agent-type", "claude", "--window-days", "30"])
        .assert()
        .success()
        .stdout(contains("trend=Improving"));
}

#[test]
fn effectiveness_reports_insufficient_data_below_three_samples() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["score", "record", "s4", "--agent-type", "gemini", "--completion", "0.9"])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["score", "effectiveness", "--agent-type", "gemini"])
        .assert()
        .success()
        .stdout(contains("insufficient data (1 samples, need 3)"));
}
