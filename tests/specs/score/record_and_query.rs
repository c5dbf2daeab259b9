//! `ntm score record` followed by `ntm score query`: the recorded score
//! appears exactly once with `overall` computed.

use predicates::str::contains;

use crate::prelude::Sandbox;

#[test]
fn record_then_query_round_trips_with_computed_overall() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args([
            "score",
            "record",
            "s1",
            "--agent-type",
            "claude",
            "--completion",
            "0.8",
            "--quality",
            "0.6",
            "--efficiency",
            "0.4",
        ])
        .assert()
        .success()
        .stdout(contains("recorded score overall=0.580"));

    sandbox
        .cmd()
        .args(["score", "query", "--session", "s1"])
        .assert()
        .success()
        .stdout(contains("s1"))
        .stdout(contains("claude"));
}

#[test]
fn zero_metrics_default_quality_and_efficiency_to_completion() {
    let sandbox = Sandbox::new();

    // Only completion is set; quality/efficiency default to it per spec.md §4.6,
    // so overall == completion exactly.
    sandbox
        .cmd()
        .args(["score", "record", "s2", "--agent-type", "codex", "--completion", "0.9"])
        .assert()
        .success()
        .stdout(contains("recorded score overall=0.900"));
}
