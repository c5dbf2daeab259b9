// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn first_accomplishment_pattern_wins() {
    let text = "Some preamble.\nDone: shipped the login fix\nSuccessfully refactored auth too";
    let analysis = analyze_output(text);
    assert_eq!(analysis.accomplishment.as_deref(), Some("shipped the login fix"));
}

#[test]
fn checkmark_prefix_is_recognized() {
    let analysis = analyze_output("✓ wired up the webhook handler");
    assert_eq!(analysis.accomplishment.as_deref(), Some("wired up the webhook handler"));
}

#[test]
fn next_step_extracts_first_match() {
    let analysis = analyze_output("Done: fixed bug\nNext: write regression tests");
    assert_eq!(analysis.next_step.as_deref(), Some("write regression tests"));
}

#[test]
fn blockers_are_collected_in_order_and_capped_at_five() {
    let text = "Error: disk full\nFailed: migration\nBlocked by: review\nCannot proceed: missing key\nUnable to: reach host\nError: sixth one";
    let analysis = analyze_output(text);
    assert_eq!(analysis.blockers.len(), 5);
    assert_eq!(analysis.blockers[0], "disk full");
    assert_eq!(analysis.blockers[4], "reach host");
}

#[test]
fn no_blockers_present_yields_empty_vec() {
    let analysis = analyze_output("Done: everything went fine");
    assert!(analysis.blockers.is_empty());
}

#[test]
fn decision_pairs_are_truncated_and_capped() {
    let what = "a".repeat(60);
    let why = "b".repeat(80);
    let text = format!("Decided to {what} because {why}");
    let analysis = analyze_output(&text);
    assert_eq!(analysis.decisions.len(), 1);
    let (k, v) = analysis.decisions.iter().next().unwrap();
    assert_eq!(k.len(), 30);
    assert_eq!(v.len(), 50);
}

#[test]
fn decision_alternate_phrasing_is_recognized() {
    let analysis = analyze_output("Decision: use JWT - simpler than sessions");
    assert_eq!(analysis.decisions.get("use JWT"), Some(&"simpler than sessions".to_string()));
}

#[test]
fn empty_text_yields_empty_analysis() {
    assert_eq!(analyze_output(""), Analysis::default());
}
