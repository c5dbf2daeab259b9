// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Cursor;

fn lines(lines: &[&str]) -> Cursor<Vec<u8>> {
    Cursor::new(lines.join("\n").into_bytes())
}

#[test]
fn malformed_lines_are_skipped() {
    let reader = lines(&["not json", r#"{"role":"user"}"#, "{broken"]);
    let summary = generate_from_transcript(reader).unwrap();
    assert!(summary.tool_calls.is_empty());
}

#[test]
fn edit_and_write_tool_calls_track_file_modifications() {
    let reader = lines(&[
        r#"{"role":"assistant","tool_calls":[{"name":"Edit","arguments":{"file_path":"src/lib.rs"}},{"name":"Write","file_path":"src/main.rs"},{"name":"Read","file_path":"README.md"}]}"#,
    ]);
    let summary = generate_from_transcript(reader).unwrap();
    assert_eq!(summary.files_modified, vec!["src/lib.rs".to_string(), "src/main.rs".to_string()]);
    assert_eq!(summary.tool_calls, vec!["Edit", "Write", "Read"]);
}

#[test]
fn only_the_last_assistant_record_is_remembered() {
    let reader = lines(&[
        r#"{"role":"assistant","content":"first pass"}"#,
        r#"{"role":"user","content":"keep going"}"#,
        r#"{"role":"assistant","content":"Done: shipped it"}"#,
    ]);
    let summary = generate_from_transcript(reader).unwrap();
    assert_eq!(summary.last_assistant_text.as_deref(), Some("Done: shipped it"));
}

#[test]
fn error_strings_are_collected() {
    let reader = lines(&[r#"{"role":"assistant","error":"connection reset"}"#]);
    let summary = generate_from_transcript(reader).unwrap();
    assert_eq!(summary.errors, vec!["connection reset".to_string()]);
}

#[test]
fn oversized_line_aborts_the_read() {
    let huge = "x".repeat(MAX_LINE_BYTES + 1);
    let reader = lines(&[&huge]);
    let err = generate_from_transcript(reader).unwrap_err();
    assert!(matches!(err, HandoffError::TranscriptLineTooLarge { .. }));
}
