// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn unwrap_rch_extracts_inner_command() {
    assert_eq!(unwrap_rch("rch build cargo -- cargo build"), Some("cargo build"));
    assert_eq!(unwrap_rch("rch intercept -- rm -rf /tmp/x"), Some("rm -rf /tmp/x"));
    assert_eq!(unwrap_rch("rch offload gcc main.c"), Some("gcc main.c"));
}

#[test]
fn unwrap_rch_does_not_treat_embedded_dashes_as_the_separator() {
    assert_eq!(unwrap_rch("rch build cargo build --release"), Some("cargo build --release"));
    assert_eq!(unwrap_rch("rch build cargo -- cargo build --release"), Some("cargo build --release"));
}

#[test]
fn unwrap_rch_ignores_non_rch_commands() {
    assert_eq!(unwrap_rch("cargo build"), None);
    assert_eq!(unwrap_rch("rchmod +x foo"), None);
}

#[test]
fn infer_severity_for_recursive_delete_root() {
    let (severity, rule) = infer_severity_and_rule("rm -rf /", true);
    assert_eq!(severity, Severity::Critical);
    assert_eq!(rule, "RECURSIVE_DELETE_ROOT");
}

#[test]
fn infer_severity_for_generic_block_falls_back_to_medium() {
    let (severity, rule) = infer_severity_and_rule("some-weird-destructive-thing", true);
    assert_eq!(severity, Severity::Medium);
    assert_eq!(rule, "BLOCKED_COMMAND");
}

#[test]
fn infer_severity_for_allowed_command_is_safe() {
    let (severity, rule) = infer_severity_and_rule("ls -la", false);
    assert_eq!(severity, Severity::Safe);
    assert_eq!(rule, "ALLOWED");
}

#[test]
fn adapter_name_is_dcg() {
    let adapter = DestructiveCommandGuardAdapter::new(std::path::PathBuf::from("."));
    assert_eq!(ToolAdapter::name(&adapter), "dcg");
}
