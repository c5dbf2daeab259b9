// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `GenerateFromTranscript`'s line-delimited JSON walk: skip unparseable
//! lines, extract tool-call blocks, track file mutations from Edit/Write,
//! remember the last assistant message, same shape generalized from a
//! single assistant's specific JSONL schema to a generic
//! `{"role": ..., "tool_calls": [...], "error": ...}` transcript contract,
//! with an additional 10 MiB max-line-size guard.

use std::collections::BTreeSet;
use std::io::BufRead;

use serde_json::Value;

use crate::error::HandoffError;

/// Maximum size of a single transcript line.
pub const MAX_LINE_BYTES: usize = 10 * 1024 * 1024;

/// Everything extracted from a transcript stream that the generator needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptSummary {
    pub tool_calls: Vec<String>,
    /// File paths touched by an `Edit` or `Write` tool call, deduplicated
    /// and sorted.
    pub files_modified: Vec<String>,
    /// The last record with `role == "assistant"`, kept verbatim for later
    /// `analyze_output` passes.
    pub last_assistant_text: Option<String>,
    pub errors: Vec<String>,
}

/// Walks a line-delimited JSON transcript, tolerating malformed lines by
/// skipping them. Aborts with [`HandoffError::TranscriptLineTooLarge`]
/// the moment a line exceeds [`MAX_LINE_BYTES`].
pub fn generate_from_transcript<R: BufRead>(reader: R) -> Result<TranscriptSummary, HandoffError> {
    let mut tool_calls = Vec::new();
    let mut files_modified = BTreeSet::new();
    let mut last_assistant_text = None;
    let mut errors = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.len() > MAX_LINE_BYTES {
            return Err(HandoffError::TranscriptLineTooLarge { limit_bytes: MAX_LINE_BYTES });
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record: Value = match serde_json::from_str(trimmed) {
            Ok(v) => v,
            Err(_) => continue,
        };
        extract_record(&record, &mut tool_calls, &mut files_modified, &mut last_assistant_text, &mut errors);
    }

    Ok(TranscriptSummary {
        tool_calls,
        files_modified: files_modified.into_iter().collect(),
        last_assistant_text,
        errors,
    })
}

fn extract_record(
    record: &Value,
    tool_calls: &mut Vec<String>,
    files_modified: &mut BTreeSet<String>,
    last_assistant_text: &mut Option<String>,
    errors: &mut Vec<String>,
) {
    if let Some(error) = record.get("error").and_then(Value::as_str) {
        errors.push(error.to_string());
    }

    let role = record.get("role").and_then(Value::as_str).unwrap_or("");

    if let Some(calls) = record.get("tool_calls").and_then(Value::as_array) {
        for call in calls {
            let Some(name) = call.get("name").and_then(Value::as_str) else {
                continue;
            };
            tool_calls.push(name.to_string());
            if matches!(name, "Edit" | "Write") {
                if let Some(path) = tool_call_file_path(call) {
                    files_modified.insert(path);
                }
            }
        }
    }

    if role == "assistant" {
        if let Some(content) = record.get("content").and_then(Value::as_str) {
            *last_assistant_text = Some(content.to_string());
        }
    }
}

/// A tool call's target path may be given directly as `file_path`, or
/// nested under `arguments.file_path`.
fn tool_call_file_path(call: &Value) -> Option<String> {
    call.get("file_path")
        .and_then(Value::as_str)
        .or_else(|| call.get("arguments").and_then(|a| a.get("file_path")).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
#[path = "transcript_tests.rs"]
mod tests;
