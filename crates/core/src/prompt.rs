// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The PromptEntry entity: an append-only per-session log of
//! prompts sent to agents, subject to redaction on persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a prompt originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptSource {
    Cli,
    Template,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptEntry {
    pub id: String,
    pub session: String,
    pub timestamp: DateTime<Utc>,
    pub content: String,
    #[serde(default)]
    pub targets: Vec<u32>,
    pub source: PromptSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// A pure function from cleartext to redacted text. Secret redaction itself
/// is an external collaborator; this crate only defines the seam it is
/// applied through.
///
/// Whether `warn` mode should persist cleartext while merely warning, versus
/// stripping like `block` mode, is resolved in DESIGN.md: both modes strip,
/// and the distinction is purely in whether persistence continues afterward.
pub trait Redactor: Send + Sync {
    fn redact(&self, text: &str) -> String;
}

/// A redactor that performs no redaction, for callers with no policy
/// configured or for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpRedactor;

impl Redactor for NoOpRedactor {
    fn redact(&self, text: &str) -> String {
        text.to_string()
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
