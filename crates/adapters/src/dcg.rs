// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter over the destructive-command guard (`dcg check --json ...`),
//! the representative adapter with a non-trivial pre-processing step
//! before the uniform `ToolAdapter` boundary is even reached.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use ntm_core::{HealthStatus, Version};
use serde::Deserialize;
use tokio::process::Command;

use crate::adapter::{health_from_availability, AdapterContext, ToolAdapter};
use crate::error::ToolAdapterError;
use crate::exec::{run_bounded, DEFAULT_OUTPUT_LIMIT};
use crate::issue_graph::which_binary;

const TOOL: &str = "dcg";

/// Severity the guard assigns a blocked command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Safe,
}

impl Severity {
    fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Safe => "safe",
        }
    }
}

/// Result of checking one command against the guard.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardResult {
    pub blocked: bool,
    pub severity: Severity,
    pub rule: String,
}

#[derive(Debug, Default, Deserialize)]
struct GuardJson {
    #[serde(default)]
    severity: Option<Severity>,
    #[serde(default)]
    rule: Option<String>,
}

/// Adapter over `dcg`.
#[derive(Clone)]
pub struct DestructiveCommandGuardAdapter {
    binary: String,
    cwd: PathBuf,
}

impl DestructiveCommandGuardAdapter {
    pub fn new(cwd: PathBuf) -> Self {
        Self { binary: TOOL.to_string(), cwd }
    }

    /// Checks `command`, unwrapping the remote-compilation helper's outer
    /// invocation first: `rch build|intercept|
    /// offload [--] <tool> <args...>` is checked as its *inner* command, not
    /// the outer `rch` invocation.
    pub async fn check_command(
        &self,
        ctx: &AdapterContext,
        command: &str,
        context: Option<&str>,
        cwd: Option<&str>,
    ) -> Result<GuardResult, ToolAdapterError> {
        let inner = unwrap_rch(command).unwrap_or(command);

        let mut cmd = Command::new(&self.binary);
        cmd.arg("check").arg("--json");
        if let Some(context) = context {
            cmd.arg("--context").arg(context);
        }
        if let Some(cwd) = cwd {
            cmd.arg("--cwd").arg(cwd);
        }
        cmd.arg(inner).current_dir(&self.cwd);

        let output = run_bounded(TOOL, cmd, ctx.timeout, DEFAULT_OUTPUT_LIMIT).await?;
        let blocked = !output.success();
        let text = output.stdout_str();
        let parsed: GuardJson = if text.trim().is_empty() {
            GuardJson::default()
        } else if serde_json::from_str::<serde_json::Value>(&text).is_ok() {
            serde_json::from_str(&text).unwrap_or_default()
        } else {
            GuardJson::default()
        };

        let (severity, rule) = match (parsed.severity, parsed.rule) {
            (Some(severity), Some(rule)) => (severity, rule),
            _ => infer_severity_and_rule(inner, blocked),
        };

        Ok(GuardResult { blocked, severity, rule })
    }
}

/// Extracts the inner command from an `rch build|intercept|offload [<tool>
/// --] <command...>` invocation, or `None` if `command` isn't one. The
/// explicit-tool-plus-separator clause is all-or-nothing: when a standalone
/// `--` token is present, everything before it (the subcommand's optional
/// tool argument) is discarded and the inner command is whatever follows;
/// with no separator token the remainder is already the inner command. The
/// separator must be its own whitespace-delimited token — a `--` embedded in
/// a flag like `--release` is part of the inner command, not the marker.
fn unwrap_rch(command: &str) -> Option<&str> {
    let rest = command.trim().strip_prefix("rch")?;
    let rest = rest.trim_start();
    let rest = ["build", "intercept", "offload"]
        .iter()
        .find_map(|sub| rest.strip_prefix(sub))?;
    let rest = rest.trim_start();
    let rest = match standalone_separator_split(rest) {
        Some(after) => after,
        None => rest,
    };
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Finds a standalone `--` token (a whole whitespace-delimited word, not a
/// substring of a longer flag) in `s` and returns everything after it,
/// trimmed, or `None` if no such token exists.
fn standalone_separator_split(s: &str) -> Option<&str> {
    let mut idx = 0;
    while idx < s.len() {
        let ws_len: usize = s[idx..].chars().take_while(|c| c.is_whitespace()).map(char::len_utf8).sum();
        idx += ws_len;
        let token_start = idx;
        let token_len: usize = s[idx..].chars().take_while(|c| !c.is_whitespace()).map(char::len_utf8).sum();
        if token_len == 0 {
            break;
        }
        if &s[token_start..token_start + token_len] == "--" {
            return Some(s[token_start + token_len..].trim_start());
        }
        idx = token_start + token_len;
    }
    None
}

/// Infers severity and rule code from the command text when the guard's
/// JSON body omits them.
fn infer_severity_and_rule(command: &str, blocked: bool) -> (Severity, String) {
    if !blocked {
        return (Severity::Safe, "ALLOWED".to_string());
    }
    let normalized: String = command.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.contains("rm -rf /") || normalized.contains("rm -fr /") {
        return (Severity::Critical, "RECURSIVE_DELETE_ROOT".to_string());
    }
    if normalized.starts_with("rm -rf") || normalized.starts_with("rm -fr") {
        return (Severity::High, "RECURSIVE_DELETE".to_string());
    }
    if normalized.contains("git push --force") || normalized.contains("git push -f") {
        return (Severity::High, "FORCE_PUSH".to_string());
    }
    if normalized.contains("git reset --hard") {
        return (Severity::Medium, "HARD_RESET".to_string());
    }
    (Severity::Medium, "BLOCKED_COMMAND".to_string())
}

#[async_trait]
impl ToolAdapter for DestructiveCommandGuardAdapter {
    fn name(&self) -> &str {
        TOOL
    }

    async fn detect(&self) -> (Option<String>, bool) {
        match which_binary(&self.binary) {
            Some(path) => (Some(path), true),
            None => (None, false),
        }
    }

    async fn version(&self, ctx: &AdapterContext) -> Result<Version, ToolAdapterError> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--version");
        let output = run_bounded(TOOL, cmd, ctx.timeout, DEFAULT_OUTPUT_LIMIT).await?;
        Ok(Version::parse(&output.stdout_str()))
    }

    async fn capabilities(&self, _ctx: &AdapterContext) -> Result<HashSet<String>, ToolAdapterError> {
        Ok(HashSet::from(["check".to_string()]))
    }

    async fn health(&self, ctx: &AdapterContext) -> Result<HealthStatus, ToolAdapterError> {
        let (_, installed) = self.detect().await;
        let compatible = self.version(ctx).await.is_ok();
        Ok(health_from_availability(installed, compatible))
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[path = "dcg_tests.rs"]
mod tests;
