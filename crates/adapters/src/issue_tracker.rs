// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter over the issue-tracker CLI (`bd`/`br`), invoked with `--json`
//! appended to whatever subcommand arguments the caller supplies.

use std::collections::HashSet;

use async_trait::async_trait;
use ntm_core::{HealthStatus, Version};
use serde::Deserialize;
use tokio::process::Command;

use crate::adapter::{health_from_availability, AdapterContext, ToolAdapter};
use crate::error::ToolAdapterError;
use crate::exec::{run_bounded, DEFAULT_OUTPUT_LIMIT};

/// One tracked issue, `{id, title, priority,
/// dependency_count, assignee, …}` shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub dependency_count: u32,
    #[serde(default)]
    pub assignee: Option<String>,
}

/// Adapter over `bd` (falling back to `br`, the same binary family under a
/// different alias some installs use).
#[derive(Clone)]
pub struct IssueTrackerAdapter {
    binary: String,
}

impl IssueTrackerAdapter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }

    pub fn bd() -> Self {
        Self::new("bd")
    }

    pub fn br() -> Self {
        Self::new("br")
    }

    pub async fn list(&self, ctx: &AdapterContext, args: &[&str]) -> Result<Vec<Issue>, ToolAdapterError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args).arg("--json");
        let output = run_bounded(&self.binary, cmd, ctx.timeout, DEFAULT_OUTPUT_LIMIT).await?;
        let text = output.stdout_str();
        if serde_json::from_str::<serde_json::Value>(&text).is_err() {
            return Err(ToolAdapterError::SchemaValidation {
                tool: self.binary.clone(),
                detail: "output was not valid JSON".to_string(),
            });
        }
        serde_json::from_str(&text).map_err(|e| ToolAdapterError::SchemaValidation {
            tool: self.binary.clone(),
            detail: e.to_string(),
        })
    }
}

#[async_trait]
impl ToolAdapter for IssueTrackerAdapter {
    fn name(&self) -> &str {
        &self.binary
    }

    async fn detect(&self) -> (Option<String>, bool) {
        match crate::issue_graph::which_binary(&self.binary) {
            Some(path) => (Some(path), true),
            None => (None, false),
        }
    }

    async fn version(&self, ctx: &AdapterContext) -> Result<Version, ToolAdapterError> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--version");
        let output = run_bounded(&self.binary, cmd, ctx.timeout, DEFAULT_OUTPUT_LIMIT).await?;
        Ok(Version::parse(&output.stdout_str()))
    }

    async fn capabilities(&self, _ctx: &AdapterContext) -> Result<HashSet<String>, ToolAdapterError> {
        Ok(HashSet::from(["list".to_string(), "json".to_string()]))
    }

    async fn health(&self, ctx: &AdapterContext) -> Result<HealthStatus, ToolAdapterError> {
        let (_, installed) = self.detect().await;
        let compatible = self.version(ctx).await.is_ok();
        Ok(health_from_availability(installed, compatible))
    }
}

#[cfg(test)]
#[path = "issue_tracker_tests.rs"]
mod tests;
