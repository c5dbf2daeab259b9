// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter over the external issue-graph tool (`bv`), invoked as
//! `bv --robot-*` from a working directory.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use ntm_core::{HealthStatus, Version};
use serde::Deserialize;
use tokio::process::Command;

use crate::adapter::{health_from_availability, AdapterContext, ToolAdapter};
use crate::error::ToolAdapterError;
use crate::exec::{run_bounded, DEFAULT_OUTPUT_LIMIT};

const TOOL: &str = "bv";

/// A ranked recommendation within a [`Triage`] response.
#[derive(Debug, Clone, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub breakdown: Option<Breakdown>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Breakdown {
    #[serde(default)]
    pub pagerank: Option<f64>,
    #[serde(default)]
    pub betweenness: Option<f64>,
    #[serde(default)]
    pub blocker_ratio: Option<f64>,
    #[serde(default)]
    pub priority_boost: Option<f64>,
}

/// `bv --robot-triage`'s parsed response shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Triage {
    pub quick_ref: serde_json::Value,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub quick_wins: Vec<String>,
    #[serde(default)]
    pub blockers_to_clear: Vec<String>,
    #[serde(default)]
    pub project_health: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct TriageEnvelope {
    triage: Triage,
}

/// Adapter over `bv`.
#[derive(Clone)]
pub struct IssueGraphAdapter {
    binary: String,
    cwd: PathBuf,
}

impl IssueGraphAdapter {
    pub fn new(cwd: PathBuf) -> Self {
        Self { binary: TOOL.to_string(), cwd }
    }

    async fn robot(&self, ctx: &AdapterContext, flag: &str) -> Result<serde_json::Value, ToolAdapterError> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(flag).current_dir(&self.cwd);
        let output = run_bounded(TOOL, cmd, ctx.timeout, DEFAULT_OUTPUT_LIMIT).await?;
        let text = output.stdout_str();
        serde_json::from_str(&text).map_err(|e| ToolAdapterError::SchemaValidation {
            tool: TOOL.to_string(),
            detail: e.to_string(),
        })
    }

    /// `bv --robot-triage`: ranked actionable work.
    pub async fn triage(&self, ctx: &AdapterContext) -> Result<Triage, ToolAdapterError> {
        let value = self.robot(ctx, "--robot-triage").await?;
        let envelope: TriageEnvelope =
            serde_json::from_value(value).map_err(|e| ToolAdapterError::SchemaValidation {
                tool: TOOL.to_string(),
                detail: e.to_string(),
            })?;
        Ok(envelope.triage)
    }

    /// `bv --robot-plan`.
    pub async fn plan(&self, ctx: &AdapterContext) -> Result<serde_json::Value, ToolAdapterError> {
        self.robot(ctx, "--robot-plan").await
    }

    /// `bv --robot-insights`.
    pub async fn insights(&self, ctx: &AdapterContext) -> Result<serde_json::Value, ToolAdapterError> {
        self.robot(ctx, "--robot-insights").await
    }

    /// `bv --robot-next`.
    pub async fn next(&self, ctx: &AdapterContext) -> Result<serde_json::Value, ToolAdapterError> {
        self.robot(ctx, "--robot-next").await
    }
}

#[async_trait]
impl ToolAdapter for IssueGraphAdapter {
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
        Ok(HashSet::from(["triage".to_string(), "plan".to_string(), "insights".to_string()]))
    }

    async fn health(&self, ctx: &AdapterContext) -> Result<HealthStatus, ToolAdapterError> {
        let (_, installed) = self.detect().await;
        let compatible = self.version(ctx).await.is_ok();
        Ok(health_from_availability(installed, compatible))
    }
}

/// Minimal PATH lookup, avoiding a dependency on the `which` crate for one
/// call site. Shared with the other subprocess-backed adapters.
pub(crate) fn which_binary(binary: &str) -> Option<String> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var).find_map(|dir| {
        let candidate = dir.join(binary);
        candidate.is_file().then(|| candidate.to_string_lossy().into_owned())
    })
}

#[cfg(test)]
#[path = "issue_graph_tests.rs"]
mod tests;
