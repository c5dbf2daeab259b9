// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `ToolAdapter` contract: a uniform, cached,
//! timeout-bounded boundary to an external collaborator process.
//!
//! This generalizes a pair of narrower `AgentAdapter`/`NotifyAdapter` traits:
//! same `Clone + Send + Sync + 'static` bound and per-call `thiserror` error
//! enum, but one shape that every external tool (issue graph, issue tracker,
//! mail bus, command guard) implements instead of one trait per tool family.

use std::collections::HashSet;

use async_trait::async_trait;
use ntm_core::{HealthStatus, ToolInfo, Version};

use crate::error::ToolAdapterError;

/// Context threaded through every adapter call: a cancellation-aware
/// deadline every operation accepts.
#[derive(Debug, Clone, Copy)]
pub struct AdapterContext {
    pub timeout: std::time::Duration,
}

impl Default for AdapterContext {
    fn default() -> Self {
        Self { timeout: crate::exec::DEFAULT_TIMEOUT }
    }
}

impl AdapterContext {
    pub fn with_timeout(timeout: std::time::Duration) -> Self {
        Self { timeout }
    }
}

/// Uniform adapter contract over an external collaborator tool.
#[async_trait]
pub trait ToolAdapter: Clone + Send + Sync + 'static {
    /// Stable name used as the registry key and in error messages.
    fn name(&self) -> &str;

    /// Minimum version this adapter is compatible with, if any.
    fn min_version(&self) -> Option<Version> {
        None
    }

    /// Locates the tool binary on PATH, reporting whether it is installed.
    async fn detect(&self) -> (Option<String>, bool);

    /// Probes the installed version.
    async fn version(&self, ctx: &AdapterContext) -> Result<Version, ToolAdapterError>;

    /// Probes the capability set. Capabilities are an open set of strings
    /// — unknown capabilities round-trip verbatim.
    async fn capabilities(&self, ctx: &AdapterContext) -> Result<HashSet<String>, ToolAdapterError>;

    /// Probes liveness/health beyond mere installation.
    async fn health(&self, ctx: &AdapterContext) -> Result<HealthStatus, ToolAdapterError>;

    /// Convenience check over `capabilities`.
    async fn has_capability(&self, ctx: &AdapterContext, cap: &str) -> bool {
        self.capabilities(ctx)
            .await
            .map(|caps| caps.contains(cap))
            .unwrap_or(false)
    }

    /// Composes `detect`/`version`/`capabilities`/`health` into one snapshot.
    /// The default implementation composes the other methods; adapters with
    /// a cheaper combined probe can override it.
    async fn info(&self, ctx: &AdapterContext) -> ToolInfo {
        let (path, installed) = self.detect().await;
        if !installed {
            return ToolInfo {
                name: self.name().to_string(),
                installed: false,
                version: None,
                capabilities: HashSet::new(),
                binary_path: path,
                health: None,
            };
        }
        let version = self.version(ctx).await.ok();
        let capabilities = self.capabilities(ctx).await.unwrap_or_default();
        let health = self.health(ctx).await.ok();
        ToolInfo {
            name: self.name().to_string(),
            installed,
            version,
            capabilities,
            binary_path: path,
            health,
        }
    }

    /// `IsAvailable ⇔ (Detect installed ∧ version.AtLeast(minVersion))`
    /// testable property.
    async fn is_available(&self, ctx: &AdapterContext) -> bool {
        let (_, installed) = self.detect().await;
        if !installed {
            return false;
        }
        match self.min_version() {
            None => true,
            Some(min) => self
                .version(ctx)
                .await
                .map(|v| v.at_least(&min))
                .unwrap_or(false),
        }
    }
}

/// Computes health from an availability snapshot the way adapters without a
/// richer liveness probe do: installed + compatible = healthy, installed but
/// incompatible = degraded, not installed = unreachable.
pub fn health_from_availability(installed: bool, compatible: bool) -> HealthStatus {
    match (installed, compatible) {
        (true, true) => HealthStatus::Healthy,
        (true, false) => HealthStatus::Degraded,
        (false, _) => HealthStatus::Unreachable,
    }
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;
