// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A process-wide registry mapping tool names to type-erased adapters.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use ntm_core::{HealthStatus, ToolInfo, Version};
use parking_lot::RwLock;
use std::collections::HashSet;

use crate::adapter::{AdapterContext, ToolAdapter};
use crate::error::ToolAdapterError;

/// Object-safe facade over [`ToolAdapter`], letting heterogeneous adapters
/// share one registry despite `ToolAdapter` itself requiring `Clone` (and
/// thus being unusable as a trait object).
#[async_trait]
trait DynToolAdapter: Send + Sync {
    fn name(&self) -> &str;
    async fn info(&self, ctx: &AdapterContext) -> ToolInfo;
    async fn is_available(&self, ctx: &AdapterContext) -> bool;
    async fn version(&self, ctx: &AdapterContext) -> Result<Version, ToolAdapterError>;
    async fn capabilities(&self, ctx: &AdapterContext) -> Result<HashSet<String>, ToolAdapterError>;
    async fn health(&self, ctx: &AdapterContext) -> Result<HealthStatus, ToolAdapterError>;
}

#[async_trait]
impl<A: ToolAdapter> DynToolAdapter for A {
    fn name(&self) -> &str {
        ToolAdapter::name(self)
    }

    async fn info(&self, ctx: &AdapterContext) -> ToolInfo {
        ToolAdapter::info(self, ctx).await
    }

    async fn is_available(&self, ctx: &AdapterContext) -> bool {
        ToolAdapter::is_available(self, ctx).await
    }

    async fn version(&self, ctx: &AdapterContext) -> Result<Version, ToolAdapterError> {
        ToolAdapter::version(self, ctx).await
    }

    async fn capabilities(&self, ctx: &AdapterContext) -> Result<HashSet<String>, ToolAdapterError> {
        ToolAdapter::capabilities(self, ctx).await
    }

    async fn health(&self, ctx: &AdapterContext) -> Result<HealthStatus, ToolAdapterError> {
        ToolAdapter::health(self, ctx).await
    }
}

/// Maps tool names to adapters, resolved at registration time.
#[derive(Clone, Default)]
pub struct ToolAdapterRegistry {
    adapters: Arc<RwLock<HashMap<String, Arc<dyn DynToolAdapter>>>>,
}

impl ToolAdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<A: ToolAdapter>(&self, adapter: A) {
        let name = adapter.name().to_string();
        self.adapters.write().insert(name, Arc::new(adapter));
    }

    pub fn names(&self) -> Vec<String> {
        self.adapters.read().keys().cloned().collect()
    }

    pub async fn info(&self, tool: &str, ctx: &AdapterContext) -> Option<ToolInfo> {
        let adapter = self.adapters.read().get(tool).cloned()?;
        Some(adapter.info(ctx).await)
    }

    pub async fn is_available(&self, tool: &str, ctx: &AdapterContext) -> bool {
        match self.adapters.read().get(tool).cloned() {
            Some(adapter) => adapter.is_available(ctx).await,
            None => false,
        }
    }

    pub async fn version(&self, tool: &str, ctx: &AdapterContext) -> Result<Version, ToolAdapterError> {
        let adapter = self.adapters.read().get(tool).cloned().ok_or_else(|| {
            ToolAdapterError::NotInstalled { tool: tool.to_string() }
        })?;
        adapter.version(ctx).await
    }

    pub async fn capabilities(
        &self,
        tool: &str,
        ctx: &AdapterContext,
    ) -> Result<HashSet<String>, ToolAdapterError> {
        let adapter = self.adapters.read().get(tool).cloned().ok_or_else(|| {
            ToolAdapterError::NotInstalled { tool: tool.to_string() }
        })?;
        adapter.capabilities(ctx).await
    }

    pub async fn health(&self, tool: &str, ctx: &AdapterContext) -> Result<HealthStatus, ToolAdapterError> {
        let adapter = self.adapters.read().get(tool).cloned().ok_or_else(|| {
            ToolAdapterError::NotInstalled { tool: tool.to_string() }
        })?;
        adapter.health(ctx).await
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
