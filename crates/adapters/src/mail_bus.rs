// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mail bus adapter: fetches inbox messages, file reservations, and thread
//! summaries from the mail broker.
//!
//! Modeled as a trait (so callers can swap a fake in tests) plus a
//! subprocess-backed default implementation, following the same
//! exec-and-parse-stdout shape as [`crate::issue_graph::IssueGraphAdapter`].

use async_trait::async_trait;
use ntm_core::FileReservation;
use serde::Deserialize;
use tokio::process::Command;

use crate::adapter::AdapterContext;
use crate::error::ToolAdapterError;
use crate::exec::{run_bounded, DEFAULT_OUTPUT_LIMIT};
use crate::issue_graph::which_binary;

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub id: String,
    pub from: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchInboxOptions {
    #[serde(default)]
    pub unread_only: bool,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadSummary {
    pub thread_id: String,
    pub summary: String,
    #[serde(default)]
    pub message_count: u32,
}

/// Object interface over the mail bus. The mail broker itself is an
/// external collaborator; this crate only defines the seam.
#[async_trait]
pub trait MailBusAdapter: Send + Sync {
    async fn is_available(&self) -> bool;

    async fn fetch_inbox(
        &self,
        ctx: &AdapterContext,
        opts: &FetchInboxOptions,
    ) -> Result<Vec<Message>, ToolAdapterError>;

    async fn list_reservations(
        &self,
        ctx: &AdapterContext,
        project: &str,
        agent: &str,
        include_expired: bool,
    ) -> Result<Vec<FileReservation>, ToolAdapterError>;

    async fn summarize_thread(
        &self,
        ctx: &AdapterContext,
        project: &str,
        thread_id: &str,
        use_cache: bool,
    ) -> Result<ThreadSummary, ToolAdapterError>;
}

/// Subprocess-backed mail bus client.
#[derive(Clone)]
pub struct SubprocessMailBusAdapter {
    binary: String,
}

impl SubprocessMailBusAdapter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }

    async fn run_json(&self, ctx: &AdapterContext, args: &[String]) -> Result<serde_json::Value, ToolAdapterError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args);
        let output = run_bounded(&self.binary, cmd, ctx.timeout, DEFAULT_OUTPUT_LIMIT).await?;
        let text = output.stdout_str();
        serde_json::from_str(&text).map_err(|e| ToolAdapterError::SchemaValidation {
            tool: self.binary.clone(),
            detail: e.to_string(),
        })
    }
}

#[async_trait]
impl MailBusAdapter for SubprocessMailBusAdapter {
    async fn is_available(&self) -> bool {
        which_binary(&self.binary).is_some()
    }

    async fn fetch_inbox(
        &self,
        ctx: &AdapterContext,
        opts: &FetchInboxOptions,
    ) -> Result<Vec<Message>, ToolAdapterError> {
        let mut args = vec!["inbox".to_string(), "--json".to_string()];
        if opts.unread_only {
            args.push("--unread-only".to_string());
        }
        if let Some(limit) = opts.limit {
            args.push(format!("--limit={limit}"));
        }
        let value = self.run_json(ctx, &args).await?;
        serde_json::from_value(value).map_err(|e| ToolAdapterError::SchemaValidation {
            tool: self.binary.clone(),
            detail: e.to_string(),
        })
    }

    async fn list_reservations(
        &self,
        ctx: &AdapterContext,
        project: &str,
        agent: &str,
        include_expired: bool,
    ) -> Result<Vec<FileReservation>, ToolAdapterError> {
        let mut args = vec![
            "reservations".to_string(),
            "--json".to_string(),
            format!("--project={project}"),
            format!("--agent={agent}"),
        ];
        if include_expired {
            args.push("--include-expired".to_string());
        }
        let value = self.run_json(ctx, &args).await?;
        serde_json::from_value(value).map_err(|e| ToolAdapterError::SchemaValidation {
            tool: self.binary.clone(),
            detail: e.to_string(),
        })
    }

    async fn summarize_thread(
        &self,
        ctx: &AdapterContext,
        project: &str,
        thread_id: &str,
        use_cache: bool,
    ) -> Result<ThreadSummary, ToolAdapterError> {
        let mut args = vec![
            "thread-summary".to_string(),
            "--json".to_string(),
            format!("--project={project}"),
            format!("--thread={thread_id}"),
        ];
        if !use_cache {
            args.push("--no-cache".to_string());
        }
        let value = self.run_json(ctx, &args).await?;
        serde_json::from_value(value).map_err(|e| ToolAdapterError::SchemaValidation {
            tool: self.binary.clone(),
            detail: e.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "mail_bus_tests.rs"]
mod tests;
