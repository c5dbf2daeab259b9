// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The uniform error taxonomy every adapter signals through.
//!
//! Each adapter gets its own error enum below rather than sharing one type —
//! the kinds are a conceptual taxonomy, not a shared type — but every one of
//! them carries the same conceptual shape: `NotInstalled`, `Timeout`,
//! `OutputLimitExceeded`, `SchemaValidation`.

use thiserror::Error;

/// Errors common to every `ToolAdapter` invocation.
#[derive(Debug, Error)]
pub enum ToolAdapterError {
    #[error("{tool} not installed on PATH")]
    NotInstalled { tool: String },
    #[error("{tool} timed out after {timeout_secs}s")]
    Timeout { tool: String, timeout_secs: u64 },
    #[error("{tool} produced more than {limit_bytes} bytes of output")]
    OutputLimitExceeded { tool: String, limit_bytes: usize },
    #[error("{tool} output failed schema validation: {detail}")]
    SchemaValidation { tool: String, detail: String },
    #[error("{tool} exec failed: {source}")]
    Exec { tool: String, source: std::io::Error },
}

impl ToolAdapterError {
    pub fn tool(&self) -> &str {
        match self {
            ToolAdapterError::NotInstalled { tool }
            | ToolAdapterError::Timeout { tool, .. }
            | ToolAdapterError::OutputLimitExceeded { tool, .. }
            | ToolAdapterError::SchemaValidation { tool, .. }
            | ToolAdapterError::Exec { tool, .. } => tool,
        }
    }
}
