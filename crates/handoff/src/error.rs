// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Handoff subsystem's error taxonomy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("handoff failed validation: {0}")]
    ValidationFailed(String),
    #[error("transcript line exceeded the {limit_bytes}-byte cap")]
    TranscriptLineTooLarge { limit_bytes: usize },
    #[error("path {path} escapes the handoff base directory")]
    PathEscape { path: String },
    #[error("failed to persist handoff: {0}")]
    Persistence(#[from] std::io::Error),
    #[error("failed to serialize handoff to YAML: {0}")]
    Serialize(#[from] serde_yaml::Error),
}
