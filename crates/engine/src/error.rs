// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for session-scoped caches, summary aggregation, and
//! orchestrator wiring.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("assignment store error: {0}")]
    Store(#[from] ntm_storage::StoreError),
    #[error("handoff error: {0}")]
    Handoff(#[from] ntm_handoff::HandoffError),
    #[error("tool adapter error: {0}")]
    Adapter(#[from] ntm_adapters::ToolAdapterError),
    #[error("no session prompt history for {session}")]
    NoPromptHistory { session: String },
}
