// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Assignment Store's error taxonomy.

use ntm_core::AssignmentStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("bead {bead_id} not found")]
    NotFound { bead_id: String },
    #[error("cannot transition bead {bead_id} from {from} to {to}")]
    InvalidTransition {
        bead_id: String,
        from: AssignmentStatus,
        to: AssignmentStatus,
    },
    #[error("failed to persist assignment store: {0}")]
    Persistence(#[from] std::io::Error),
}
