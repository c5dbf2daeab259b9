// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handoff validation: "a handoff is only written if its
//! validation yields zero errors; a handoff with empty `goal` or `now`
//! cannot be persisted."
//!
//! Testable property: `H passed validation ⇔ H.goal ≠ "" ∧
//! H.now ≠ "" ∧ H.session matches /^[A-Za-z0-9_-]+$/ ∧ (H.reservation_transfer
//! == null ∨ all its reservations have non-empty path_pattern and positive
//! ttl_seconds if set)`.

use std::sync::LazyLock;

use ntm_core::Handoff;
use regex::Regex;

use crate::error::HandoffError;

static SESSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9_-]+$").expect("constant regex pattern is valid")
});

/// Validates `handoff`, collecting every violated invariant into a single
/// error rather than failing on the first one, so a caller fixing up a
/// handoff sees the full list at once.
pub fn validate(handoff: &Handoff) -> Result<(), HandoffError> {
    let mut problems = Vec::new();

    if handoff.goal.is_empty() {
        problems.push("goal must not be empty".to_string());
    }
    if handoff.now.is_empty() {
        problems.push("now must not be empty".to_string());
    }
    if !SESSION_RE.is_match(&handoff.session) {
        problems.push(format!("session {:?} must match ^[A-Za-z0-9_-]+$", handoff.session));
    }
    if let Some(transfer) = &handoff.reservation_transfer {
        if transfer.reservations.is_empty() {
            problems.push("reservation_transfer must carry at least one reservation".to_string());
        }
        for (i, reservation) in transfer.reservations.iter().enumerate() {
            if reservation.path_pattern.is_empty() {
                problems.push(format!("reservation_transfer.reservations[{i}].path_pattern must not be empty"));
            }
        }
        if transfer.ttl_seconds == 0 {
            problems.push("reservation_transfer.ttl_seconds must be positive".to_string());
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(HandoffError::ValidationFailed(problems.join("; ")))
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
