// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The FileReservation entity: a read-only input to the handoff
//! generator, sourced from the mail bus adapter. Never constructed or
//! persisted by this workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReservation {
    pub path_pattern: String,
    pub exclusive: bool,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl FileReservation {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }
}

#[cfg(test)]
#[path = "reservation_tests.rs"]
mod tests;
