// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Score entity: one append-only effectiveness record.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::AgentType;

/// The graded metrics attached to a [`Score`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub completion: f64,
    #[serde(default)]
    pub quality: f64,
    #[serde(default)]
    pub efficiency: f64,
    #[serde(default)]
    pub prompts: f64,
    #[serde(default)]
    pub tokens: f64,
    #[serde(default)]
    pub duration_secs: f64,
    #[serde(default)]
    pub errors: f64,
    #[serde(default)]
    pub overall: f64,
}

impl Metrics {
    /// Returns `overall` as recorded, or derives it from `completion`,
    /// `quality`, and `efficiency` when it is zero — falling `quality` and
    /// `efficiency` back to `completion` when they too are zero.
    pub fn computed_overall(&self) -> f64 {
        if self.overall != 0.0 {
            return self.overall;
        }
        let quality = if self.quality != 0.0 { self.quality } else { self.completion };
        let efficiency = if self.efficiency != 0.0 { self.efficiency } else { self.completion };
        0.4 * self.completion + 0.3 * quality + 0.3 * efficiency
    }
}

/// One effectiveness record, appended once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub timestamp: DateTime<Utc>,
    pub session: String,
    pub agent_type: AgentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bead_id: Option<String>,
    pub metrics: Metrics,
    #[serde(default)]
    pub context: HashMap<String, String>,
}

#[cfg(test)]
#[path = "score_tests.rs"]
mod tests;
