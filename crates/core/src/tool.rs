// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool identity, parsed versions, and capability sets shared by every
//! adapter in `ntm-adapters`.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Name of an external collaborator tool the orchestrator can probe.
///
/// Left open-ended like [`crate::agent::AgentType`]: adapters are added over
/// time and a closed enum would force a core release for every new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ToolName {
    IssueGraph,
    IssueTracker,
    MailBus,
    DestructiveCommandGuard,
    Other(String),
}

impl ToolName {
    pub fn as_str(&self) -> &str {
        match self {
            ToolName::IssueGraph => "bv",
            ToolName::IssueTracker => "bd",
            ToolName::MailBus => "mailbus",
            ToolName::DestructiveCommandGuard => "dcg",
            ToolName::Other(s) => s,
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for ToolName {
    fn from(s: &str) -> Self {
        match s {
            "bv" => ToolName::IssueGraph,
            "bd" => ToolName::IssueTracker,
            "mailbus" => ToolName::MailBus,
            "dcg" => ToolName::DestructiveCommandGuard,
            other => ToolName::Other(other.to_string()),
        }
    }
}

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(\d+)\.(\d+)\.(\d+)").expect("constant regex pattern is valid")
});

/// A parsed semantic-ish version, or the raw string when parsing failed.
///
/// Unparseable output produces a `Version` with `parsed: None`, which the
/// `Ord` impl below treats as strictly less than every parsed version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed: Option<(u64, u64, u64)>,
}

impl Version {
    /// Parses the first `major.minor.patch` occurrence out of `output`. The
    /// search is unanchored, so any leading banner text is effectively
    /// stripped for free — `jfp/1.0.0 linux-x64 node-v24` parses to
    /// `(1, 0, 0)` with no separate prefix-stripping step required.
    pub fn parse(output: &str) -> Self {
        let raw = output.trim().to_string();
        let parsed = VERSION_RE.captures(output).and_then(|caps| {
            let major = caps.get(1)?.as_str().parse().ok()?;
            let minor = caps.get(2)?.as_str().parse().ok()?;
            let patch = caps.get(3)?.as_str().parse().ok()?;
            Some((major, minor, patch))
        });
        Self { raw, parsed }
    }

    pub fn at_least(&self, min: &Version) -> bool {
        match (self.parsed, min.parsed) {
            (Some(a), Some(b)) => a >= b,
            (None, None) => true,
            (None, Some(_)) => false,
            (Some(_), None) => true,
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self.parsed, other.parsed) {
            (Some(a), Some(b)) => a.cmp(&b),
            (None, None) => std::cmp::Ordering::Equal,
            (None, Some(_)) => std::cmp::Ordering::Less,
            (Some(_), None) => std::cmp::Ordering::Greater,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Health of a tool as last probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unreachable,
}

/// A snapshot of one adapter's probed state, cached with a TTL by the
/// availability cache in `ntm-adapters`.
///
/// Capabilities are an open set of strings: some adapters claim a
/// `server_available` capability outside any fixed enumeration, so unknown
/// capabilities round-trip verbatim rather than being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub installed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    #[serde(default)]
    pub capabilities: HashSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthStatus>,
}

/// Cached availability verdict, keyed by adapter and refreshed on TTL expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    pub available: bool,
    pub compatible: bool,
    pub version: Option<Version>,
    pub path: Option<String>,
    pub last_checked: DateTime<Utc>,
}

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;
