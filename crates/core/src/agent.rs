// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent type identification.

use std::fmt;

/// The kind of coding agent occupying a pane.
///
/// The enumeration is open-ended ("claude, codex, gemini, …"), so unlike a
/// closed `WorkspaceType`-style enum this round-trips unknown values through
/// [`AgentType::Other`] rather than failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AgentType {
    Claude,
    Codex,
    Gemini,
    Other(String),
}

impl AgentType {
    pub fn as_str(&self) -> &str {
        match self {
            AgentType::Claude => "claude",
            AgentType::Codex => "codex",
            AgentType::Gemini => "gemini",
            AgentType::Other(s) => s,
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for AgentType {
    fn from(s: &str) -> Self {
        match s {
            "claude" => AgentType::Claude,
            "codex" => AgentType::Codex,
            "gemini" => AgentType::Gemini,
            other => AgentType::Other(other.to_string()),
        }
    }
}

impl From<String> for AgentType {
    fn from(s: String) -> Self {
        AgentType::from(s.as_str())
    }
}

impl serde::Serialize for AgentType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for AgentType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(AgentType::from(s))
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
