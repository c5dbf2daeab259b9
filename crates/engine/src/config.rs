// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence-root resolution: `XDG_DATA_HOME` (or `HOME`) roots
//! persistence; `~` expansion is performed for configured paths; no other
//! environment variable is read by the core.
//!
//! Mirrors an established adapter/config directory resolution (`dirs` is
//! already a workspace dependency for that reason) rather than hand-rolling
//! path joining.

use std::path::PathBuf;

/// Resolves the orchestrator's data root: an explicitly configured path
/// (with `~` expanded), or `$XDG_DATA_HOME/ntm`, or `$HOME/.local/share/ntm`.
pub fn resolve_data_dir(configured: Option<&str>) -> PathBuf {
    if let Some(path) = configured {
        return expand_tilde(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join("ntm");
    }
    dirs::home_dir().map(|home| home.join(".local").join("share").join("ntm")).unwrap_or_else(|| PathBuf::from(".ntm"))
}

fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)).unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
