// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `enrich_with_git_state`: shells out to the system `git` binary via the
//! shared `run_bounded` helper rather than linking a native libgit2 binding.
//! Failures are logged and produce an empty enrichment.

use std::path::Path;
use std::time::Duration;

use ntm_adapters::exec::{run_bounded, DEFAULT_OUTPUT_LIMIT};
use tokio::process::Command;

const GIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Git-derived enrichment added to a handoff before it is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitState {
    pub modified: Vec<String>,
    pub untracked: Vec<String>,
    pub branch: Option<String>,
    /// Up to five recent one-line commits, most recent first.
    pub recent_commits: Vec<String>,
}

/// Collects git state for `repo_dir`: modified files (`diff HEAD`),
/// untracked files, current branch, and up to five recent one-line commits.
/// Every sub-command is best-effort; a failing git invocation yields an
/// empty field rather than failing the whole call.
pub async fn enrich_with_git_state(repo_dir: &Path) -> GitState {
    GitState {
        modified: diff_name_only(repo_dir).await,
        untracked: untracked_files(repo_dir).await,
        branch: current_branch(repo_dir).await,
        recent_commits: recent_commits(repo_dir).await,
    }
}

async fn run_git(repo_dir: &Path, args: &[&str]) -> Option<String> {
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(repo_dir);
    match run_bounded("git", cmd, GIT_TIMEOUT, DEFAULT_OUTPUT_LIMIT).await {
        Ok(output) if output.success() => Some(output.stdout_str()),
        Ok(output) => {
            tracing::warn!(args = ?args, stderr = %output.stderr_str(), "git enrichment command failed");
            None
        }
        Err(e) => {
            tracing::warn!(args = ?args, error = %e, "git enrichment command errored");
            None
        }
    }
}

async fn diff_name_only(repo_dir: &Path) -> Vec<String> {
    run_git(repo_dir, &["diff", "--name-only", "HEAD"]).await.map(split_lines).unwrap_or_default()
}

async fn untracked_files(repo_dir: &Path) -> Vec<String> {
    run_git(repo_dir, &["ls-files", "--others", "--exclude-standard"]).await.map(split_lines).unwrap_or_default()
}

async fn current_branch(repo_dir: &Path) -> Option<String> {
    run_git(repo_dir, &["rev-parse", "--abbrev-ref", "HEAD"]).await.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

async fn recent_commits(repo_dir: &Path) -> Vec<String> {
    run_git(repo_dir, &["log", "-5", "--oneline"]).await.map(split_lines).unwrap_or_default()
}

fn split_lines(s: String) -> Vec<String> {
    s.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string).collect()
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
