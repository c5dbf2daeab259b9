// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Handoff Writer: validates, serializes, and atomically
//! persists a [`Handoff`]; rotates old files; appends a continuity-ledger
//! entry.
//!
//! Serialization uses `serde_yaml` — an added dependency not present in the
//! teacher's stack, justified in DESIGN.md by `other_examples/manifests/
//! odgrim-abathur-swarm` using `serde_yaml = "0.9"` for an adjacent
//! agent-orchestrator's continuity format. The atomic write itself reuses
//! `ntm_storage::atomic::write_atomic`, generalizing an established
//! `Snapshot::save` fsync-then-rename idiom from JSON to YAML bytes.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ntm_core::{Clock, Handoff, SystemClock};
use ntm_storage::atomic::write_atomic;
use parking_lot::Mutex;

use crate::error::HandoffError;
use crate::validator::validate;

/// Default rotation threshold.
pub const DEFAULT_MAX_PER_DIR: usize = 50;

/// Serializes a path component to the `general` fallback the filename rules
/// call out for the empty session name.
fn session_dir_name(session: &str) -> &str {
    if session.is_empty() {
        "general"
    } else {
        session
    }
}

/// Serializes `description` into a filename-safe slug:
/// lowercased, non-alphanumerics collapsed to single hyphens, trimmed, capped
/// at 50 characters; an empty result defaults to `handoff`.
pub fn slugify(description: &str) -> String {
    let mut out = String::new();
    let mut last_was_dash = true; // suppresses a leading hyphen
    for c in description.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            out.push('-');
            last_was_dash = true;
        }
    }
    let trimmed = out.trim_end_matches('-');
    let capped: String = trimmed.chars().take(50).collect();
    let capped = capped.trim_end_matches('-');
    if capped.is_empty() {
        "handoff".to_string()
    } else {
        capped.to_string()
    }
}

/// The process-wide write mutex serializing rotation and writes across every
/// [`HandoffWriter`] instance.
static WRITE_LOCK: Mutex<()> = Mutex::new(());

/// Validates, serializes, and atomically persists handoffs, with rotation
/// and continuity-ledger maintenance.
pub struct HandoffWriter<C: Clock = SystemClock> {
    base_dir: PathBuf,
    max_per_dir: usize,
    clock: C,
}

impl HandoffWriter<SystemClock> {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into(), max_per_dir: DEFAULT_MAX_PER_DIR, clock: SystemClock }
    }
}

impl<C: Clock> HandoffWriter<C> {
    pub fn with_clock(base_dir: impl Into<PathBuf>, clock: C) -> Self {
        Self { base_dir: base_dir.into(), max_per_dir: DEFAULT_MAX_PER_DIR, clock }
    }

    pub fn with_max_per_dir(mut self, max_per_dir: usize) -> Self {
        self.max_per_dir = max_per_dir;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn session_dir(&self, session: &str) -> PathBuf {
        self.base_dir.join(session_dir_name(session))
    }

    /// Manual write: `YYYY-MM-DD_HH-MM_<slug>.yaml` under
    /// `<baseDir>/<session>/`.
    pub fn write_manual(&self, handoff: &Handoff, description: &str) -> Result<PathBuf, HandoffError> {
        let now = self.clock.now();
        let filename = format!("{}_{}.yaml", now.format("%Y-%m-%d_%H-%M"), slugify(description));
        self.write(handoff, &filename, "manual", now)
    }

    /// Auto write: `auto-handoff-YYYY-MM-DDTHH-MM-SS.yaml`.
    pub fn write_auto(&self, handoff: &Handoff) -> Result<PathBuf, HandoffError> {
        let now = self.clock.now();
        let filename = format!("auto-handoff-{}.yaml", now.format("%Y-%m-%dT%H-%M-%S"));
        self.write(handoff, &filename, "auto", now)
    }

    fn write(&self, handoff: &Handoff, filename: &str, mode: &str, now: DateTime<Utc>) -> Result<PathBuf, HandoffError> {
        validate(handoff)?;
        let yaml = serde_yaml::to_string(handoff)?;

        let session_dir = self.session_dir(&handoff.session);
        fs::create_dir_all(&session_dir)?;

        let _guard = WRITE_LOCK.lock();
        rotate(&session_dir, self.max_per_dir);
        let path = session_dir.join(filename);
        write_atomic(&path, yaml.as_bytes())?;
        drop(_guard);

        if let Err(e) = append_ledger_entry(&self.base_dir, handoff, filename, mode, now) {
            tracing::warn!(error = %e, "failed to append continuity ledger entry");
        }
        Ok(path)
    }

    /// Rejects any path not rooted under `base_dir`.
    fn ensure_within_base(&self, path: &Path) -> Result<(), HandoffError> {
        let base = self.base_dir.to_string_lossy().trim_end_matches(std::path::MAIN_SEPARATOR).to_string();
        let candidate = path.to_string_lossy().to_string();
        if candidate == base || candidate.starts_with(&format!("{base}{}", std::path::MAIN_SEPARATOR)) {
            Ok(())
        } else {
            Err(HandoffError::PathEscape { path: candidate })
        }
    }

    pub fn delete(&self, path: &Path) -> Result<(), HandoffError> {
        self.ensure_within_base(path)?;
        fs::remove_file(path)?;
        Ok(())
    }

    /// Moves `path` into its session's `.archive/` sibling.
    pub fn archive(&self, path: &Path) -> Result<(), HandoffError> {
        self.ensure_within_base(path)?;
        let parent = path.parent().unwrap_or(&self.base_dir);
        let archive_dir = parent.join(".archive");
        fs::create_dir_all(&archive_dir)?;
        let dest = archive_dir.join(path.file_name().unwrap_or_default());
        let _guard = WRITE_LOCK.lock();
        fs::rename(path, dest)?;
        Ok(())
    }
}

/// Lists `.yaml` files directly under `dir`, sorted lexicographically — the
/// filename convention makes this chronological.
fn list_yaml_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("yaml"))
        .collect();
    files.sort();
    files
}

/// Before writing, moves the oldest `count - max_per_dir + 1` files into
/// `.archive/` once the session directory holds `>= max_per_dir` yaml files.
/// Errors here are non-fatal — the write proceeds regardless.
fn rotate(session_dir: &Path, max_per_dir: usize) {
    let files = list_yaml_files(session_dir);
    if files.len() < max_per_dir {
        return;
    }
    let overflow = files.len() - max_per_dir + 1;
    let archive_dir = session_dir.join(".archive");
    if let Err(e) = fs::create_dir_all(&archive_dir) {
        tracing::warn!(dir = %archive_dir.display(), error = %e, "failed to create handoff archive directory");
        return;
    }
    for old in files.into_iter().take(overflow) {
        let Some(name) = old.file_name() else { continue };
        if let Err(e) = fs::rename(&old, archive_dir.join(name)) {
            tracing::warn!(path = %old.display(), error = %e, "failed to archive handoff during rotation");
        }
    }
}

/// Caps a string to one line and `limit` characters for the ledger's
/// compact entry format.
fn single_line(s: &str, limit: usize) -> String {
    let collapsed: String = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= limit {
        collapsed
    } else {
        collapsed.chars().take(limit).collect()
    }
}

/// Renders a list compactly: the first 5 items, with a `+N more` suffix when
/// truncated, or `none` when empty.
fn compact_list(items: &[String]) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    let shown: Vec<&str> = items.iter().take(5).map(String::as_str).collect();
    let joined = shown.join(", ");
    if items.len() > 5 {
        format!("{joined} (+{} more)", items.len() - 5)
    } else {
        joined
    }
}

/// Appends a compact entry to `<baseDir>/../ledgers/CONTINUITY_<session>.md`:
/// a level-2 heading followed by `- key: value` lines.
///
/// The ledger omits a `test` line: the continuity summary is sometimes
/// described as a "goal/now/test" triple, but the Handoff entity's YAML
/// field list carries no `test` field, so there is nothing to render — an
/// open-question resolution recorded in DESIGN.md.
fn append_ledger_entry(
    base_dir: &Path,
    handoff: &Handoff,
    filename: &str,
    mode: &str,
    now: DateTime<Utc>,
) -> std::io::Result<()> {
    let ledgers_dir = base_dir.parent().map(|p| p.join("ledgers")).unwrap_or_else(|| base_dir.join("ledgers"));
    fs::create_dir_all(&ledgers_dir)?;
    let session_component = session_dir_name(&handoff.session);
    let ledger_path = ledgers_dir.join(format!("CONTINUITY_{session_component}.md"));

    let mut entry = String::new();
    entry.push_str(&format!("## {} ({mode})\n", now.to_rfc3339()));
    entry.push_str(&format!("- file: {filename}\n"));
    entry.push_str(&format!("- status: {}\n", handoff.status));
    entry.push_str(&format!("- outcome: {}\n", handoff.outcome));
    entry.push_str(&format!("- goal: {}\n", single_line(&handoff.goal, 80)));
    entry.push_str(&format!("- now: {}\n", single_line(&handoff.now, 80)));
    entry.push_str(&format!("- blockers: {}\n", compact_list(&handoff.blockers)));
    entry.push_str(&format!("- next: {}\n", compact_list(&handoff.next)));
    if !handoff.active_beads.is_empty() {
        entry.push_str(&format!("- active_beads: {}\n", compact_list(&handoff.active_beads)));
    }
    if handoff.tokens_pct != 0.0 {
        entry.push_str(&format!("- tokens_pct: {:.1}\n", handoff.tokens_pct));
    }
    entry.push('\n');

    use std::fs::OpenOptions;
    use std::io::Write;
    let mut file = OpenOptions::new().create(true).append(true).open(&ledger_path)?;
    file.write_all(entry.as_bytes())
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
