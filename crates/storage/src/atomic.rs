// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The four-step atomic write protocol shared by the Assignment Store and
//! the Handoff Writer:
//!
//! 1. Marshal to bytes.
//! 2. Write to a sibling temp file in the same directory.
//! 3. Fsync the temp file; close it; chmod to `0644`.
//! 4. Rename current file (if any) to `<path>.bak`; rename temp to `<path>`.
//!
//! Load fallback order is `<path>` → `<path>.bak` → caller-supplied default,
//! generalizing a `Snapshot::load`/`rotate_bak_path` idiom from a fixed
//! backup count to a single `.bak` sibling.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Serializes `value` as pretty-printed JSON and writes it to `path` via the
/// four-step atomic protocol.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> std::io::Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    write_atomic(path, &bytes)
}

/// Writes `bytes` to `path` via the four-step atomic protocol: write to a
/// sibling `.tmp`, fsync, chmod `0644`, rename current to `.bak`, rename
/// `.tmp` to `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = sibling(path, "tmp");

    // Guarantee the temp file is removed on every error path; `committed`
    // suppresses the cleanup once the rename into place has happened.
    let mut committed = false;
    let result = (|| -> std::io::Result<()> {
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o644))?;
        }
        let bak_path = sibling(path, "bak");
        if path.exists() {
            fs::rename(path, &bak_path)?;
        }
        fs::rename(&tmp_path, path)?;
        committed = true;
        Ok(())
    })();

    if !committed {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn sibling(path: &Path, ext: &str) -> std::path::PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(ext);
    match path.parent() {
        Some(parent) => parent.join(name),
        None => std::path::PathBuf::from(name),
    }
}

/// Loads JSON from `path`, falling back to `<path>.bak`, then to `default()`.
/// A corrupt primary with an intact backup recovers silently with a
/// warning; both corrupt yields `default()` with a warning.
pub fn load_json_with_fallback<T, F>(path: &Path, default: F) -> T
where
    T: DeserializeOwned,
    F: Fn() -> T,
{
    if path.exists() {
        match read_json(path) {
            Ok(value) => return value,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt primary file, falling back to .bak");
            }
        }
    }
    let bak_path = sibling(path, "bak");
    if bak_path.exists() {
        match read_json(&bak_path) {
            Ok(value) => return value,
            Err(e) => {
                warn!(path = %bak_path.display(), error = %e, "corrupt backup file, starting from empty state");
            }
        }
    }
    default()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, serde_json::Error> {
    let bytes = fs::read(path).map_err(serde::de::Error::custom)?;
    serde_json::from_slice(&bytes)
}

#[cfg(test)]
#[path = "atomic_tests.rs"]
mod tests;
