// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers shared by every concrete adapter.
//!
//! Adds a limit-bounded stdout buffer on top of the usual spawn-and-wait
//! pattern: adapter output comes from untrusted external processes and must
//! be capped, unlike trusted tooling invocations elsewhere in this
//! workspace where output is never adversarial-sized.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::ToolAdapterError;

/// Default per-adapter invocation timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default stdout cap.
pub const DEFAULT_OUTPUT_LIMIT: usize = 10 * 1024 * 1024;

/// The result of a bounded subprocess invocation.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub status: Option<i32>,
}

impl ExecOutput {
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs `cmd`, bounding wall-clock time by `timeout_duration` and stdout size
/// by `output_limit` bytes. Stderr is captured in a plain unbounded buffer,
/// used only to surface error messages.
pub async fn run_bounded(
    tool: &str,
    mut cmd: Command,
    timeout_duration: Duration,
    output_limit: usize,
) -> Result<ExecOutput, ToolAdapterError> {
    cmd.stdout(std::process::Stdio::piped());
    cmd.stderr(std::process::Stdio::piped());
    cmd.stdin(std::process::Stdio::null());
    cmd.kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|source| ToolAdapterError::Exec {
        tool: tool.to_string(),
        source,
    })?;

    let mut stdout_pipe = child.stdout.take();
    let mut stderr_pipe = child.stderr.take();

    let stdout_fut = async {
        match stdout_pipe.as_mut() {
            Some(pipe) => read_bounded(pipe, output_limit).await,
            None => Ok(Vec::new()),
        }
    };
    let stderr_fut = async {
        match stderr_pipe.as_mut() {
            Some(pipe) => {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf).await;
                buf
            }
            None => Vec::new(),
        }
    };
    tokio::pin!(stdout_fut);
    tokio::pin!(stderr_fut);

    // A capped stdout kills the child immediately rather than waiting for
    // stderr's EOF, which would otherwise never arrive while the child
    // blocks writing into a pipe nobody is draining anymore.
    let mut stdout_done: Option<Result<Vec<u8>, ()>> = None;
    let mut stderr_done: Option<Vec<u8>> = None;
    let drain = async {
        loop {
            tokio::select! {
                r = &mut stdout_fut, if stdout_done.is_none() => {
                    let overflowed = r.is_err();
                    stdout_done = Some(r);
                    if overflowed {
                        break;
                    }
                }
                r = &mut stderr_fut, if stderr_done.is_none() => {
                    stderr_done = Some(r);
                }
            }
            if stdout_done.is_some() && stderr_done.is_some() {
                break;
            }
        }
    };

    match timeout(timeout_duration, drain).await {
        Ok(()) if matches!(stdout_done, Some(Err(()))) => {
            let _ = child.kill().await;
            Err(ToolAdapterError::OutputLimitExceeded { tool: tool.to_string(), limit_bytes: output_limit })
        }
        Ok(()) => {
            let stdout = stdout_done.and_then(Result::ok).unwrap_or_default();
            let stderr = stderr_done.unwrap_or_default();
            let status = child.wait().await.ok().and_then(|s| s.code());
            Ok(ExecOutput { stdout, stderr, status })
        }
        Err(_elapsed) => {
            let _ = child.kill().await;
            Err(ToolAdapterError::Timeout { tool: tool.to_string(), timeout_secs: timeout_duration.as_secs() })
        }
    }
}

/// Reads from `pipe` until EOF, returning `Err(())` the moment more than
/// `limit` bytes have been read (the caller kills the child on timeout;
/// here we simply stop reading and let the caller report the overflow).
async fn read_bounded<R: AsyncRead + Unpin>(pipe: &mut R, limit: usize) -> Result<Vec<u8>, ()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = match pipe.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(_) => break,
        };
        if buf.len() + n > limit {
            return Err(());
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    Ok(buf)
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
