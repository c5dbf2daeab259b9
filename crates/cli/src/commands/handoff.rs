// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ntm handoff`: the thin administrative surface over
//! [`ntm_handoff::Generator`]/[`ntm_handoff::HandoffWriter`].

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use ntm_handoff::{ExplicitFields, Generator, HandoffWriter};

use crate::output::{emit, OutputFormat};

#[derive(Subcommand)]
pub enum HandoffCommand {
    /// Build and write a handoff from free-form agent output read on stdin.
    Write(WriteArgs),
    /// Build and write a handoff from a line-delimited JSON transcript read on stdin.
    WriteFromTranscript(WriteArgs),
}

#[derive(Args)]
pub struct WriteArgs {
    pub session: String,
    /// Explicit goal, overriding whatever the analyzer would infer.
    #[arg(long)]
    pub goal: Option<String>,
    /// Explicit now-action, overriding whatever the analyzer would infer.
    #[arg(long)]
    pub now: Option<String>,
    /// Write as an auto-handoff instead of a manual, slugged one.
    #[arg(long)]
    pub auto: bool,
    /// Manual-write description, slugified into the filename.
    #[arg(long, default_value = "handoff")]
    pub description: String,
    /// Enrich with git state from this repository directory.
    #[arg(long = "repo-dir")]
    pub repo_dir: Option<PathBuf>,
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
    Ok(buf)
}

pub async fn write(handoffs_dir: PathBuf, args: WriteArgs, format: OutputFormat) -> Result<()> {
    let text = read_stdin()?;
    let explicit = ExplicitFields { goal: args.goal.clone(), now_action: args.now.clone(), ..Default::default() };
    let generator = Generator::new();
    let mut handoff = generator.from_output(&args.session, &text, &explicit);
    if let Some(repo_dir) = &args.repo_dir {
        generator.enrich_with_git_state(&mut handoff, repo_dir).await;
    }

    let writer = HandoffWriter::new(handoffs_dir);
    let path = if args.auto { writer.write_auto(&handoff)? } else { writer.write_manual(&handoff, &args.description)? };
    emit(format, &path.to_string_lossy().to_string(), |p| format!("wrote handoff to {p}"))
}

pub async fn write_from_transcript(handoffs_dir: PathBuf, args: WriteArgs, format: OutputFormat) -> Result<()> {
    let text = read_stdin()?;
    let explicit = ExplicitFields { goal: args.goal.clone(), now_action: args.now.clone(), ..Default::default() };
    let generator = Generator::new();
    let mut handoff = generator.from_transcript(&args.session, text.as_bytes(), &explicit)?;
    if let Some(repo_dir) = &args.repo_dir {
        generator.enrich_with_git_state(&mut handoff, repo_dir).await;
    }

    let writer = HandoffWriter::new(handoffs_dir);
    let path = if args.auto { writer.write_auto(&handoff)? } else { writer.write_manual(&handoff, &args.description)? };
    emit(format, &path.to_string_lossy().to_string(), |p| format!("wrote handoff to {p}"))
}
