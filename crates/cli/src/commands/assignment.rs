// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ntm assign` / `ntm status` / `ntm mark` / `ntm reassign`: the thin
//! administrative surface over [`ntm_storage::AssignmentStore`]. Not the
//! TUI/tmux driver — that remains out of scope.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use ntm_core::{AgentType, PaneIndex};
use ntm_storage::AssignmentStore;

use crate::output::{emit, OutputFormat};

#[derive(Args)]
pub struct AssignArgs {
    /// Bead id from the external issue graph.
    pub bead_id: String,
    /// Human-readable bead title.
    pub title: String,
    /// Session the assignment belongs to.
    #[arg(long, default_value = "")]
    pub session: String,
    /// Terminal pane index the agent occupies.
    #[arg(long)]
    pub pane: u32,
    /// Agent type occupying the pane (claude, codex, gemini, or any other string).
    #[arg(long = "agent-type")]
    pub agent_type: String,
    /// Optional agent display name.
    #[arg(long = "agent-name")]
    pub agent_name: Option<String>,
    /// The prompt sent to the agent.
    #[arg(long)]
    pub prompt: String,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Session to inspect.
    #[arg(long, default_value = "")]
    pub session: String,
    /// Restrict to a single pane.
    #[arg(long)]
    pub pane: Option<u32>,
    /// Restrict to a single status (assigned, working, completed, failed, reassigned).
    #[arg(long)]
    pub status: Option<String>,
    /// Print aggregate counts instead of the assignment list.
    #[arg(long)]
    pub stats: bool,
}

#[derive(Subcommand)]
pub enum MarkCommand {
    /// Transition a bead to `working`.
    Working { bead_id: String },
    /// Transition a bead to `completed`.
    Completed { bead_id: String },
    /// Transition a bead to `failed`.
    Failed {
        bead_id: String,
        #[arg(long)]
        reason: String,
    },
}

#[derive(Args)]
pub struct MarkArgs {
    #[command(subcommand)]
    pub command: MarkCommand,
    #[arg(long, default_value = "")]
    pub session: String,
}

#[derive(Args)]
pub struct ReassignArgs {
    pub bead_id: String,
    #[arg(long, default_value = "")]
    pub session: String,
    #[arg(long)]
    pub pane: u32,
    #[arg(long = "agent-type")]
    pub agent_type: String,
    #[arg(long = "agent-name")]
    pub agent_name: Option<String>,
}

fn open_store(data_dir: &PathBuf, session: &str) -> AssignmentStore {
    AssignmentStore::open(data_dir, session, ntm_core::default_emitter())
}

pub fn assign(data_dir: PathBuf, args: AssignArgs, format: OutputFormat) -> Result<()> {
    let store = open_store(&data_dir, &args.session);
    let assignment = store.assign(
        args.bead_id,
        args.title,
        PaneIndex(args.pane),
        AgentType::from(args.agent_type.as_str()),
        args.agent_name,
        args.prompt,
    );
    emit(format, &assignment, |a| format!("assigned {} to pane {} ({})", a.bead_id, a.pane_index, a.agent_type))
}

pub fn status(data_dir: PathBuf, args: StatusArgs, format: OutputFormat) -> Result<()> {
    let store = open_store(&data_dir, &args.session);
    if args.stats {
        let stats = store.stats();
        return emit(format, &stats, |s| {
            format!(
                "total={} assigned={} working={} completed={} failed={} reassigned={}",
                s.total, s.assigned, s.working, s.completed, s.failed, s.reassigned
            )
        });
    }

    let mut assignments = match (&args.pane, &args.status) {
        (Some(pane), _) => store.list_by_pane(PaneIndex(*pane)),
        _ => store.list(),
    };
    if let Some(status) = &args.status {
        assignments.retain(|a| a.status.as_str() == status);
    }
    emit(format, &assignments, |list| {
        if list.is_empty() {
            return "no assignments".to_string();
        }
        let mut lines = vec![format!("{:<12} {:<8} {:<10} {:<8} TITLE", "BEAD", "PANE", "STATUS", "AGENT")];
        for a in list {
            lines.push(format!(
                "{:<12} {:<8} {:<10} {:<8} {}",
                a.bead_id.chars().take(12).collect::<String>(),
                a.pane_index,
                a.status,
                a.agent_type,
                a.bead_title
            ));
        }
        lines.join("\n")
    })
}

pub fn mark(data_dir: PathBuf, args: MarkArgs, format: OutputFormat) -> Result<()> {
    let store = open_store(&data_dir, &args.session);
    let updated = match args.command {
        MarkCommand::Working { bead_id } => store.mark_working(&bead_id)?,
        MarkCommand::Completed { bead_id } => store.mark_completed(&bead_id)?,
        MarkCommand::Failed { bead_id, reason } => store.mark_failed(&bead_id, reason)?,
    };
    emit(format, &updated, |a| format!("{} is now {}", a.bead_id, a.status))
}

pub fn reassign(data_dir: PathBuf, args: ReassignArgs, format: OutputFormat) -> Result<()> {
    let store = open_store(&data_dir, &args.session);
    let updated = store.reassign(
        &args.bead_id,
        PaneIndex(args.pane),
        AgentType::from(args.agent_type.as_str()),
        args.agent_name,
    )?;
    emit(format, &updated, |a| format!("{} reassigned to pane {} ({})", a.bead_id, a.pane_index, a.agent_type))
}
