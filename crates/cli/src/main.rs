// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ntm - Agent Orchestrator administrative CLI.
//!
//! A thin surface over the closed loop in `ntm-core`/`ntm-storage`/
//! `ntm-handoff`/`ntm-adapters`/`ntm-engine`: assignment lifecycle, score
//! queries, handoff writes, and triage rendering. The TUI/tmux-pane driver
//! that actually spawns and supervises agent processes remains out of scope
//! and is not implemented here.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{assignment, handoff, score, triage};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "ntm", version, about = "Agent Orchestrator administrative CLI")]
struct Cli {
    /// Override the persistence root (defaults to `$XDG_DATA_HOME/ntm` or `$HOME/.local/share/ntm`).
    #[arg(short = 'D', long = "data-dir", global = true)]
    data_dir: Option<String>,

    /// Output format.
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign a bead to a pane.
    Assign(assignment::AssignArgs),
    /// List or summarize assignments.
    Status(assignment::StatusArgs),
    /// Transition an assignment's status.
    Mark(assignment::MarkArgs),
    /// Reassign a working bead to a different pane/agent.
    Reassign(assignment::ReassignArgs),
    /// Effectiveness score recording and queries.
    Score {
        #[command(subcommand)]
        command: score::ScoreCommand,
    },
    /// Continuity handoff generation and writing.
    Handoff {
        #[command(subcommand)]
        command: handoff::HandoffCommand,
    },
    /// Render the external issue-graph tool's cached triage response.
    Triage(triage::TriageArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let data_dir = ntm_engine::resolve_data_dir(cli.data_dir.as_deref());

    match cli.command {
        Commands::Assign(args) => assignment::assign(data_dir, args, cli.output),
        Commands::Status(args) => assignment::status(data_dir, args, cli.output),
        Commands::Mark(args) => assignment::mark(data_dir, args, cli.output),
        Commands::Reassign(args) => assignment::reassign(data_dir, args, cli.output),
        Commands::Score { command } => {
            let scores_path = data_dir.join("analytics").join("scores.jsonl");
            match command {
                score::ScoreCommand::Record(args) => score::record(scores_path, args, cli.output),
                score::ScoreCommand::Query(args) => score::query(scores_path, args, cli.output),
                score::ScoreCommand::Trend(args) => score::trend(scores_path, args, cli.output),
                score::ScoreCommand::Effectiveness(args) => score::effectiveness(scores_path, args, cli.output),
            }
        }
        Commands::Handoff { command } => {
            let handoffs_dir = data_dir.join("handoffs");
            match command {
                handoff::HandoffCommand::Write(args) => handoff::write(handoffs_dir, args, cli.output).await,
                handoff::HandoffCommand::WriteFromTranscript(args) => {
                    handoff::write_from_transcript(handoffs_dir, args, cli.output).await
                }
            }
        }
        Commands::Triage(args) => triage::show(args).await,
    }
}
