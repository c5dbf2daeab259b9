// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ntm score`: the thin administrative surface over
//! [`ntm_storage::ScoreTracker`].

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use ntm_core::{AgentType, Metrics, Score};
use ntm_storage::{ScoreFilter, ScoreTracker};

use crate::output::{emit, OutputFormat};

#[derive(Subcommand)]
pub enum ScoreCommand {
    /// Append a new score record.
    Record(RecordArgs),
    /// Query recorded scores.
    Query(QueryArgs),
    /// Classify the recent trend for an agent (and optional task type).
    Trend(TrendArgs),
    /// Report calibrated effectiveness for an agent (and optional task type).
    Effectiveness(TrendArgs),
}

#[derive(Args)]
pub struct RecordArgs {
    pub session: String,
    #[arg(long = "agent-type")]
    pub agent_type: String,
    #[arg(long = "agent-name")]
    pub agent_name: Option<String>,
    #[arg(long = "task-type")]
    pub task_type: Option<String>,
    #[arg(long = "bead-id")]
    pub bead_id: Option<String>,
    #[arg(long, default_value_t = 0.0)]
    pub completion: f64,
    #[arg(long, default_value_t = 0.0)]
    pub quality: f64,
    #[arg(long, default_value_t = 0.0)]
    pub efficiency: f64,
}

#[derive(Args)]
pub struct QueryArgs {
    #[arg(long = "agent-type")]
    pub agent_type: Option<String>,
    #[arg(long = "task-type")]
    pub task_type: Option<String>,
    #[arg(long)]
    pub session: Option<String>,
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct TrendArgs {
    #[arg(long = "agent-type")]
    pub agent_type: String,
    #[arg(long = "task-type")]
    pub task_type: Option<String>,
    #[arg(long = "window-days", default_value_t = 30)]
    pub window_days: i64,
}

fn open_tracker(scores_path: &PathBuf) -> ScoreTracker {
    ScoreTracker::open(scores_path)
}

pub fn record(scores_path: PathBuf, args: RecordArgs, format: OutputFormat) -> Result<()> {
    let tracker = open_tracker(&scores_path);
    let score = Score {
        timestamp: chrono::DateTime::<chrono::Utc>::from_timestamp(0, 0).unwrap_or_default(),
        session: args.session.clone(),
        agent_type: AgentType::from(args.agent_type.as_str()),
        agent_name: args.agent_name,
        task_type: args.task_type,
        bead_id: args.bead_id,
        metrics: Metrics {
            completion: args.completion,
            quality: args.quality,
            efficiency: args.efficiency,
            ..Default::default()
        },
        context: Default::default(),
    };
    let recorded = tracker.record(score);
    emit(format, &recorded, |s| format!("recorded score overall={:.3} for {}", s.metrics.overall, s.agent_type))
}

pub fn query(scores_path: PathBuf, args: QueryArgs, format: OutputFormat) -> Result<()> {
    let tracker = open_tracker(&scores_path);
    let filter = ScoreFilter {
        since: None,
        agent_type: args.agent_type.as_deref().map(AgentType::from),
        task_type: args.task_type,
        session: args.session,
        limit: args.limit,
    };
    let scores = tracker.query(&filter);
    emit(format, &scores, |list| {
        if list.is_empty() {
            return "no scores".to_string();
        }
        let mut lines = vec![format!("{:<24} {:<8} {:<8} OVERALL", "TIMESTAMP", "AGENT", "SESSION")];
        for s in list {
            lines.push(format!("{:<24} {:<8} {:<8} {:.3}", s.timestamp.to_rfc3339(), s.agent_type, s.session, s.metrics.overall));
        }
        lines.join("\n")
    })
}

pub fn trend(scores_path: PathBuf, args: TrendArgs, format: OutputFormat) -> Result<()> {
    let tracker = open_tracker(&scores_path);
    let filter = ScoreFilter {
        since: None,
        agent_type: Some(AgentType::from(args.agent_type.as_str())),
        task_type: args.task_type,
        session: None,
        limit: None,
    };
    let analysis = tracker.analyze_trend(&filter, args.window_days);
    let trend_str = format!("{:?}", analysis.trend);
    emit(format, &(trend_str, analysis.earlier_avg, analysis.recent_avg, analysis.change_percent, analysis.sample_count), |_| {
        format!(
            "trend={:?} earlier_avg={:.3} recent_avg={:.3} change={:.1}% samples={}",
            analysis.trend, analysis.earlier_avg, analysis.recent_avg, analysis.change_percent, analysis.sample_count
        )
    })
}

pub fn effectiveness(scores_path: PathBuf, args: TrendArgs, format: OutputFormat) -> Result<()> {
    let tracker = open_tracker(&scores_path);
    let agent_type = AgentType::from(args.agent_type.as_str());
    let report = tracker.query_effectiveness(&agent_type, args.task_type.as_deref(), args.window_days);
    emit(format, &(report.has_data, report.sample_count, report.score, report.confidence), |_| {
        if !report.has_data {
            format!("insufficient data ({} samples, need 3)", report.sample_count)
        } else {
            format!("score={:.3} confidence={:.2} samples={}", report.score, report.confidence, report.sample_count)
        }
    })
}
