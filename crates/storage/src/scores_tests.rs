// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ntm_core::FakeClock;
use std::io::Write as _;
use std::time::Duration;
use tempfile::tempdir;

fn score(agent: AgentType, session: &str, overall: f64) -> Score {
    Score {
        timestamp: epoch(),
        session: session.to_string(),
        agent_type: agent,
        agent_name: None,
        task_type: Some("bugfix".into()),
        bead_id: None,
        metrics: ntm_core::Metrics { completion: overall, overall, ..Default::default() },
        context: Default::default(),
    }
}

#[test]
fn record_fills_timestamp_and_overall_then_appends() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.jsonl");
    let clock = FakeClock::new();
    let tracker = ScoreTracker::open_with_clock(&path, clock.clone());

    let mut s = score(AgentType::Claude, "sess-1", 0.0);
    s.metrics.completion = 0.8;
    s.metrics.overall = 0.0;
    let recorded = tracker.record(s);

    assert_eq!(recorded.timestamp, clock.now());
    assert_eq!(recorded.metrics.overall, 0.4 * 0.8 + 0.3 * 0.8 + 0.3 * 0.8);

    let lines: Vec<String> = read_lines(&path).unwrap();
    assert_eq!(lines.len(), 1);
}

#[test]
fn prune_drops_entries_older_than_retention_but_keeps_malformed_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.jsonl");
    let clock = FakeClock::new();
    let tracker = ScoreTracker::open_with_clock(&path, clock.clone()).with_retention_days(10);

    tracker.record(score(AgentType::Claude, "sess-1", 0.5));
    clock.advance(Duration::from_secs(20 * 86_400));
    tracker.record(score(AgentType::Claude, "sess-1", 0.9));

    {
        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "not json at all").unwrap();
    }
    tracker.prune();

    let lines = read_lines(&path).unwrap();
    assert_eq!(lines.len(), 2, "old entry pruned, recent entry and malformed line survive");
    assert!(lines.iter().any(|l| l == "not json at all"));
}

#[test]
fn query_skips_malformed_lines_and_applies_filters() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.jsonl");
    let clock = FakeClock::new();
    let tracker = ScoreTracker::open_with_clock(&path, clock.clone());

    tracker.record(score(AgentType::Claude, "sess-1", 0.5));
    tracker.record(score(AgentType::Codex, "sess-1", 0.9));
    {
        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "{{not valid json").unwrap();
    }

    let claude_only =
        tracker.query(&ScoreFilter { agent_type: Some(AgentType::Claude), ..Default::default() });
    assert_eq!(claude_only.len(), 1);
    assert_eq!(claude_only[0].metrics.overall, 0.5);
}

#[test]
fn decayed_average_weights_recent_scores_more_heavily() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.jsonl");
    let clock = FakeClock::new();
    let tracker = ScoreTracker::open_with_clock(&path, clock.clone()).with_half_life_days(7.0);

    tracker.record(score(AgentType::Claude, "sess-1", 0.2));
    clock.advance(Duration::from_secs(14 * 86_400));
    tracker.record(score(AgentType::Claude, "sess-1", 0.9));

    let (avg, count) = tracker.decayed_average(&ScoreFilter::default());
    assert_eq!(count, 2);
    assert!(avg > 0.6, "recent high score should dominate the decayed average, got {avg}");
}

#[test]
fn analyze_trend_reports_unknown_below_minimum_samples() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.jsonl");
    let clock = FakeClock::new();
    let tracker = ScoreTracker::open_with_clock(&path, clock.clone());

    tracker.record(score(AgentType::Claude, "sess-1", 0.5));
    tracker.record(score(AgentType::Claude, "sess-1", 0.6));

    let analysis = tracker.analyze_trend(&ScoreFilter::default(), 30);
    assert_eq!(analysis.trend, Trend::Unknown);
    assert_eq!(analysis.sample_count, 2);
}

#[test]
fn analyze_trend_detects_improving_sequence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.jsonl");
    let clock = FakeClock::new();
    let tracker = ScoreTracker::open_with_clock(&path, clock.clone());

    for overall in [0.5, 0.55, 0.6, 0.7, 0.75, 0.8] {
        tracker.record(score(AgentType::Claude, "sess-1", overall));
        clock.advance(Duration::from_secs(86_400));
    }

    let analysis = tracker.analyze_trend(&ScoreFilter::default(), 30);
    assert_eq!(analysis.trend, Trend::Improving);
    assert_eq!(analysis.sample_count, 6);
    assert!(analysis.recent_avg > analysis.earlier_avg);
}

#[test]
fn query_effectiveness_has_no_data_below_minimum_samples() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.jsonl");
    let clock = FakeClock::new();
    let tracker = ScoreTracker::open_with_clock(&path, clock.clone());

    tracker.record(score(AgentType::Claude, "sess-1", 0.8));
    let report = tracker.query_effectiveness(&AgentType::Claude, Some("bugfix"), 30);
    assert!(!report.has_data);
    assert_eq!(report.sample_count, 1);
}

#[test]
fn query_effectiveness_reports_confidence_scaling_with_samples() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.jsonl");
    let clock = FakeClock::new();
    let tracker = ScoreTracker::open_with_clock(&path, clock.clone());

    for _ in 0..5 {
        tracker.record(score(AgentType::Claude, "sess-1", 0.8));
        clock.advance(Duration::from_secs(86_400));
    }

    let report = tracker.query_effectiveness(&AgentType::Claude, Some("bugfix"), 30);
    assert!(report.has_data);
    assert_eq!(report.sample_count, 5);
    assert!((report.confidence - 0.25).abs() < 1e-9);
}
