// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Score Tracker: an append-only JSONL effectiveness log
//! with bounded retention and time-weighted aggregation, used to compare
//! agents on task types and feed dispatch decisions.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use ntm_core::{AgentType, Clock, Score, SystemClock};
use parking_lot::Mutex;

use crate::atomic::write_atomic;

/// Default retention window.
pub const DEFAULT_RETENTION_DAYS: i64 = 90;
/// Default decay half-life.
pub const DEFAULT_HALF_LIFE_DAYS: f64 = 7.0;
/// Minimum sample count before trend/effectiveness queries report data.
pub const MIN_SAMPLES: usize = 3;
/// Sample count at which `QueryEffectiveness` confidence saturates at 1.0.
const CONFIDENCE_SATURATION: usize = 20;

/// Filters accepted by [`ScoreTracker::query`].
#[derive(Debug, Clone, Default)]
pub struct ScoreFilter {
    pub since: Option<DateTime<Utc>>,
    pub agent_type: Option<AgentType>,
    pub task_type: Option<String>,
    pub session: Option<String>,
    pub limit: Option<usize>,
}

/// Trend classification returned by [`ScoreTracker::analyze_trend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendAnalysis {
    pub trend: Trend,
    pub earlier_avg: f64,
    pub recent_avg: f64,
    pub change_percent: f64,
    pub sample_count: usize,
}

/// Result of [`ScoreTracker::query_effectiveness`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectivenessReport {
    pub has_data: bool,
    pub sample_count: usize,
    pub score: f64,
    pub confidence: f64,
}

/// Append-only JSONL effectiveness log.
pub struct ScoreTracker<C: Clock = SystemClock> {
    path: PathBuf,
    clock: C,
    retention: ChronoDuration,
    half_life_days: f64,
    write_lock: Mutex<()>,
}

impl ScoreTracker<SystemClock> {
    /// Opens the tracker at the default path,
    /// `~/.config/ntm/analytics/scores.jsonl` (falls back to a relative path
    /// under the current directory if `dirs::home_dir` is unavailable).
    pub fn open_default() -> Self {
        let path = default_scores_path();
        Self::open(&path)
    }

    pub fn open(path: &Path) -> Self {
        Self::open_with_clock(path, SystemClock)
    }
}

impl<C: Clock> ScoreTracker<C> {
    pub fn open_with_clock(path: &Path, clock: C) -> Self {
        Self {
            path: path.to_path_buf(),
            clock,
            retention: ChronoDuration::days(DEFAULT_RETENTION_DAYS),
            half_life_days: DEFAULT_HALF_LIFE_DAYS,
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_retention_days(mut self, days: i64) -> Self {
        self.retention = ChronoDuration::days(days);
        self
    }

    pub fn with_half_life_days(mut self, days: f64) -> Self {
        self.half_life_days = days;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `score` to the log, filling `overall` and `timestamp` if
    /// zero, then prunes per retention.
    pub fn record(&self, mut score: Score) -> Score {
        if score.timestamp == epoch() {
            score.timestamp = self.clock.now();
        }
        score.metrics.overall = score.metrics.computed_overall();

        let _guard = self.write_lock.lock();
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let append_result = (|| -> std::io::Result<()> {
            let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            let line = serde_json::to_string(&score).map_err(std::io::Error::other)?;
            writeln!(file, "{line}")?;
            file.sync_all()
        })();
        if let Err(e) = append_result {
            tracing::error!(path = %self.path.display(), error = %e, "failed to append score record");
        }
        drop(_guard);
        self.prune();
        score
    }

    /// Reads every line, keeping parseable lines within retention and every
    /// unparseable line verbatim, then atomically rewrites the file.
    pub fn prune(&self) {
        let _guard = self.write_lock.lock();
        let lines = match read_lines(&self.path) {
            Ok(lines) => lines,
            Err(_) => return,
        };
        let cutoff = self.clock.now() - self.retention;
        let kept: Vec<String> = lines
            .into_iter()
            .filter(|line| match serde_json::from_str::<Score>(line) {
                Ok(score) => score.timestamp >= cutoff,
                Err(_) => true,
            })
            .collect();
        let body = if kept.is_empty() { String::new() } else { format!("{}\n", kept.join("\n")) };
        if let Err(e) = write_atomic(&self.path, body.as_bytes()) {
            tracing::error!(path = %self.path.display(), error = %e, "failed to prune score log");
        }
    }

    /// Returns every score matching `filter`, skipping malformed lines.
    pub fn query(&self, filter: &ScoreFilter) -> Vec<Score> {
        let lines = read_lines(&self.path).unwrap_or_default();
        let mut matched: Vec<Score> = lines
            .iter()
            .filter_map(|line| serde_json::from_str::<Score>(line).ok())
            .filter(|score| filter.since.is_none_or(|since| score.timestamp >= since))
            .filter(|score| filter.agent_type.as_ref().is_none_or(|t| &score.agent_type == t))
            .filter(|score| filter.task_type.as_deref().is_none_or(|t| score.task_type.as_deref() == Some(t)))
            .filter(|score| filter.session.as_deref().is_none_or(|s| score.session == s))
            .collect();
        if let Some(limit) = filter.limit {
            matched.truncate(limit);
        }
        matched
    }

    /// Time-weighted mean over `filter`, weight `w = 2^(-age_days/halfLife)`.
    /// Returns `(weighted_avg, sample_count)`.
    pub fn decayed_average(&self, filter: &ScoreFilter) -> (f64, usize) {
        let scores = self.query(filter);
        if scores.is_empty() {
            return (0.0, 0);
        }
        let now = self.clock.now();
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        for score in &scores {
            let age_days = (now - score.timestamp).num_seconds() as f64 / 86_400.0;
            let weight = 2f64.powf(-age_days.max(0.0) / self.half_life_days);
            weighted_sum += weight * score.metrics.overall;
            total_weight += weight;
        }
        let avg = if total_weight > 0.0 { weighted_sum / total_weight } else { 0.0 };
        (avg, scores.len())
    }

    /// Classifies the trend of `overall` scores matching `filter` within
    /// the last `window_days`.
    pub fn analyze_trend(&self, filter: &ScoreFilter, window_days: i64) -> TrendAnalysis {
        let since = self.clock.now() - ChronoDuration::days(window_days);
        let mut windowed = filter.clone();
        windowed.since = Some(since);
        let mut scores = self.query(&windowed);
        scores.sort_by_key(|s| s.timestamp);

        if scores.len() < MIN_SAMPLES {
            return TrendAnalysis {
                trend: Trend::Unknown,
                earlier_avg: 0.0,
                recent_avg: 0.0,
                change_percent: 0.0,
                sample_count: scores.len(),
            };
        }

        let mid = scores.len() / 2;
        let earlier = &scores[..mid];
        let recent = &scores[mid..];
        let earlier_avg = mean(earlier.iter().map(|s| s.metrics.overall));
        let recent_avg = mean(recent.iter().map(|s| s.metrics.overall));

        let change_percent = if earlier_avg != 0.0 { (recent_avg - earlier_avg) / earlier_avg * 100.0 } else { 0.0 };
        let overall_avg = mean(scores.iter().map(|s| s.metrics.overall));
        let sigma = std_dev(scores.iter().map(|s| s.metrics.overall), overall_avg);
        let threshold = if overall_avg != 0.0 { (sigma * 100.0 / overall_avg).max(5.0) } else { 5.0 };

        let trend = if change_percent > threshold {
            Trend::Improving
        } else if change_percent < -threshold {
            Trend::Declining
        } else {
            Trend::Stable
        };

        TrendAnalysis { trend, earlier_avg, recent_avg, change_percent, sample_count: scores.len() }
    }

    /// `QueryEffectiveness(agent, task, windowDays)`.
    pub fn query_effectiveness(&self, agent: &AgentType, task: Option<&str>, window_days: i64) -> EffectivenessReport {
        let since = self.clock.now() - ChronoDuration::days(window_days);
        let filter = ScoreFilter {
            since: Some(since),
            agent_type: Some(agent.clone()),
            task_type: task.map(str::to_string),
            session: None,
            limit: None,
        };
        let (score, sample_count) = self.decayed_average(&filter);
        let has_data = sample_count >= MIN_SAMPLES;
        let confidence = (sample_count as f64 / CONFIDENCE_SATURATION as f64).min(1.0);
        EffectivenessReport { has_data, sample_count, score: if has_data { score } else { 0.0 }, confidence }
    }
}

fn mean<I: Iterator<Item = f64>>(values: I) -> f64 {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev<I: Iterator<Item = f64>>(values: I, mean_value: f64) -> f64 {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean_value).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(0, 0).unwrap_or_default()
}

fn read_lines(path: &Path) -> std::io::Result<Vec<String>> {
    let file = File::open(path)?;
    BufReader::new(file).lines().collect()
}

/// `~/.config/ntm/analytics/scores.jsonl`, resolved via `dirs::home_dir`.
pub fn default_scores_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("ntm").join("analytics").join("scores.jsonl")
}

#[cfg(test)]
#[path = "scores_tests.rs"]
mod tests;
