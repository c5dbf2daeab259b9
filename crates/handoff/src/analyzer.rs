// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scans a free-form text blob with an ordered set of regex families —
//! accomplishment, next-step, blocker (cap 5), decision (cap 5) — and
//! extracts a structured [`Analysis`].
//!
//! Regex families are compiled once via `std::sync::LazyLock`, an established
//! idiom for expensive-to-build statics elsewhere in this pack (see
//! `ntm_core::tool::VERSION_RE`).

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

const MAX_BLOCKERS: usize = 5;
const MAX_DECISIONS: usize = 5;
const DECISION_WHAT_CAP: usize = 30;
const DECISION_WHY_CAP: usize = 50;

/// The result of scanning a text blob for continuity signal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub accomplishment: Option<String>,
    pub next_step: Option<String>,
    pub blockers: Vec<String>,
    /// Keyed (what -> why) pairs, capped at 5, `what` truncated to 30
    /// characters and `why` to 50.
    pub decisions: BTreeMap<String, String>,
}

/// Accomplishment patterns, in priority order. The first *pattern* (not the
/// first match in the text) to match anywhere in the blob wins; the first
/// match per family wins for single-valued fields.
static ACCOMPLISHMENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)I['\x{2019}]ve completed[:\s]+(.+)",
        r"(?im)^\s*Done:\s*(.+)$",
        r"(?im)^\s*Finished:\s*(.+)$",
        r"(?m)^\s*[\x{2713}\x{2714}]\s*(.+)$",
        r"(?i)Successfully\s+(.+)",
        r"(?i)Implemented\s+(.+)",
        r"(?m)^\s*\[DONE\]\s*(.+)$",
        r"(?im)^\s*Completed task:\s*(.+)$",
        r"(?im)^\s*Task complete:\s*(.+)$",
    ])
});

/// Next-step patterns, in priority order. Written in the same register as
/// the accomplishment patterns above; literal wording is a judgment call
/// recorded in DESIGN.md.
static NEXT_STEP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?im)^\s*Next step:\s*(.+)$",
        r"(?im)^\s*Next:\s*(.+)$",
        r"(?im)^\s*Up next:\s*(.+)$",
        r"(?im)^\s*TODO:\s*(.+)$",
    ])
});

/// Blocker patterns. Unlike the single-valued families,
/// every match across every pattern is collected, in order of appearance,
/// capped at 5.
static BLOCKER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?im)^\s*Error:\s*(.+)$",
        r"(?im)^\s*Failed:\s*(.+)$",
        r"(?im)^\s*Blocked by:\s*(.+)$",
        r"(?im)^\s*Cannot proceed:\s*(.+)$",
        r"(?im)^\s*Unable to:\s*(.+)$",
    ])
});

/// Decision patterns extracting (what, why) pairs.
static DECISION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?im)^\s*Decided to\s+(.+?)\s+because\s+(.+)$",
        r"(?im)^\s*Decision:\s*(.+?)\s*[-\x{2014}:]\s*(.+)$",
        r"(?im)^\s*Chose\s+(.+?)\s+because\s+(.+)$",
    ])
});

#[allow(clippy::expect_used)]
fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).expect("constant regex pattern is valid")).collect()
}

/// Scans `text` for the four regex families and returns the extracted
/// [`Analysis`].
pub fn analyze_output(text: &str) -> Analysis {
    Analysis {
        accomplishment: first_match(&ACCOMPLISHMENT_PATTERNS, text),
        next_step: first_match(&NEXT_STEP_PATTERNS, text),
        blockers: all_matches(&BLOCKER_PATTERNS, text, MAX_BLOCKERS),
        decisions: decision_pairs(text),
    }
}

/// Tries each pattern in priority order against the whole text; the first
/// pattern that matches anywhere wins, using its first match.
fn first_match(patterns: &[Regex], text: &str) -> Option<String> {
    for re in patterns {
        if let Some(caps) = re.captures(text) {
            if let Some(m) = caps.get(1) {
                return Some(m.as_str().trim().to_string());
            }
        }
    }
    None
}

/// Collects every match across every pattern, in order of first appearance
/// in `text`, capped at `limit`.
fn all_matches(patterns: &[Regex], text: &str, limit: usize) -> Vec<String> {
    let mut hits: Vec<(usize, String)> = Vec::new();
    for re in patterns {
        for caps in re.captures_iter(text) {
            if let (Some(whole), Some(m)) = (caps.get(0), caps.get(1)) {
                hits.push((whole.start(), m.as_str().trim().to_string()));
            }
        }
    }
    hits.sort_by_key(|(pos, _)| *pos);
    hits.into_iter().map(|(_, text)| text).take(limit).collect()
}

fn decision_pairs(text: &str) -> BTreeMap<String, String> {
    let mut hits: Vec<(usize, String, String)> = Vec::new();
    for re in DECISION_PATTERNS.iter() {
        for caps in re.captures_iter(text) {
            let (Some(whole), Some(what), Some(why)) = (caps.get(0), caps.get(1), caps.get(2)) else {
                continue;
            };
            hits.push((whole.start(), truncate(what.as_str().trim(), DECISION_WHAT_CAP), truncate(why.as_str().trim(), DECISION_WHY_CAP)));
        }
    }
    hits.sort_by_key(|(pos, ..)| *pos);
    hits.into_iter().take(MAX_DECISIONS).map(|(_, what, why)| (what, why)).collect()
}

fn truncate(s: &str, cap: usize) -> String {
    if s.chars().count() <= cap {
        s.to_string()
    } else {
        s.chars().take(cap).collect()
    }
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
