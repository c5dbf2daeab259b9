// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The triage markdown renderer: turns a cached [`Triage`]
//! response into the Markdown summary an administrative CLI or handoff can
//! display.

use ntm_adapters::issue_graph::{Recommendation, Triage};

/// Renders `triage` as Markdown: quick wins, ranked recommendations (with
/// breakdown scores where present), and blockers to clear.
pub fn render(triage: &Triage) -> String {
    let mut out = String::new();
    out.push_str("## Triage\n\n");

    if !triage.quick_wins.is_empty() {
        out.push_str("### Quick wins\n\n");
        for item in &triage.quick_wins {
            out.push_str(&format!("- {item}\n"));
        }
        out.push('\n');
    }

    if !triage.recommendations.is_empty() {
        out.push_str("### Recommendations\n\n");
        for (i, rec) in triage.recommendations.iter().enumerate() {
            out.push_str(&format!("{}. **{}** — {}\n", i + 1, rec.id, rec.title));
            if let Some(line) = render_breakdown(rec) {
                out.push_str(&format!("   - {line}\n"));
            }
        }
        out.push('\n');
    }

    if !triage.blockers_to_clear.is_empty() {
        out.push_str("### Blockers to clear\n\n");
        for item in &triage.blockers_to_clear {
            out.push_str(&format!("- {item}\n"));
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}

fn render_breakdown(rec: &Recommendation) -> Option<String> {
    let breakdown = rec.breakdown.as_ref()?;
    let mut parts = Vec::new();
    if let Some(v) = breakdown.pagerank {
        parts.push(format!("pagerank {v:.2}"));
    }
    if let Some(v) = breakdown.betweenness {
        parts.push(format!("betweenness {v:.2}"));
    }
    if let Some(v) = breakdown.blocker_ratio {
        parts.push(format!("blocker ratio {v:.2}"));
    }
    if let Some(v) = breakdown.priority_boost {
        parts.push(format!("priority boost {v:.2}"));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

#[cfg(test)]
#[path = "triage_render_tests.rs"]
mod tests;
