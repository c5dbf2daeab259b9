// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ntm triage`: renders the external issue-graph tool's cached triage
//! response.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ntm_adapters::adapter::AdapterContext;
use ntm_adapters::issue_graph::IssueGraphAdapter;
use ntm_engine::TriageCache;

#[derive(Args)]
pub struct TriageArgs {
    /// Directory the issue-graph tool should be invoked from.
    #[arg(long = "cwd", default_value = ".")]
    pub cwd: PathBuf,
    /// Bypass the cache and force a fresh probe.
    #[arg(long)]
    pub refresh: bool,
}

pub async fn show(args: TriageArgs) -> Result<()> {
    let adapter = IssueGraphAdapter::new(args.cwd);
    let cache = TriageCache::new(adapter);
    if args.refresh {
        cache.invalidate();
    }
    let ctx = AdapterContext::default();
    let triage = cache.get(&ctx).await?;
    println!("{}", ntm_engine::render_triage(&triage));
    Ok(())
}
