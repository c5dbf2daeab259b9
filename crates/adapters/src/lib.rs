// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ntm-adapters: the Tool Adapter Framework — a uniform,
//! cached, timeout-bounded boundary to external collaborator processes.

pub mod adapter;
pub mod cache;
pub mod dcg;
pub mod error;
pub mod exec;
pub mod issue_graph;
pub mod issue_tracker;
pub mod mail_bus;
pub mod registry;

pub use adapter::{health_from_availability, AdapterContext, ToolAdapter};
pub use cache::{AvailabilityCache, CLI_TOOL_TTL, DAEMON_TOOL_TTL};
pub use dcg::{DestructiveCommandGuardAdapter, GuardResult, Severity};
pub use error::ToolAdapterError;
pub use exec::{run_bounded, ExecOutput, DEFAULT_OUTPUT_LIMIT, DEFAULT_TIMEOUT};
pub use issue_graph::{Breakdown, IssueGraphAdapter, Recommendation, Triage};
pub use issue_tracker::{Issue, IssueTrackerAdapter};
pub use mail_bus::{
    FetchInboxOptions, MailBusAdapter, Message, SubprocessMailBusAdapter, ThreadSummary,
};
pub use registry::ToolAdapterRegistry;
