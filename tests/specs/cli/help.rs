//! CLI help output specs.

use predicates::str::contains;

use crate::prelude::Sandbox;

#[test]
fn no_args_shows_usage_and_exits_nonzero() {
    let sandbox = Sandbox::new();
    sandbox.cmd().assert().failure().stderr(contains("Usage:"));
}

#[test]
fn help_flag_shows_usage() {
    let sandbox = Sandbox::new();
    sandbox.cmd().arg("--help").assert().success().stdout(contains("Usage:"));
}

#[test]
fn assign_help_shows_its_own_usage() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["assign", "--help"]).assert().success().stdout(contains("--agent-type"));
}

#[test]
fn version_flag_shows_version() {
    let sandbox = Sandbox::new();
    sandbox.cmd().arg("--version").assert().success().stdout(contains("0.1"));
}
