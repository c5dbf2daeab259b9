// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting shared by every subcommand: a `--output text|json`
//! switch.

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Prints `value` as pretty JSON when `format` is [`OutputFormat::Json`],
/// otherwise invokes `render_text` for the human-readable rendering.
pub fn emit<T: Serialize>(format: OutputFormat, value: &T, render_text: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => println!("{}", render_text(value)),
    }
    Ok(())
}
