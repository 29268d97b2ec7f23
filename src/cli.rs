// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `dagsel`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dagsel",
    version,
    about = "Resolve declarative node selections against a dependency graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the project file (TOML).
    ///
    /// Default: `Dagsel.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Dagsel.toml")]
    pub project: String,

    /// Selection spec to include, e.g. `tag:nightly`, `+model_a+2`,
    /// `@model_b`. Repeat the flag to union specs; commas inside one
    /// spec intersect its atoms. Defaults to everything.
    #[arg(long, short = 's', value_name = "SPEC")]
    pub select: Vec<String>,

    /// Selection spec to subtract from the included set. Repeatable.
    #[arg(long, value_name = "SPEC")]
    pub exclude: Vec<String>,

    /// Include check nodes even when some of their parents are missing
    /// from the selection.
    #[arg(long)]
    pub greedy: bool,

    /// Restrict the result to these resource kinds (model, test, seed,
    /// snapshot, analysis, operation, source, exposure). Repeatable.
    #[arg(long = "resource-kind", value_name = "KIND")]
    pub resource_kind: Vec<String>,

    /// Print dependency-ordered execution waves instead of a flat list.
    #[arg(long)]
    pub queue: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DAGSEL_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
