//! CLI argument definitions for the field mapper.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "fieldmap",
    version,
    about = "Classify spreadsheet column names into a canonical schema",
    long_about = "Classify spreadsheet column names into canonical snake_case identifiers\n\
                  with business group, data kind, analytic role and aggregation.\n\n\
                  Names are resolved from curated mappings, priority-ranked pattern rules\n\
                  and a phrase dictionary, then scored by the quality validator."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include raw sample cell values in log output.
    ///
    /// Samples may hold customer data, so they are redacted by default.
    #[arg(long = "log-samples", global = true)]
    pub log_samples: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify field names and print the resulting schema.
    Classify(ClassifyArgs),

    /// Score previously classified entries.
    Validate(ValidateArgs),

    /// List the pattern rules in evaluation order.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Field names to classify.
    #[arg(value_name = "NAMES")]
    pub names: Vec<String>,

    /// Batch file: a JSON array of names or `{"name", "samples"}` objects.
    #[arg(long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Mapping directory (default: $FIELDMAP_MAPPINGS_DIR or ./field_mappings).
    #[arg(long = "mappings", value_name = "DIR")]
    pub mappings: Option<PathBuf>,

    /// Rule set override file (JSON).
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Skip the built-in curated mappings.
    #[arg(long = "no-seed")]
    pub no_seed: bool,

    /// Save resolved entries to custom.json in the mapping directory.
    #[arg(long = "learn")]
    pub learn: bool,

    /// Write the classification batch as JSON.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Score the resolved entries as well.
    #[arg(long = "validate")]
    pub validate: bool,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// JSON array of classified entries.
    #[arg(value_name = "ENTRIES_JSON")]
    pub entries: PathBuf,

    /// Rule set override file (JSON).
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Write the validation report as JSON.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Rule set override file (JSON).
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
