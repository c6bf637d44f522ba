//! CLI command definitions using clap

use crate::config::Overrides;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// keypad-calc: keypad calculator backed by a remote compute endpoint
#[derive(Parser, Debug)]
#[command(name = "keypad-calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// YAML configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Compute endpoint base URL
    #[arg(long, value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// History store file
    #[arg(long, value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,

    /// Per-request timeout in milliseconds
    #[arg(long, value_name = "MS", global = true)]
    pub timeout_ms: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Calculator settings given as flags
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            store: self.store.clone(),
            timeout_ms: self.timeout_ms,
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read tokens from stdin, one line at a time
    Repl,

    /// Feed tokens in order and print the final display
    Eval(EvalArgs),

    /// Print or wipe the saved history
    History(HistoryArgs),

    /// Print the keypad layout
    Keypad,
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Tokens, e.g. `9 + 5 =` or `16 sqrt`
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}

/// Arguments for the history command
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Wipe the saved history
    #[arg(long)]
    pub clear: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
