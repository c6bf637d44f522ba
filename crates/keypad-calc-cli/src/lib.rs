//! keypad-calc CLI Library
//!
//! Command-line front end for the keypad calculator: one-shot evaluation,
//! an interactive line mode, and access to the saved history.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)] // String building is clear and correct
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, EvalArgs, HistoryArgs};
pub use config::{CliConfig, ColorChoice, Overrides, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{render_display, render_full, render_history};
pub use runner::{expand_tokens, CliSession, Runner};
