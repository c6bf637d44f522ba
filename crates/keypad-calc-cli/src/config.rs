//! CLI configuration

use crate::error::{CliError, CliResult};
use keypad_calc::config::CalcConfig;
use std::path::{Path, PathBuf};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// From the `-q` flag and the `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Log filter used when `RUST_LOG` is unset
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

/// Values given on the command line, applied over file and environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `--endpoint`
    pub endpoint: Option<String>,
    /// `--store`
    pub store: Option<PathBuf>,
    /// `--timeout-ms`
    pub timeout_ms: Option<u64>,
}

/// CLI configuration
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Calculator settings
    pub calc: CalcConfig,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set calculator settings
    #[must_use]
    pub fn with_calc(mut self, calc: CalcConfig) -> Self {
        self.calc = calc;
        self
    }

    /// Resolves calculator settings: defaults, then `file`, then the
    /// process environment, then `overrides`
    pub fn load_calc(file: Option<&Path>, overrides: &Overrides) -> CliResult<CalcConfig> {
        let base = match file {
            Some(path) => CalcConfig::from_yaml_file(path)?,
            None => CalcConfig::default(),
        };
        Self::resolve_calc(base.with_env_overrides()?, overrides)
    }

    /// Applies command-line overrides and validates the result
    pub fn resolve_calc(mut calc: CalcConfig, overrides: &Overrides) -> CliResult<CalcConfig> {
        if let Some(endpoint) = &overrides.endpoint {
            calc.endpoint.clone_from(endpoint);
        }
        if let Some(store) = &overrides.store {
            calc.store_path.clone_from(store);
        }
        if overrides.timeout_ms.is_some() {
            calc.request_timeout_ms = overrides.timeout_ms;
        }
        calc.validate()
            .map_err(|e| CliError::config(e.to_string()))?;
        Ok(calc)
    }
}
