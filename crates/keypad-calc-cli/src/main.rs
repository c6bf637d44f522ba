//! keypad-calc: keypad calculator on the command line
//!
//! ## Usage
//!
//! ```bash
//! keypad-calc eval 9 + 5 =        # Prints 14 and records "9 + 5 = 14"
//! keypad-calc eval - 4 sqrt       # Not Real!
//! keypad-calc repl                # One line of tokens at a time
//! keypad-calc history --clear     # Wipe saved history
//! ```

use clap::Parser;
use keypad_calc::keypad::Keypad;
use keypad_calc_cli::{Cli, CliConfig, CliResult, Commands, Runner, Verbosity};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    init_tracing(verbosity);

    let config = build_config(&cli, verbosity)?;
    console::set_colors_enabled(config.color.should_color());
    let runner = Runner::new(config);

    match cli.command {
        Commands::Repl => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            runner.repl(stdin, tokio::io::stdout()).await?;
        }
        Commands::Eval(args) => {
            print!("{}", runner.eval_text(&args.tokens).await?);
        }
        Commands::History(args) => {
            if args.clear {
                runner.clear_history()?;
                if !runner.config().verbosity.is_quiet() {
                    println!("History cleared");
                }
            } else {
                print!("{}", runner.history_text()?);
            }
        }
        Commands::Keypad => print!("{}", Keypad::new().render()),
    }
    Ok(())
}

fn build_config(cli: &Cli, verbosity: Verbosity) -> CliResult<CliConfig> {
    let calc = CliConfig::load_calc(cli.config.as_deref(), &cli.overrides())?;
    Ok(CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.clone().into())
        .with_calc(calc))
}

/// Logs go to stderr. `RUST_LOG` wins over `-v`/`-q`
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
