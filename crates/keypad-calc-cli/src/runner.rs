//! Command execution

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{render_display, render_full, render_history};
use keypad_calc::backend::HttpBackend;
use keypad_calc::core::input::classify;
use keypad_calc::keypad::Keypad;
use keypad_calc::session::{Display, InputOutcome, Session};
use keypad_calc::storage::{FileStore, HistoryStore};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Session talking HTTP and persisting to a file
pub type CliSession = Session<HttpBackend, FileStore>;

/// Splits a line into session tokens.
///
/// Whitespace separates words. A word the classifier or the keyboard map
/// knows (`AC`, `sqrt`, `Enter`) is one token; any other word is split
/// into characters, so `12.5` feeds `1`, `2`, `.`, `5`.
#[must_use]
pub fn expand_tokens<'a>(words: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut tokens = Vec::new();
    for word in words {
        if classify(word).is_recognized() {
            tokens.push(word.to_string());
        } else if word.chars().count() > 1 {
            match Keypad::key_to_token(word) {
                Some(token) => tokens.push(token),
                None => tokens.extend(word.chars().map(String::from)),
            }
        } else {
            tokens.push(word.to_string());
        }
    }
    tokens
}

/// Runs commands against one configuration
#[derive(Debug)]
pub struct Runner {
    config: CliConfig,
}

impl Runner {
    /// Create a runner
    #[must_use]
    pub const fn new(config: CliConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    #[must_use]
    pub const fn config(&self) -> &CliConfig {
        &self.config
    }

    /// Opens the history store and connects the backend
    pub fn session(&self) -> CliResult<CliSession> {
        let calc = &self.config.calc;
        let backend = HttpBackend::from_config(calc)?;
        let store = FileStore::open(&calc.store_path)?;
        tracing::info!(
            endpoint = %calc.endpoint,
            store = %calc.store_path.display(),
            "session ready"
        );
        Ok(Session::new(backend, store))
    }

    /// Feeds `tokens` and returns the final display
    pub async fn eval(&self, tokens: &[String]) -> CliResult<Display> {
        let mut session = self.session()?;
        let tokens = expand_tokens(tokens.iter().map(String::as_str));
        for (token, outcome) in tokens
            .iter()
            .zip(session.input_all(tokens.iter().map(String::as_str)).await)
        {
            log_outcome(token, outcome);
        }
        Ok(session.display())
    }

    /// Reads lines from `input` until EOF, printing the display after each
    pub async fn repl<R, W>(&self, input: R, mut output: W) -> CliResult<Display>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut session = self.session()?;
        let mut lines = input.lines();
        output
            .write_all(render_display(&session.display()).as_bytes())
            .await?;
        while let Some(line) = lines.next_line().await? {
            for token in expand_tokens(line.split_whitespace()) {
                let outcome = session.input(&token).await;
                log_outcome(&token, outcome);
            }
            output
                .write_all(render_display(&session.display()).as_bytes())
                .await?;
            output.flush().await?;
        }
        Ok(session.display())
    }

    /// Persisted history lines, newest first
    pub fn history(&self) -> CliResult<Vec<String>> {
        let store = FileStore::open(&self.config.calc.store_path)?;
        Ok(HistoryStore::load(store).lines())
    }

    /// Wipes persisted history
    pub fn clear_history(&self) -> CliResult<()> {
        let store = FileStore::open(&self.config.calc.store_path)?;
        HistoryStore::load(store).clear()?;
        tracing::info!(store = %self.config.calc.store_path.display(), "history cleared");
        Ok(())
    }

    /// `eval` rendered for the terminal
    pub async fn eval_text(&self, tokens: &[String]) -> CliResult<String> {
        Ok(render_full(&self.eval(tokens).await?))
    }

    /// `history` rendered for the terminal
    pub fn history_text(&self) -> CliResult<String> {
        Ok(render_history(&self.history()?))
    }
}

fn log_outcome(token: &str, outcome: InputOutcome) {
    match outcome {
        InputOutcome::Unrecognized => tracing::info!(token, "ignored unrecognized token"),
        InputOutcome::Rejected => tracing::info!(token, "token not allowed here"),
        InputOutcome::Updated | InputOutcome::Computed(_) => {
            tracing::debug!(token, ?outcome, "token accepted");
        }
    }
}
