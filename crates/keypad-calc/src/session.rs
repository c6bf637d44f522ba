//! Calculator session
//!
//! Owns the current [`CalculatorState`], the dispatcher and the history
//! store, and threads every token through the pure transition function.
//!
//! Each accepted token bumps a generation counter. A dispatched
//! computation remembers the generation it was issued at; when its result
//! comes back after newer input was accepted, the result is discarded.

use crate::backend::{ComputeBackend, Dispatcher};
use crate::core::machine::{CalculatorState, ComputationRequest, PendingComputation, Step};
use crate::core::CalcResult;
use crate::storage::{HistoryStore, KeyValueStore};

/// What the keypad shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Display {
    /// Committed part of the computation
    pub upper: String,
    /// Live operand or last answer
    pub expression: String,
    /// Rendered history, newest first
    pub history: Vec<String>,
}

/// A computation waiting for its result
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    generation: u64,
    pending: PendingComputation,
}

impl Ticket {
    /// The request to send
    #[must_use]
    pub const fn request(&self) -> &ComputationRequest {
        self.pending.request()
    }

    /// Generation the request was issued at
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Immediate effect of pressing a key
#[derive(Debug, Clone, PartialEq)]
pub enum Keystroke {
    /// Token not recognized
    Unrecognized,
    /// Token recognized but not allowed right now
    Rejected,
    /// State changed
    Updated,
    /// A computation has to run; pass the ticket to [`Session::complete`]
    Dispatched(Ticket),
}

/// How a computation result was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Result applied to the display
    Applied,
    /// No result arrived; display unchanged
    NoResult,
    /// Newer input was accepted meanwhile; result discarded
    Stale,
}

/// End-to-end effect of [`Session::input`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Token not recognized
    Unrecognized,
    /// Token recognized but not allowed right now
    Rejected,
    /// State changed without a computation
    Updated,
    /// A computation ran
    Computed(Completion),
}

/// A calculator wired to a compute backend and a history store
#[derive(Debug)]
pub struct Session<B, S> {
    state: CalculatorState,
    generation: u64,
    in_flight_upper: Option<String>,
    dispatcher: Dispatcher<B>,
    history: HistoryStore<S>,
}

impl<B: ComputeBackend, S: KeyValueStore> Session<B, S> {
    /// Creates a session, loading history from `store`
    pub fn new(backend: B, store: S) -> Self {
        let history = HistoryStore::load(store);
        tracing::debug!(entries = history.history().len(), "session started");
        Self {
            state: CalculatorState::new(),
            generation: 0,
            in_flight_upper: None,
            dispatcher: Dispatcher::new(backend),
            history,
        }
    }

    /// Current state
    pub const fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Current generation
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// History store
    pub const fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    /// Dispatcher
    pub const fn dispatcher(&self) -> &Dispatcher<B> {
        &self.dispatcher
    }

    /// What the keypad should show
    pub fn display(&self) -> Display {
        Display {
            upper: self
                .in_flight_upper
                .clone()
                .unwrap_or_else(|| self.state.upper_expression().to_string()),
            expression: self.state.expression().to_string(),
            history: self.history.lines(),
        }
    }

    /// Feeds one token without waiting on any computation
    pub fn press(&mut self, token: &str) -> Keystroke {
        match self.state.feed(token) {
            Step::Unrecognized => {
                tracing::debug!(token, "unrecognized token");
                Keystroke::Unrecognized
            }
            Step::Rejected => {
                tracing::debug!(token, "token rejected");
                Keystroke::Rejected
            }
            Step::Updated(next) => {
                self.generation += 1;
                self.in_flight_upper = None;
                self.state = next;
                Keystroke::Updated
            }
            Step::Dispatch(pending) => {
                self.generation += 1;
                self.in_flight_upper = Some(pending.in_flight_upper());
                Keystroke::Dispatched(Ticket {
                    generation: self.generation,
                    pending,
                })
            }
        }
    }

    /// Applies the result of a dispatched computation
    pub fn complete(&mut self, ticket: Ticket, result: Option<f64>) -> Completion {
        if ticket.generation != self.generation {
            tracing::warn!(
                issued = ticket.generation,
                current = self.generation,
                "discarding stale computation result"
            );
            return Completion::Stale;
        }
        self.in_flight_upper = None;

        let resolution = ticket.pending.resolve(result);
        if !resolution.applied {
            return Completion::NoResult;
        }

        self.generation += 1;
        self.state = resolution.state;
        if let Some(record) = resolution.record {
            if let Err(e) = self.history.record(record) {
                tracing::warn!(error = %e, "failed to persist history");
            }
        }
        Completion::Applied
    }

    /// Feeds one token and, if it starts a computation, waits for it
    pub async fn input(&mut self, token: &str) -> InputOutcome {
        match self.press(token) {
            Keystroke::Unrecognized => InputOutcome::Unrecognized,
            Keystroke::Rejected => InputOutcome::Rejected,
            Keystroke::Updated => InputOutcome::Updated,
            Keystroke::Dispatched(ticket) => {
                let result = self.dispatcher.dispatch(ticket.request()).await;
                InputOutcome::Computed(self.complete(ticket, result))
            }
        }
    }

    /// Feeds tokens in order
    pub async fn input_all<'a>(
        &mut self,
        tokens: impl IntoIterator<Item = &'a str>,
    ) -> Vec<InputOutcome> {
        let mut outcomes = Vec::new();
        for token in tokens {
            outcomes.push(self.input(token).await);
        }
        outcomes
    }

    /// Wipes persisted and in-memory history
    pub fn clear_history(&mut self) -> CalcResult<()> {
        self.history.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::core::machine::{Phase, NOT_REAL};
    use crate::core::Operator;
    use crate::storage::MemoryStore;

    fn session(backend: &MockBackend) -> Session<MockBackend, MemoryStore> {
        Session::new(backend.clone(), MemoryStore::new())
    }

    #[tokio::test]
    async fn test_sum_and_equals() {
        let backend = MockBackend::with_results([14.0]);
        let mut session = session(&backend);

        session.input_all(["9", "+", "5", "="]).await;

        let display = session.display();
        assert_eq!(display.expression, "14");
        assert_eq!(display.upper, "");
        assert_eq!(display.history[0], "9 + 5 = 14");
        assert_eq!(session.state().phase(), Phase::AwaitingFirstOperand);
        assert_eq!(backend.requests()[0].operation.name(), "sum");
    }

    #[tokio::test]
    async fn test_chained_operator() {
        let backend = MockBackend::with_results([14.0]);
        let mut session = session(&backend);

        let outcomes = session.input_all(["9", "+", "5", "-"]).await;
        assert_eq!(outcomes[3], InputOutcome::Computed(Completion::Applied));

        let state = session.state();
        assert_eq!(state.upper_expression(), "14 -");
        assert_eq!(state.operand_1(), Some("14"));
        assert_eq!(state.operator(), Some(Operator::Subtract));
        assert_eq!(state.phase(), Phase::AwaitingSecondOperand);
        assert!(session.display().history.is_empty());
    }

    #[tokio::test]
    async fn test_square_root_not_real() {
        let backend = MockBackend::with_results([f64::NAN]);
        let mut session = session(&backend);

        session.input_all(["-", "4", "√"]).await;

        assert_eq!(session.display().expression, NOT_REAL);
        assert!(session.display().history[0].contains("√-4"));
    }

    #[test]
    fn test_square_root_over_pending_operator() {
        let backend = MockBackend::new();
        let mut session = session(&backend);
        for token in ["9", "+", "1", "6"] {
            session.press(token);
        }

        let Keystroke::Dispatched(ticket) = session.press("√") else {
            panic!("square root should dispatch");
        };
        assert_eq!(session.display().upper, "9 + √16");

        assert_eq!(session.complete(ticket, Some(4.0)), Completion::Applied);
        let display = session.display();
        assert_eq!(display.upper, "");
        assert_eq!(display.expression, "4");
        assert_eq!(display.history, vec!["9 + √16 = 4"]);
    }

    #[tokio::test]
    async fn test_backend_failure_changes_nothing() {
        let backend = MockBackend::new();
        backend.push_failure("connection reset");
        let mut session = session(&backend);

        session.input_all(["9", "+", "5"]).await;
        let before = session.state().clone();
        let outcome = session.input("=").await;

        assert_eq!(outcome, InputOutcome::Computed(Completion::NoResult));
        assert_eq!(session.state(), &before);
        assert_eq!(session.display().expression, "5");
        assert_eq!(session.display().upper, "9 +");
        assert!(session.display().history.is_empty());
    }

    #[tokio::test]
    async fn test_unrecognized_and_rejected() {
        let backend = MockBackend::new();
        let mut session = session(&backend);

        assert_eq!(session.input("%").await, InputOutcome::Unrecognized);
        assert_eq!(session.input("+").await, InputOutcome::Rejected);
        assert_eq!(session.generation(), 0);
        assert!(backend.requests().is_empty());
    }

    #[test]
    fn test_stale_result_discarded() {
        let backend = MockBackend::new();
        let mut session = session(&backend);
        for token in ["9", "+", "5"] {
            session.press(token);
        }

        let Keystroke::Dispatched(ticket) = session.press("=") else {
            panic!("equals should dispatch");
        };
        assert_eq!(session.display().upper, "9 + 5");

        // more typing while the request is in flight
        assert_eq!(session.press("CE"), Keystroke::Updated);
        assert_eq!(session.press("7"), Keystroke::Updated);

        assert_eq!(session.complete(ticket, Some(14.0)), Completion::Stale);
        assert_eq!(session.display().expression, "7");
        assert!(session.display().history.is_empty());
    }

    #[test]
    fn test_latest_dispatch_wins() {
        let backend = MockBackend::new();
        let mut session = session(&backend);
        for token in ["2", "^", "3"] {
            session.press(token);
        }
        let Keystroke::Dispatched(first) = session.press("=") else {
            panic!("equals should dispatch");
        };
        let Keystroke::Dispatched(second) = session.press("=") else {
            panic!("equals should dispatch again");
        };
        assert!(second.generation() > first.generation());

        assert_eq!(session.complete(first, Some(8.0)), Completion::Stale);
        assert_eq!(session.complete(second, Some(8.0)), Completion::Applied);
        assert_eq!(session.display().history, vec!["2 ^ 3 = 8"]);
    }

    #[tokio::test]
    async fn test_all_clear_keeps_history() {
        let backend = MockBackend::with_results([6.0]);
        let mut session = session(&backend);
        session.input_all(["2", "*", "3", "=", "AC"]).await;

        assert_eq!(session.state(), &CalculatorState::new());
        assert_eq!(session.display().history, vec!["2 * 3 = 6"]);
    }

    #[tokio::test]
    async fn test_history_survives_new_session() {
        let backend = MockBackend::with_results([4.0]);
        let mut first = session(&backend);
        first.input_all(["1", "6", "sqrt"]).await;

        let store = first.history.into_store();
        let second = Session::new(backend, store);
        assert_eq!(second.display().history, vec!["√16 = 4"]);
    }

    #[tokio::test]
    async fn test_clear_history() {
        let backend = MockBackend::with_results([2.0]);
        let mut session = session(&backend);
        session.input_all(["1", "+", "1", "="]).await;
        session.clear_history().unwrap();
        assert!(session.display().history.is_empty());
    }
}
