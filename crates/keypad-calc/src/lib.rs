//! Keypad Calculator
//!
//! The engine behind a keypad calculator: every key press is classified,
//! run through a two-phase state machine, and arithmetic is delegated to a
//! remote compute endpoint. Finished computations land in a bounded,
//! persisted history.
//!
//! # Layers
//!
//! - [`core`]: token classification, the pure state machine and history
//! - [`backend`]: the compute seam ([`HttpBackend`](backend::HttpBackend),
//!   [`MockBackend`](backend::MockBackend)) and the failure-swallowing
//!   [`Dispatcher`](backend::Dispatcher)
//! - [`storage`]: key-value stores and the history store on top of them
//! - [`session`]: wires the above together and drops stale results
//! - [`keypad`]: button and keyboard mapping to tokens
//!
//! # Example
//!
//! ```rust
//! use keypad_calc::prelude::*;
//!
//! let mut session = Session::new(MockBackend::new(), MemoryStore::new());
//! for token in ["9", "+", "5"] {
//!     session.press(token);
//! }
//!
//! let Keystroke::Dispatched(ticket) = session.press("=") else {
//!     unreachable!()
//! };
//! assert_eq!(ticket.request().operation.name(), "sum");
//!
//! session.complete(ticket, Some(14.0));
//! assert_eq!(session.display().expression, "14");
//! assert_eq!(session.display().history, vec!["9 + 5 = 14"]);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod backend;
pub mod config;
pub mod core;
pub mod keypad;
pub mod session;
pub mod storage;

pub use session::Session;

/// Prelude for convenient imports
pub mod prelude {
    #[cfg(feature = "http")]
    pub use crate::backend::HttpBackend;
    pub use crate::backend::{ComputeBackend, Dispatcher, MockBackend};
    pub use crate::config::CalcConfig;
    pub use crate::core::history::{History, HistoryEntry, HistoryRecord};
    pub use crate::core::input::{classify, InputClass};
    pub use crate::core::machine::{CalculatorState, ComputationRequest, Phase, Step, NOT_REAL};
    pub use crate::core::{CalcError, CalcResult, Operation, Operator};
    pub use crate::keypad::Keypad;
    pub use crate::session::{Completion, Display, InputOutcome, Keystroke, Session, Ticket};
    pub use crate::storage::{FileStore, HistoryStore, KeyValueStore, MemoryStore};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let state = CalculatorState::new();
        assert_eq!(state.phase(), Phase::AwaitingFirstOperand);
        assert_eq!(classify("AC"), InputClass::AllClear);
        assert_eq!(Keypad::new().button_count(), 20);
    }

    #[test]
    fn test_press_through_prelude() {
        let mut session = Session::new(MockBackend::new(), MemoryStore::new());
        assert_eq!(session.press("4"), Keystroke::Updated);
        let Keystroke::Dispatched(ticket) = session.press("√") else {
            panic!("square root should dispatch");
        };
        assert_eq!(ticket.request().operation, Operation::Sqrt);
        assert_eq!(session.complete(ticket, Some(2.0)), Completion::Applied);
        assert_eq!(session.display().expression, "2");
    }
}
