//! Two-phase expression state machine
//!
//! [`CalculatorState`] is a plain value. [`CalculatorState::step`] never
//! mutates it; it returns a [`Step`] describing the next state, or the
//! remote computation that has to finish before a next state exists.
//! A [`PendingComputation`] carries the state it was issued from, so an
//! absent result resolves back to exactly that state.

use crate::core::history::HistoryRecord;
use crate::core::input::{self, InputClass};
use crate::core::{Operation, Operator};
use serde::{Deserialize, Serialize};

/// Shown instead of a number when a square root has no real result
pub const NOT_REAL: &str = "Not Real!";

/// Which operand slot accepts input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Filling the first operand
    #[default]
    AwaitingFirstOperand,
    /// First operand and operator committed, filling the second operand
    AwaitingSecondOperand,
}

/// Snapshot of everything the keypad shows and remembers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalculatorState {
    phase: Phase,
    expression: String,
    upper_expression: String,
    operand_1: Option<String>,
    operand_2: Option<String>,
    operator: Option<Operator>,
    answer_shown: bool,
}

/// Outcome of feeding one token to the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The classifier did not recognize the token
    Unrecognized,
    /// A recognized token whose guard failed; state is unchanged
    Rejected,
    /// Synchronous transition
    Updated(CalculatorState),
    /// A remote computation has to finish first
    Dispatch(PendingComputation),
}

impl Step {
    /// Returns true if the token changed state or started a computation
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Updated(_) | Self::Dispatch(_))
    }
}

/// Request for the compute endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationRequest {
    /// Named remote operation
    pub operation: Operation,
    /// First (or only) operand
    pub operand_1: String,
    /// Second operand, absent for `sqrt`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operand_2: Option<String>,
}

impl ComputationRequest {
    /// A two-operand request
    #[must_use]
    pub fn binary(operator: Operator, operand_1: &str, operand_2: &str) -> Self {
        Self {
            operation: operator.operation(),
            operand_1: operand_1.to_string(),
            operand_2: Some(operand_2.to_string()),
        }
    }

    /// A square root request
    #[must_use]
    pub fn square_root(operand: &str) -> Self {
        Self {
            operation: Operation::Sqrt,
            operand_1: operand.to_string(),
            operand_2: None,
        }
    }

    /// Query parameters, in wire order
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("operand_1", self.operand_1.clone())];
        if let Some(operand_2) = &self.operand_2 {
            params.push(("operand_2", operand_2.clone()));
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Continuation {
    /// `a op b` followed by another operator
    Chain { next: Operator, operand_2: String },
    /// `a op b =`
    Evaluate {
        operand_1: String,
        operator: Operator,
        operand_2: String,
    },
    /// `√a`
    SquareRoot { radicand: String },
}

/// A dispatched computation and what to do with its result
#[derive(Debug, Clone, PartialEq)]
pub struct PendingComputation {
    request: ComputationRequest,
    continuation: Continuation,
    origin: CalculatorState,
}

/// State after a computation resolved
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The state to show next
    pub state: CalculatorState,
    /// Completed computation to append to history
    pub record: Option<HistoryRecord>,
    /// False when no result arrived and `state` is the pre-dispatch state
    pub applied: bool,
}

impl CalculatorState {
    /// Fresh calculator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Live operand text
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Committed part of the computation, shown above the live operand
    #[must_use]
    pub fn upper_expression(&self) -> &str {
        &self.upper_expression
    }

    /// First operand, once committed
    #[must_use]
    pub fn operand_1(&self) -> Option<&str> {
        self.operand_1.as_deref()
    }

    /// Second operand, once committed
    #[must_use]
    pub fn operand_2(&self) -> Option<&str> {
        self.operand_2.as_deref()
    }

    /// Pending operator
    #[must_use]
    pub const fn operator(&self) -> Option<Operator> {
        self.operator
    }

    /// True while the expression holds a computed result
    #[must_use]
    pub const fn answer_shown(&self) -> bool {
        self.answer_shown
    }

    /// Classifies `token` and steps
    #[must_use]
    pub fn feed(&self, token: &str) -> Step {
        self.step(input::classify(token))
    }

    /// The transition function
    #[must_use]
    pub fn step(&self, input: InputClass) -> Step {
        match input {
            InputClass::Unrecognized => Step::Unrecognized,
            InputClass::AllClear => Step::Updated(Self::default()),
            InputClass::ClearEntry => {
                let mut next = self.clone();
                next.expression.clear();
                Step::Updated(next)
            }
            InputClass::Operand(c) => self.append(c),
            InputClass::Operator(op) if self.operator_allowed() => self.commit_operator(op),
            // '-' doubles as the sign of a new operand
            InputClass::Operator(Operator::Subtract) => self.append('-'),
            InputClass::Operator(_) => Step::Rejected,
            InputClass::Equals => self.evaluate(),
        }
    }

    fn operator_allowed(&self) -> bool {
        !self.answer_shown && input::is_complete_operand(&self.expression)
    }

    fn append(&self, c: char) -> Step {
        let mut next = self.clone();
        let cleared = next.answer_shown;
        if cleared {
            next.expression.clear();
            next.answer_shown = false;
        }

        if input::can_append(&next.expression, c) {
            next.expression.push(c);
            Step::Updated(next)
        } else if cleared {
            Step::Updated(next)
        } else {
            Step::Rejected
        }
    }

    fn commit_operator(&self, op: Operator) -> Step {
        if op.is_unary() {
            return self.dispatch(
                ComputationRequest::square_root(&self.expression),
                Continuation::SquareRoot {
                    radicand: self.expression.clone(),
                },
            );
        }

        match (self.phase, self.operator, self.operand_1.as_deref()) {
            (Phase::AwaitingSecondOperand, Some(pending), Some(lhs)) => self.dispatch(
                ComputationRequest::binary(pending, lhs, &self.expression),
                Continuation::Chain {
                    next: op,
                    operand_2: self.expression.clone(),
                },
            ),
            (Phase::AwaitingSecondOperand, _, _) => Step::Rejected,
            (Phase::AwaitingFirstOperand, _, _) => {
                let mut next = self.clone();
                next.upper_expression = format!("{} {}", self.expression, op);
                next.operand_1 = Some(std::mem::take(&mut next.expression));
                next.operand_2 = None;
                next.operator = Some(op);
                next.phase = Phase::AwaitingSecondOperand;
                Step::Updated(next)
            }
        }
    }

    fn evaluate(&self) -> Step {
        if self.phase != Phase::AwaitingSecondOperand
            || !input::is_complete_operand(&self.expression)
        {
            return Step::Rejected;
        }
        let (Some(op), Some(lhs)) = (self.operator, self.operand_1.as_deref()) else {
            return Step::Rejected;
        };

        self.dispatch(
            ComputationRequest::binary(op, lhs, &self.expression),
            Continuation::Evaluate {
                operand_1: lhs.to_string(),
                operator: op,
                operand_2: self.expression.clone(),
            },
        )
    }

    fn dispatch(&self, request: ComputationRequest, continuation: Continuation) -> Step {
        Step::Dispatch(PendingComputation {
            request,
            continuation,
            origin: self.clone(),
        })
    }

    fn showing_answer(answer: String) -> Self {
        Self {
            expression: answer,
            answer_shown: true,
            ..Self::default()
        }
    }
}

impl PendingComputation {
    /// The request to send
    #[must_use]
    pub const fn request(&self) -> &ComputationRequest {
        &self.request
    }

    /// The state the computation was issued from
    #[must_use]
    pub const fn origin(&self) -> &CalculatorState {
        &self.origin
    }

    /// Upper line while the request is in flight
    #[must_use]
    pub fn in_flight_upper(&self) -> String {
        match &self.continuation {
            Continuation::Evaluate { operand_2, .. } => {
                format!("{} {}", self.origin.upper_expression, operand_2)
            }
            Continuation::Chain { .. } => self.origin.upper_expression.clone(),
            Continuation::SquareRoot { radicand } => {
                let root = format!("{}{}", Operator::SquareRoot, radicand);
                if self.origin.upper_expression.is_empty() {
                    root
                } else {
                    format!("{} {root}", self.origin.upper_expression)
                }
            }
        }
    }

    /// Applies the computation result. `None` means no result arrived
    #[must_use]
    pub fn resolve(self, result: Option<f64>) -> Resolution {
        let Some(value) = result else {
            return Resolution {
                state: self.origin,
                record: None,
                applied: false,
            };
        };

        let (state, record) = match self.continuation {
            Continuation::Chain { next, operand_2 } => {
                let answer = format_result(value);
                let state = CalculatorState {
                    phase: Phase::AwaitingSecondOperand,
                    upper_expression: format!("{answer} {next}"),
                    operand_1: Some(answer.clone()),
                    operand_2: Some(operand_2),
                    operator: Some(next),
                    expression: answer,
                    answer_shown: true,
                };
                (state, None)
            }
            Continuation::Evaluate {
                operand_1,
                operator,
                operand_2,
            } => {
                let answer = format_result(value);
                let record = HistoryRecord::binary(operand_1, operator, operand_2, answer.clone());
                (CalculatorState::showing_answer(answer), Some(record))
            }
            Continuation::SquareRoot { radicand } => {
                let answer = if value.is_nan() {
                    NOT_REAL.to_string()
                } else {
                    format_result(value)
                };
                let record = HistoryRecord::square_root(radicand, answer.clone())
                    .with_context(self.origin.upper_expression);
                (CalculatorState::showing_answer(answer), Some(record))
            }
        };

        Resolution {
            state,
            record,
            applied: true,
        }
    }
}

/// Formats a remote result the way the display shows it
#[must_use]
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}
