//! Operator tokens and the remote operations they map to

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six operator keys on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    #[serde(rename = "+")]
    Add,
    /// Subtraction (-)
    #[serde(rename = "-")]
    Subtract,
    /// Multiplication (*)
    #[serde(rename = "*")]
    Multiply,
    /// Division (/)
    #[serde(rename = "/")]
    Divide,
    /// Power (^)
    #[serde(rename = "^")]
    Power,
    /// Square root (√), the only unary operator
    #[serde(rename = "√")]
    SquareRoot,
}

impl Operator {
    /// Every operator, in keypad order
    pub const ALL: [Self; 6] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::SquareRoot,
    ];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Power => '^',
            Self::SquareRoot => '√',
        }
    }

    /// Parses an operator symbol
    #[must_use]
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '^' => Some(Self::Power),
            '√' => Some(Self::SquareRoot),
            _ => None,
        }
    }

    /// Returns true for the single-operand square root
    #[must_use]
    pub const fn is_unary(&self) -> bool {
        matches!(self, Self::SquareRoot)
    }

    /// The remote operation that evaluates this operator
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Add => Operation::Sum,
            Self::Subtract => Operation::Subtract,
            Self::Multiply => Operation::Multiply,
            Self::Divide => Operation::Divide,
            Self::Power => Operation::Pow,
            Self::SquareRoot => Operation::Sqrt,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Named operation understood by the compute endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// operand_1 + operand_2
    Sum,
    /// operand_1 - operand_2
    Subtract,
    /// operand_1 * operand_2
    Multiply,
    /// operand_1 / operand_2
    Divide,
    /// operand_1 ^ operand_2
    Pow,
    /// √operand_1
    Sqrt,
}

impl Operation {
    /// Endpoint name used in the request path
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Pow => "pow",
            Self::Sqrt => "sqrt",
        }
    }

    /// Number of operands the endpoint expects
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            Self::Sqrt => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
