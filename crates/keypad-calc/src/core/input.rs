//! Input classification and operand patterns
//!
//! Every token that reaches the state machine goes through [`classify`]
//! first. Tokens are single characters (`7`, `.`, `+`, `√`) or named
//! control tokens (`=`, `AC`, `CE`).

use crate::core::Operator;
use regex::Regex;
use std::sync::OnceLock;

/// Named token that evaluates the pending expression
pub const EQUALS: &str = "=";
/// Named token that resets the whole calculator
pub const ALL_CLEAR: &str = "AC";
/// Named token that clears the live expression only
pub const CLEAR_ENTRY: &str = "CE";

const COMPLETE_OPERAND: &str = r"^-?([0-9]*[.])?[0-9]+$";
const PARTIAL_OPERAND: &str = r"^-?([0-9]*[.])?[0-9]+$|^-?([0-9]*[.])$|^-$";
const KEYBOARD_ALLOWED: &str = r"[0-9]|[/.+*^-]";

/// Outcome of classifying one input token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputClass {
    /// Digit or decimal point, appended to the live operand
    Operand(char),
    /// Operator key. `-` lands here and falls back to a sign when the
    /// operator cannot be committed
    Operator(Operator),
    /// `=`
    Equals,
    /// `AC`
    AllClear,
    /// `CE`
    ClearEntry,
    /// Anything else. Dropped without touching state
    Unrecognized,
}

impl InputClass {
    /// Returns true unless the token was unrecognized
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}

/// Classifies a single input token
#[must_use]
pub fn classify(token: &str) -> InputClass {
    let token = token.trim();
    match token {
        EQUALS => return InputClass::Equals,
        ALL_CLEAR => return InputClass::AllClear,
        CLEAR_ENTRY => return InputClass::ClearEntry,
        "sqrt" => return InputClass::Operator(Operator::SquareRoot),
        _ => {}
    }

    let mut chars = token.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return InputClass::Unrecognized;
    };

    if c.is_ascii_digit() || c == '.' {
        InputClass::Operand(c)
    } else if let Some(op) = Operator::from_symbol(c) {
        InputClass::Operator(op)
    } else {
        InputClass::Unrecognized
    }
}

/// Returns true if `c` is a character an operand may contain
#[must_use]
pub const fn is_operand_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}

fn complete_operand() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(COMPLETE_OPERAND).expect("static operand pattern"))
}

fn partial_operand() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PARTIAL_OPERAND).expect("static partial pattern"))
}

fn keyboard_allowed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(KEYBOARD_ALLOWED).expect("static keyboard pattern"))
}

/// Returns true if `text` is a syntactically complete operand (`-1.5`, `.5`, `42`)
#[must_use]
pub fn is_complete_operand(text: &str) -> bool {
    complete_operand().is_match(text)
}

/// Returns true if `text` is empty or a prefix of some complete operand
#[must_use]
pub fn is_partial_operand(text: &str) -> bool {
    text.is_empty() || partial_operand().is_match(text)
}

/// Returns true if appending `c` to `expression` keeps it a partial operand
#[must_use]
pub fn can_append(expression: &str, c: char) -> bool {
    if !is_operand_char(c) {
        return false;
    }
    let mut candidate = String::with_capacity(expression.len() + c.len_utf8());
    candidate.push_str(expression);
    candidate.push(c);
    partial_operand().is_match(&candidate)
}

/// Keyboard pre-filter: only digits, `.` and `/ + * ^ -` get through
#[must_use]
pub fn keyboard_allows(c: char) -> bool {
    let mut buf = [0u8; 4];
    keyboard_allowed().is_match(c.encode_utf8(&mut buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_digits_and_decimal() {
        for c in '0'..='9' {
            assert_eq!(classify(&c.to_string()), InputClass::Operand(c));
        }
        assert_eq!(classify("."), InputClass::Operand('.'));
    }

    #[test]
    fn test_classify_operators() {
        assert_eq!(classify("+"), InputClass::Operator(Operator::Add));
        assert_eq!(classify("-"), InputClass::Operator(Operator::Subtract));
        assert_eq!(classify("*"), InputClass::Operator(Operator::Multiply));
        assert_eq!(classify("/"), InputClass::Operator(Operator::Divide));
        assert_eq!(classify("^"), InputClass::Operator(Operator::Power));
        assert_eq!(classify("√"), InputClass::Operator(Operator::SquareRoot));
        assert_eq!(classify("sqrt"), InputClass::Operator(Operator::SquareRoot));
    }

    #[test]
    fn test_classify_controls() {
        assert_eq!(classify("="), InputClass::Equals);
        assert_eq!(classify("AC"), InputClass::AllClear);
        assert_eq!(classify("CE"), InputClass::ClearEntry);
        assert_eq!(classify(" = "), InputClass::Equals);
    }

    #[test]
    fn test_classify_unrecognized() {
        for token in ["", "%", "(", "x", "12", "ac", "Enter"] {
            assert_eq!(classify(token), InputClass::Unrecognized, "{token:?}");
            assert!(!classify(token).is_recognized());
        }
    }

    #[test]
    fn test_complete_operands() {
        for s in ["0", "42", "-7", "3.14", ".5", "-.5", "-0.25"] {
            assert!(is_complete_operand(s), "{s}");
        }
        for s in ["", "-", ".", "5.", "-5.", "1.2.3", "--1", "1-"] {
            assert!(!is_complete_operand(s), "{s}");
        }
    }

    #[test]
    fn test_partial_operands() {
        for s in ["", "-", ".", "-.", "5.", "-5.", "12.5", "-3"] {
            assert!(is_partial_operand(s), "{s}");
        }
        for s in ["..", "1.2.", "--", "5-", "-.-"] {
            assert!(!is_partial_operand(s), "{s}");
        }
    }

    #[test]
    fn test_can_append() {
        assert!(can_append("", '-'));
        assert!(can_append("", '.'));
        assert!(can_append("-", '4'));
        assert!(can_append("1.", '5'));
        assert!(!can_append("1.5", '.'));
        assert!(!can_append("4", '-'));
        assert!(!can_append("-", '-'));
        assert!(!can_append("4", '+'));
    }

    #[test]
    fn test_keyboard_filter() {
        for c in "0123456789./+*^-".chars() {
            assert!(keyboard_allows(c), "{c}");
        }
        for c in ['a', '=', '√', '%', ' ', '('] {
            assert!(!keyboard_allows(c), "{c}");
        }
    }

    #[test]
    fn test_unicode_digits_are_not_operands() {
        assert_eq!(classify("٣"), InputClass::Unrecognized);
        assert!(!is_complete_operand("٣"));
    }
}
