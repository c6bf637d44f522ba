//! Keypad event source
//!
//! Maps button clicks and keyboard keys to the tokens the session
//! understands.
//!
//! Layout:
//! ```text
//! [ AC ] [ CE ] [ √ ] [ / ]
//! [ 7  ] [ 8  ] [ 9 ] [ * ]
//! [ 4  ] [ 5  ] [ 6 ] [ - ]
//! [ 1  ] [ 2  ] [ 3 ] [ + ]
//! [ 0  ] [ .  ] [ ^ ] [ = ]
//! ```

use crate::core::input::{keyboard_allows, ALL_CLEAR, CLEAR_ENTRY, EQUALS};
use crate::core::Operator;
use std::fmt::Write as _;

/// What a keypad button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadAction {
    /// Insert a digit (0-9)
    Digit(u8),
    /// Insert a decimal point
    Decimal,
    /// Operator key
    Operator(Operator),
    /// Evaluate
    Equals,
    /// Reset everything
    AllClear,
    /// Clear the live operand
    ClearEntry,
}

impl KeypadAction {
    /// Token fed to the session
    #[must_use]
    pub fn token(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => EQUALS.to_string(),
            Self::AllClear => ALL_CLEAR.to_string(),
            Self::ClearEntry => CLEAR_ENTRY.to_string(),
        }
    }

    /// Button label. Same as the token for every key
    #[must_use]
    pub fn label(&self) -> String {
        self.token()
    }

    fn id(&self) -> String {
        match self {
            Self::Digit(d) => format!("btn-{d}"),
            Self::Decimal => "btn-decimal".to_string(),
            Self::Operator(op) => format!("btn-{}", op_name(*op)),
            Self::Equals => "btn-equals".to_string(),
            Self::AllClear => "btn-ac".to_string(),
            Self::ClearEntry => "btn-ce".to_string(),
        }
    }
}

const fn op_name(op: Operator) -> &'static str {
    match op {
        Operator::Add => "plus",
        Operator::Subtract => "minus",
        Operator::Multiply => "times",
        Operator::Divide => "divide",
        Operator::Power => "power",
        Operator::SquareRoot => "sqrt",
    }
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The action this button performs
    pub action: KeypadAction,
    /// Element ID
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButton {
    /// Creates a button at `row`, `col`
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        Self {
            action,
            id: action.id(),
            row,
            col,
        }
    }
}

/// The calculator keypad
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard 5x4 keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction::{AllClear, ClearEntry, Decimal, Digit, Equals};
        let op = KeypadAction::Operator;
        let grid = [
            [AllClear, ClearEntry, op(Operator::SquareRoot), op(Operator::Divide)],
            [Digit(7), Digit(8), Digit(9), op(Operator::Multiply)],
            [Digit(4), Digit(5), Digit(6), op(Operator::Subtract)],
            [Digit(1), Digit(2), Digit(3), op(Operator::Add)],
            [Digit(0), Decimal, op(Operator::Power), Equals],
        ];

        let buttons = grid
            .iter()
            .enumerate()
            .flat_map(|(row, actions)| {
                actions
                    .iter()
                    .enumerate()
                    .map(move |(col, action)| KeypadButton::new(*action, row, col))
            })
            .collect();

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// All buttons, row by row
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Button at `row`, `col`
    #[must_use]
    pub fn button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Button with element ID `id`
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Token for a click on element `id`
    #[must_use]
    pub fn handle_click(&self, id: &str) -> Option<String> {
        self.find_by_id(id).map(|b| b.action.token())
    }

    /// Token for a keyboard key. Keys outside the keyboard filter are dropped
    #[must_use]
    pub fn key_to_token(key: &str) -> Option<String> {
        match key {
            "Enter" | "=" => return Some(EQUALS.to_string()),
            "Escape" => return Some(ALL_CLEAR.to_string()),
            "Delete" => return Some(CLEAR_ENTRY.to_string()),
            _ => {}
        }
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if keyboard_allows(c) => Some(c.to_string()),
            _ => None,
        }
    }

    /// Renders the keypad as a text grid
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in self.buttons.chunks(self.cols) {
            let line: Vec<String> = row
                .iter()
                .map(|b| format!("[{:^4}]", b.action.label()))
                .collect();
            let _ = writeln!(out, "{}", line.join(" "));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{classify, InputClass};

    #[test]
    fn test_layout() {
        let keypad = Keypad::new();
        assert_eq!(keypad.button_count(), 20);
        assert_eq!(keypad.dimensions(), (5, 4));
        assert_eq!(keypad.button_at(0, 0).unwrap().id, "btn-ac");
        assert_eq!(keypad.button_at(0, 2).unwrap().id, "btn-sqrt");
        assert_eq!(keypad.button_at(1, 0).unwrap().id, "btn-7");
        assert_eq!(keypad.button_at(4, 3).unwrap().id, "btn-equals");
        assert!(keypad.button_at(5, 0).is_none());
        assert!(keypad.button_at(0, 4).is_none());
    }

    #[test]
    fn test_ids_unique() {
        let keypad = Keypad::new();
        let mut ids: Vec<_> = keypad.buttons().iter().map(|b| b.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), keypad.button_count());
    }

    #[test]
    fn test_every_button_token_is_recognized() {
        for button in Keypad::new().buttons() {
            let token = button.action.token();
            assert!(
                classify(&token).is_recognized(),
                "{} produced {token}",
                button.id
            );
        }
    }

    #[test]
    fn test_handle_click() {
        let keypad = Keypad::new();
        assert_eq!(keypad.handle_click("btn-plus").as_deref(), Some("+"));
        assert_eq!(keypad.handle_click("btn-sqrt").as_deref(), Some("√"));
        assert_eq!(keypad.handle_click("btn-ce").as_deref(), Some("CE"));
        assert_eq!(keypad.handle_click("btn-decimal").as_deref(), Some("."));
        assert_eq!(keypad.handle_click("btn-nope"), None);
    }

    #[test]
    fn test_key_to_token() {
        assert_eq!(Keypad::key_to_token("7").as_deref(), Some("7"));
        assert_eq!(Keypad::key_to_token("^").as_deref(), Some("^"));
        assert_eq!(Keypad::key_to_token("-").as_deref(), Some("-"));
        assert_eq!(Keypad::key_to_token("Enter").as_deref(), Some("="));
        assert_eq!(Keypad::key_to_token("Escape").as_deref(), Some("AC"));
        assert_eq!(Keypad::key_to_token("Delete").as_deref(), Some("CE"));
        assert_eq!(Keypad::key_to_token("a"), None);
        assert_eq!(Keypad::key_to_token("%"), None);
        assert_eq!(Keypad::key_to_token("Shift"), None);
    }

    #[test]
    fn test_key_tokens_classify() {
        let token = Keypad::key_to_token("*").unwrap();
        assert_eq!(classify(&token), InputClass::Operator(Operator::Multiply));
    }

    #[test]
    fn test_render() {
        let text = Keypad::new().render();
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().next().unwrap().contains("AC"));
        assert!(text.contains('√'));
    }
}
