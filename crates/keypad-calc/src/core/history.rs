//! Completed computations, newest first
//!
//! Entries are stored structured (`operand_1`, `operator`, `operand_2`,
//! `result`) and rendered with the space-separated `9 + 5 = 14` layout.
//! Older stores that only kept the rendered string still load.

use crate::core::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A completed computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Left operand, absent for the unary square root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operand_1: Option<String>,
    /// The operator applied
    pub operator: Operator,
    /// Right operand (the radicand for a square root)
    pub operand_2: String,
    /// Result as displayed
    pub result: String,
    /// Pending `operand operator` a square root was taken over, e.g. `9 +`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl HistoryRecord {
    /// A two-operand computation
    #[must_use]
    pub fn binary(
        operand_1: impl Into<String>,
        operator: Operator,
        operand_2: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            operand_1: Some(operand_1.into()),
            operator,
            operand_2: operand_2.into(),
            result: result.into(),
            context: None,
        }
    }

    /// A square root computation
    #[must_use]
    pub fn square_root(radicand: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            operand_1: None,
            operator: Operator::SquareRoot,
            operand_2: radicand.into(),
            result: result.into(),
            context: None,
        }
    }

    /// Attaches the upper line the computation was entered over
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = (!context.is_empty()).then_some(context);
        self
    }

    /// The left-hand side, without ` = result`
    #[must_use]
    pub fn expression(&self) -> String {
        match (&self.operand_1, &self.context) {
            (Some(lhs), _) => format!("{} {} {}", lhs, self.operator, self.operand_2),
            (None, Some(context)) => format!("{} {}{}", context, self.operator, self.operand_2),
            (None, None) => format!("{}{}", self.operator, self.operand_2),
        }
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression(), self.result)
    }
}

/// One stored history line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryEntry {
    /// Structured record
    Computation(HistoryRecord),
    /// Pre-rendered line from a store written before records were structured
    Legacy(String),
}

impl HistoryEntry {
    /// Returns the formatted display string
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }

    /// Returns the structured record, if this entry has one
    #[must_use]
    pub const fn record(&self) -> Option<&HistoryRecord> {
        match self {
            Self::Computation(record) => Some(record),
            Self::Legacy(_) => None,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Computation(record) => record.fmt(f),
            Self::Legacy(line) => f.write_str(line),
        }
    }
}

impl From<HistoryRecord> for HistoryEntry {
    fn from(record: HistoryRecord) -> Self {
        Self::Computation(record)
    }
}

/// Bounded, most-recent-first list of entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    /// Newest at index 0
    entries: Vec<HistoryEntry>,
    /// Maximum number of entries to keep
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum history size
    pub const DEFAULT_MAX_ENTRIES: usize = 10;

    /// Creates an empty history with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }

    /// Creates a history with custom maximum size
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::with_capacity(max_entries.saturating_add(1)),
            max_entries,
        }
    }

    /// Prepends an entry, dropping the oldest ones past capacity
    pub fn push(&mut self, entry: impl Into<HistoryEntry>) {
        self.entries.insert(0, entry.into());
        self.entries.truncate(self.max_entries);
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Clears all history entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates newest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    /// Returns the entry at the given index (0 = newest)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Rendered lines, newest first
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(HistoryEntry::display).collect()
    }

    /// Serializes the history to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Deserializes history from JSON, keeping at most the default capacity
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut entries: Vec<HistoryEntry> = serde_json::from_str(json)?;
        entries.truncate(Self::DEFAULT_MAX_ENTRIES);
        Ok(Self {
            entries,
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        })
    }
}
