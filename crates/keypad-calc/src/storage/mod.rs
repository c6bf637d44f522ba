//! Durable key-value storage and the history store built on it

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::core::history::{History, HistoryEntry};
use crate::core::CalcResult;

/// Key the serialized history lives under
pub const HISTORY_KEY: &str = "saved_computations";

/// Key older stores kept plain history strings under. Read only when
/// [`HISTORY_KEY`] is absent
pub const LEGACY_HISTORY_KEY: &str = "savedComp";

/// String key-value storage in the style of browser local storage
pub trait KeyValueStore {
    /// Value stored under `key`
    fn get(&self, key: &str) -> CalcResult<Option<String>>;

    /// Store `value` under `key`
    fn set(&mut self, key: &str, value: &str) -> CalcResult<()>;

    /// Remove every key
    fn clear(&mut self) -> CalcResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> CalcResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> CalcResult<()> {
        (**self).set(key, value)
    }

    fn clear(&mut self) -> CalcResult<()> {
        (**self).clear()
    }
}

/// Bounded history persisted under [`HISTORY_KEY`]
#[derive(Debug)]
pub struct HistoryStore<S> {
    store: S,
    history: History,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Loads the persisted history. Missing or unreadable data starts empty
    pub fn load(store: S) -> Self {
        let saved = match store.get(HISTORY_KEY) {
            Ok(None) => store.get(LEGACY_HISTORY_KEY),
            other => other,
        };
        let history = match saved {
            Ok(Some(json)) => History::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "discarding unreadable history");
                History::new()
            }),
            Ok(None) => History::new(),
            Err(e) => {
                tracing::warn!(error = %e, "history storage unavailable");
                History::new()
            }
        };
        Self { store, history }
    }

    /// Prepends an entry, keeps the newest ten and persists
    pub fn record(&mut self, entry: impl Into<HistoryEntry>) -> CalcResult<()> {
        self.history.push(entry);
        let json = self.history.to_json()?;
        self.store.set(HISTORY_KEY, &json)
    }

    /// Wipes storage and the in-memory list
    pub fn clear(&mut self) -> CalcResult<()> {
        self.history.clear();
        self.store.clear()
    }

    /// The in-memory history
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Rendered lines, newest first
    pub fn lines(&self) -> Vec<String> {
        self.history.lines()
    }

    /// The backing store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Gives the backing store back
    pub fn into_store(self) -> S {
        self.store
    }
}
