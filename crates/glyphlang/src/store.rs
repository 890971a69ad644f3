//! The `Store`/`HistoryStore` capability the evaluator persists through.
//!
//! The evaluator never assumes the concrete store is local or synchronous —
//! it only ever calls through these traits. An in-memory reference
//! implementation ships here for tests and for embedding the evaluator
//! without a real backing store; it is the degenerate case of the same
//! trait a real on-disk or networked store would satisfy.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::error::PersistenceError;
use crate::expression::Expression;

/// One recorded version of a stored name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoreVersion {
    pub version: u64,
    pub value: Expression,
    pub timestamp: DateTime<Utc>,
}

/// Get/Put/Delete against the persisted namespace. No evaluator logic lives
/// here — this is pure storage.
pub trait Store: fmt::Debug + Send + Sync {
    fn get(&self, name: &str) -> Result<Expression, PersistenceError>;
    fn put(&self, name: &str, value: Expression) -> Result<(), PersistenceError>;
    fn delete(&self, name: &str) -> Result<(), PersistenceError>;
    fn close(&self) -> Result<(), PersistenceError> {
        Ok(())
    }
}

/// Append-only version history, a capability distinct from plain `Store`
/// because not every backing store needs to retain history.
pub trait HistoryStore: Store {
    /// Versions newest-first. `limit == 0` means all versions.
    fn get_history(&self, name: &str, limit: usize) -> Result<Vec<StoreVersion>, PersistenceError>;
}

/// Reference `Store`/`HistoryStore` implementation backed by an in-memory
/// map of append-only version vectors.
///
/// Per invariant 4: a `put` whose serialised value equals the current head
/// is a no-op (no new version is recorded).
#[derive(Debug, Default)]
pub struct InMemoryStore {
    versions: Mutex<HashMap<String, Vec<StoreVersion>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }
}

impl Store for InMemoryStore {
    fn get(&self, name: &str) -> Result<Expression, PersistenceError> {
        let versions = self.versions.lock().expect("store lock poisoned");
        Ok(versions
            .get(name)
            .and_then(|v| v.last())
            .map(|v| v.value.clone())
            .unwrap_or(Expression::Empty))
    }

    fn put(&self, name: &str, value: Expression) -> Result<(), PersistenceError> {
        let mut versions = self.versions.lock().expect("store lock poisoned");
        let entry = versions.entry(name.to_owned()).or_default();
        if let Some(head) = entry.last() {
            if head.value.to_source() == value.to_source() {
                return Ok(());
            }
        }
        let next_version = entry.last().map_or(1, |v| v.version + 1);
        entry.push(StoreVersion {
            version: next_version,
            value,
            timestamp: Self::now(),
        });
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), PersistenceError> {
        self.versions.lock().expect("store lock poisoned").remove(name);
        Ok(())
    }
}

impl HistoryStore for InMemoryStore {
    fn get_history(&self, name: &str, limit: usize) -> Result<Vec<StoreVersion>, PersistenceError> {
        let versions = self.versions.lock().expect("store lock poisoned");
        let Some(entries) = versions.get(name) else {
            return Ok(vec![]);
        };
        let mut newest_first: Vec<StoreVersion> = entries.iter().rev().cloned().collect();
        if limit > 0 {
            newest_first.truncate(limit);
        }
        Ok(newest_first)
    }
}
