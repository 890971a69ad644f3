//! The process-wide name-to-expression map.
//!
//! There is no lexical scoping: every name lives in one flat map. Reads of an
//! unbound name yield `Expression::Empty`. The map is guarded by a
//! `RwLock` so forked evaluators (spawned by `ASYNC`/`TIMER`) can run
//! concurrently against their own clone without taking a lock shared with
//! the parent.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use ahash::RandomState;

use crate::expression::Expression;

type Map = HashMap<String, Expression, RandomState>;

/// A thread-safe map from identifier to expression.
#[derive(Debug, Clone)]
pub struct Namespace {
    inner: Arc<RwLock<Map>>,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Namespace {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Map::default())),
        }
    }

    /// Reads of unbound names yield `Expression::Empty`.
    #[must_use]
    pub fn get(&self, name: &str) -> Expression {
        self.inner
            .read()
            .expect("namespace lock poisoned")
            .get(name)
            .cloned()
            .unwrap_or(Expression::Empty)
    }

    /// Binds `name` to `value`, clobbering any existing binding. This is also
    /// how placeholder arguments are populated — intentionally, per the
    /// language's "namespace as flat map" design choice.
    pub fn set(&self, name: &str, value: Expression) {
        self.inner
            .write()
            .expect("namespace lock poisoned")
            .insert(name.to_owned(), value);
    }

    pub fn delete(&self, name: &str) {
        self.inner.write().expect("namespace lock poisoned").remove(name);
    }

    /// Produces an independent deep copy of the current bindings, for fork
    /// snapshot isolation. Writes to the clone are never visible to `self`
    /// and vice versa.
    #[must_use]
    pub fn fork(&self) -> Self {
        let snapshot = self.inner.read().expect("namespace lock poisoned").clone();
        Self {
            inner: Arc::new(RwLock::new(snapshot)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_name_reads_as_empty() {
        let ns = Namespace::new();
        assert_eq!(ns.get("nope"), Expression::Empty);
    }

    #[test]
    fn set_then_get_round_trips() {
        let ns = Namespace::new();
        ns.set("x", Expression::Text("hi".into()));
        assert_eq!(ns.get("x"), Expression::Text("hi".into()));
    }

    #[test]
    fn fork_is_isolated_both_directions() {
        let parent = Namespace::new();
        parent.set("x", Expression::Text("before".into()));
        let child = parent.fork();
        child.set("x", Expression::Text("child".into()));
        parent.set("y", Expression::Text("parent-only".into()));
        assert_eq!(parent.get("x"), Expression::Text("before".into()));
        assert_eq!(child.get("x"), Expression::Text("child".into()));
        assert_eq!(child.get("y"), Expression::Empty);
    }

    #[test]
    fn delete_removes_binding() {
        let ns = Namespace::new();
        ns.set("x", Expression::Text("hi".into()));
        ns.delete("x");
        assert_eq!(ns.get("x"), Expression::Empty);
    }
}
