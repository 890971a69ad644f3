//! Live `SYSTEM` parameters: provider/model/generation knobs the `SYSTEM`
//! builtin gets and sets at runtime.
//!
//! Unlike the namespace, settings are not fork-isolated: an async task forked
//! off the same evaluator observes (and can mutate) the same live settings as
//! its parent, since they describe the provider/runtime configuration rather
//! than program data.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use ahash::RandomState;

type Map = HashMap<String, String, RandomState>;

/// Thread-safe, shared map of the `SYSTEM`-adjustable parameters.
#[derive(Debug, Clone)]
pub struct Settings {
    inner: Arc<RwLock<Map>>,
}

impl Settings {
    #[must_use]
    pub fn seeded(initial: HashMap<String, String>) -> Self {
        let mut map = Map::default();
        map.extend(initial);
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.read().expect("settings lock poisoned").get(key).cloned()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.inner.write().expect("settings lock poisoned").insert(key.to_owned(), value.into());
    }
}
