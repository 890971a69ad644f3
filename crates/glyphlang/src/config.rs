//! Evaluator construction-time settings.
//!
//! The evaluator is environment-free (§6): it takes an explicit config value
//! rather than reading environment variables itself. Host-side concerns
//! (reading `OPENAI_API_KEY`-style variables, parsing CLI flags) belong to
//! the excluded CLI/REPL front-end.

use std::collections::HashMap;
use std::fmt;

/// When a successful `STORE`/`IMM_STORE` auto-persists to the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum PersistMode {
    /// `PERSIST`/`LOAD` are explicit.
    #[default]
    OnDemand,
    /// Every successful store auto-persists as a new version.
    Always,
    /// `PERSIST` is a no-op.
    Never,
}

impl fmt::Display for PersistMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::OnDemand => "on_demand",
            Self::Always => "always",
            Self::Never => "never",
        };
        f.write_str(s)
    }
}

impl PersistMode {
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "on_demand" => Some(Self::OnDemand),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }
}

/// Construction-time knobs for an `Evaluator`.
///
/// The `SYSTEM` builtin mutates a live settings map seeded from
/// `initial_system_params`; `persist_mode`, `history_limit`, and
/// `recursion_limit` are read by the evaluator core directly.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    pub persist_mode: PersistMode,
    /// Default `limit` for `HISTORY`/`GetHistory` when a builtin invocation
    /// does not specify one.
    pub history_limit: usize,
    /// Ceiling on nested operator-body recursion before evaluation fails
    /// with an evaluation error instead of overflowing the host stack.
    pub recursion_limit: usize,
    /// Initial values for the parameters `SYSTEM` get/sets.
    pub initial_system_params: HashMap<String, String>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        let mut params = HashMap::new();
        params.insert("PERSIST_MODE".to_owned(), PersistMode::default().to_string());
        params.insert("MODEL".to_owned(), String::new());
        params.insert("PROVIDER".to_owned(), String::new());
        params.insert("TEMPERATURE".to_owned(), "0.7".to_owned());
        params.insert("NUM_CTX".to_owned(), "4096".to_owned());
        params.insert("TOP_K".to_owned(), "40".to_owned());
        params.insert("TOP_P".to_owned(), "0.9".to_owned());
        params.insert("MAX_TOKENS".to_owned(), "2048".to_owned());
        params.insert("EMBED_MODEL".to_owned(), String::new());
        params.insert("SEARCH_LIMIT".to_owned(), "10".to_owned());
        params.insert("HISTORY_LIMIT".to_owned(), "0".to_owned());
        Self {
            persist_mode: PersistMode::default(),
            history_limit: 0,
            recursion_limit: 256,
            initial_system_params: params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_persist_mode_is_on_demand() {
        assert_eq!(PersistMode::default(), PersistMode::OnDemand);
    }

    #[test]
    fn persist_mode_parses_known_values_only() {
        assert_eq!(PersistMode::parse("always"), Some(PersistMode::Always));
        assert_eq!(PersistMode::parse("never"), Some(PersistMode::Never));
        assert_eq!(PersistMode::parse("bogus"), None);
    }

    #[test]
    fn default_config_seeds_all_system_parameters() {
        let config = EvaluatorConfig::default();
        for key in [
            "PERSIST_MODE",
            "MODEL",
            "PROVIDER",
            "TEMPERATURE",
            "NUM_CTX",
            "TOP_K",
            "TOP_P",
            "MAX_TOKENS",
            "EMBED_MODEL",
            "SEARCH_LIMIT",
            "HISTORY_LIMIT",
        ] {
            assert!(config.initial_system_params.contains_key(key), "missing {key}");
        }
    }
}
