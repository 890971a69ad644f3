//! The LLM provider capability the evaluator consumes.
//!
//! Concrete provider clients (HTTP transport, streaming, retry policy) are
//! out of scope for this crate; only the trait surface the `PROMPT`,
//! `GENERATE`, and `SYSTEM` builtins call through lives here.

use std::fmt;

use crate::error::EvaluationError;

/// Minimal chat-completion capability: a system/user split in, text out.
pub trait LlmProvider: fmt::Debug + Send + Sync {
    fn prompt(&self, system: &str, user: &str) -> Result<String, EvaluationError>;

    /// Exposes this provider's [`Configurable`] facet, if it has one. A
    /// provider switch (`▶SYSTEM PROVIDER …◆`) uses this to carry the live
    /// inference parameters over onto the freshly built provider.
    fn as_configurable(&self) -> Option<&dyn Configurable> {
        None
    }
}

/// Optional capability for providers whose parameters (model, temperature,
/// …) can be read and mutated live, e.g. by `▶SYSTEM MODEL llama3◆`.
pub trait Configurable: fmt::Debug {
    fn get_param(&self, key: &str) -> Option<String>;
    fn set_param(&self, key: &str, value: &str);
    fn get_model(&self) -> String;
    fn set_model(&self, model: &str);
    fn provider_name(&self) -> &str;
}

/// Optional capability for providers that can embed text into vectors.
pub trait EmbeddingProvider: fmt::Debug + Send + Sync {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EvaluationError>;
}

/// A named constructor for a provider, so `▶SYSTEM PROVIDER openai◆` can
/// switch the live provider while carrying over inference parameters that
/// were already set.
pub trait ProviderFactory: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
    fn build(&self) -> Result<Box<dyn LlmProvider>, EvaluationError>;
}
