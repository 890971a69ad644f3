//! Corpus registry: in-process handle bookkeeping only.
//!
//! The registry tracks named corpora, their members, and whether a textual
//! or vector index has been built. Building and querying the actual index —
//! substring/token search, embedding storage, vector similarity — is
//! delegated entirely to the injected `CorpusStore`; the registry itself
//! holds no search logic.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use ahash::RandomState;
use indexmap::IndexSet;

use crate::error::EvaluationError;

/// The capability a concrete search/embedding backend implements.
pub trait CorpusStore: fmt::Debug + Send + Sync {
    fn create_corpus(&self, corpus: &str) -> Result<(), EvaluationError>;
    fn add_member(&self, corpus: &str, member: &str, text: &str) -> Result<(), EvaluationError>;
    fn build_text_index(&self, corpus: &str) -> Result<(), EvaluationError>;
    fn search_text(&self, corpus: &str, query: &str, limit: usize) -> Result<Vec<String>, EvaluationError>;
    fn put_embedding(&self, corpus: &str, member: &str, vector: Vec<f32>) -> Result<(), EvaluationError>;
    fn get_embedding(&self, corpus: &str, member: &str) -> Result<Option<Vec<f32>>, EvaluationError>;
    fn similar(&self, corpus: &str, vector: &[f32], limit: usize) -> Result<Vec<String>, EvaluationError>;
    fn load_vector_index(&self, corpus: &str) -> Result<Option<Vec<u8>>, EvaluationError>;
    fn save_vector_index(&self, corpus: &str, blob: &[u8]) -> Result<(), EvaluationError>;
}

/// In-process bookkeeping for one corpus: its members and which indices have
/// been built over them. No search state lives here.
///
/// Members are an `IndexSet` rather than a plain set: `ADD` order is part of
/// a corpus's observable identity (e.g. it determines tie-breaking order for
/// a `CorpusStore` that ranks by insertion when scores are equal).
#[derive(Debug, Clone, Default)]
pub struct CorpusHandle {
    pub members: IndexSet<String, RandomState>,
    pub text_indexed: bool,
    pub vector_indexed: bool,
}

/// The handle table. Thread-safe so forked evaluators can register and query
/// corpora concurrently; actual content lives in the injected `CorpusStore`.
#[derive(Debug, Default)]
pub struct CorpusRegistry {
    handles: RwLock<HashMap<String, CorpusHandle, RandomState>>,
}

impl CorpusRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, corpus: &str) {
        self.handles
            .write()
            .expect("corpus registry lock poisoned")
            .entry(corpus.to_owned())
            .or_default();
    }

    pub fn add_member(&self, corpus: &str, member: &str) {
        self.handles
            .write()
            .expect("corpus registry lock poisoned")
            .entry(corpus.to_owned())
            .or_default()
            .members
            .insert(member.to_owned());
    }

    pub fn mark_text_indexed(&self, corpus: &str) {
        if let Some(handle) = self.handles.write().expect("corpus registry lock poisoned").get_mut(corpus) {
            handle.text_indexed = true;
        }
    }

    pub fn mark_vector_indexed(&self, corpus: &str) {
        if let Some(handle) = self.handles.write().expect("corpus registry lock poisoned").get_mut(corpus) {
            handle.vector_indexed = true;
        }
    }

    #[must_use]
    pub fn exists(&self, corpus: &str) -> bool {
        self.handles.read().expect("corpus registry lock poisoned").contains_key(corpus)
    }

    #[must_use]
    pub fn get(&self, corpus: &str) -> Option<CorpusHandle> {
        self.handles.read().expect("corpus registry lock poisoned").get(corpus).cloned()
    }
}
