//! `CORPUS`, `ADD`, `INDEX`, `SEARCH`, `EMBED`, `SIMILAR`.
//!
//! All search/index/embedding work is delegated to the injected
//! `CorpusStore`/`EmbeddingProvider`; these builtins only translate operator
//! arguments into calls against them and keep the in-process
//! `CorpusRegistry` handle table in sync.

use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::expression::Expression;

/// `▶CORPUS name◆`: registers a new corpus.
pub(super) fn corpus(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let Some(name) = args.first() else {
        return Ok(Expression::Empty);
    };
    e.corpus_registry().register(name);
    if let Some(store) = e.corpus_store() {
        store.create_corpus(name)?;
    }
    Ok(Expression::Empty)
}

/// `▶ADD corpus member text◆`: adds `member` to `corpus` with its text.
pub(super) fn add(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let (Some(corpus), Some(member)) = (args.first(), args.get(1)) else {
        return Ok(Expression::Empty);
    };
    let text = args.get(2..).map(|rest| rest.join("\n")).unwrap_or_default();
    e.corpus_registry().add_member(corpus, member);
    if let Some(store) = e.corpus_store() {
        store.add_member(corpus, member, &text)?;
    }
    Ok(Expression::Empty)
}

/// `▶INDEX corpus mode◆`: builds the `TEXT` or `VECTOR` index over `corpus`.
pub(super) fn index(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let (Some(corpus), Some(mode)) = (args.first(), args.get(1)) else {
        return Ok(Expression::Empty);
    };
    let Some(store) = e.corpus_store() else {
        return Ok(Expression::Empty);
    };
    match mode.as_str() {
        "TEXT" => {
            store.build_text_index(corpus)?;
            e.corpus_registry().mark_text_indexed(corpus);
        }
        "VECTOR" => {
            e.corpus_registry().mark_vector_indexed(corpus);
        }
        _ => {}
    }
    Ok(Expression::Empty)
}

/// `▶SEARCH corpus query◆`: text search, results newline-joined, bounded by
/// the `SEARCH_LIMIT` setting.
pub(super) fn search(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let (Some(corpus), Some(query)) = (args.first(), args.get(1)) else {
        return Ok(Expression::Empty);
    };
    let Some(store) = e.corpus_store() else {
        return Ok(Expression::Empty);
    };
    let limit = e.settings().get("SEARCH_LIMIT").and_then(|v| v.parse().ok()).unwrap_or(10);
    let results = store.search_text(corpus, query, limit)?;
    Ok(Expression::Text(results.join("\n")))
}

/// `▶EMBED corpus member◆`: embeds `member`'s current text and stores the
/// resulting vector.
pub(super) fn embed(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let (Some(corpus), Some(member)) = (args.first(), args.get(1)) else {
        return Ok(Expression::Empty);
    };
    let (Some(store), Some(embedder)) = (e.corpus_store(), e.embedding_provider()) else {
        return Ok(Expression::Empty);
    };
    let text = e.namespace().get(member).as_text();
    let vectors = embedder.embed(std::slice::from_ref(&text))?;
    let Some(vector) = vectors.into_iter().next() else {
        return Ok(Expression::Empty);
    };
    store.put_embedding(corpus, member, vector)?;
    Ok(Expression::Empty)
}

/// `▶SIMILAR corpus member◆`: finds members nearest to `member`'s stored
/// embedding.
pub(super) fn similar(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let (Some(corpus), Some(member)) = (args.first(), args.get(1)) else {
        return Ok(Expression::Empty);
    };
    let Some(store) = e.corpus_store() else {
        return Ok(Expression::Empty);
    };
    let Some(vector) = store.get_embedding(corpus, member)? else {
        return Ok(Expression::Empty);
    };
    let limit = e.settings().get("SEARCH_LIMIT").and_then(|v| v.parse().ok()).unwrap_or(10);
    let results = store.similar(corpus, &vector, limit)?;
    Ok(Expression::Text(results.join("\n")))
}
