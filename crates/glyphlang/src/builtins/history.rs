//! `PERSIST`, `LOAD`, `HISTORY`: the bridge between the live namespace and
//! the backing `Store`.
//!
//! `HISTORY` materialises each returned version as an ephemeral,
//! zero-parameter `_<name>_<version>` definition whose body is a literal
//! `IMM_STORE` of that version's value back onto `name`. Since `IMM_STORE`
//! fires at parse time regardless of mode, simply executing (or retrieving)
//! one of these ephemeral names performs the rollback as a side effect of
//! rewriting its body — no separate rollback path is needed.

use crate::config::PersistMode;
use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::expression::Expression;

pub(super) fn persist(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let Some(name) = args.first() else {
        return Ok(Expression::Empty);
    };
    let never = e
        .settings()
        .get("PERSIST_MODE")
        .and_then(|v| PersistMode::parse(&v))
        .is_some_and(|mode| mode == PersistMode::Never);
    if never {
        return Ok(Expression::Empty);
    }
    if let Some(store) = e.store() {
        store.put(name, e.namespace().get(name))?;
    }
    Ok(Expression::Empty)
}

/// Loads `name`'s most recent persisted value into the namespace. A missing
/// or stored-empty value is treated as absent and leaves the namespace
/// untouched.
pub(super) fn load(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let Some(name) = args.first() else {
        return Ok(Expression::Empty);
    };
    let Some(store) = e.store() else {
        return Ok(Expression::Empty);
    };
    let value = store.get(name)?;
    if value.is_empty() {
        return Ok(Expression::Empty);
    }
    e.namespace().set(name, value.clone());
    Ok(value)
}

pub(super) fn history(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let Some(name) = args.first() else {
        return Ok(Expression::Empty);
    };
    let Some(store) = e.store() else {
        return Ok(Expression::Empty);
    };
    let limit = args
        .get(1)
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or_else(|| e.history_limit());
    let versions = store.get_history(name, limit)?;
    let mut labels = Vec::with_capacity(versions.len());
    for version in &versions {
        let label = format!("_{name}_{}", version.version);
        let rollback_body = format!("\u{25BD}{name} {}\u{25C6}", version.value.to_source());
        e.namespace().set(&label, Expression::Stored { params: Vec::new(), body: rollback_body });
        labels.push(label);
    }
    Ok(Expression::Text(labels.join("\n")))
}
