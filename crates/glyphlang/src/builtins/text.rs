//! `COUNT`, `APPEND`, `UPPER`, `LOWER`, `TRIM`.

use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::expression::Expression;

/// `▶COUNT text◆`: the newline-separated line count of the evaluated
/// argument.
pub(super) fn count(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let joined = args.join("\n");
    Ok(Expression::Text(joined.lines().count().to_string()))
}

/// `▶APPEND name text◆`: reads `name`'s current value, appends `text` with a
/// newline separator, writes the result back under `name`, and returns it.
pub(super) fn append(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let Some(name) = args.first() else {
        return Ok(Expression::Empty);
    };
    let addition = args.get(1).cloned().unwrap_or_default();
    let current = e.namespace().get(name).as_text();
    let updated = if current.is_empty() {
        addition
    } else {
        format!("{current}\n{addition}")
    };
    let value = Expression::Text(updated);
    e.namespace().set(name, value.clone());
    Ok(value)
}

pub(super) fn upper(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    Ok(Expression::from(args.join("\n").to_uppercase()))
}

pub(super) fn lower(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    Ok(Expression::from(args.join("\n").to_lowercase()))
}

pub(super) fn trim(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    Ok(Expression::from(args.join("\n").trim().to_owned()))
}
