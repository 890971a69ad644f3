//! `TRUE`/`FALSE`/`EMPTY`, `IF`, `COMPARE`, `FOREACH`.

use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::expression::Expression;

pub(super) fn r#true(_e: &Evaluator, _raw: &str, _depth: usize) -> Result<Expression, EvalError> {
    Ok(Expression::Text("TRUE".into()))
}

pub(super) fn r#false(_e: &Evaluator, _raw: &str, _depth: usize) -> Result<Expression, EvalError> {
    Ok(Expression::Text("FALSE".into()))
}

pub(super) fn empty(_e: &Evaluator, _raw: &str, _depth: usize) -> Result<Expression, EvalError> {
    Ok(Expression::Empty)
}

/// `▶IF condition then-name else-name◆`: evaluates to the retrieved/executed
/// `then-name` when `condition` is the literal text `TRUE`, `else-name`
/// otherwise (or `Empty` if that branch's name is absent).
pub(super) fn r#if(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let Some(condition) = args.first() else {
        return Ok(Expression::Empty);
    };
    let branch = if condition.trim() == "TRUE" { args.get(1) } else { args.get(2) };
    Ok(branch.cloned().map_or(Expression::Empty, Expression::from))
}

/// `▶COMPARE a b◆`: `TRUE` iff both arguments' text is equal.
pub(super) fn compare(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let equal = matches!((args.first(), args.get(1)), (Some(a), Some(b)) if a == b);
    Ok(Expression::Text(if equal { "TRUE" } else { "FALSE" }.into()))
}

/// `▶FOREACH list-name target-name◆`: for each non-blank line of
/// `list-name`'s current text, executes `target-name` with that line as its
/// sole argument (binding only `target-name`'s first declared placeholder,
/// per `execute`'s normal zip) and joins the results with a newline.
pub(super) fn foreach(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let (Some(list_name), Some(target_name)) = (args.first(), args.get(1)) else {
        return Ok(Expression::Empty);
    };
    let list_value = e.namespace().get(list_name).as_text();
    let mut results = Vec::new();
    for line in list_value.lines() {
        if line.trim().is_empty() {
            continue;
        }
        results.push(e.execute(target_name, line, depth + 1)?);
    }
    let joined = results.iter().map(Expression::as_text).collect::<Vec<_>>().join("\n");
    Ok(Expression::Text(joined))
}
