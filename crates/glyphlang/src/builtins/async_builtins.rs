//! `ASYNC`, `AWAIT`, `CHECK`, `TIMER`, `TICKS`, `SLEEP`.

use std::time::Duration;

use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::expression::Expression;

/// `▶ASYNC target arg1 arg2...◆`: executes `target` on a forked evaluator
/// running on its own thread, returning a handle immediately.
pub(super) fn async_spawn(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let Some(target) = args.first().cloned() else {
        return Ok(Expression::Empty);
    };
    let forked = e.fork_for_async();
    let body_args = args.get(1..).map(|rest| rest.join("\n")).unwrap_or_default();
    let handle = e
        .async_registry()
        .spawn_task(move || forked.execute(&target, &body_args, 0).unwrap_or(Expression::Empty));
    Ok(Expression::Text(handle))
}

pub(super) fn await_task(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let Some(handle) = args.first() else {
        return Ok(Expression::Empty);
    };
    Ok(e.async_registry().await_handle(handle))
}

pub(super) fn check(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let Some(handle) = args.first() else {
        return Ok(Expression::Text("FALSE".into()));
    };
    let done = e.async_registry().is_done(handle);
    Ok(Expression::Text(if done { "TRUE" } else { "FALSE" }.into()))
}

/// `▶TIMER milliseconds◆`: starts a timer, returns its handle.
pub(super) fn timer(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let millis: u64 = args.first().and_then(|v| v.parse().ok()).unwrap_or(0);
    let handle = e.async_registry().spawn_timer(Duration::from_millis(millis));
    Ok(Expression::Text(handle))
}

pub(super) fn ticks(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let Some(handle) = args.first() else {
        return Ok(Expression::Text("0".into()));
    };
    Ok(Expression::Text(e.async_registry().ticks(handle).to_string()))
}

/// `▶SLEEP milliseconds◆`: blocks the calling evaluation for the given
/// duration, returning `Empty`.
pub(super) fn sleep(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let millis: u64 = args.first().and_then(|v| v.parse().ok()).unwrap_or(0);
    let handle = e.async_registry().spawn_timer(Duration::from_millis(millis));
    e.async_registry().await_handle(&handle);
    Ok(Expression::Empty)
}
