//! Builtin dispatch table.
//!
//! Builtins are resolved by case-sensitive, all-caps name ahead of any
//! user-defined `Stored` value: a name that collides with a builtin always
//! resolves to the builtin, and user code cannot shadow one. Malformed
//! arguments return `Expression::Empty` rather than an error, matching every
//! other evaluation failure mode in this language — the only exception is
//! `SYSTEM`, which reports unknown settings/providers via sentinel strings.

mod async_builtins;
mod control;
mod corpus_builtins;
mod history;
mod io_builtins;
mod system;
mod text;

use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::expression::Expression;

pub(crate) type BuiltinFn = fn(&Evaluator, &str, usize) -> Result<Expression, EvalError>;

/// Resolves `name` to its builtin implementation, if any.
#[must_use]
pub(crate) fn lookup(name: &str) -> Option<BuiltinFn> {
    Some(match name {
        "TRUE" => control::r#true,
        "FALSE" => control::r#false,
        "EMPTY" => control::empty,
        "IF" => control::r#if,
        "COMPARE" => control::compare,
        "FOREACH" => control::foreach,
        "SAY" => io_builtins::say,
        "READ" => io_builtins::read,
        "COUNT" => text::count,
        "APPEND" => text::append,
        "UPPER" => text::upper,
        "LOWER" => text::lower,
        "TRIM" => text::trim,
        "PERSIST" => history::persist,
        "LOAD" => history::load,
        "HISTORY" => history::history,
        "PROMPT" => system::prompt,
        "GENERATE" => system::generate,
        "EXTRACT" => system::extract,
        "SYSTEM" => system::system,
        "ASYNC" => async_builtins::async_spawn,
        "AWAIT" => async_builtins::await_task,
        "CHECK" => async_builtins::check,
        "TIMER" => async_builtins::timer,
        "TICKS" => async_builtins::ticks,
        "SLEEP" => async_builtins::sleep,
        "CORPUS" => corpus_builtins::corpus,
        "ADD" => corpus_builtins::add,
        "INDEX" => corpus_builtins::index,
        "SEARCH" => corpus_builtins::search,
        "EMBED" => corpus_builtins::embed,
        "SIMILAR" => corpus_builtins::similar,
        _ => return None,
    })
}
