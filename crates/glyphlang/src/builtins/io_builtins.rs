//! `SAY`/`READ`: the only two builtins that touch program I/O.

use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::expression::Expression;

/// `▶SAY text◆`: writes the evaluated argument to output, returns it
/// unchanged.
pub(super) fn say(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let text = args.join("\n");
    e.say(&text)?;
    Ok(Expression::from(text))
}

/// `▶READ◆`: reads one line from input.
pub(super) fn read(e: &Evaluator, _raw: &str, _depth: usize) -> Result<Expression, EvalError> {
    Ok(Expression::from(e.read_line()?))
}
