//! Error types, separated by pipeline stage.
//!
//! Keeping scan/parse/evaluation/persistence failures distinct lets callers
//! handle user feedback and recovery policies accurately without string
//! matching.

use std::fmt;

use crate::scanner::ScanError;

/// Unterminated scope: a `STORE`/`IMM_STORE`/`EXECUTE`/`IMM_EXECUTE`/`DEFER`
/// never saw its matching terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

/// A builtin or provider failed in a way that is not represented as a
/// sentinel `Expression::Empty` (see `§7`: malformed builtin arguments
/// return `Empty`, not an error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationError(pub String);

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evaluation error: {}", self.0)
    }
}

impl std::error::Error for EvaluationError {}

/// The backing `Store` returned an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceError(pub String);

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "persistence error: {}", self.0)
    }
}

impl std::error::Error for PersistenceError {}

/// Top-level error returned from `Evaluator::eval`, separating failures by
/// pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    Scan(ScanError),
    Parse(ParseError),
    Evaluation(EvaluationError),
    Persistence(PersistenceError),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan(error) => write!(f, "{error}"),
            Self::Parse(error) => write!(f, "{error}"),
            Self::Evaluation(error) => write!(f, "{error}"),
            Self::Persistence(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<ScanError> for EvalError {
    fn from(error: ScanError) -> Self {
        Self::Scan(error)
    }
}

impl From<ParseError> for EvalError {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<EvaluationError> for EvalError {
    fn from(error: EvaluationError) -> Self {
        Self::Evaluation(error)
    }
}

impl From<PersistenceError> for EvalError {
    fn from(error: PersistenceError) -> Self {
        Self::Persistence(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display_carries_line() {
        let e = ParseError {
            message: "unterminated scope".into(),
            line: 3,
        };
        assert_eq!(e.to_string(), "parse error at line 3: unterminated scope");
    }

    #[test]
    fn conversions_compose_through_question_mark() {
        fn inner() -> Result<(), ParseError> {
            Err(ParseError { message: "x".into(), line: 1 })
        }
        fn outer() -> Result<(), EvalError> {
            inner()?;
            Ok(())
        }
        assert!(matches!(outer(), Err(EvalError::Parse(_))));
    }
}
