//! The two I/O interfaces the evaluator consumes for `SAY`/`READ`.
//!
//! Modelled directly on this codebase's `PrintWriter` split between a real
//! stdout writer, a string-collecting writer (for tests), and a no-op writer
//! (for forked evaluators, whose I/O is silenced per the fork contract).

use std::io::{self, BufRead, Write as _};

use crate::error::EvalError;

/// Receives text written by `SAY`.
pub trait OutputWriter: std::fmt::Debug {
    fn say(&mut self, text: &str) -> Result<(), EvalError>;
}

/// Supplies a line of text to `READ`.
pub trait InputReader: std::fmt::Debug {
    fn read_line(&mut self) -> Result<String, EvalError>;
}

/// Writes to process stdout, one line per `SAY`.
#[derive(Debug, Default)]
pub struct StdOutput;

impl OutputWriter for StdOutput {
    fn say(&mut self, text: &str) -> Result<(), EvalError> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{text}").ok();
        stdout.flush().ok();
        Ok(())
    }
}

/// Reads a line from process stdin, trimming the trailing newline.
#[derive(Debug, Default)]
pub struct StdInput;

impl InputReader for StdInput {
    fn read_line(&mut self) -> Result<String, EvalError> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).ok();
        Ok(line.trim_end_matches(['\n', '\r']).to_owned())
    }
}

/// Collects everything written by `SAY`, one entry per call. Used by tests
/// to assert on program output.
#[derive(Debug, Default)]
pub struct CollectOutput(Vec<String>);

impl CollectOutput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.0
    }
}

impl OutputWriter for CollectOutput {
    fn say(&mut self, text: &str) -> Result<(), EvalError> {
        self.0.push(text.to_owned());
        Ok(())
    }
}

/// Ignores all output. Used for forked evaluators, whose `SAY` is silenced
/// per the fork contract (§4.3 "Forking for async").
#[derive(Debug, Default)]
pub struct NoOutput;

impl OutputWriter for NoOutput {
    fn say(&mut self, _text: &str) -> Result<(), EvalError> {
        Ok(())
    }
}

/// Supplies a fixed, pre-scripted sequence of lines. Used by tests that
/// exercise `READ`.
#[derive(Debug, Default)]
pub struct FixedInput {
    lines: std::collections::VecDeque<String>,
}

impl FixedInput {
    #[must_use]
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputReader for FixedInput {
    fn read_line(&mut self) -> Result<String, EvalError> {
        Ok(self.lines.pop_front().unwrap_or_default())
    }
}

/// Always returns an empty line. Used for forked evaluators, whose `READ`
/// returns empty per the fork contract.
#[derive(Debug, Default)]
pub struct NoInput;

impl InputReader for NoInput {
    fn read_line(&mut self) -> Result<String, EvalError> {
        Ok(String::new())
    }
}
