use std::io::{self, Write as _};
use std::process::ExitCode;

use glyphlang::{Evaluator, EvaluatorConfig, Expression};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        let path = &args[1];
        let source = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(err) => {
                eprintln!("Error reading {path}: {err}");
                return ExitCode::FAILURE;
            }
        };
        let evaluator = Evaluator::new(EvaluatorConfig::default());
        if let Err(err) = execute_snippet(&evaluator, &source) {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    let evaluator = Evaluator::new(EvaluatorConfig::default());
    let mut source = String::new();

    loop {
        let prompt = if source.is_empty() { ">>> " } else { "... " };
        let Some(line) = read_line(prompt) else {
            println!();
            break;
        };

        if source.is_empty() && line.trim().is_empty() {
            continue;
        }

        if !source.is_empty() {
            source.push('\n');
        }
        source.push_str(&line);

        if needs_more_input(&source) {
            continue;
        }

        if let Err(err) = execute_snippet(&evaluator, &source) {
            eprintln!("{err}");
        }
        source.clear();
    }

    ExitCode::SUCCESS
}

/// Evaluates one source snippet and prints its result, unless it is `Empty`.
fn execute_snippet(evaluator: &Evaluator, source: &str) -> Result<(), glyphlang::EvalError> {
    let result = evaluator.eval(source)?;
    if result != Expression::Empty {
        println!("{}", result.as_text());
    }
    Ok(())
}

/// An unterminated opening operator (more openers than `◆` closers) means
/// the snippet is not yet complete.
fn needs_more_input(source: &str) -> bool {
    let openers = source
        .chars()
        .filter(|c| matches!(c, '\u{25BC}' | '\u{25BD}' | '\u{25B2}' | '\u{25B3}' | '\u{25B6}' | '\u{25B7}' | '\u{25EF}'))
        .count();
    let closers = source.chars().filter(|c| *c == '\u{25C6}').count();
    openers > closers
}

/// Reads one line from stdin after printing a prompt. Returns `None` on EOF.
fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    if io::stdout().flush().is_err() {
        return None;
    }
    let mut input = String::new();
    let read = io::stdin().read_line(&mut input).ok()?;
    if read == 0 {
        return None;
    }
    Some(input.trim_end_matches(['\r', '\n']).to_owned())
}
