//! Argument-region parsing.
//!
//! A raw argument region (the unparsed text between an `EXECUTE`/`IMM_EXECUTE`
//! name and its terminator) is re-scanned into an ordered sequence of
//! argument strings: each non-empty text line is one argument, and each
//! occurrence of a retrieve/execute operator produces exactly one argument —
//! its evaluated value.

use crate::error::EvalError;
use crate::scanner::Scanner;
use crate::token::Token;

/// Re-scans `raw` into positional arguments, calling `fire_operator` to
/// evaluate each retrieve/execute operator encountered. `fire_operator`
/// receives the operator token, the (possibly dynamic-resolved by the
/// caller) name text, and the raw body for execute-family operators.
pub fn parse_arguments(
    raw: &str,
    mut fire_operator: impl FnMut(Token, &str, Option<&str>) -> Result<String, EvalError>,
) -> Result<Vec<String>, EvalError> {
    let mut scanner = Scanner::new(raw);
    let mut args = Vec::new();
    while let Some(item) = scanner.next_item()? {
        match item.token {
            Token::Text => {
                for line in item.value.split('\n') {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        args.push(trimmed.to_owned());
                    }
                }
            }
            Token::Retrieve | Token::ImmRetrieve => {
                let name = scanner.scan_name();
                args.push(fire_operator(item.token, &name, None)?);
            }
            Token::Execute | Token::ImmExecute => {
                let name = scanner.scan_name();
                let (body, _closed) = scanner.scan_until_terminator(true);
                args.push(fire_operator(item.token, &name, Some(&body))?);
            }
            // STORE/IMM_STORE/PLACEHOLDER/DEFER in argument position are not
            // part of the documented surface; consume them so scanning stays
            // balanced rather than producing a spurious argument.
            Token::Store | Token::ImmStore => {
                scanner.scan_name();
                scanner.scan_until_terminator(true);
            }
            Token::Placeholder => {
                scanner.scan_name();
            }
            Token::Defer => {
                scanner.scan_until_terminator(true);
            }
            Token::Terminator => {}
        }
    }
    Ok(args)
}
