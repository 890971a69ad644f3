//! Rune-by-rune streaming lexer.
//!
//! The scanner has no notion of comments and preserves whitespace inside text
//! runs verbatim. It does not itself understand nesting rules beyond what
//! [`Scanner::scan_until_terminator`] needs to find a matching close; parsing
//! decisions (what a name or a body *means*) belong to the evaluator.

use std::fmt;

use crate::token::Token;

/// A single scanned item: an operator glyph or a run of literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub token: Token,
    /// The literal text for `Token::Text`; empty for operator tokens.
    pub value: String,
    /// 1-based line number where this item started.
    pub line: usize,
}

/// Failure reading from the underlying rune source.
///
/// The in-memory scanner never actually fails (its source is a `String`
/// already fully materialised in memory), but the type exists so a future
/// streaming source (e.g. reading source text incrementally from a file or
/// socket) can report I/O failure through the same `Result` shape without
/// changing the evaluator's error-handling code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError(pub String);

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scan error: {}", self.0)
    }
}

impl std::error::Error for ScanError {}

/// A streaming scanner over a fully-materialised rune buffer.
#[derive(Debug, Clone)]
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Scanner {
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn at_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Returns the next item: either a single operator token, or a run of
    /// text up to (not including) the next operator rune.
    pub fn next_item(&mut self) -> Result<Option<Item>, ScanError> {
        let Some(c) = self.peek_char() else {
            return Ok(None);
        };
        let start_line = self.line;
        if let Some(token) = Token::from_rune(c) {
            self.advance();
            return Ok(Some(Item {
                token,
                value: String::new(),
                line: start_line,
            }));
        }
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            if Token::from_rune(c).is_some() {
                break;
            }
            text.push(c);
            self.advance();
        }
        Ok(Some(Item {
            token: Token::Text,
            value: text,
            line: start_line,
        }))
    }

    /// Returns the next non-whitespace rune without consuming it.
    #[must_use]
    pub fn peek_rune(&self) -> Option<char> {
        let mut i = self.pos;
        while let Some(&c) = self.chars.get(i) {
            if !c.is_whitespace() {
                return Some(c);
            }
            i += 1;
        }
        None
    }

    /// Reads an identifier, skipping leading same-line whitespace first and
    /// stopping at (without consuming) the first non-identifier rune.
    #[must_use]
    pub fn scan_name(&mut self) -> String {
        while matches!(self.peek_char(), Some(c) if c != '\n' && c.is_whitespace()) {
            self.advance();
        }
        let mut name = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        name
    }

    /// Skips whitespace, then consumes the next rune if it equals `rune`.
    /// Returns whether it did; on a mismatch nothing is consumed.
    pub fn consume_rune(&mut self, rune: char) -> bool {
        while matches!(self.peek_char(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
        if self.peek_char() == Some(rune) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns the remainder of the source from the current position,
    /// without consuming it.
    #[must_use]
    pub fn remaining(&self) -> String {
        self.chars[self.pos..].iter().collect()
    }

    /// Skips same-line whitespace (space/tab, not newline), consuming
    /// nothing else. Used to drop the conventional single separator between
    /// a name and the body or argument region that follows it, so a body
    /// does not carry a leading space that was only there to separate it
    /// from the name.
    pub fn skip_inline_whitespace(&mut self) {
        while matches!(self.peek_char(), Some(c) if c != '\n' && c.is_whitespace()) {
            self.advance();
        }
    }

    /// Reads raw content until a `◆` appears at depth 0, tracking the
    /// scope-opening operators as scope-opening (incrementing depth).
    ///
    /// When `defer_aware` is `true`, `◯` is also treated as scope-opening
    /// (used when scanning inside an enclosing defer scope, where nested
    /// defers must themselves balance before the enclosing terminator is
    /// visible at depth 0).
    ///
    /// The terminator that closes depth 0 is consumed and not included in
    /// the returned content. Returns `(content, closed)`; `closed` is
    /// `false` if the input ran out before depth returned to 0 — the caller
    /// (the evaluator) is responsible for turning that into a parse error
    /// carrying the opening line number.
    pub fn scan_until_terminator(&mut self, defer_aware: bool) -> (String, bool) {
        let mut depth: usize = 0;
        let mut content = String::new();
        while let Some(c) = self.peek_char() {
            if let Some(token) = Token::from_rune(c) {
                let opens = token.opens_scope() && (defer_aware || token != Token::Defer);
                if token == Token::Terminator {
                    self.advance();
                    if depth == 0 {
                        return (content, true);
                    }
                    depth -= 1;
                    content.push(c);
                    continue;
                }
                if opens {
                    depth += 1;
                }
                content.push(c);
                self.advance();
                continue;
            }
            content.push(c);
            self.advance();
        }
        (content, false)
    }
}
