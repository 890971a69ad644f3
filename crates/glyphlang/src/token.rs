//! The nine operator glyphs, their codepoints, and their classification.
//!
//! The language has exactly nine operator runes plus a catch-all "text" token.
//! Everything the scanner and evaluator need to know about an operator —
//! whether it fires immediately or is deferred, and whether it opens a scope
//! that must be closed by a terminator — is derived from this table so the
//! classification lives in exactly one place.

use std::fmt;

/// A single lexical token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Token {
    /// `▼` — deferred definition.
    Store,
    /// `▽` — immediate definition.
    ImmStore,
    /// `▲` — deferred lookup.
    Retrieve,
    /// `△` — immediate lookup.
    ImmRetrieve,
    /// `▶` — deferred invocation.
    Execute,
    /// `▷` — immediate invocation.
    ImmExecute,
    /// `□` — argument-slot declaration.
    Placeholder,
    /// `◯` — defer scope.
    Defer,
    /// `◆` — closes the nearest open scope.
    Terminator,
    /// A run of literal, non-operator text (whitespace is preserved verbatim).
    Text,
}

impl Token {
    /// Returns the operator token for `rune`, or `None` if `rune` is not one
    /// of the nine operator glyphs.
    #[must_use]
    pub fn from_rune(rune: char) -> Option<Self> {
        match rune {
            '\u{25BC}' => Some(Self::Store),
            '\u{25BD}' => Some(Self::ImmStore),
            '\u{25B2}' => Some(Self::Retrieve),
            '\u{25B3}' => Some(Self::ImmRetrieve),
            '\u{25B6}' => Some(Self::Execute),
            '\u{25B7}' => Some(Self::ImmExecute),
            '\u{25A1}' => Some(Self::Placeholder),
            '\u{25EF}' => Some(Self::Defer),
            '\u{25C6}' => Some(Self::Terminator),
            _ => None,
        }
    }

    /// The source rune for this operator. Panics for `Token::Text`, which has
    /// no single-rune representation.
    #[must_use]
    pub fn rune(self) -> char {
        match self {
            Self::Store => '\u{25BC}',
            Self::ImmStore => '\u{25BD}',
            Self::Retrieve => '\u{25B2}',
            Self::ImmRetrieve => '\u{25B3}',
            Self::Execute => '\u{25B6}',
            Self::ImmExecute => '\u{25B7}',
            Self::Placeholder => '\u{25A1}',
            Self::Defer => '\u{25EF}',
            Self::Terminator => '\u{25C6}',
            Self::Text => unreachable!("Token::Text has no single-rune form"),
        }
    }

    /// True for `▽`, `△`, `▷` — operators that fire at body-analysis time
    /// rather than at execution of the enclosing stored definition.
    #[must_use]
    pub fn is_immediate(self) -> bool {
        matches!(self, Self::ImmStore | Self::ImmRetrieve | Self::ImmExecute)
    }

    /// True for `▼`, `▲`, `▶` — operators that survive body analysis
    /// unchanged and fire only when the enclosing definition executes.
    #[must_use]
    pub fn is_deferred(self) -> bool {
        matches!(self, Self::Store | Self::Retrieve | Self::Execute)
    }

    /// True for operators that open a scope requiring exactly one matching
    /// `◆` at the same nesting depth: `▼ ▽ ▶ ▷ ◯`.
    #[must_use]
    pub fn opens_scope(self) -> bool {
        matches!(
            self,
            Self::Store | Self::ImmStore | Self::Execute | Self::ImmExecute | Self::Defer
        )
    }

    /// True if this operator can introduce a name (store/retrieve/execute
    /// family). Used by dynamic-name resolution, which may also encounter
    /// one of these operators where a plain identifier was expected.
    #[must_use]
    pub fn can_name(self) -> bool {
        matches!(
            self,
            Self::Retrieve | Self::ImmRetrieve | Self::Execute | Self::ImmExecute
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("TEXT"),
            other => f.write_char(other.rune()),
        }
    }
}
