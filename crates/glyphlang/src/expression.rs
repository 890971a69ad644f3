//! The expression model: a closed sum of tagged variants, no inheritance.
//!
//! Expressions are pure data. Serialisation (`to_source`) is total: every
//! variant has a unique textual form that, if rescanned, yields an
//! equivalent expression (the round-trip law, invariant 3 of the data
//! model).

use std::fmt;

use crate::token::Token;

/// A value in the namespace, or an intermediate result of evaluation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Expression {
    /// The absence of a value. Serialises to the empty string.
    Empty,
    /// Literal text.
    Text(String),
    /// An argument-slot declaration, present only during body analysis.
    Placeholder(String),
    /// A parameterised deferred definition: an ordered list of placeholder
    /// names (order relevant, repetition permitted) plus the unexecuted
    /// textual body.
    Stored { params: Vec<String>, body: String },
    /// A not-yet-fired deferred operator, produced when evaluation returns
    /// operators up from inside a defer scope (or from a suppressed
    /// dynamic-name position).
    Operator {
        op: Token,
        name: String,
        body: Option<String>,
    },
    /// A sequence of expressions, flattened on construction.
    Compound(Vec<Expression>),
}

impl Expression {
    /// Builds a compound from parts, filtering empties and collapsing a
    /// single remaining part to itself rather than wrapping it.
    #[must_use]
    pub fn new_compound(parts: Vec<Self>) -> Self {
        let mut flat = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                Self::Empty => {}
                Self::Compound(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Self::Empty,
            1 => flat.into_iter().next().expect("checked len == 1"),
            _ => Self::Compound(flat),
        }
    }

    /// True for `Empty` and for `Text` holding the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Exposes a linear view of this expression's parts, for argument
    /// parsing. Non-compound expressions yield a single-element slice view.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::Compound(parts) => parts,
            Self::Empty => vec![],
            other => vec![other],
        }
    }

    /// Serialises this expression back to source text.
    #[must_use]
    pub fn to_source(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Placeholder(name) => format!("{}{name}", Token::Placeholder.rune()),
            Self::Stored { params, body } => {
                let mut out = String::new();
                out.push(Token::Store.rune());
                for p in params {
                    out.push(Token::Placeholder.rune());
                    out.push_str(p);
                }
                out.push_str(body);
                out.push(Token::Terminator.rune());
                out
            }
            Self::Operator { op, name, body } => {
                let mut out = String::new();
                out.push(op.rune());
                out.push_str(name);
                if let Some(body) = body {
                    out.push_str(body);
                    out.push(Token::Terminator.rune());
                }
                out
            }
            Self::Compound(parts) => parts.iter().map(Self::to_source).collect(),
        }
    }

    /// Convenience: text content as a `&str`, treating every non-`Text`
    /// variant via its serialisation. Used by builtins that want a plain
    /// string view of an argument's value.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            other => other.to_source(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_source())
    }
}

impl From<String> for Expression {
    fn from(value: String) -> Self {
        if value.is_empty() { Self::Empty } else { Self::Text(value) }
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_collapses_singleton_and_drops_empties() {
        let e = Expression::new_compound(vec![
            Expression::Empty,
            Expression::Text("a".into()),
            Expression::Empty,
        ]);
        assert_eq!(e, Expression::Text("a".into()));
    }

    #[test]
    fn compound_flattens_nested_compounds() {
        let inner = Expression::Compound(vec![Expression::Text("a".into()), Expression::Text("b".into())]);
        let e = Expression::new_compound(vec![inner, Expression::Text("c".into())]);
        assert_eq!(
            e,
            Expression::Compound(vec![
                Expression::Text("a".into()),
                Expression::Text("b".into()),
                Expression::Text("c".into())
            ])
        );
    }

    #[test]
    fn stored_round_trips_through_to_source() {
        let e = Expression::Stored {
            params: vec!["x".into(), "y".into()],
            body: "hello".into(),
        };
        assert_eq!(e.to_source(), "\u{25BC}\u{25A1}x\u{25A1}yhello\u{25C6}");
    }

    #[test]
    fn empty_is_empty_and_serialises_to_empty_string() {
        assert!(Expression::Empty.is_empty());
        assert!(Expression::Text(String::new()).is_empty());
        assert!(!Expression::Text("x".into()).is_empty());
        assert_eq!(Expression::Empty.to_source(), "");
    }
}
