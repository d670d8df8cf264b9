//! Errors reported for malformed formulas.
//!
//! Every error carries a character position (or span) into the formula text
//! so the offending part can be underlined, see [`FormulaError::underline`].

use std::fmt;

use crate::lexer::{Span, Token};

/// An unrecognized character in the formula text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LexError {
    /// The offending character.
    pub found: char,
    /// Its character offset.
    pub position: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown character `{}` at position {}",
            self.found, self.position
        )
    }
}

impl std::error::Error for LexError {}

/// What went wrong while parsing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// A token that cannot appear here.
    UnexpectedToken {
        found: Token,
        expected: &'static str,
    },
    /// The input stopped in the middle of an expression.
    UnexpectedEnd { expected: &'static str },
    /// A `(` without its `)`, or a `)` without its `(`.
    UnmatchedParen,
    /// Nothing to parse, e.g. `()`.
    EmptyExpression,
    /// A complete expression followed by more tokens.
    TrailingInput { found: Token },
    /// Nesting (parentheses, operators or complements) deeper than `limit`.
    TooDeep { limit: usize },
}

/// A syntax error, located by a span of the formula text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = self.span.start;
        match self.kind {
            ParseErrorKind::UnexpectedToken { found, expected } => {
                write!(f, "unexpected {} at position {}, expected {}", found, at, expected)
            }
            ParseErrorKind::UnexpectedEnd { expected } => {
                write!(f, "unexpected end of input at position {}, expected {}", at, expected)
            }
            ParseErrorKind::UnmatchedParen => {
                write!(f, "unmatched parenthesis at position {}", at)
            }
            ParseErrorKind::EmptyExpression => {
                write!(f, "empty expression at position {}", at)
            }
            ParseErrorKind::TrailingInput { found } => {
                write!(f, "trailing input: unexpected {} at position {}", found, at)
            }
            ParseErrorKind::TooDeep { limit } => {
                write!(f, "formula nested deeper than {} levels at position {}", limit, at)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Coarse classification of a [`FormulaError`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    Lex,
    Parse,
}

/// Any error produced while turning formula text into an expression.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FormulaError {
    Lex(LexError),
    Parse(ParseError),
}

impl FormulaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FormulaError::Lex(_) => ErrorKind::Lex,
            FormulaError::Parse(_) => ErrorKind::Parse,
        }
    }

    /// Human-readable description, without the error kind prefix.
    pub fn message(&self) -> String {
        match self {
            FormulaError::Lex(e) => e.to_string(),
            FormulaError::Parse(e) => e.to_string(),
        }
    }

    /// Characters of the formula text the error points at.
    pub fn span(&self) -> Span {
        match self {
            FormulaError::Lex(e) => Span::at(e.position),
            FormulaError::Parse(e) => e.span,
        }
    }

    /// Character offset where the error starts.
    pub fn position(&self) -> usize {
        self.span().start
    }

    /// Renders `text` with a caret line below it marking the error span.
    ///
    /// Tabs before the span are repeated in the padding so the caret lines
    /// up under the same column as the text.
    ///
    /// ```
    /// use setviz::parser::parse;
    ///
    /// let text = "A & (B";
    /// let err = parse(text).unwrap_err();
    /// assert_eq!(err.underline(text), "A & (B\n    ^");
    /// ```
    pub fn underline(&self, text: &str) -> String {
        let span = self.span();
        let width = span.len().max(1);
        let padding: String = text
            .chars()
            .chain(std::iter::repeat(' '))
            .take(span.start)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        format!("{}\n{}{}", text, padding, "^".repeat(width))
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaError::Lex(e) => write!(f, "LexError: {}", e),
            FormulaError::Parse(e) => write!(f, "ParseError: {}", e),
        }
    }
}

impl std::error::Error for FormulaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormulaError::Lex(e) => Some(e),
            FormulaError::Parse(e) => Some(e),
        }
    }
}

impl From<LexError> for FormulaError {
    fn from(e: LexError) -> Self {
        FormulaError::Lex(e)
    }
}

impl From<ParseError> for FormulaError {
    fn from(e: ParseError) -> Self {
        FormulaError::Parse(e)
    }
}
