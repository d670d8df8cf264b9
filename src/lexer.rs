//! Tokenizer for set formulas.
//!
//! The alphabet is tiny: the set names `A`, `B`, `C`, five operator symbols,
//! parentheses and whitespace. Anything else is rejected with a [`LexError`]
//! at the first offending character. Positions are counted in characters,
//! not bytes, so they can be used directly to underline the formula text.

use std::fmt;

use log::debug;

use crate::error::LexError;
use crate::types::SetName;

/// A lexical token.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Token {
    /// One of `A`, `B`, `C`
    Set(SetName),
    /// `U`
    Union,
    /// `&`
    Intersect,
    /// `^`
    Xor,
    /// `-`
    Diff,
    /// `.` (postfix)
    Complement,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// End of input
    End,
}

impl Token {
    /// Maps a single character to its token, if it has one.
    pub fn from_char(c: char) -> Option<Token> {
        let token = match c {
            'U' => Token::Union,
            '&' => Token::Intersect,
            '^' => Token::Xor,
            '-' => Token::Diff,
            '.' => Token::Complement,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => Token::Set(SetName::from_char(c)?),
        };
        Some(token)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Set(name) => write!(f, "set `{}`", name),
            Token::Union => write!(f, "`U`"),
            Token::Intersect => write!(f, "`&`"),
            Token::Xor => write!(f, "`^`"),
            Token::Diff => write!(f, "`-`"),
            Token::Complement => write!(f, "`.`"),
            Token::LParen => write!(f, "`(`"),
            Token::RParen => write!(f, "`)`"),
            Token::End => write!(f, "end of input"),
        }
    }
}

/// Half-open range of character offsets `start..end` in the formula text.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// A one-character span at `position`.
    pub const fn at(position: usize) -> Self {
        Span::new(position, position + 1)
    }

    /// Smallest span covering both.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A token together with where it came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub span: Span,
}

/// The operator table: symbol, name, meaning.
pub const OPERATORS: [(&str, &str, &str); 5] = [
    ("A U B", "union", "points in A or in B"),
    ("A & B", "intersection", "points in both A and B"),
    ("A ^ B", "symmetric difference", "points in exactly one of A and B"),
    ("A - B", "difference", "points in A but not in B"),
    ("A.", "complement", "points not in A"),
];

/// Converts formula text into tokens, always terminated by [`Token::End`].
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, LexError> {
    let mut tokens = Vec::new();
    let mut length = 0;

    for (position, c) in input.chars().enumerate() {
        length = position + 1;
        if c.is_whitespace() {
            continue;
        }
        match Token::from_char(c) {
            Some(token) => tokens.push(Spanned {
                token,
                span: Span::at(position),
            }),
            None => return Err(LexError { found: c, position }),
        }
    }

    tokens.push(Spanned {
        token: Token::End,
        span: Span::new(length, length),
    });
    debug!("tokenize({:?}) -> {} tokens", input, tokens.len());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input).unwrap().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn test_tokenize_all_symbols() {
        assert_eq!(
            kinds("A U B & C ^ A - B . ( )"),
            vec![
                Token::Set(SetName::A),
                Token::Union,
                Token::Set(SetName::B),
                Token::Intersect,
                Token::Set(SetName::C),
                Token::Xor,
                Token::Set(SetName::A),
                Token::Diff,
                Token::Set(SetName::B),
                Token::Complement,
                Token::LParen,
                Token::RParen,
                Token::End,
            ]
        );
    }

    #[test]
    fn test_tokenize_without_spaces() {
        assert_eq!(
            kinds("(AUB)."),
            vec![
                Token::LParen,
                Token::Set(SetName::A),
                Token::Union,
                Token::Set(SetName::B),
                Token::RParen,
                Token::Complement,
                Token::End,
            ]
        );
    }

    #[test]
    fn test_tokenize_empty() {
        let tokens = tokenize("   ").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token, Token::End);
        assert_eq!(tokens[0].span, Span::new(3, 3));
    }

    #[test]
    fn test_spans_are_char_offsets() {
        let tokens = tokenize("A\t& B").unwrap();
        let spans: Vec<_> = tokens.iter().map(|t| t.span).collect();
        assert_eq!(
            spans,
            vec![Span::at(0), Span::at(2), Span::at(4), Span::new(5, 5)]
        );
    }

    #[test]
    fn test_unknown_character() {
        let err = tokenize("A $ B").unwrap_err();
        assert_eq!(err, LexError { found: '$', position: 2 });
    }

    #[test]
    fn test_lowercase_is_rejected() {
        let err = tokenize("a U B").unwrap_err();
        assert_eq!(err.found, 'a');
        assert_eq!(err.position, 0);
    }

    #[test]
    fn test_position_counts_chars_not_bytes() {
        // `∪` is three bytes in UTF-8 but one character.
        let err = tokenize("∪ A ∪").unwrap_err();
        assert_eq!(err.position, 0);
        let err = tokenize("A U Б").unwrap_err();
        assert_eq!(err, LexError { found: 'Б', position: 4 });
    }
}
