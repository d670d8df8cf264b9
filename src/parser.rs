//! Recursive-descent parser for set formulas.
//!
//! # Grammar
//!
//! ```text
//! expr      := orExpr
//! orExpr    := diffExpr ( 'U' diffExpr )*
//! diffExpr  := xorExpr  ( '-' xorExpr )*
//! xorExpr   := andExpr  ( '^' andExpr )*
//! andExpr   := notExpr  ( '&' notExpr )*
//! notExpr   := primary  ( '.' )*
//! primary   := 'A' | 'B' | 'C' | '(' expr ')'
//! ```
//!
//! Binary operators are left-associative. The complement is postfix and may
//! be chained: `A..` is the complement of the complement of `A`.
//! Input nested deeper than [`MAX_DEPTH`] is rejected.
//!
//! # Examples
//!
//! ```
//! use setviz::ast::Expr;
//! use setviz::parser::parse;
//! use setviz::types::SetName;
//!
//! let e = parse("A U B & C").unwrap();
//! let a = Expr::set(SetName::A);
//! let b = Expr::set(SetName::B);
//! let c = Expr::set(SetName::C);
//! assert_eq!(e, a | (b & c));
//! ```

use std::str::FromStr;

use log::debug;

use crate::ast::{BinaryOp, Expr};
use crate::error::{FormulaError, ParseError, ParseErrorKind};
use crate::lexer::{tokenize, Span, Spanned, Token};

const EXPECTED_OPERAND: &str = "a set name or `(`";

/// Deepest formula tree the parser builds, counting parentheses separately.
///
/// Evaluation, printing and dropping an [`Expr`] recurse once per level, so
/// deeper input is rejected with [`ParseErrorKind::TooDeep`] instead.
pub const MAX_DEPTH: usize = 128;

/// A subtree together with its depth.
struct Parsed {
    expr: Expr,
    depth: usize,
}

/// Parser state over a token slice.
pub struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    /// Currently open parentheses.
    nesting: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Spanned]) -> Self {
        Parser {
            tokens,
            pos: 0,
            nesting: 0,
        }
    }

    /// Parses a complete formula; every token up to [`Token::End`] must be used.
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        let first = self.peek();
        if first.token == Token::End {
            return Err(ParseError::new(ParseErrorKind::EmptyExpression, first.span));
        }

        let parsed = self.parse_union()?;

        let next = self.peek();
        match next.token {
            Token::End => Ok(parsed.expr),
            Token::RParen => Err(ParseError::new(ParseErrorKind::UnmatchedParen, next.span)),
            found => Err(ParseError::new(
                ParseErrorKind::TrailingInput { found },
                next.span,
            )),
        }
    }

    /// Current token; a missing terminator reads as [`Token::End`].
    fn peek(&self) -> Spanned {
        match self.tokens.get(self.pos) {
            Some(spanned) => *spanned,
            None => {
                let end = self.tokens.last().map_or(0, |t| t.span.end);
                Spanned {
                    token: Token::End,
                    span: Span::new(end, end),
                }
            }
        }
    }

    fn advance(&mut self) -> Spanned {
        let current = self.peek();
        if current.token != Token::End {
            self.pos += 1;
        }
        current
    }

    /// Fails with [`ParseErrorKind::TooDeep`] at `span` once `depth` exceeds [`MAX_DEPTH`].
    fn check_depth(depth: usize, span: Span) -> Result<usize, ParseError> {
        if depth > MAX_DEPTH {
            return Err(ParseError::new(
                ParseErrorKind::TooDeep { limit: MAX_DEPTH },
                span,
            ));
        }
        Ok(depth)
    }

    /// One left-associative level: `operand ( op operand )*`.
    fn parse_level(
        &mut self,
        op: BinaryOp,
        token: Token,
        operand: fn(&mut Self) -> Result<Parsed, ParseError>,
    ) -> Result<Parsed, ParseError> {
        let mut lhs = operand(self)?;
        while self.peek().token == token {
            let op_token = self.advance();
            let rhs = operand(self)?;
            let depth = Self::check_depth(lhs.depth.max(rhs.depth) + 1, op_token.span)?;
            lhs = Parsed {
                expr: Expr::binary(op, lhs.expr, rhs.expr),
                depth,
            };
        }
        Ok(lhs)
    }

    fn parse_union(&mut self) -> Result<Parsed, ParseError> {
        self.parse_level(BinaryOp::Union, Token::Union, Self::parse_diff)
    }

    fn parse_diff(&mut self) -> Result<Parsed, ParseError> {
        self.parse_level(BinaryOp::Diff, Token::Diff, Self::parse_xor)
    }

    fn parse_xor(&mut self) -> Result<Parsed, ParseError> {
        self.parse_level(BinaryOp::Xor, Token::Xor, Self::parse_intersect)
    }

    fn parse_intersect(&mut self) -> Result<Parsed, ParseError> {
        self.parse_level(BinaryOp::Intersect, Token::Intersect, Self::parse_complement)
    }

    fn parse_complement(&mut self) -> Result<Parsed, ParseError> {
        let mut parsed = self.parse_primary()?;
        while self.peek().token == Token::Complement {
            let dot = self.advance();
            parsed = Parsed {
                depth: Self::check_depth(parsed.depth + 1, dot.span)?,
                expr: Expr::complement(parsed.expr),
            };
        }
        Ok(parsed)
    }

    fn parse_primary(&mut self) -> Result<Parsed, ParseError> {
        let current = self.advance();
        match current.token {
            Token::Set(name) => Ok(Parsed {
                expr: Expr::set(name),
                depth: 0,
            }),
            Token::LParen => {
                let next = self.peek();
                if next.token == Token::RParen {
                    return Err(ParseError::new(
                        ParseErrorKind::EmptyExpression,
                        current.span.to(next.span),
                    ));
                }
                self.nesting = Self::check_depth(self.nesting + 1, current.span)?;
                let inner = self.parse_union()?;
                match self.peek().token {
                    Token::RParen => {
                        self.advance();
                        self.nesting -= 1;
                        Ok(inner)
                    }
                    // The group never closed: point at its opening parenthesis.
                    Token::End => Err(ParseError::new(ParseErrorKind::UnmatchedParen, current.span)),
                    found => Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken {
                            found,
                            expected: "an operator or `)`",
                        },
                        self.peek().span,
                    )),
                }
            }
            Token::End => Err(ParseError::new(
                ParseErrorKind::UnexpectedEnd {
                    expected: EXPECTED_OPERAND,
                },
                current.span,
            )),
            found => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    found,
                    expected: EXPECTED_OPERAND,
                },
                current.span,
            )),
        }
    }
}

/// Parses a token stream produced by [`tokenize`].
pub fn parse_tokens(tokens: &[Spanned]) -> Result<Expr, ParseError> {
    Parser::new(tokens).parse()
}

/// Tokenizes and parses formula text.
pub fn parse(text: &str) -> Result<Expr, FormulaError> {
    let tokens = tokenize(text)?;
    let expr = parse_tokens(&tokens)?;
    debug!("parse({:?}) -> {}", text, expr);
    Ok(expr)
}

impl FromStr for Expr {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
