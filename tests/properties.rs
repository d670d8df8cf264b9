//! Algebraic and syntactic properties of set formulas.
//!
//! Laws are checked exhaustively over the eight possible membership masks,
//! for the named sets and for seeded random formulas.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use setviz::ast::{BinaryOp, Expr};
use setviz::error::{ErrorKind, FormulaError, LexError, ParseError, ParseErrorKind};
use setviz::eval::Eval;
use setviz::parser::parse;
use setviz::types::{SetMask, SetName};

fn random_expr(rng: &mut ChaCha8Rng, depth: usize) -> Expr {
    if depth == 0 || rng.random_bool(0.25) {
        return Expr::set(SetName::ALL[rng.random_range(0..3)]);
    }
    if rng.random_bool(0.2) {
        return !random_expr(rng, depth - 1);
    }
    let op = BinaryOp::ALL[rng.random_range(0..4)];
    Expr::binary(op, random_expr(rng, depth - 1), random_expr(rng, depth - 1))
}

fn random_exprs(seed: u64, count: usize) -> Vec<Expr> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| random_expr(&mut rng, 5)).collect()
}

fn eval_text(text: &str, m: SetMask) -> bool {
    parse(text).unwrap().eval(m)
}

// ─── Laws ──────────────────────────────────────────────────────────────────────

#[test]
fn involution() {
    for e in random_exprs(1, 200) {
        let twice = !!e.clone();
        for m in SetMask::all_masks() {
            assert_eq!(twice.eval(m), e.eval(m), "{} at {}", e, m);
        }
    }
}

#[test]
fn de_morgan() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    for _ in 0..200 {
        let x = random_expr(&mut rng, 3);
        let y = random_expr(&mut rng, 3);
        let lhs = !(x.clone() | y.clone());
        let rhs = !x.clone() & !y.clone();
        assert!(lhs.equivalent(&rhs), "(x U y). vs x. & y. for x = {}, y = {}", x, y);

        let lhs = !(x.clone() & y.clone());
        let rhs = !x.clone() | !y.clone();
        assert!(lhs.equivalent(&rhs), "(x & y). vs x. U y. for x = {}, y = {}", x, y);
    }
}

#[test]
fn difference_identity() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..200 {
        let x = random_expr(&mut rng, 3);
        let y = random_expr(&mut rng, 3);
        assert!((x.clone() - y.clone()).equivalent(&(x.clone() & !y.clone())));
    }
}

#[test]
fn xor_is_union_minus_intersection() {
    for m in SetMask::all_masks() {
        assert_eq!(eval_text("A ^ B", m), eval_text("(A U B) - (A & B)", m));
        assert_eq!(eval_text("A ^ B ^ C", m), m.len() % 2 == 1);
    }
}

#[test]
fn named_sets_laws() {
    for m in SetMask::all_masks() {
        assert_eq!(eval_text("A..", m), eval_text("A", m));
        assert_eq!(eval_text("(A U B).", m), eval_text("A. & B.", m));
        assert_eq!(eval_text("A - B", m), eval_text("A & B.", m));
        assert!(eval_text("A U A.", m));
        assert!(!eval_text("A & A.", m));
    }
}

// ─── Syntax ────────────────────────────────────────────────────────────────────

#[test]
fn precedence() {
    // & binds tighter than U
    assert!(parse("A U B & C").unwrap().equivalent(&parse("A U (B & C)").unwrap()));
    // complement binds tighter than &
    assert!(parse("A & B.").unwrap().equivalent(&parse("A & (B.)").unwrap()));
    // - is left-associative
    assert!(parse("A - B - C").unwrap().equivalent(&parse("(A - B) - C").unwrap()));
    assert!(!parse("A - B - C").unwrap().equivalent(&parse("A - (B - C)").unwrap()));
}

#[test]
fn display_reparses_to_same_tree() {
    for e in random_exprs(4, 300) {
        let text = e.to_string();
        assert_eq!(parse(&text).unwrap(), e, "reparsing {}", text);
    }
}

#[test]
fn whitespace_is_insignificant() {
    let compact = parse("(AUB)-C.").unwrap();
    let spaced = parse("  ( A U B )\t-  C . ").unwrap();
    assert_eq!(compact, spaced);
}

#[test]
fn deterministic() {
    let text = "((A ^ C) U B.) - (C & A)";
    assert_eq!(parse(text).unwrap(), parse(text).unwrap());
    let e = parse(text).unwrap();
    let first: Vec<bool> = SetMask::all_masks().map(|m| e.eval(m)).collect();
    let second: Vec<bool> = SetMask::all_masks().map(|m| e.eval(m)).collect();
    assert_eq!(first, second);
}

// ─── Errors ────────────────────────────────────────────────────────────────────

#[test]
fn dangling_operator_is_unexpected_end() {
    let err = parse("A &").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(matches!(
        err,
        FormulaError::Parse(ParseError {
            kind: ParseErrorKind::UnexpectedEnd { .. },
            ..
        })
    ));
    assert_eq!(err.position(), 3);
}

#[test]
fn unknown_character_is_lex_error() {
    let err = parse("A $ B").unwrap_err();
    assert_eq!(
        err,
        FormulaError::Lex(LexError {
            found: '$',
            position: 2
        })
    );
    assert!(err.to_string().starts_with("LexError: "));
}

#[test]
fn lowercase_names_are_rejected() {
    let err = parse("a U B").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lex);
    assert_eq!(err.position(), 0);
}

#[test]
fn paren_errors() {
    for (text, position) in [("(A U B", 0), ("A U B)", 5), ("((A)", 0)] {
        let err = parse(text).unwrap_err();
        assert!(
            matches!(
                err,
                FormulaError::Parse(ParseError {
                    kind: ParseErrorKind::UnmatchedParen,
                    ..
                })
            ),
            "{}: {:?}",
            text,
            err
        );
        assert_eq!(err.position(), position, "{}", text);
    }

    let err = parse("()").unwrap_err();
    assert!(matches!(
        err,
        FormulaError::Parse(ParseError {
            kind: ParseErrorKind::EmptyExpression,
            ..
        })
    ));
}

#[test]
fn adjacent_operands_are_rejected() {
    let err = parse("A B").unwrap_err();
    assert!(matches!(
        err,
        FormulaError::Parse(ParseError {
            kind: ParseErrorKind::TrailingInput { .. },
            ..
        })
    ));
    assert_eq!(err.position(), 2);
}
