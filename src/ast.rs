//! Abstract syntax tree of set formulas.
//!
//! An [`Expr`] is an owned tree built by the parser (or by hand, with the
//! constructors and the `|`, `&`, `^`, `-`, `!` operators). It is immutable
//! once built; evaluation lives in [`crate::eval`].

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not, Sub};

use crate::types::{SetMask, SetName};

/// Binary set operators.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    Union,
    Intersect,
    Xor,
    Diff,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 4] = [
        BinaryOp::Union,
        BinaryOp::Intersect,
        BinaryOp::Xor,
        BinaryOp::Diff,
    ];

    pub const fn symbol(self) -> char {
        match self {
            BinaryOp::Union => 'U',
            BinaryOp::Intersect => '&',
            BinaryOp::Xor => '^',
            BinaryOp::Diff => '-',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BinaryOp::Union => "union",
            BinaryOp::Intersect => "intersect",
            BinaryOp::Xor => "xor",
            BinaryOp::Diff => "diff",
        }
    }

    /// Binding strength; higher binds tighter.
    ///
    /// `&` > `^` > `-` > `U`, all left-associative.
    pub const fn precedence(self) -> u8 {
        match self {
            BinaryOp::Intersect => 4,
            BinaryOp::Xor => 3,
            BinaryOp::Diff => 2,
            BinaryOp::Union => 1,
        }
    }

    /// The boolean function behind the operator.
    pub const fn apply(self, lhs: bool, rhs: bool) -> bool {
        match self {
            BinaryOp::Union => lhs || rhs,
            BinaryOp::Intersect => lhs && rhs,
            BinaryOp::Xor => lhs ^ rhs,
            BinaryOp::Diff => lhs && !rhs,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A set formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A named set
    Set(SetName),
    /// Complement (postfix `.`)
    Complement(Box<Expr>),
    /// Binary operation
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn set(name: SetName) -> Self {
        Expr::Set(name)
    }

    pub fn complement(inner: Self) -> Self {
        Expr::Complement(Box::new(inner))
    }

    pub fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn union(lhs: Self, rhs: Self) -> Self {
        Expr::binary(BinaryOp::Union, lhs, rhs)
    }

    pub fn intersect(lhs: Self, rhs: Self) -> Self {
        Expr::binary(BinaryOp::Intersect, lhs, rhs)
    }

    pub fn xor(lhs: Self, rhs: Self) -> Self {
        Expr::binary(BinaryOp::Xor, lhs, rhs)
    }

    pub fn diff(lhs: Self, rhs: Self) -> Self {
        Expr::binary(BinaryOp::Diff, lhs, rhs)
    }

    /// Depth of the expression tree (0 for leaves).
    pub fn depth(&self) -> usize {
        match self {
            Expr::Set(_) => 0,
            Expr::Complement(e) => 1 + e.depth(),
            Expr::Binary(_, l, r) => 1 + l.depth().max(r.depth()),
        }
    }

    /// Size of the expression tree (number of nodes).
    pub fn size(&self) -> usize {
        match self {
            Expr::Set(_) => 1,
            Expr::Complement(e) => 1 + e.size(),
            Expr::Binary(_, l, r) => 1 + l.size() + r.size(),
        }
    }

    /// Names the formula mentions.
    ///
    /// Drives which circles stay visible. Note that a name counts as
    /// referenced even when it cancels out semantically (`A - A`).
    pub fn referenced_sets(&self) -> SetMask {
        match self {
            Expr::Set(name) => SetMask::EMPTY.with(*name),
            Expr::Complement(e) => e.referenced_sets(),
            Expr::Binary(_, l, r) => l.referenced_sets().union(r.referenced_sets()),
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parens: bool) -> fmt::Result {
        if parens {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

/// Prints the formula in input syntax with minimal parentheses.
///
/// Parsing the printed text gives back an equal tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Set(name) => write!(f, "{}", name),
            Expr::Complement(e) => {
                e.fmt_operand(f, matches!(**e, Expr::Binary(..)))?;
                write!(f, ".")
            }
            Expr::Binary(op, l, r) => {
                let prec = op.precedence();
                let left_parens = matches!(**l, Expr::Binary(lop, ..) if lop.precedence() < prec);
                let right_parens = matches!(**r, Expr::Binary(rop, ..) if rop.precedence() <= prec);
                l.fmt_operand(f, left_parens)?;
                write!(f, " {} ", op)?;
                r.fmt_operand(f, right_parens)
            }
        }
    }
}

impl From<SetName> for Expr {
    fn from(name: SetName) -> Self {
        Expr::Set(name)
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Self) -> Self::Output {
        Expr::union(self, rhs)
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Self) -> Self::Output {
        Expr::intersect(self, rhs)
    }
}

impl BitXor for Expr {
    type Output = Expr;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Expr::xor(self, rhs)
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::diff(self, rhs)
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Self::Output {
        Expr::complement(self)
    }
}
