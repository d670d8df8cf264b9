//! Evaluation of set formulas against point membership.
//!
//! A formula is a predicate over the three-bit membership of a point: the
//! point lies in the region described by the formula iff the formula
//! evaluates to `true` for that point's [`SetMask`]. Evaluation is pure and
//! total, so it never fails once a formula has been parsed.

use crate::ast::Expr;
use crate::types::{SetMask, SetName};

/// Something that can be decided for a membership vector.
pub trait Eval {
    fn eval(&self, membership: SetMask) -> bool;
}

impl Eval for SetName {
    fn eval(&self, membership: SetMask) -> bool {
        membership.contains(*self)
    }
}

impl Eval for Expr {
    fn eval(&self, membership: SetMask) -> bool {
        match self {
            Expr::Set(name) => name.eval(membership),
            Expr::Complement(e) => !e.eval(membership),
            Expr::Binary(op, l, r) => op.apply(l.eval(membership), r.eval(membership)),
        }
    }
}

impl Expr {
    /// The 8-row truth table of this formula.
    ///
    /// Bit `m` is set iff the formula holds for the membership mask with
    /// bits `m`; e.g. `A & B` has bits 3 (`{A, B}`) and 7 (`{A, B, C}`).
    pub fn truth_table(&self) -> u8 {
        SetMask::all_masks()
            .filter(|&m| self.eval(m))
            .fold(0u8, |tt, m| tt | (1 << m.bits()))
    }

    /// Returns true if both formulas describe the same region for every
    /// possible placement of the circles.
    pub fn equivalent(&self, other: &Expr) -> bool {
        self.truth_table() == other.truth_table()
    }
}
