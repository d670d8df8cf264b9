//! # setviz: set formulas over three circles
//!
//! **`setviz`** evaluates set-theoretic formulas such as `(A U B) - C` over three
//! circles `A`, `B`, `C` in the plane and reports which part of the plane the
//! formula describes. It is the engine behind an interactive Venn-diagram
//! visualizer: the user drags circles and types formulas, the engine says which
//! points to highlight.
//!
//! ## How it works
//!
//! The plane is sampled on a uniform `N x N` grid. Each sample knows which of
//! the three circles contain it (a 3-bit membership mask). A formula is parsed
//! into a syntax tree and evaluated as a boolean predicate over that mask, once
//! per sample. The number of matching samples is a proxy for the area of the
//! region.
//!
//! ## Formula syntax
//!
//! | Formula | Meaning |
//! |---------|---------|
//! | `A U B` | union |
//! | `A & B` | intersection |
//! | `A ^ B` | symmetric difference |
//! | `A - B` | difference |
//! | `A.`    | complement (postfix, may be chained) |
//! | `( … )` | grouping |
//!
//! Precedence from tightest to loosest: parentheses, complement, `&`, `^`,
//! `-`, `U`. Binary operators are left-associative.
//!
//! ## Basic Usage
//!
//! ```rust
//! use setviz::config::Config;
//! use setviz::engine::evaluate;
//! use setviz::grid::Region;
//! use setviz::types::{Circles, Point, Rect};
//!
//! // 1. Three unit circles overlapping around the origin
//! let circles = Circles::new([
//!     (Point::new(-0.5, 0.0), 1.0),
//!     (Point::new(0.5, 0.0), 1.0),
//!     (Point::new(0.0, 0.5), 1.0),
//! ]);
//!
//! // 2. Sample [-2, 2] x [-2, 2] on a 100 x 100 grid
//! let config = Config::default().with_region(Region::Fixed(Rect::square(-2.0, 2.0)));
//!
//! // 3. Evaluate formulas
//! let both = evaluate("A & B", &circles, &config).unwrap();
//! let either = evaluate("A U B", &circles, &config).unwrap();
//! assert!(both.count() > 0);
//! assert!(both.count() < either.count());
//!
//! // 4. Malformed input is reported with a position
//! let err = evaluate("A $ B", &circles, &config).unwrap_err();
//! assert_eq!(err.position(), 2);
//! ```
//!
//! ## Core Components
//!
//! - **[`lexer`]** and **[`parser`]**: formula text to [`ast::Expr`].
//! - **[`eval`]**: evaluation of an expression for one membership mask.
//! - **[`grid`]**: the sample lattice and its incremental updates.
//! - **[`engine`]**: the evaluation pipeline and the stateful [`engine::Session`].
//! - **[`render`]** and **[`dot`]**: text and Graphviz diagnostics.

pub mod ast;
pub mod config;
pub mod dot;
pub mod engine;
pub mod error;
pub mod eval;
pub mod grid;
pub mod lexer;
pub mod mask;
pub mod parser;
pub mod render;
pub mod types;
