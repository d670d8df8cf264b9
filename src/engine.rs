//! Formula engine: formula text and circle geometry in, highlighted samples out.
//!
//! One evaluation cycle runs the whole pipeline:
//!
//! 1. tokenize and parse the formula text ([`crate::parser::parse`]),
//! 2. collect the referenced set names (which circles stay visible),
//! 3. evaluate the formula for every sample of the [`SampleGrid`],
//! 4. report the matching samples and their count.
//!
//! Blank formula text is not an error: it yields an *idle* result with no
//! matching samples and every circle visible.
//!
//! The stateless entry points are [`evaluate`] and [`evaluate_on`]. A
//! [`Session`] owns the mutable state of one visualizer (circles, formula
//! text, cached grid, last valid result) and exposes the event handlers the
//! interaction layer calls.
//!
//! # Examples
//!
//! ```
//! use setviz::config::Config;
//! use setviz::engine::Session;
//! use setviz::types::{Point, SetName};
//!
//! let mut session = Session::new(Config::default());
//! let union = session.result().count();
//!
//! let both = session.on_formula_changed("A & B").unwrap().count();
//! assert_eq!(both, 0); // A and B start apart
//!
//! session.on_circle_moved(SetName::B, Point::new(-1.0, 0.0)).unwrap();
//! assert!(session.result().count() > 0);
//! assert!(session.result().count() < union);
//!
//! // A typo keeps the last valid picture.
//! assert!(session.on_formula_changed("A & ").is_err());
//! assert_eq!(session.result().formula().unwrap().to_string(), "A & B");
//! ```

use std::fmt;

use log::{debug, info};

use crate::ast::Expr;
use crate::config::Config;
use crate::error::FormulaError;
use crate::eval::Eval;
use crate::grid::{GridUpdate, SampleGrid, SamplePoint};
use crate::mask::PointMask;
use crate::parser::parse;
use crate::types::{Circles, Point, SetMask, SetName};

/// Outcome of one evaluation cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    formula: Option<Expr>,
    matching: PointMask,
    visible: SetMask,
    cell_area: f64,
}

impl EvaluationResult {
    /// The "no formula" state for `grid`: nothing highlighted, all circles shown.
    pub fn idle(grid: &SampleGrid) -> Self {
        Self {
            formula: None,
            matching: PointMask::new(grid.len()),
            visible: SetMask::ALL,
            cell_area: grid.cell_area(),
        }
    }

    /// Returns true when there was no formula to evaluate.
    pub fn is_idle(&self) -> bool {
        self.formula.is_none()
    }

    /// The evaluated formula, `None` when idle.
    pub fn formula(&self) -> Option<&Expr> {
        self.formula.as_ref()
    }

    /// Indices (into the grid) of the samples inside the region.
    pub fn matching(&self) -> &PointMask {
        &self.matching
    }

    /// Number of matching samples.
    pub fn count(&self) -> usize {
        self.matching.count()
    }

    /// Circles to show: the sets the formula refers to.
    pub fn visible(&self) -> SetMask {
        self.visible
    }

    /// Plane area of the region, estimated from the sample count.
    pub fn area_estimate(&self) -> f64 {
        self.count() as f64 * self.cell_area
    }

    /// The matching samples themselves.
    ///
    /// `grid` must be the grid this result was computed on.
    pub fn matching_points<'g>(
        &'g self,
        grid: &'g SampleGrid,
    ) -> impl Iterator<Item = &'g SamplePoint> + 'g {
        self.matching.iter().map(move |i| &grid.points()[i])
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.formula {
            Some(expr) => write!(f, "{} | points: {}", expr, self.count()),
            None => write!(f, "no formula"),
        }
    }
}

/// Runs the evaluator for every sample of `grid`.
pub fn evaluate_expr(expr: &Expr, grid: &SampleGrid) -> EvaluationResult {
    let matching = grid.select(|membership| expr.eval(membership));
    debug!(
        "evaluate({}) -> {} of {} points",
        expr,
        matching.count(),
        grid.len()
    );
    EvaluationResult {
        formula: Some(expr.clone()),
        matching,
        visible: expr.referenced_sets(),
        cell_area: grid.cell_area(),
    }
}

/// Parses `text` and evaluates it over an existing grid.
pub fn evaluate_on(text: &str, grid: &SampleGrid) -> Result<EvaluationResult, FormulaError> {
    if text.trim().is_empty() {
        return Ok(EvaluationResult::idle(grid));
    }
    let expr = parse(text)?;
    Ok(evaluate_expr(&expr, grid))
}

/// Samples `circles` as `config` says and evaluates `text` over the result.
pub fn evaluate(
    text: &str,
    circles: &Circles,
    config: &Config,
) -> Result<EvaluationResult, FormulaError> {
    let grid = SampleGrid::new(circles, config.resolution, config.region);
    evaluate_on(text, &grid)
}

/// Work counters of a [`Session`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SessionStats {
    /// Evaluation cycles run
    pub evaluations: usize,
    /// Full grid builds, including the initial one
    pub regenerations: usize,
    /// Grid updates that recomputed only some membership bits
    pub partial_updates: usize,
    /// Geometry events that left the grid untouched
    pub reuses: usize,
}

/// The state of one visualizer.
///
/// Event handlers return the fresh result, or the error that prevented one.
/// On error the previous valid result stays in place (see [`Session::result`])
/// and the error is kept in [`Session::error`] until the next successful
/// cycle. If the circles move while the formula text is invalid, the last
/// valid formula is re-evaluated so the retained picture follows the circles.
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    circles: Circles,
    formula: String,
    grid: SampleGrid,
    result: EvaluationResult,
    error: Option<FormulaError>,
    stats: SessionStats,
}

impl Session {
    /// Starts from the configured layout and default formula.
    pub fn new(config: Config) -> Self {
        let circles = config.layout;
        let grid = SampleGrid::new(&circles, config.resolution, config.region);
        let result = EvaluationResult::idle(&grid);
        let formula = config.default_formula.clone();

        let mut session = Self {
            config,
            circles,
            formula,
            grid,
            result,
            error: None,
            stats: SessionStats {
                regenerations: 1,
                ..SessionStats::default()
            },
        };
        // An invalid default formula is recorded in `error`.
        let _ = session.refresh(false);
        session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn circles(&self) -> &Circles {
        &self.circles
    }

    /// Current formula text, valid or not.
    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Last valid result.
    pub fn result(&self) -> &EvaluationResult {
        &self.result
    }

    /// Error of the current formula text, if it is invalid.
    pub fn error(&self) -> Option<&FormulaError> {
        self.error.as_ref()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// The user edited the formula.
    pub fn on_formula_changed(
        &mut self,
        text: impl Into<String>,
    ) -> Result<&EvaluationResult, FormulaError> {
        self.formula = text.into();
        self.refresh(false)
    }

    /// The user dragged the circle of `name` to `center`.
    pub fn on_circle_moved(
        &mut self,
        name: SetName,
        center: Point,
    ) -> Result<&EvaluationResult, FormulaError> {
        self.circles.set_center(name, center);
        self.sync_grid();
        self.refresh(true)
    }

    /// The circle of `name` got a new radius.
    pub fn on_circle_resized(
        &mut self,
        name: SetName,
        radius: f64,
    ) -> Result<&EvaluationResult, FormulaError> {
        self.circles.set_radius(name, radius);
        self.sync_grid();
        self.refresh(true)
    }

    /// Restores the configured circles and default formula.
    pub fn on_reset(&mut self) -> Result<&EvaluationResult, FormulaError> {
        info!("reset: restoring initial layout and formula");
        self.circles = self.config.layout;
        self.formula = self.config.default_formula.clone();
        self.sync_grid();
        self.refresh(true)
    }

    fn sync_grid(&mut self) {
        match self.grid.update(&self.circles) {
            GridUpdate::Reused => self.stats.reuses += 1,
            GridUpdate::Partial(_) => self.stats.partial_updates += 1,
            GridUpdate::Regenerated => self.stats.regenerations += 1,
        }
    }

    fn refresh(&mut self, geometry_changed: bool) -> Result<&EvaluationResult, FormulaError> {
        self.stats.evaluations += 1;
        match evaluate_on(&self.formula, &self.grid) {
            Ok(result) => {
                self.result = result;
                self.error = None;
                Ok(&self.result)
            }
            Err(err) => {
                debug!("refresh: {}", err);
                if geometry_changed {
                    self.result = match self.result.formula() {
                        Some(expr) => evaluate_expr(expr, &self.grid),
                        None => EvaluationResult::idle(&self.grid),
                    };
                }
                self.error = Some(err);
                Err(err)
            }
        }
    }
}
