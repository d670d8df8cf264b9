//! Plain-text raster of an evaluation result.
//!
//! Stand-in for a graphical canvas: one character per (downsampled) sample,
//! top row first. Matching samples use `matched`; other samples inside a
//! visible circle show that circle's letter in lowercase (or `overlap` when
//! several visible circles contain them); everything else is `outside`.

use crate::engine::EvaluationResult;
use crate::grid::SampleGrid;
use crate::types::SetMask;

/// Configuration options for the text raster.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Take every `step`-th sample along each axis (default: 1)
    pub step: usize,
    /// Character for samples in the result (default: '#')
    pub matched: char,
    /// Character for samples in several visible circles (default: '+')
    pub overlap: char,
    /// Character for samples in no visible circle (default: '.')
    pub outside: char,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            step: 1,
            matched: '#',
            overlap: '+',
            outside: '.',
        }
    }
}

/// Renders `result` over `grid`, which must be the grid it was computed on.
pub fn render_ascii(grid: &SampleGrid, result: &EvaluationResult) -> String {
    render_ascii_with_config(grid, result, &RenderConfig::default())
}

pub fn render_ascii_with_config(
    grid: &SampleGrid,
    result: &EvaluationResult,
    config: &RenderConfig,
) -> String {
    let step = config.step.max(1);
    let n = grid.resolution();
    let visible = result.visible();

    let mut out = String::new();
    for row in (0..n).rev().step_by(step) {
        for col in (0..n).step_by(step) {
            let index = grid.index_of(row, col);
            let c = if result.matching().contains(index) {
                config.matched
            } else {
                let shown: SetMask = grid.points()[index]
                    .membership
                    .iter()
                    .filter(|&name| visible.contains(name))
                    .collect();
                match shown.len() {
                    0 => config.outside,
                    1 => shown
                        .iter()
                        .next()
                        .map_or(config.outside, |name| name.to_char().to_ascii_lowercase()),
                    _ => config.overlap,
                }
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}
