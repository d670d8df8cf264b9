//! Static configuration of a visualizer session.
//!
//! A [`Config`] is built once at startup and never mutated by the engine.
//!
//! ```
//! use setviz::config::Config;
//! use setviz::grid::Region;
//!
//! let config = Config::default().with_resolution(200).with_margin(0.5);
//! assert_eq!(config.resolution, 200);
//! assert_eq!(config.region, Region::FitCircles { margin: 0.5 });
//! ```

use crate::grid::Region;
use crate::types::{Circles, Point};

/// Samples per axis when nothing else is configured.
pub const DEFAULT_RESOLUTION: usize = 100;

/// Formula shown at startup and after a reset.
pub const DEFAULT_FORMULA: &str = "A U B";

/// Border kept around the circles when sampling.
pub const DEFAULT_MARGIN: f64 = 0.2;

/// Sampled area: the square around all circles, grown by [`DEFAULT_MARGIN`].
pub const DEFAULT_REGION: Region = Region::FitCircles {
    margin: DEFAULT_MARGIN,
};

/// Starting layout: A left, B right, C above, all of radius 1.5.
pub fn default_layout() -> Circles {
    Circles::new([
        (Point::new(-2.0, 0.0), 1.5),
        (Point::new(2.0, 0.0), 1.5),
        (Point::new(0.0, 2.0), 1.5),
    ])
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Samples per axis (N), must be positive
    pub resolution: usize,
    /// Part of the plane to sample
    pub region: Region,
    /// Circles at startup and after a reset
    pub layout: Circles,
    /// Formula at startup and after a reset
    pub default_formula: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            region: DEFAULT_REGION,
            layout: default_layout(),
            default_formula: DEFAULT_FORMULA.to_string(),
        }
    }
}

impl Config {
    /// # Panics
    ///
    /// Panics if `resolution == 0`.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        assert!(resolution > 0, "Grid resolution must be positive");
        self.resolution = resolution;
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Samples the square around all circles, grown by `margin`.
    pub fn with_margin(self, margin: f64) -> Self {
        self.with_region(Region::FitCircles { margin })
    }

    pub fn with_layout(mut self, layout: Circles) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_default_formula(mut self, formula: impl Into<String>) -> Self {
        self.default_formula = formula.into();
        self
    }
}
