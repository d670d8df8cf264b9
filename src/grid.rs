//! Grid sampling of the plane.
//!
//! A [`SampleGrid`] is a uniform `N x N` lattice of sample points over a
//! rectangular region, each annotated with its membership in the three
//! circles. Point counts over the grid act as an area proxy.
//!
//! The grid remembers the circles it was built from. [`SampleGrid::update`]
//! does the least work needed to follow a geometry change:
//!
//! - nothing changed: the grid is reused as is,
//! - some circles changed but the sampled region did not: only those
//!   circles' membership bits are recomputed, lattice positions stay put,
//! - the region changed (possible with [`Region::FitCircles`]): the whole
//!   lattice is regenerated.
//!
//! Points are stored row by row from the bottom (`min.y`) up, with `x`
//! varying fastest, so the sample at `(row, col)` has index `row * N + col`.

use log::debug;

use crate::mask::PointMask;
use crate::types::{Circles, Point, Rect, SetMask, SetName};

/// The part of the plane to sample.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Region {
    /// A fixed rectangle, independent of the circles.
    Fixed(Rect),
    /// The smallest square containing all circles, grown by `margin`.
    FitCircles { margin: f64 },
}

impl Region {
    /// The rectangle sampled for the given circles.
    pub fn bounds(&self, circles: &Circles) -> Rect {
        match *self {
            Region::Fixed(rect) => rect,
            Region::FitCircles { margin } => circles.bounds().inflate(margin).to_square(),
        }
    }
}

/// A lattice point and the circles containing it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SamplePoint {
    pub position: Point,
    pub membership: SetMask,
}

/// How [`SampleGrid::update`] followed a geometry change.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GridUpdate {
    /// Geometry unchanged; nothing recomputed.
    Reused,
    /// Only the membership bits of these sets were recomputed.
    Partial(SetMask),
    /// New region; every point was recomputed.
    Regenerated,
}

/// Uniform sample lattice with per-point circle membership.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    resolution: usize,
    region: Region,
    bounds: Rect,
    circles: Circles,
    points: Vec<SamplePoint>,
}

/// `n` evenly spaced values from `lo` to `hi` inclusive.
fn linspace(lo: f64, hi: f64, n: usize) -> impl Iterator<Item = f64> {
    (0..n).map(move |i| {
        if n == 1 {
            (lo + hi) / 2.0
        } else {
            lo + (hi - lo) * (i as f64) / ((n - 1) as f64)
        }
    })
}

impl SampleGrid {
    /// Samples `region` on a `resolution x resolution` lattice.
    ///
    /// # Panics
    ///
    /// Panics if `resolution == 0`.
    pub fn new(circles: &Circles, resolution: usize, region: Region) -> Self {
        assert!(resolution > 0, "Grid resolution must be positive");

        let bounds = region.bounds(circles);
        let xs: Vec<f64> = linspace(bounds.min.x, bounds.max.x, resolution).collect();
        let mut points = Vec::with_capacity(resolution * resolution);
        for y in linspace(bounds.min.y, bounds.max.y, resolution) {
            for &x in &xs {
                let position = Point::new(x, y);
                points.push(SamplePoint {
                    position,
                    membership: circles.membership(position),
                });
            }
        }
        debug!(
            "sample(n = {}, bounds = {} .. {}) -> {} points",
            resolution,
            bounds.min,
            bounds.max,
            points.len()
        );

        Self {
            resolution,
            region,
            bounds,
            circles: *circles,
            points,
        }
    }

    /// Brings the grid in line with `circles`, doing as little work as possible.
    pub fn update(&mut self, circles: &Circles) -> GridUpdate {
        let changed = self.circles.changed(circles);
        if changed.is_empty() {
            debug!("update: geometry unchanged, reusing grid");
            return GridUpdate::Reused;
        }

        if self.region.bounds(circles) != self.bounds {
            debug!("update: region moved, regenerating grid");
            *self = Self::new(circles, self.resolution, self.region);
            return GridUpdate::Regenerated;
        }

        for name in changed.iter() {
            let circle = circles.get(name);
            for point in &mut self.points {
                point.membership.set(name, circle.contains(point.position));
            }
        }
        self.circles = *circles;
        debug!("update: recomputed membership of {}", changed);
        GridUpdate::Partial(changed)
    }

    /// Samples per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// The sampled rectangle.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The circles the memberships were computed from.
    pub fn circles(&self) -> &Circles {
        &self.circles
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SamplePoint> {
        self.points.iter()
    }

    /// Index of the sample at `row` (from the bottom) and `col` (from the left).
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.resolution && col < self.resolution);
        row * self.resolution + col
    }

    /// Plane area each sample stands for.
    pub fn cell_area(&self) -> f64 {
        self.bounds.area() / self.points.len() as f64
    }

    /// Samples whose membership satisfies `pred`.
    pub fn select(&self, mut pred: impl FnMut(SetMask) -> bool) -> PointMask {
        PointMask::from_fn(self.points.len(), |i| pred(self.points[i].membership))
    }

    /// Samples inside the circle of `name`.
    pub fn members(&self, name: SetName) -> PointMask {
        self.select(|m| m.contains(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn circles() -> Circles {
        Circles::new([
            (Point::new(-0.5, 0.0), 1.0),
            (Point::new(0.5, 0.0), 1.0),
            (Point::new(0.0, 0.5), 1.0),
        ])
    }

    fn fixed() -> Region {
        Region::Fixed(Rect::square(-2.0, 2.0))
    }

    #[test]
    fn test_lattice_layout() {
        let grid = SampleGrid::new(&circles(), 5, fixed());
        assert_eq!(grid.len(), 25);
        assert_eq!(grid.points()[0].position, Point::new(-2.0, -2.0));
        assert_eq!(grid.points()[1].position, Point::new(-1.0, -2.0));
        assert_eq!(grid.points()[5].position, Point::new(-2.0, -1.0));
        assert_eq!(grid.points()[24].position, Point::new(2.0, 2.0));
        assert_eq!(grid.points()[grid.index_of(2, 2)].position, Point::ORIGIN);
    }

    #[test]
    fn test_single_sample_is_center() {
        let grid = SampleGrid::new(&circles(), 1, fixed());
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.points()[0].position, Point::ORIGIN);
        assert_eq!(grid.points()[0].membership, SetMask::ALL);
    }

    #[test]
    #[should_panic(expected = "Grid resolution must be positive")]
    fn test_zero_resolution_panics() {
        SampleGrid::new(&circles(), 0, fixed());
    }

    #[test]
    fn test_membership_matches_distance() {
        let circles = circles();
        let grid = SampleGrid::new(&circles, 40, fixed());
        for point in grid.iter() {
            for circle in circles.iter() {
                let inside = point.position.distance_squared(circle.center)
                    <= circle.radius * circle.radius;
                assert_eq!(point.membership.contains(circle.name), inside);
            }
        }
    }

    #[test]
    fn test_update_reuses_unchanged() {
        let circles = circles();
        let mut grid = SampleGrid::new(&circles, 20, fixed());
        assert_eq!(grid.update(&circles), GridUpdate::Reused);
    }

    #[test]
    fn test_update_recomputes_only_moved_circle() {
        let mut circles = circles();
        let mut grid = SampleGrid::new(&circles, 50, fixed());
        let before = grid.points().to_vec();

        circles.set_center(SetName::A, Point::new(1.0, 1.0));
        assert_eq!(
            grid.update(&circles),
            GridUpdate::Partial(SetMask::EMPTY.with(SetName::A))
        );

        let moved = circles.get(SetName::A);
        for (old, new) in before.iter().zip(grid.iter()) {
            assert_eq!(old.position, new.position);
            assert_eq!(old.membership.contains(SetName::B), new.membership.contains(SetName::B));
            assert_eq!(old.membership.contains(SetName::C), new.membership.contains(SetName::C));
            assert_eq!(new.membership.contains(SetName::A), moved.contains(new.position));
        }
        assert_eq!(grid.circles(), &circles);
    }

    #[test]
    fn test_fit_region_contains_circles() {
        let circles = circles();
        let region = Region::FitCircles { margin: 0.25 };
        let bounds = region.bounds(&circles);
        assert_eq!(bounds.width(), bounds.height());
        for circle in circles.iter() {
            assert!(bounds.contains(Point::new(circle.center.x - circle.radius, circle.center.y)));
            assert!(bounds.contains(Point::new(circle.center.x, circle.center.y + circle.radius)));
        }
    }

    #[test]
    fn test_fit_region_regenerates_on_move() {
        let mut circles = circles();
        let mut grid = SampleGrid::new(&circles, 20, Region::FitCircles { margin: 0.1 });
        circles.set_center(SetName::C, Point::new(5.0, 5.0));
        assert_eq!(grid.update(&circles), GridUpdate::Regenerated);
        assert!(grid.bounds().contains(Point::new(5.0, 6.0)));
        assert_eq!(grid.members(SetName::C).count(), grid.select(|m| m.contains(SetName::C)).count());
    }

    #[test]
    fn test_degenerate_radius_yields_empty_set() {
        let mut circles = circles();
        circles.set_radius(SetName::B, 0.0);
        let grid = SampleGrid::new(&circles, 30, fixed());
        assert!(grid.members(SetName::B).is_empty());
        assert!(!grid.members(SetName::A).is_empty());

        circles.set_radius(SetName::B, -1.0);
        let grid = SampleGrid::new(&circles, 30, Region::FitCircles { margin: 0.5 });
        assert!(grid.members(SetName::B).is_empty());
    }

    #[test]
    fn test_disjoint_circles() {
        let circles = Circles::new([
            (Point::new(-3.0, 0.0), 0.5),
            (Point::new(3.0, 0.0), 0.5),
            (Point::new(0.0, 3.0), 0.5),
        ]);
        let grid = SampleGrid::new(&circles, 60, Region::Fixed(Rect::square(-4.0, 4.0)));
        assert!(grid.iter().all(|p| p.membership.len() <= 1));
        assert!(grid.select(|m| m.len() == 1).count() > 0);
    }

    #[test]
    fn test_cell_area() {
        let grid = SampleGrid::new(&circles(), 10, fixed());
        assert!((grid.cell_area() * grid.len() as f64 - 16.0).abs() < 1e-9);
    }
}
