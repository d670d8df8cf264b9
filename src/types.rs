//! Core value types: set names, membership masks, plane geometry.
//!
//! The three sets are fixed (`A`, `B`, `C`), so membership of a point is a
//! 3-bit mask rather than a general set. The same [`SetMask`] type is used for
//! the set of names a formula references.

use std::fmt;
use std::ops::Index;

/// One of the three named sets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SetName {
    A,
    B,
    C,
}

impl SetName {
    /// All set names, in index order.
    pub const ALL: [SetName; 3] = [SetName::A, SetName::B, SetName::C];

    /// Returns the bit index (0 for `A`, 1 for `B`, 2 for `C`).
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Case-sensitive: only `'A'`, `'B'` and `'C'` are set names.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(SetName::A),
            'B' => Some(SetName::B),
            'C' => Some(SetName::C),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            SetName::A => 'A',
            SetName::B => 'B',
            SetName::C => 'C',
        }
    }
}

impl fmt::Display for SetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A subset of `{A, B, C}` stored as three bits.
///
/// Bit `i` is set iff [`SetName`] with index `i` is in the subset.
///
/// # Invariants
///
/// - Only the low three bits may be set.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SetMask(u8);

impl SetMask {
    pub const EMPTY: SetMask = SetMask(0);
    pub const ALL: SetMask = SetMask(0b111);

    /// Creates a mask from raw bits, dropping everything above bit 2.
    pub const fn from_bits(bits: u8) -> Self {
        SetMask(bits & 0b111)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, name: SetName) -> bool {
        (self.0 >> name.index()) & 1 != 0
    }

    pub fn insert(&mut self, name: SetName) {
        self.0 |= 1 << name.index();
    }

    pub fn remove(&mut self, name: SetName) {
        self.0 &= !(1 << name.index());
    }

    pub fn set(&mut self, name: SetName, value: bool) {
        if value {
            self.insert(name);
        } else {
            self.remove(name);
        }
    }

    /// Returns a copy with `name` added.
    pub const fn with(self, name: SetName) -> Self {
        SetMask(self.0 | (1 << name.index()))
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn union(self, other: SetMask) -> Self {
        SetMask(self.0 | other.0)
    }

    /// Names in this mask, in index order.
    pub fn iter(self) -> impl Iterator<Item = SetName> {
        SetName::ALL.into_iter().filter(move |&name| self.contains(name))
    }

    /// Every one of the eight possible masks, from `{}` to `{A, B, C}`.
    pub fn all_masks() -> impl Iterator<Item = SetMask> {
        (0u8..8).map(SetMask)
    }
}

impl FromIterator<SetName> for SetMask {
    fn from_iter<I: IntoIterator<Item = SetName>>(iter: I) -> Self {
        let mut mask = SetMask::EMPTY;
        for name in iter {
            mask.insert(name);
        }
        mask
    }
}

impl fmt::Display for SetMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, name) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", name)?;
        }
        write!(f, "}}")
    }
}

/// A point in plane coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle, `min` inclusive to `max` inclusive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Rect {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        }
    }

    /// The square `[lo, hi] x [lo, hi]`.
    pub const fn square(lo: f64, hi: f64) -> Self {
        Rect::new(lo, lo, hi, hi)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.min.x.min(other.min.x),
            self.min.y.min(other.min.y),
            self.max.x.max(other.max.x),
            self.max.y.max(other.max.y),
        )
    }

    /// Grows every side by `margin`.
    pub fn inflate(&self, margin: f64) -> Rect {
        Rect::new(
            self.min.x - margin,
            self.min.y - margin,
            self.max.x + margin,
            self.max.y + margin,
        )
    }

    /// Extends the shorter side (about the center) so both sides match.
    pub fn to_square(&self) -> Rect {
        let half = self.width().max(self.height()) / 2.0;
        let c = self.center();
        Rect::new(c.x - half, c.y - half, c.x + half, c.y + half)
    }
}

/// A circle standing for one named set.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub name: SetName,
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(name: SetName, center: Point, radius: f64) -> Self {
        Circle { name, center, radius }
    }

    /// Closed-disc membership test.
    ///
    /// A circle with a non-positive (or NaN) radius contains nothing.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn contains(&self, p: Point) -> bool {
        if !(self.radius > 0.0) {
            return false;
        }
        p.distance_squared(self.center) <= self.radius * self.radius
    }

    /// Bounding box; degenerate circles collapse to their center.
    pub fn bounds(&self) -> Rect {
        let r = if self.radius > 0.0 { self.radius } else { 0.0 };
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }
}

/// Exactly one circle per [`SetName`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circles([Circle; 3]);

impl Circles {
    /// Builds the three circles from `(center, radius)` pairs for `A`, `B`, `C`.
    pub fn new(specs: [(Point, f64); 3]) -> Self {
        let [a, b, c] = specs;
        Circles([
            Circle::new(SetName::A, a.0, a.1),
            Circle::new(SetName::B, b.0, b.1),
            Circle::new(SetName::C, c.0, c.1),
        ])
    }

    pub fn get(&self, name: SetName) -> &Circle {
        &self.0[name.index()]
    }

    pub fn set_center(&mut self, name: SetName, center: Point) {
        self.0[name.index()].center = center;
    }

    pub fn set_radius(&mut self, name: SetName, radius: f64) {
        self.0[name.index()].radius = radius;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Circle> {
        self.0.iter()
    }

    /// Membership of `p` in every circle.
    pub fn membership(&self, p: Point) -> SetMask {
        self.iter()
            .filter(|circle| circle.contains(p))
            .map(|circle| circle.name)
            .collect()
    }

    /// Names whose circle differs between `self` and `other`.
    pub fn changed(&self, other: &Circles) -> SetMask {
        SetName::ALL
            .into_iter()
            .filter(|&name| self.get(name) != other.get(name))
            .collect()
    }

    /// Smallest rectangle covering every circle.
    pub fn bounds(&self) -> Rect {
        let [a, b, c] = &self.0;
        a.bounds().union(&b.bounds()).union(&c.bounds())
    }
}

impl Index<SetName> for Circles {
    type Output = Circle;

    fn index(&self, name: SetName) -> &Circle {
        self.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_name_chars() {
        for name in SetName::ALL {
            assert_eq!(SetName::from_char(name.to_char()), Some(name));
            assert_eq!(SetName::from_index(name.index()), Some(name));
        }
        assert_eq!(SetName::from_char('a'), None);
        assert_eq!(SetName::from_char('D'), None);
        assert_eq!(SetName::from_index(3), None);
    }

    #[test]
    fn test_mask_insert_remove() {
        let mut mask = SetMask::EMPTY;
        assert!(mask.is_empty());
        mask.insert(SetName::A);
        mask.insert(SetName::C);
        assert!(mask.contains(SetName::A));
        assert!(!mask.contains(SetName::B));
        assert_eq!(mask.len(), 2);
        mask.remove(SetName::A);
        assert_eq!(mask, SetMask::EMPTY.with(SetName::C));
        mask.set(SetName::B, true);
        assert_eq!(mask.bits(), 0b110);
    }

    #[test]
    fn test_mask_from_bits_truncates() {
        assert_eq!(SetMask::from_bits(0xFF), SetMask::ALL);
        assert_eq!(SetMask::all_masks().count(), 8);
    }

    #[test]
    fn test_mask_display() {
        let mask: SetMask = [SetName::C, SetName::A].into_iter().collect();
        assert_eq!(mask.to_string(), "{A, C}");
        assert_eq!(SetMask::EMPTY.to_string(), "{}");
    }

    #[test]
    fn test_circle_contains_boundary() {
        let circle = Circle::new(SetName::A, Point::ORIGIN, 1.0);
        assert!(circle.contains(Point::new(1.0, 0.0)));
        assert!(circle.contains(Point::new(0.0, -1.0)));
        assert!(!circle.contains(Point::new(1.0, 0.1)));
    }

    #[test]
    fn test_degenerate_circle_is_empty() {
        let zero = Circle::new(SetName::B, Point::ORIGIN, 0.0);
        let negative = Circle::new(SetName::B, Point::ORIGIN, -2.0);
        let nan = Circle::new(SetName::B, Point::ORIGIN, f64::NAN);
        for circle in [zero, negative, nan] {
            assert!(!circle.contains(Point::ORIGIN));
        }
    }

    #[test]
    fn test_circles_membership_and_changed() {
        let circles = Circles::new([
            (Point::new(-0.5, 0.0), 1.0),
            (Point::new(0.5, 0.0), 1.0),
            (Point::new(0.0, 0.5), 1.0),
        ]);
        assert_eq!(circles.membership(Point::ORIGIN), SetMask::ALL);
        assert_eq!(
            circles.membership(Point::new(-1.2, 0.0)),
            SetMask::EMPTY.with(SetName::A)
        );

        let mut moved = circles;
        moved.set_center(SetName::B, Point::new(3.0, 3.0));
        assert_eq!(circles.changed(&moved), SetMask::EMPTY.with(SetName::B));
        assert_eq!(circles.changed(&circles), SetMask::EMPTY);
        assert_eq!(moved[SetName::B].center, Point::new(3.0, 3.0));
    }

    #[test]
    fn test_rect_to_square() {
        let r = Rect::new(0.0, 0.0, 4.0, 2.0).to_square();
        assert_eq!(r, Rect::new(0.0, -1.0, 4.0, 3.0));
        assert_eq!(r.width(), r.height());
    }
}
