//! In-memory values for the PostgreSQL geometric types.
//!
//! Every constructor that can violate a type invariant returns [`Result`];
//! once built, a value always renders to text PostgreSQL accepts.

use std::cmp::Ordering;

use crate::error::{GeometryError, Result};

/// Minimum number of points in a [`Path`].
pub const PATH_MIN_POINTS: usize = 2;
/// Minimum number of points in a [`Polygon`].
pub const POLYGON_MIN_POINTS: usize = 3;

// ── point ─────────────────────────────────────────────────────────────────────

/// A 2D point (`point`).
///
/// Points order lexicographically by `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.x, self.y).partial_cmp(&(other.x, other.y))
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

// ── line ──────────────────────────────────────────────────────────────────────

/// An infinite line `Ax + By + C = 0` (`line`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    a: f64,
    b: f64,
    c: f64,
}

impl Line {
    /// Build a line from its coefficients; `A` and `B` cannot both be zero.
    ///
    /// # Example
    ///
    /// ```
    /// use pgeom_core::Line;
    ///
    /// let line = Line::new(1.0, -1.0, 0.0).unwrap();
    /// assert_eq!(line.evaluate(2.0, 2.0), 0.0);
    /// assert!(Line::new(0.0, 0.0, 1.0).is_err());
    /// ```
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self> {
        if a == 0.0 && b == 0.0 {
            return Err(GeometryError::InvalidLine("A and B cannot both be zero"));
        }
        Ok(Self { a, b, c })
    }

    /// The line through two distinct points.
    ///
    /// Vertical lines are normalised to `{-1,0,x}`, horizontal ones to
    /// `{0,-1,y}`, anything else to `{m,-1,y-m*x}`, matching the server.
    pub fn from_points(p1: Point, p2: Point) -> Result<Self> {
        if p1 == p2 {
            return Err(GeometryError::InvalidLine("must be two distinct points"));
        }
        if p1.x == p2.x {
            Self::new(-1.0, 0.0, p1.x)
        } else if p1.y == p2.y {
            Self::new(0.0, -1.0, p1.y)
        } else {
            let slope = (p2.y - p1.y) / (p2.x - p1.x);
            Self::new(slope, -1.0, p1.y - slope * p1.x)
        }
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    /// `Ax + By + C` at `(x, y)`; zero when the point lies on the line.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        self.a * x + self.b * y + self.c
    }
}

// ── lseg ──────────────────────────────────────────────────────────────────────

/// A finite line segment (`lseg`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Build a segment from a point list holding exactly two points.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        match points {
            [start, end] => Ok(Self::new(*start, *end)),
            _ => Err(GeometryError::PointCount {
                kind: "lseg",
                expected: "exactly 2",
                actual: points.len(),
            }),
        }
    }

    pub fn points(&self) -> [Point; 2] {
        [self.start, self.end]
    }
}

// ── box ───────────────────────────────────────────────────────────────────────

/// A rectangular box (`box`), kept as its upper-right and lower-left corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PgBox {
    high: Point,
    low: Point,
}

impl PgBox {
    /// Build a box from any two opposite corners.
    ///
    /// # Example
    ///
    /// ```
    /// use pgeom_core::{PgBox, Point};
    ///
    /// let b = PgBox::new(Point::new(1.0, 2.0), Point::new(2.0, 1.0));
    /// assert_eq!(b.high(), Point::new(2.0, 2.0));
    /// assert_eq!(b.low(), Point::new(1.0, 1.0));
    /// ```
    pub fn new(a: Point, b: Point) -> Self {
        let (high_x, low_x) = high_low(a.x, b.x);
        let (high_y, low_y) = high_low(a.y, b.y);
        Self {
            high: Point::new(high_x, high_y),
            low: Point::new(low_x, low_y),
        }
    }

    /// Build a box from a point list holding exactly two corners.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        match points {
            [a, b] => Ok(Self::new(*a, *b)),
            _ => Err(GeometryError::PointCount {
                kind: "box",
                expected: "exactly 2",
                actual: points.len(),
            }),
        }
    }

    pub fn high(&self) -> Point {
        self.high
    }

    pub fn low(&self) -> Point {
        self.low
    }

    /// `[upper-right, lower-left]`.
    pub fn corners(&self) -> [Point; 2] {
        [self.high, self.low]
    }
}

/// Order two coordinates the way the server does, with NaN above every number.
fn high_low(a: f64, b: f64) -> (f64, f64) {
    let a_above = if a.is_nan() {
        !b.is_nan()
    } else {
        !b.is_nan() && a > b
    };
    if a_above {
        (a, b)
    } else {
        (b, a)
    }
}

// ── path ──────────────────────────────────────────────────────────────────────

/// An open or closed polyline (`path`).
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Point>,
    closed: bool,
}

impl Path {
    pub fn new(points: impl Into<Vec<Point>>, closed: bool) -> Result<Self> {
        let path = Self::from_stored(points.into(), closed);
        path.validate()?;
        Ok(path)
    }

    /// A path read back from the database, where a single point is legal.
    pub(crate) fn from_stored(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Check the point count before the path is written.
    pub fn validate(&self) -> Result<()> {
        if self.points.len() < PATH_MIN_POINTS {
            return Err(GeometryError::PointCount {
                kind: "path",
                expected: "at least 2",
                actual: self.points.len(),
            });
        }
        Ok(())
    }

    pub fn open(points: impl Into<Vec<Point>>) -> Result<Self> {
        Self::new(points, false)
    }

    pub fn closed(points: impl Into<Vec<Point>>) -> Result<Self> {
        Self::new(points, true)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

// ── polygon ───────────────────────────────────────────────────────────────────

/// A polygon given by its vertices (`polygon`).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: impl Into<Vec<Point>>) -> Result<Self> {
        let polygon = Self::from_stored(points.into());
        polygon.validate()?;
        Ok(polygon)
    }

    /// A polygon read back from the database, where fewer than three
    /// vertices are legal.
    pub(crate) fn from_stored(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Check the vertex count before the polygon is written.
    pub fn validate(&self) -> Result<()> {
        if self.points.len() < POLYGON_MIN_POINTS {
            return Err(GeometryError::PointCount {
                kind: "polygon",
                expected: "at least 3",
                actual: self.points.len(),
            });
        }
        Ok(())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

// ── circle ────────────────────────────────────────────────────────────────────

/// A circle given by centre and radius (`circle`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    /// Build a circle; negative radii are rejected like the server does.
    pub fn new(center: Point, radius: f64) -> Result<Self> {
        if radius < 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    /// A circle centred at the origin.
    pub fn from_radius(radius: f64) -> Result<Self> {
        Self::new(Point::default(), radius)
    }

    pub fn from_coords(x: f64, y: f64, radius: f64) -> Result<Self> {
        Self::new(Point::new(x, y), radius)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_equality_and_order() {
        assert_eq!(Point::new(1.0, 1.0), Point::from((1.0, 1.0)));
        assert_ne!(Point::new(1.0, 1.0), Point::new(1.0, 2.0));
        assert!(Point::new(1.0, 5.0) < Point::new(2.0, 0.0));
        assert!(Point::new(1.0, 1.0) < Point::new(1.0, 2.0));
        assert_eq!(Point::default(), Point::new(0.0, 0.0));
    }

    #[test]
    fn line_rejects_degenerate_coefficients() {
        let err = Line::new(0.0, 0.0, 1.0).unwrap_err();
        assert!(format!("{err}").contains("A and B cannot both be zero"));
    }

    #[test]
    fn line_evaluate() {
        let line = Line::new(1.0, -1.0, 0.0).unwrap();
        assert_eq!(line.evaluate(1.0, 1.0), 0.0);
        assert_eq!(line.evaluate(3.0, 2.0), 1.0);
    }

    #[test]
    fn line_from_points_normalises_orientation() {
        let vertical = Line::from_points(Point::new(3.0, 0.0), Point::new(3.0, 5.0)).unwrap();
        assert_eq!((vertical.a(), vertical.b(), vertical.c()), (-1.0, 0.0, 3.0));

        let horizontal = Line::from_points(Point::new(0.0, 2.0), Point::new(4.0, 2.0)).unwrap();
        assert_eq!((horizontal.a(), horizontal.b(), horizontal.c()), (0.0, -1.0, 2.0));

        let sloped = Line::from_points(Point::new(0.0, 1.0), Point::new(1.0, 3.0)).unwrap();
        assert_eq!((sloped.a(), sloped.b(), sloped.c()), (2.0, -1.0, 1.0));
        assert_eq!(sloped.evaluate(1.0, 3.0), 0.0);

        assert!(Line::from_points(Point::new(1.0, 1.0), Point::new(1.0, 1.0)).is_err());
    }

    #[test]
    fn segment_needs_exactly_two_points() {
        let one = [Point::new(1.0, 1.0)];
        let three = [Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 3.0)];
        assert!(matches!(
            LineSegment::from_points(&one),
            Err(GeometryError::PointCount { actual: 1, .. })
        ));
        assert!(matches!(
            LineSegment::from_points(&three),
            Err(GeometryError::PointCount { actual: 3, .. })
        ));
        let seg = LineSegment::from_points(&three[..2]).unwrap();
        assert_eq!(seg.points(), [Point::new(1.0, 1.0), Point::new(2.0, 2.0)]);
    }

    #[test]
    fn box_normalises_corners() {
        let b = PgBox::new(Point::new(2.0, 2.0), Point::new(1.0, 1.0));
        assert_eq!(b.corners(), [Point::new(2.0, 2.0), Point::new(1.0, 1.0)]);

        // upper-left / lower-right input
        let b = PgBox::new(Point::new(1.0, 2.0), Point::new(2.0, 1.0));
        assert_eq!(b.corners(), [Point::new(2.0, 2.0), Point::new(1.0, 1.0)]);

        assert!(PgBox::from_points(&[Point::new(1.0, 1.0)]).is_err());
    }

    #[test]
    fn box_orders_nan_above_numbers() {
        for (a, b) in [
            (Point::new(f64::NAN, 2.0), Point::new(2.0, 1.0)),
            (Point::new(2.0, 1.0), Point::new(f64::NAN, 2.0)),
        ] {
            let bx = PgBox::new(a, b);
            assert!(bx.high().x.is_nan());
            assert_eq!(bx.high().y, 2.0);
            assert_eq!(bx.low(), Point::new(2.0, 1.0));
        }

        let bx = PgBox::new(Point::new(0.0, f64::NAN), Point::new(1.0, f64::INFINITY));
        assert!(bx.high().y.is_nan());
        assert_eq!(bx.low().y, f64::INFINITY);
    }

    #[test]
    fn path_and_polygon_minimum_points() {
        let err = Path::open(vec![Point::default()]).unwrap_err();
        assert!(format!("{err}").contains("at least 2"));
        assert!(Path::closed(vec![Point::default(), Point::new(1.0, 1.0)]).is_ok());

        let err = Polygon::new(vec![Point::default(), Point::new(1.0, 1.0)]).unwrap_err();
        assert!(format!("{err}").contains("at least 3"));
        let poly = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(poly.points().len(), 3);
    }

    #[test]
    fn circle_constructors() {
        let c = Circle::from_radius(1.0).unwrap();
        assert_eq!(c.center(), Point::default());
        assert_eq!(c.radius(), 1.0);

        let c = Circle::new(Point::new(1.0, 2.0), 1.0).unwrap();
        assert_eq!(c.center(), Point::new(1.0, 2.0));

        let c = Circle::from_coords(1.0, 2.0, 3.0).unwrap();
        assert_eq!(c, Circle::new(Point::new(1.0, 2.0), 3.0).unwrap());
        assert_ne!(c, Circle::from_coords(2.0, 2.0, 3.0).unwrap());

        assert!(matches!(
            Circle::from_radius(-1.5),
            Err(GeometryError::InvalidRadius(r)) if r == -1.5
        ));

        // Only a negative radius is refused; NaN passes like on the server.
        let c = Circle::new(Point::new(1.0, 2.0), f64::NAN).unwrap();
        assert!(c.radius().is_nan());
        assert!(Circle::from_radius(f64::INFINITY).is_ok());
    }
}
