//! Interop with the `geo` ecosystem and WKT / GeoJSON through `geozero`.
//!
//! `line` and `circle` have no `geo` counterpart and are not converted.

use geo::{Coord, Geometry, LineString};
use geozero::{ToGeo, ToJson, ToWkt};

use crate::error::{GeometryError, Result};
use crate::types::{LineSegment, Path, PgBox, Point, Polygon};

// ── point ─────────────────────────────────────────────────────────────────────

impl From<Point> for Coord<f64> {
    fn from(p: Point) -> Self {
        Coord { x: p.x, y: p.y }
    }
}

impl From<Coord<f64>> for Point {
    fn from(c: Coord<f64>) -> Self {
        Point::new(c.x, c.y)
    }
}

impl From<Point> for geo::Point<f64> {
    fn from(p: Point) -> Self {
        geo::Point::new(p.x, p.y)
    }
}

impl From<geo::Point<f64>> for Point {
    fn from(p: geo::Point<f64>) -> Self {
        Point::new(p.x(), p.y())
    }
}

// ── lseg ──────────────────────────────────────────────────────────────────────

impl From<LineSegment> for geo::Line<f64> {
    fn from(seg: LineSegment) -> Self {
        geo::Line::new(Coord::from(seg.start), Coord::from(seg.end))
    }
}

impl From<geo::Line<f64>> for LineSegment {
    fn from(line: geo::Line<f64>) -> Self {
        LineSegment::new(line.start.into(), line.end.into())
    }
}

// ── box ───────────────────────────────────────────────────────────────────────

impl From<PgBox> for geo::Rect<f64> {
    fn from(b: PgBox) -> Self {
        geo::Rect::new(Coord::from(b.low()), Coord::from(b.high()))
    }
}

impl From<geo::Rect<f64>> for PgBox {
    fn from(rect: geo::Rect<f64>) -> Self {
        PgBox::new(rect.max().into(), rect.min().into())
    }
}

// ── path ──────────────────────────────────────────────────────────────────────

/// Closed paths repeat their first point at the end of the line string.
impl From<&Path> for LineString<f64> {
    fn from(path: &Path) -> Self {
        let mut coords: Vec<Coord<f64>> = path.points().iter().map(|&p| p.into()).collect();
        if path.is_closed() {
            if let Some(&first) = coords.first() {
                coords.push(first);
            }
        }
        LineString::new(coords)
    }
}

/// A ring (first coordinate repeated at the end, more than two coordinates)
/// becomes a closed path without the repeated point; anything else is open.
impl TryFrom<LineString<f64>> for Path {
    type Error = GeometryError;

    fn try_from(ls: LineString<f64>) -> Result<Self> {
        let closed = ls.0.len() > 2 && ls.is_closed();
        let mut points: Vec<Point> = ls.0.into_iter().map(Point::from).collect();
        if closed {
            points.pop();
        }
        Path::new(points, closed)
    }
}

// ── polygon ───────────────────────────────────────────────────────────────────

impl From<&Polygon> for geo::Polygon<f64> {
    fn from(polygon: &Polygon) -> Self {
        let ring: Vec<Coord<f64>> = polygon.points().iter().map(|&p| p.into()).collect();
        geo::Polygon::new(LineString::new(ring), vec![])
    }
}

/// Only the exterior ring is representable; polygons with holes are rejected.
impl TryFrom<geo::Polygon<f64>> for Polygon {
    type Error = GeometryError;

    fn try_from(polygon: geo::Polygon<f64>) -> Result<Self> {
        if !polygon.interiors().is_empty() {
            return Err(GeometryError::WrongType("polygon without interior rings"));
        }
        let (exterior, _) = polygon.into_inner();
        let closed = exterior.is_closed();
        let mut points: Vec<Point> = exterior.0.into_iter().map(Point::from).collect();
        if closed && points.len() > 1 {
            points.pop();
        }
        Polygon::new(points)
    }
}

// ── geo::Geometry ─────────────────────────────────────────────────────────────

impl From<Point> for Geometry<f64> {
    fn from(p: Point) -> Self {
        Geometry::Point(p.into())
    }
}

impl From<LineSegment> for Geometry<f64> {
    fn from(seg: LineSegment) -> Self {
        Geometry::LineString(LineString::new(vec![seg.start.into(), seg.end.into()]))
    }
}

impl From<PgBox> for Geometry<f64> {
    fn from(b: PgBox) -> Self {
        Geometry::Polygon(geo::Rect::from(b).to_polygon())
    }
}

impl From<Path> for Geometry<f64> {
    fn from(path: Path) -> Self {
        Geometry::LineString(LineString::from(&path))
    }
}

impl From<Polygon> for Geometry<f64> {
    fn from(polygon: Polygon) -> Self {
        Geometry::Polygon(geo::Polygon::from(&polygon))
    }
}

impl TryFrom<Geometry<f64>> for Point {
    type Error = GeometryError;

    fn try_from(geom: Geometry<f64>) -> Result<Self> {
        match geom {
            Geometry::Point(p) => Ok(p.into()),
            _ => Err(GeometryError::WrongType("point")),
        }
    }
}

impl TryFrom<Geometry<f64>> for LineSegment {
    type Error = GeometryError;

    fn try_from(geom: Geometry<f64>) -> Result<Self> {
        match geom {
            Geometry::Line(line) => Ok(line.into()),
            Geometry::LineString(ls) if ls.0.len() == 2 => {
                Ok(LineSegment::new(ls.0[0].into(), ls.0[1].into()))
            }
            _ => Err(GeometryError::WrongType("line segment")),
        }
    }
}

impl TryFrom<Geometry<f64>> for PgBox {
    type Error = GeometryError;

    fn try_from(geom: Geometry<f64>) -> Result<Self> {
        match geom {
            Geometry::Rect(rect) => Ok(rect.into()),
            _ => Err(GeometryError::WrongType("rectangle")),
        }
    }
}

impl TryFrom<Geometry<f64>> for Path {
    type Error = GeometryError;

    fn try_from(geom: Geometry<f64>) -> Result<Self> {
        match geom {
            Geometry::LineString(ls) => Path::try_from(ls),
            Geometry::Line(line) => Path::open(vec![line.start.into(), line.end.into()]),
            _ => Err(GeometryError::WrongType("linestring")),
        }
    }
}

impl TryFrom<Geometry<f64>> for Polygon {
    type Error = GeometryError;

    fn try_from(geom: Geometry<f64>) -> Result<Self> {
        match geom {
            Geometry::Polygon(polygon) => Polygon::try_from(polygon),
            Geometry::Rect(rect) => Polygon::try_from(rect.to_polygon()),
            Geometry::Triangle(triangle) => Polygon::try_from(triangle.to_polygon()),
            _ => Err(GeometryError::WrongType("polygon")),
        }
    }
}

// ── WKT / GeoJSON ─────────────────────────────────────────────────────────────

/// Serialize a geometric value as WKT.
///
/// # Example
///
/// ```
/// use pgeom_core::convert::as_wkt;
/// use pgeom_core::Point;
///
/// let wkt = as_wkt(Point::new(1.0, 2.0)).unwrap();
/// assert!(wkt.starts_with("POINT"));
/// ```
pub fn as_wkt(value: impl Into<Geometry<f64>>) -> Result<String> {
    Ok(value.into().to_wkt()?)
}

/// Serialize a geometric value as a GeoJSON geometry object.
pub fn as_geojson(value: impl Into<Geometry<f64>>) -> Result<String> {
    Ok(value.into().to_json()?)
}

/// Parse WKT into a geometric value of the requested type.
///
/// # Example
///
/// ```
/// use pgeom_core::convert::from_wkt;
/// use pgeom_core::Path;
///
/// let path: Path = from_wkt("LINESTRING(0 0, 1 1, 0 0)").unwrap();
/// assert!(path.is_closed());
/// assert_eq!(path.points().len(), 2);
/// ```
pub fn from_wkt<T>(wkt: &str) -> Result<T>
where
    T: TryFrom<Geometry<f64>, Error = GeometryError>,
{
    let geom: Geometry<f64> = geozero::wkt::Wkt(wkt.as_bytes()).to_geo()?;
    T::try_from(geom)
}
