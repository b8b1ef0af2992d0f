//! PostgreSQL binary (send/recv) encoding of the geometric types.
//!
//! Wire format, all numbers in network (big-endian) byte order:
//!   point    [f64 x][f64 y]
//!   line     [f64 A][f64 B][f64 C]
//!   lseg     [point start][point end]
//!   box      [point high][point low]
//!   path     [u8 closed][i32 npts][point × npts]
//!   polygon  [i32 npts][point × npts]
//!   circle   [point center][f64 radius]

use crate::error::{GeometryError, Result};
use crate::types::{Circle, Line, LineSegment, Path, PgBox, Point, Polygon};

/// Encoded size of a single point.
pub const POINT_SIZE: usize = 16;

struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
    kind: &'static str,
}

impl<'a> WireReader<'a> {
    fn new(buf: &'a [u8], kind: &'static str) -> Self {
        Self { buf, pos: 0, kind }
    }

    fn error(&self, reason: &'static str) -> GeometryError {
        GeometryError::InvalidWire {
            kind: self.kind,
            reason,
        }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self.pos + N;
        let Some(slice) = self.buf.get(self.pos..end) else {
            return Err(self.error("value truncated"));
        };
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(slice);
        self.pos = end;
        Ok(bytes)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take::<1>()?[0])
    }

    fn i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.take()?))
    }

    fn f64(&mut self) -> Result<f64> {
        Ok(f64::from_be_bytes(self.take()?))
    }

    fn point(&mut self) -> Result<Point> {
        let x = self.f64()?;
        let y = self.f64()?;
        Ok(Point::new(x, y))
    }

    /// Read a point count and the points that follow it.
    fn points(&mut self) -> Result<Vec<Point>> {
        let npts = self.i32()?;
        let remaining = self.buf.len() - self.pos;
        let npts = usize::try_from(npts)
            .ok()
            .filter(|&n| n > 0 && n <= remaining / POINT_SIZE)
            .ok_or_else(|| self.error("invalid number of points"))?;
        (0..npts).map(|_| self.point()).collect()
    }

    fn finish(&self) -> Result<()> {
        if self.pos == self.buf.len() {
            Ok(())
        } else {
            Err(self.error("trailing bytes"))
        }
    }
}

fn put_f64(out: &mut Vec<u8>, value: f64) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_point(out: &mut Vec<u8>, point: &Point) {
    put_f64(out, point.x);
    put_f64(out, point.y);
}

fn put_points(out: &mut Vec<u8>, points: &[Point]) {
    // Over-long lists fail the server's own count check.
    let npts = i32::try_from(points.len()).unwrap_or(i32::MAX);
    out.extend_from_slice(&npts.to_be_bytes());
    for point in points {
        put_point(out, point);
    }
}

// ── Decoding ──────────────────────────────────────────────────────────────────

pub(crate) fn decode_point(buf: &[u8]) -> Result<Point> {
    let mut r = WireReader::new(buf, "point");
    let point = r.point()?;
    r.finish()?;
    Ok(point)
}

pub(crate) fn decode_line(buf: &[u8]) -> Result<Line> {
    let mut r = WireReader::new(buf, "line");
    let (a, b, c) = (r.f64()?, r.f64()?, r.f64()?);
    r.finish()?;
    Line::new(a, b, c)
}

pub(crate) fn decode_lseg(buf: &[u8]) -> Result<LineSegment> {
    let mut r = WireReader::new(buf, "lseg");
    let (start, end) = (r.point()?, r.point()?);
    r.finish()?;
    Ok(LineSegment::new(start, end))
}

pub(crate) fn decode_box(buf: &[u8]) -> Result<PgBox> {
    let mut r = WireReader::new(buf, "box");
    let (high, low) = (r.point()?, r.point()?);
    r.finish()?;
    Ok(PgBox::new(high, low))
}

pub(crate) fn decode_path(buf: &[u8]) -> Result<Path> {
    let mut r = WireReader::new(buf, "path");
    let closed = r.u8()? != 0;
    let points = r.points()?;
    r.finish()?;
    Ok(Path::from_stored(points, closed))
}

pub(crate) fn decode_polygon(buf: &[u8]) -> Result<Polygon> {
    let mut r = WireReader::new(buf, "polygon");
    let points = r.points()?;
    r.finish()?;
    Ok(Polygon::from_stored(points))
}

pub(crate) fn decode_circle(buf: &[u8]) -> Result<Circle> {
    let mut r = WireReader::new(buf, "circle");
    let center = r.point()?;
    let radius = r.f64()?;
    r.finish()?;
    Circle::new(center, radius).map_err(|_| r.error("invalid radius"))
}

// ── Encoding ──────────────────────────────────────────────────────────────────

pub(crate) fn encode_point(out: &mut Vec<u8>, point: &Point) {
    put_point(out, point);
}

pub(crate) fn encode_line(out: &mut Vec<u8>, line: &Line) {
    put_f64(out, line.a());
    put_f64(out, line.b());
    put_f64(out, line.c());
}

pub(crate) fn encode_lseg(out: &mut Vec<u8>, seg: &LineSegment) {
    put_point(out, &seg.start);
    put_point(out, &seg.end);
}

pub(crate) fn encode_box(out: &mut Vec<u8>, b: &PgBox) {
    put_point(out, &b.high());
    put_point(out, &b.low());
}

pub(crate) fn encode_path(out: &mut Vec<u8>, path: &Path) {
    out.push(u8::from(path.is_closed()));
    put_points(out, path.points());
}

pub(crate) fn encode_polygon(out: &mut Vec<u8>, polygon: &Polygon) {
    put_points(out, polygon.points());
}

pub(crate) fn encode_circle(out: &mut Vec<u8>, circle: &Circle) {
    put_point(out, &circle.center());
    put_f64(out, circle.radius());
}
