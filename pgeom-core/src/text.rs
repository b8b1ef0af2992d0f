//! PostgreSQL textual encoding of the geometric types.
//!
//! Input follows the server's `*_in` grammar: whitespace is allowed around
//! every token, point lists may be wrapped in `(...)` or `[...]` (brackets
//! mark an open path), and each point may drop its own parentheses:
//!
//! ```text
//! point    (x,y)            x,y
//! line     {A,B,C}          <any lseg form>
//! lseg     [(x1,y1),(x2,y2)]   ((x1,y1),(x2,y2))   (x1,y1),(x2,y2)   x1,y1,x2,y2
//! box      ((x1,y1),(x2,y2))   (x1,y1),(x2,y2)     x1,y1,x2,y2
//! path     [(x1,y1),...]   ((x1,y1),...)   (x1,y1),...   (x1,y1,...)   x1,y1,...
//! polygon  ((x1,y1),...)   (x1,y1),...     (x1,y1,...)   x1,y1,...
//! circle   <(x,y),r>       ((x,y),r)       (x,y),r       x,y,r
//! ```
//!
//! Output follows the server's `*_out` functions, so rendering a parsed value
//! yields the same text `SELECT` would print.

use crate::error::{GeometryError, Result};
use crate::types::{Circle, Line, LineSegment, Path, PgBox, Point, Polygon};

// ── Lexing ────────────────────────────────────────────────────────────────────

fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b',' | b'(' | b')' | b'[' | b']' | b'<' | b'>' | b'{' | b'}'
    )
}

/// How a point list was wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Enclosure {
    Bare,
    Paren,
    Bracket,
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    kind: &'static str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str, kind: &'static str) -> Self {
        Self {
            input,
            pos: 0,
            kind,
        }
    }

    fn error(&self) -> GeometryError {
        GeometryError::syntax(self.kind, self.input)
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn skip_ws(&mut self) {
        while self
            .bytes()
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.bytes().get(self.pos).copied()
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: u8) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    /// First non-whitespace byte after the current one.
    fn peek_second(&self) -> Option<u8> {
        self.bytes()
            .get(self.pos + 1..)?
            .iter()
            .copied()
            .find(|b| !b.is_ascii_whitespace())
    }

    /// Whether `needle` occurs anywhere after the current byte.
    fn occurs_later(&self, needle: u8) -> bool {
        self.bytes()
            .get(self.pos + 1..)
            .is_some_and(|rest| rest.contains(&needle))
    }

    fn float(&mut self) -> Result<f64> {
        self.skip_ws();
        let start = self.pos;
        while self
            .bytes()
            .get(self.pos)
            .is_some_and(|&b| !is_delimiter(b) && !b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
        let token = &self.input[start..self.pos];
        if token.is_empty() {
            return Err(self.error());
        }
        let value = token.parse::<f64>().map_err(|_| self.error())?;
        if out_of_range(token, value) {
            return Err(self.error());
        }
        Ok(value)
    }

    /// `(x,y)` or `x,y`.
    fn pair(&mut self) -> Result<Point> {
        let wrapped = self.eat(b'(');
        let x = self.float()?;
        self.expect(b',')?;
        let y = self.float()?;
        if wrapped {
            self.expect(b')')?;
        }
        Ok(Point::new(x, y))
    }

    /// A comma separated list of points with an optional outer wrapper.
    ///
    /// A leading `(` is the outer wrapper when it is directly followed by
    /// another `(`, or when no other `(` follows at all (`(x1,y1,x2,y2)`).
    fn point_list(&mut self) -> Result<(Vec<Point>, Enclosure)> {
        let enclosure = match self.peek() {
            Some(b'[') => {
                self.pos += 1;
                Enclosure::Bracket
            }
            Some(b'(') if self.peek_second() == Some(b'(') || !self.occurs_later(b'(') => {
                self.pos += 1;
                Enclosure::Paren
            }
            _ => Enclosure::Bare,
        };

        let mut points = vec![self.pair()?];
        while self.eat(b',') {
            points.push(self.pair()?);
        }

        match enclosure {
            Enclosure::Bracket => self.expect(b']')?,
            Enclosure::Paren => self.expect(b')')?,
            Enclosure::Bare => {}
        }
        Ok((points, enclosure))
    }

    fn finish(&mut self) -> Result<()> {
        self.skip_ws();
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(self.error())
        }
    }
}

/// Parse a two-point list, rejecting any other count as a syntax error.
fn two_points(cur: &mut Cursor<'_>, allow_brackets: bool) -> Result<[Point; 2]> {
    let (points, enclosure) = cur.point_list()?;
    if enclosure == Enclosure::Bracket && !allow_brackets {
        return Err(cur.error());
    }
    cur.finish()?;
    match points.as_slice() {
        [a, b] => Ok([*a, *b]),
        _ => Err(cur.error()),
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

pub(crate) fn parse_point(input: &str) -> Result<Point> {
    let mut cur = Cursor::new(input, "point");
    let point = cur.pair()?;
    cur.finish()?;
    Ok(point)
}

pub(crate) fn parse_line(input: &str) -> Result<Line> {
    let mut cur = Cursor::new(input, "line");
    if cur.eat(b'{') {
        let a = cur.float()?;
        cur.expect(b',')?;
        let b = cur.float()?;
        cur.expect(b',')?;
        let c = cur.float()?;
        cur.expect(b'}')?;
        cur.finish()?;
        return Line::new(a, b, c);
    }
    let [p1, p2] = two_points(&mut cur, true)?;
    Line::from_points(p1, p2)
}

pub(crate) fn parse_lseg(input: &str) -> Result<LineSegment> {
    let mut cur = Cursor::new(input, "lseg");
    let [start, end] = two_points(&mut cur, true)?;
    Ok(LineSegment::new(start, end))
}

pub(crate) fn parse_box(input: &str) -> Result<PgBox> {
    let mut cur = Cursor::new(input, "box");
    let [a, b] = two_points(&mut cur, false)?;
    Ok(PgBox::new(a, b))
}

pub(crate) fn parse_path(input: &str) -> Result<Path> {
    let mut cur = Cursor::new(input, "path");
    let (points, enclosure) = cur.point_list()?;
    cur.finish()?;
    Ok(Path::from_stored(points, enclosure != Enclosure::Bracket))
}

pub(crate) fn parse_polygon(input: &str) -> Result<Polygon> {
    let mut cur = Cursor::new(input, "polygon");
    let (points, enclosure) = cur.point_list()?;
    if enclosure == Enclosure::Bracket {
        return Err(cur.error());
    }
    cur.finish()?;
    Ok(Polygon::from_stored(points))
}

pub(crate) fn parse_circle(input: &str) -> Result<Circle> {
    let mut cur = Cursor::new(input, "circle");
    let closing = match cur.peek() {
        Some(b'<') => {
            cur.pos += 1;
            Some(b'>')
        }
        Some(b'(') if cur.peek_second() == Some(b'(') => {
            cur.pos += 1;
            Some(b')')
        }
        _ => None,
    };
    let center = cur.pair()?;
    cur.expect(b',')?;
    let radius = cur.float()?;
    if let Some(close) = closing {
        cur.expect(close)?;
    }
    cur.finish()?;
    Circle::new(center, radius)
}

/// Overflow to infinity or underflow to zero, which `float8in` rejects.
fn out_of_range(token: &str, value: f64) -> bool {
    let mantissa = token.split(['e', 'E']).next().unwrap_or(token);
    let spelled_infinite = mantissa.bytes().any(|b| b.eq_ignore_ascii_case(&b'i'));
    if value.is_infinite() {
        return !spelled_infinite;
    }
    value == 0.0 && mantissa.bytes().any(|b| matches!(b, b'1'..=b'9'))
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Append `value` the way `float8out` prints it: shortest round-trip digits,
/// exponent form outside `[1e-4, 1e15)`.
///
/// # Example
///
/// ```
/// use pgeom_core::text::write_float;
///
/// let mut out = String::new();
/// write_float(&mut out, 1e20);
/// out.push(' ');
/// write_float(&mut out, 0.5);
/// out.push(' ');
/// write_float(&mut out, f64::NEG_INFINITY);
/// assert_eq!(out, "1e+20 0.5 -Infinity");
/// ```
pub fn write_float(out: &mut String, value: f64) {
    if value.is_nan() {
        out.push_str("NaN");
        return;
    }
    if value.is_infinite() {
        out.push_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
        return;
    }
    if value == 0.0 {
        out.push_str(if value.is_sign_negative() { "-0" } else { "0" });
        return;
    }

    let scientific = format!("{value:e}");
    let exponent = scientific
        .split_once('e')
        .and_then(|(_, exp)| exp.parse::<i32>().ok());
    match (scientific.split_once('e'), exponent) {
        (Some((mantissa, _)), Some(exp)) if !(-4..15).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            out.push_str(&format!("{mantissa}e{sign}{:02}", exp.abs()));
        }
        _ => out.push_str(&value.to_string()),
    }
}

pub(crate) fn write_point(out: &mut String, point: &Point) {
    out.push('(');
    write_float(out, point.x);
    out.push(',');
    write_float(out, point.y);
    out.push(')');
}

fn write_points(out: &mut String, points: &[Point]) {
    for (idx, point) in points.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        write_point(out, point);
    }
}

pub(crate) fn write_line(out: &mut String, line: &Line) {
    out.push('{');
    write_float(out, line.a());
    out.push(',');
    write_float(out, line.b());
    out.push(',');
    write_float(out, line.c());
    out.push('}');
}

pub(crate) fn write_lseg(out: &mut String, seg: &LineSegment) {
    out.push('[');
    write_points(out, &seg.points());
    out.push(']');
}

pub(crate) fn write_box(out: &mut String, b: &PgBox) {
    write_points(out, &b.corners());
}

pub(crate) fn write_path(out: &mut String, path: &Path) {
    let (open, close) = if path.is_closed() {
        ('(', ')')
    } else {
        ('[', ']')
    };
    out.push(open);
    write_points(out, path.points());
    out.push(close);
}

pub(crate) fn write_polygon(out: &mut String, polygon: &Polygon) {
    out.push('(');
    write_points(out, polygon.points());
    out.push(')');
}

pub(crate) fn write_circle(out: &mut String, circle: &Circle) {
    out.push('<');
    write_point(out, &circle.center());
    out.push(',');
    write_float(out, circle.radius());
    out.push('>');
}
