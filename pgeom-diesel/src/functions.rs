//! Diesel declarations of PostgreSQL's geometric functions and operators.
//!
//! Nothing here computes in Rust: every item only renders SQL that the
//! server evaluates. PostgreSQL overloads names such as `area` across
//! several argument types, so each overload gets its own Rust name and a
//! `#[sql_name]` pointing at the shared SQL name.
//!
//! ```rust,ignore
//! use diesel::prelude::*;
//! use pgeom_diesel::functions::*;
//!
//! let big: Vec<i32> = lots::table
//!     .filter(box_area(lots::bounds).gt(100.0))
//!     .select(lots::id)
//!     .load(&mut conn)?;
//! ```

use crate::types::{Circle, Lseg, Path, PgBox, Point, Polygon};
use diesel::sql_types::{Bool, Double, Integer, Nullable};

// ── Constructors ──────────────────────────────────────────────────────────────

diesel::define_sql_function! {
    /// Build a point from its coordinates.
    #[sql_name = "point"]
    fn make_point(x: Double, y: Double) -> Point;
}

diesel::define_sql_function! {
    /// Build a box from two opposite corners.
    #[sql_name = "box"]
    fn make_box(a: Nullable<Point>, b: Nullable<Point>) -> Nullable<PgBox>;
}

diesel::define_sql_function! {
    /// Build a circle from its centre and radius.
    #[sql_name = "circle"]
    fn make_circle(center: Nullable<Point>, radius: Double) -> Nullable<Circle>;
}

diesel::define_sql_function! {
    /// Build a segment from its two end points.
    #[sql_name = "lseg"]
    fn make_lseg(start: Nullable<Point>, end: Nullable<Point>) -> Nullable<Lseg>;
}

diesel::define_sql_function! {
    /// Convert a closed path to a polygon.
    #[sql_name = "polygon"]
    fn path_to_polygon(path: Nullable<Path>) -> Nullable<Polygon>;
}

diesel::define_sql_function! {
    /// Convert a polygon to a closed path.
    #[sql_name = "path"]
    fn polygon_to_path(polygon: Nullable<Polygon>) -> Nullable<Path>;
}

// ── Measurement ───────────────────────────────────────────────────────────────

diesel::define_sql_function! {
    #[sql_name = "area"]
    fn box_area(b: Nullable<PgBox>) -> Nullable<Double>;
}

diesel::define_sql_function! {
    /// Area of a closed path; NULL for open paths.
    #[sql_name = "area"]
    fn path_area(p: Nullable<Path>) -> Nullable<Double>;
}

diesel::define_sql_function! {
    #[sql_name = "area"]
    fn circle_area(c: Nullable<Circle>) -> Nullable<Double>;
}

diesel::define_sql_function! {
    #[sql_name = "center"]
    fn box_center(b: Nullable<PgBox>) -> Nullable<Point>;
}

diesel::define_sql_function! {
    #[sql_name = "center"]
    fn circle_center(c: Nullable<Circle>) -> Nullable<Point>;
}

diesel::define_sql_function! {
    fn diameter(c: Nullable<Circle>) -> Nullable<Double>;
}

diesel::define_sql_function! {
    fn radius(c: Nullable<Circle>) -> Nullable<Double>;
}

diesel::define_sql_function! {
    /// Vertical size of a box.
    fn height(b: Nullable<PgBox>) -> Nullable<Double>;
}

diesel::define_sql_function! {
    /// Horizontal size of a box.
    fn width(b: Nullable<PgBox>) -> Nullable<Double>;
}

diesel::define_sql_function! {
    #[sql_name = "length"]
    fn lseg_length(s: Nullable<Lseg>) -> Nullable<Double>;
}

diesel::define_sql_function! {
    /// Total length of a path, including the closing edge of a closed path.
    #[sql_name = "length"]
    fn path_length(p: Nullable<Path>) -> Nullable<Double>;
}

diesel::define_sql_function! {
    #[sql_name = "npoints"]
    fn path_npoints(p: Nullable<Path>) -> Nullable<Integer>;
}

diesel::define_sql_function! {
    #[sql_name = "npoints"]
    fn polygon_npoints(p: Nullable<Polygon>) -> Nullable<Integer>;
}

// ── Path shape ────────────────────────────────────────────────────────────────

diesel::define_sql_function! {
    fn isclosed(p: Nullable<Path>) -> Nullable<Bool>;
}

diesel::define_sql_function! {
    fn isopen(p: Nullable<Path>) -> Nullable<Bool>;
}

diesel::define_sql_function! {
    /// Mark a path as closed.
    fn pclose(p: Nullable<Path>) -> Nullable<Path>;
}

diesel::define_sql_function! {
    /// Mark a path as open.
    fn popen(p: Nullable<Path>) -> Nullable<Path>;
}

// ── Box derivations ───────────────────────────────────────────────────────────

diesel::define_sql_function! {
    /// The box diagonal as a segment from the upper-right to the lower-left corner.
    fn diagonal(b: Nullable<PgBox>) -> Nullable<Lseg>;
}

diesel::define_sql_function! {
    /// Smallest box enclosing both boxes.
    fn bound_box(a: Nullable<PgBox>, b: Nullable<PgBox>) -> Nullable<PgBox>;
}

// ── Operators ─────────────────────────────────────────────────────────────────

#[cfg(feature = "postgres")]
pub use self::operators::*;

/// Geometric operators. Only PostgreSQL understands them.
#[cfg(feature = "postgres")]
mod operators {
    use diesel::pg::Pg;
    use diesel::sql_types::Double;

    diesel::infix_operator!(Distance, " <-> ", Double, backend: Pg);
    diesel::infix_operator!(Contains, " @> ", backend: Pg);
    diesel::infix_operator!(ContainedBy, " <@ ", backend: Pg);
    diesel::infix_operator!(Overlaps, " && ", backend: Pg);
    diesel::infix_operator!(SameAs, " ~= ", backend: Pg);
}
