//! Extension traits for method-style geometric operations.
//!
//! Each trait is implemented for every Diesel expression whose SQL type is
//! the nullable form of its geometric type, and each method delegates to the
//! matching item in [`crate::functions`]. Call `.nullable()` first on
//! non-nullable columns, as with any Diesel nullable-only method.
//!
//! ```rust,ignore
//! use diesel::prelude::*;
//! use pgeom_diesel::prelude::*;
//!
//! let closest: Vec<i32> = shops::table
//!     .order(shops::loc.nullable().distance(Some(here)))
//!     .select(shops::id)
//!     .limit(5)
//!     .load(&mut conn)?;
//! ```
//!
//! Operator methods (`distance`, `contains_point`, `overlaps`, ...) are only
//! available with the `postgres` feature.

use diesel::expression::{AsExpression, Expression};
use diesel::sql_types::Nullable;

use crate::functions;
use crate::types::{Circle, Lseg, Path, PgBox, Point, Polygon};

#[cfg(feature = "postgres")]
use crate::functions::{ContainedBy, Contains, Distance, Overlaps, SameAs};

/// Methods on `Nullable<Point>` expressions.
pub trait PointExpressionMethods: Expression<SqlType = Nullable<Point>> + Sized {
    /// Euclidean distance to another point (`<->`).
    #[cfg(feature = "postgres")]
    fn distance<T>(self, other: T) -> Distance<Self, T::Expression>
    where
        T: AsExpression<Nullable<Point>>,
    {
        Distance::new(self, other.as_expression())
    }

    /// Whether both points are the same within PostgreSQL's tolerance (`~=`).
    #[cfg(feature = "postgres")]
    fn same_as<T>(self, other: T) -> SameAs<Self, T::Expression>
    where
        T: AsExpression<Nullable<Point>>,
    {
        SameAs::new(self, other.as_expression())
    }

    /// Whether the point lies in a box (`<@`).
    #[cfg(feature = "postgres")]
    fn within_box<T>(self, area: T) -> ContainedBy<Self, T::Expression>
    where
        T: AsExpression<Nullable<PgBox>>,
    {
        ContainedBy::new(self, area.as_expression())
    }

    /// Whether the point lies in a polygon (`<@`).
    #[cfg(feature = "postgres")]
    fn within_polygon<T>(self, area: T) -> ContainedBy<Self, T::Expression>
    where
        T: AsExpression<Nullable<Polygon>>,
    {
        ContainedBy::new(self, area.as_expression())
    }

    /// Whether the point lies in a circle (`<@`).
    #[cfg(feature = "postgres")]
    fn within_circle<T>(self, area: T) -> ContainedBy<Self, T::Expression>
    where
        T: AsExpression<Nullable<Circle>>,
    {
        ContainedBy::new(self, area.as_expression())
    }
}

impl<T> PointExpressionMethods for T where T: Expression<SqlType = Nullable<Point>> {}

/// Methods on `Nullable<Lseg>` expressions.
pub trait LsegExpressionMethods: Expression<SqlType = Nullable<Lseg>> + Sized {
    fn length(self) -> functions::lseg_length<Self> {
        functions::lseg_length(self)
    }
}

impl<T> LsegExpressionMethods for T where T: Expression<SqlType = Nullable<Lseg>> {}

/// Methods on `Nullable<PgBox>` expressions.
pub trait BoxExpressionMethods: Expression<SqlType = Nullable<PgBox>> + Sized {
    fn area(self) -> functions::box_area<Self> {
        functions::box_area(self)
    }

    fn center(self) -> functions::box_center<Self> {
        functions::box_center(self)
    }

    fn height(self) -> functions::height<Self> {
        functions::height(self)
    }

    fn width(self) -> functions::width<Self> {
        functions::width(self)
    }

    /// Segment from the upper-right to the lower-left corner.
    fn diagonal(self) -> functions::diagonal<Self> {
        functions::diagonal(self)
    }

    /// Smallest box enclosing this one and `other`.
    fn bound_box<T>(self, other: T) -> functions::bound_box<Self, T>
    where
        T: AsExpression<Nullable<PgBox>>,
    {
        functions::bound_box(self, other)
    }

    /// Whether the box contains a point (`@>`).
    #[cfg(feature = "postgres")]
    fn contains_point<T>(self, point: T) -> Contains<Self, T::Expression>
    where
        T: AsExpression<Nullable<Point>>,
    {
        Contains::new(self, point.as_expression())
    }

    /// Whether the box contains another box (`@>`).
    #[cfg(feature = "postgres")]
    fn contains_box<T>(self, other: T) -> Contains<Self, T::Expression>
    where
        T: AsExpression<Nullable<PgBox>>,
    {
        Contains::new(self, other.as_expression())
    }

    /// Whether the box lies inside another box (`<@`).
    #[cfg(feature = "postgres")]
    fn within_box<T>(self, other: T) -> ContainedBy<Self, T::Expression>
    where
        T: AsExpression<Nullable<PgBox>>,
    {
        ContainedBy::new(self, other.as_expression())
    }

    /// Whether the boxes share at least one point (`&&`).
    #[cfg(feature = "postgres")]
    fn overlaps<T>(self, other: T) -> Overlaps<Self, T::Expression>
    where
        T: AsExpression<Nullable<PgBox>>,
    {
        Overlaps::new(self, other.as_expression())
    }

    #[cfg(feature = "postgres")]
    fn same_as<T>(self, other: T) -> SameAs<Self, T::Expression>
    where
        T: AsExpression<Nullable<PgBox>>,
    {
        SameAs::new(self, other.as_expression())
    }
}

impl<T> BoxExpressionMethods for T where T: Expression<SqlType = Nullable<PgBox>> {}

/// Methods on `Nullable<Path>` expressions.
pub trait PathExpressionMethods: Expression<SqlType = Nullable<Path>> + Sized {
    /// Area enclosed by a closed path; NULL for open paths.
    fn area(self) -> functions::path_area<Self> {
        functions::path_area(self)
    }

    fn length(self) -> functions::path_length<Self> {
        functions::path_length(self)
    }

    fn npoints(self) -> functions::path_npoints<Self> {
        functions::path_npoints(self)
    }

    fn isclosed(self) -> functions::isclosed<Self> {
        functions::isclosed(self)
    }

    fn isopen(self) -> functions::isopen<Self> {
        functions::isopen(self)
    }

    fn pclose(self) -> functions::pclose<Self> {
        functions::pclose(self)
    }

    fn popen(self) -> functions::popen<Self> {
        functions::popen(self)
    }

    /// Convert to a polygon. The server rejects open paths.
    fn to_polygon(self) -> functions::path_to_polygon<Self> {
        functions::path_to_polygon(self)
    }
}

impl<T> PathExpressionMethods for T where T: Expression<SqlType = Nullable<Path>> {}

/// Methods on `Nullable<Polygon>` expressions.
pub trait PolygonExpressionMethods: Expression<SqlType = Nullable<Polygon>> + Sized {
    fn npoints(self) -> functions::polygon_npoints<Self> {
        functions::polygon_npoints(self)
    }

    fn to_path(self) -> functions::polygon_to_path<Self> {
        functions::polygon_to_path(self)
    }

    /// Whether the polygon contains a point (`@>`).
    #[cfg(feature = "postgres")]
    fn contains_point<T>(self, point: T) -> Contains<Self, T::Expression>
    where
        T: AsExpression<Nullable<Point>>,
    {
        Contains::new(self, point.as_expression())
    }

    /// Whether the polygons overlap (`&&`).
    #[cfg(feature = "postgres")]
    fn overlaps<T>(self, other: T) -> Overlaps<Self, T::Expression>
    where
        T: AsExpression<Nullable<Polygon>>,
    {
        Overlaps::new(self, other.as_expression())
    }

    #[cfg(feature = "postgres")]
    fn same_as<T>(self, other: T) -> SameAs<Self, T::Expression>
    where
        T: AsExpression<Nullable<Polygon>>,
    {
        SameAs::new(self, other.as_expression())
    }
}

impl<T> PolygonExpressionMethods for T where T: Expression<SqlType = Nullable<Polygon>> {}

/// Methods on `Nullable<Circle>` expressions.
pub trait CircleExpressionMethods: Expression<SqlType = Nullable<Circle>> + Sized {
    fn area(self) -> functions::circle_area<Self> {
        functions::circle_area(self)
    }

    fn center(self) -> functions::circle_center<Self> {
        functions::circle_center(self)
    }

    fn radius(self) -> functions::radius<Self> {
        functions::radius(self)
    }

    fn diameter(self) -> functions::diameter<Self> {
        functions::diameter(self)
    }

    /// Whether the circle contains a point (`@>`).
    #[cfg(feature = "postgres")]
    fn contains_point<T>(self, point: T) -> Contains<Self, T::Expression>
    where
        T: AsExpression<Nullable<Point>>,
    {
        Contains::new(self, point.as_expression())
    }

    /// Whether the circles overlap (`&&`).
    #[cfg(feature = "postgres")]
    fn overlaps<T>(self, other: T) -> Overlaps<Self, T::Expression>
    where
        T: AsExpression<Nullable<Circle>>,
    {
        Overlaps::new(self, other.as_expression())
    }

    /// Distance between the circle edges, zero when they overlap (`<->`).
    #[cfg(feature = "postgres")]
    fn distance<T>(self, other: T) -> Distance<Self, T::Expression>
    where
        T: AsExpression<Nullable<Circle>>,
    {
        Distance::new(self, other.as_expression())
    }
}

impl<T> CircleExpressionMethods for T where T: Expression<SqlType = Nullable<Circle>> {}
