//! Diesel SQL type definitions and `FromSql` / `ToSql` implementations.
//!
//! In PostgreSQL every type maps to the built-in geometric type of the same
//! name (fixed OIDs, no lookup) and travels in the binary wire format.
//! SQLite has no geometric types, so values are stored in `TEXT` columns
//! using PostgreSQL's textual encoding.

use diesel::expression::AsExpression;
use diesel::internal::derives::as_expression::Bound;
use pgeom_core as value;

// ── SQL types ─────────────────────────────────────────────────────────────────

/// Diesel SQL type for a `point` column.
///
/// ```rust,ignore
/// table! {
///     places (id) {
///         id  -> Integer,
///         loc -> Nullable<pgeom_diesel::Point>,
///     }
/// }
/// ```
#[derive(diesel::sql_types::SqlType, diesel::query_builder::QueryId, Debug, Clone, Copy)]
#[diesel(sqlite_type(name = "Text"))]
#[diesel(postgres_type(oid = 600, array_oid = 1017))]
pub struct Point;

/// Diesel SQL type for a `line` column (`Ax + By + C = 0`).
#[derive(diesel::sql_types::SqlType, diesel::query_builder::QueryId, Debug, Clone, Copy)]
#[diesel(sqlite_type(name = "Text"))]
#[diesel(postgres_type(oid = 628, array_oid = 629))]
pub struct Line;

/// Diesel SQL type for an `lseg` column.
#[derive(diesel::sql_types::SqlType, diesel::query_builder::QueryId, Debug, Clone, Copy)]
#[diesel(sqlite_type(name = "Text"))]
#[diesel(postgres_type(oid = 601, array_oid = 1018))]
pub struct Lseg;

/// Diesel SQL type for a `box` column.
#[derive(diesel::sql_types::SqlType, diesel::query_builder::QueryId, Debug, Clone, Copy)]
#[diesel(sqlite_type(name = "Text"))]
#[diesel(postgres_type(oid = 603, array_oid = 1020))]
pub struct PgBox;

/// Diesel SQL type for a `path` column.
#[derive(diesel::sql_types::SqlType, diesel::query_builder::QueryId, Debug, Clone, Copy)]
#[diesel(sqlite_type(name = "Text"))]
#[diesel(postgres_type(oid = 602, array_oid = 1019))]
pub struct Path;

/// Diesel SQL type for a `polygon` column.
#[derive(diesel::sql_types::SqlType, diesel::query_builder::QueryId, Debug, Clone, Copy)]
#[diesel(sqlite_type(name = "Text"))]
#[diesel(postgres_type(oid = 604, array_oid = 1027))]
pub struct Polygon;

/// Diesel SQL type for a `circle` column.
#[derive(diesel::sql_types::SqlType, diesel::query_builder::QueryId, Debug, Clone, Copy)]
#[diesel(sqlite_type(name = "Text"))]
#[diesel(postgres_type(oid = 718, array_oid = 719))]
pub struct Circle;

// ── AsExpression ──────────────────────────────────────────────────────────────

// Nullable columns take `Some(value)` through Diesel's `Option<T>` impls.
macro_rules! impl_as_expression {
    ($sql_type:ty, $value:ty) => {
        impl AsExpression<$sql_type> for $value {
            type Expression = Bound<$sql_type, Self>;

            fn as_expression(self) -> Self::Expression {
                Bound::new(self)
            }
        }

        impl<'a> AsExpression<$sql_type> for &'a $value {
            type Expression = Bound<$sql_type, Self>;

            fn as_expression(self) -> Self::Expression {
                Bound::new(self)
            }
        }
    };
}

impl_as_expression!(Point, value::Point);
impl_as_expression!(Line, value::Line);
impl_as_expression!(Lseg, value::LineSegment);
impl_as_expression!(PgBox, value::PgBox);
impl_as_expression!(Path, value::Path);
impl_as_expression!(Polygon, value::Polygon);
impl_as_expression!(Circle, value::Circle);

impl_as_expression!(Point, geo::Point<f64>);
impl_as_expression!(Lseg, geo::Line<f64>);
impl_as_expression!(PgBox, geo::Rect<f64>);
impl_as_expression!(Polygon, geo::Polygon<f64>);

// ── Shared codec glue ─────────────────────────────────────────────────────────

#[cfg(any(feature = "sqlite", feature = "postgres"))]
type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[cfg(any(feature = "sqlite", feature = "postgres"))]
fn rejected<T: value::GeometricValue>(err: value::GeometryError) -> BoxedError {
    tracing::warn!(
        kind = %T::KIND,
        error = %err,
        "rejected geometric value read from the database"
    );
    Box::new(err)
}

#[cfg(feature = "postgres")]
fn decode_wire<T: value::GeometricValue>(bytes: &[u8]) -> Result<T, BoxedError> {
    value::decode::<T>(bytes).map_err(rejected::<T>)
}

#[cfg(feature = "sqlite")]
fn parse_stored<T: value::GeometricValue>(text: &str) -> Result<T, BoxedError> {
    value::parse::<T>(text).map_err(rejected::<T>)
}

#[cfg(any(feature = "sqlite", feature = "postgres"))]
fn polygon_from_geo(polygon: &geo::Polygon<f64>) -> Result<value::Polygon, BoxedError> {
    value::Polygon::try_from(polygon.clone()).map_err(|e| Box::new(e) as BoxedError)
}

// ── SQLite FromSql / ToSql ────────────────────────────────────────────────────

#[cfg(feature = "sqlite")]
mod sqlite_impls {
    use super::*;
    use diesel::deserialize::{self, FromSql};
    use diesel::serialize::{self, IsNull, Output, ToSql};
    use diesel::sql_types::Text;
    use diesel::sqlite::Sqlite;
    // SQLite Output does NOT implement std::io::Write; the rendered text is
    // handed over with `out.set_value(String)`.

    macro_rules! impl_text_codec {
        ($sql_type:ty, $value:ty) => {
            impl FromSql<$sql_type, Sqlite> for $value {
                fn from_sql(
                    bytes: <Sqlite as diesel::backend::Backend>::RawValue<'_>,
                ) -> deserialize::Result<Self> {
                    let text = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
                    super::parse_stored::<$value>(&text)
                }
            }

            impl ToSql<$sql_type, Sqlite> for $value {
                fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
                    <$value as value::GeometricValue>::validate(self)?;
                    out.set_value(value::render(self));
                    Ok(IsNull::No)
                }
            }
        };
    }

    impl_text_codec!(Point, value::Point);
    impl_text_codec!(Line, value::Line);
    impl_text_codec!(Lseg, value::LineSegment);
    impl_text_codec!(PgBox, value::PgBox);
    impl_text_codec!(Path, value::Path);
    impl_text_codec!(Polygon, value::Polygon);
    impl_text_codec!(Circle, value::Circle);

    // --- geo types, through their pgeom counterparts ---

    macro_rules! impl_geo_text_codec {
        ($sql_type:ty, $geo:ty, $value:ty) => {
            impl FromSql<$sql_type, Sqlite> for $geo {
                fn from_sql(
                    bytes: <Sqlite as diesel::backend::Backend>::RawValue<'_>,
                ) -> deserialize::Result<Self> {
                    let parsed = <$value as FromSql<$sql_type, Sqlite>>::from_sql(bytes)?;
                    Ok(parsed.into())
                }
            }

            impl ToSql<$sql_type, Sqlite> for $geo {
                fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
                    out.set_value(value::render(&<$value>::from(*self)));
                    Ok(IsNull::No)
                }
            }
        };
    }

    impl_geo_text_codec!(Point, geo::Point<f64>, value::Point);
    impl_geo_text_codec!(Lseg, geo::Line<f64>, value::LineSegment);
    impl_geo_text_codec!(PgBox, geo::Rect<f64>, value::PgBox);

    impl FromSql<Polygon, Sqlite> for geo::Polygon<f64> {
        fn from_sql(
            bytes: <Sqlite as diesel::backend::Backend>::RawValue<'_>,
        ) -> deserialize::Result<Self> {
            let parsed = <value::Polygon as FromSql<Polygon, Sqlite>>::from_sql(bytes)?;
            Ok(geo::Polygon::from(&parsed))
        }
    }

    impl ToSql<Polygon, Sqlite> for geo::Polygon<f64> {
        fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
            let polygon = super::polygon_from_geo(self)?;
            out.set_value(value::render(&polygon));
            Ok(IsNull::No)
        }
    }
}

// ── PostgreSQL FromSql / ToSql ────────────────────────────────────────────────

#[cfg(feature = "postgres")]
mod postgres_impls {
    use super::*;
    use diesel::deserialize::{self, FromSql};
    use diesel::pg::Pg;
    use diesel::serialize::{self, IsNull, Output, ToSql};
    use std::io::Write as IoWrite;

    // PostgreSQL Output implements std::io::Write, so the binary value is
    // written via `IoWrite::write_all(out, &bytes)`.

    macro_rules! impl_wire_codec {
        ($sql_type:ty, $value:ty) => {
            impl FromSql<$sql_type, Pg> for $value {
                fn from_sql(
                    bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
                ) -> deserialize::Result<Self> {
                    super::decode_wire::<$value>(bytes.as_bytes())
                }
            }

            impl ToSql<$sql_type, Pg> for $value {
                fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                    <$value as value::GeometricValue>::validate(self)?;
                    IoWrite::write_all(out, &value::encode(self))?;
                    Ok(IsNull::No)
                }
            }
        };
    }

    impl_wire_codec!(Point, value::Point);
    impl_wire_codec!(Line, value::Line);
    impl_wire_codec!(Lseg, value::LineSegment);
    impl_wire_codec!(PgBox, value::PgBox);
    impl_wire_codec!(Path, value::Path);
    impl_wire_codec!(Polygon, value::Polygon);
    impl_wire_codec!(Circle, value::Circle);

    // --- geo types, through their pgeom counterparts ---

    macro_rules! impl_geo_wire_codec {
        ($sql_type:ty, $geo:ty, $value:ty) => {
            impl FromSql<$sql_type, Pg> for $geo {
                fn from_sql(
                    bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
                ) -> deserialize::Result<Self> {
                    let decoded = super::decode_wire::<$value>(bytes.as_bytes())?;
                    Ok(decoded.into())
                }
            }

            impl ToSql<$sql_type, Pg> for $geo {
                fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                    IoWrite::write_all(out, &value::encode(&<$value>::from(*self)))?;
                    Ok(IsNull::No)
                }
            }
        };
    }

    impl_geo_wire_codec!(Point, geo::Point<f64>, value::Point);
    impl_geo_wire_codec!(Lseg, geo::Line<f64>, value::LineSegment);
    impl_geo_wire_codec!(PgBox, geo::Rect<f64>, value::PgBox);

    impl FromSql<Polygon, Pg> for geo::Polygon<f64> {
        fn from_sql(
            bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
        ) -> deserialize::Result<Self> {
            let decoded = super::decode_wire::<value::Polygon>(bytes.as_bytes())?;
            Ok(geo::Polygon::from(&decoded))
        }
    }

    impl ToSql<Polygon, Pg> for geo::Polygon<f64> {
        fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
            let polygon = super::polygon_from_geo(self)?;
            IoWrite::write_all(out, &value::encode(&polygon))?;
            Ok(IsNull::No)
        }
    }
}
