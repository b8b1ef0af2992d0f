//! Convenience re-exports for pgeom-diesel.
//!
//! ```rust,ignore
//! use pgeom_diesel::prelude::*;
//! ```
//!
//! The SQL types are re-exported under a `Sql` prefix so they do not clash
//! with the `pgeom_core` value types of the same name.

pub use crate::expression_methods::{
    BoxExpressionMethods, CircleExpressionMethods, LsegExpressionMethods, PathExpressionMethods,
    PointExpressionMethods, PolygonExpressionMethods,
};
pub use crate::functions::*;
pub use crate::types::{
    Circle as SqlCircle, Line as SqlLine, Lseg as SqlLseg, Path as SqlPath, PgBox as SqlBox,
    Point as SqlPoint, Polygon as SqlPolygon,
};
