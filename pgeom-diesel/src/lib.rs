#![doc = include_str!("../../README.md")]
//! Crate-specific API surface for `pgeom-diesel`.

pub mod expression_methods;
pub mod functions;
pub mod prelude;
pub mod types;

pub use expression_methods::{
    BoxExpressionMethods, CircleExpressionMethods, LsegExpressionMethods, PathExpressionMethods,
    PointExpressionMethods, PolygonExpressionMethods,
};
pub use types::{Circle, Line, Lseg, Path, PgBox, Point, Polygon};
