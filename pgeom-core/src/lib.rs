#![doc = include_str!("../../README.md")]
//! Crate-specific API surface for `pgeom-core`.

pub mod binary;
pub mod codec;
pub mod convert;
pub mod error;
pub mod text;
pub mod type_catalog;
pub mod types;

pub use codec::{decode, encode, parse, render, GeometricValue};
pub use error::{GeometryError, Result};
pub use type_catalog::{GeometricKind, GeometricTypeSpec, GEOMETRIC_TYPES};
pub use types::{Circle, Line, LineSegment, Path, PgBox, Point, Polygon};
