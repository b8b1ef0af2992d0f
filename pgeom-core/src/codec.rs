//! The text / binary codec seam shared by every geometric value type.
//!
//! Database adapters only need [`GeometricValue`]: `FromStr`, `Display`
//! (and the optional serde impls) are all derived from it here.

use crate::binary;
use crate::error::Result;
use crate::text;
use crate::type_catalog::GeometricKind;
use crate::types::{Circle, Line, LineSegment, Path, PgBox, Point, Polygon};

/// A value of one of the PostgreSQL geometric column types.
pub trait GeometricValue: Sized {
    /// Column type this value maps to.
    const KIND: GeometricKind;

    /// Parse the server's textual input syntax.
    fn parse_text(input: &str) -> Result<Self>;

    /// Append the server's textual output syntax.
    fn write_text(&self, out: &mut String);

    /// Decode the binary (recv) representation.
    fn decode_binary(buf: &[u8]) -> Result<Self>;

    /// Append the binary (send) representation.
    fn encode_binary(&self, out: &mut Vec<u8>);

    /// Reject values that may be read back but not written, such as a path
    /// with a single point.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Parse a textual database value.
///
/// # Example
///
/// ```
/// use pgeom_core::{parse, render, Point};
///
/// let p: Point = parse("( 1.5 , -2 )").unwrap();
/// assert_eq!(p, Point::new(1.5, -2.0));
/// assert_eq!(render(&p), "(1.5,-2)");
/// ```
pub fn parse<T: GeometricValue>(input: &str) -> Result<T> {
    T::parse_text(input)
}

/// Render a value in the server's textual output syntax.
pub fn render<T: GeometricValue>(value: &T) -> String {
    let mut out = String::new();
    value.write_text(&mut out);
    out
}

/// Decode a binary database value.
pub fn decode<T: GeometricValue>(buf: &[u8]) -> Result<T> {
    T::decode_binary(buf)
}

/// Encode a value in the binary wire format.
///
/// # Example
///
/// ```
/// use pgeom_core::{decode, encode, Circle};
///
/// let circle = Circle::from_coords(1.0, 2.0, 3.0).unwrap();
/// let wire = encode(&circle);
/// assert_eq!(wire.len(), 24);
/// assert_eq!(decode::<Circle>(&wire).unwrap(), circle);
/// ```
pub fn encode<T: GeometricValue>(value: &T) -> Vec<u8> {
    let mut out = Vec::new();
    value.encode_binary(&mut out);
    out
}

macro_rules! impl_geometric_value {
    ($ty:ty, $kind:ident, $parse:path, $write:path, $decode:path, $encode:path) => {
        impl_geometric_value!($ty, $kind, $parse, $write, $decode, $encode, |_| Ok(()));
    };
    ($ty:ty, $kind:ident, $parse:path, $write:path, $decode:path, $encode:path, $validate:expr) => {
        impl GeometricValue for $ty {
            const KIND: GeometricKind = GeometricKind::$kind;

            fn parse_text(input: &str) -> Result<Self> {
                $parse(input)
            }

            fn write_text(&self, out: &mut String) {
                $write(out, self)
            }

            fn decode_binary(buf: &[u8]) -> Result<Self> {
                $decode(buf)
            }

            fn encode_binary(&self, out: &mut Vec<u8>) {
                $encode(out, self)
            }

            fn validate(&self) -> Result<()> {
                let check: fn(&$ty) -> Result<()> = $validate;
                check(self)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = crate::error::GeometryError;

            fn from_str(s: &str) -> Result<Self> {
                <$ty as GeometricValue>::parse_text(s)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&render(self))
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let text = <String as serde::Deserialize>::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

impl_geometric_value!(
    Point,
    Point,
    text::parse_point,
    text::write_point,
    binary::decode_point,
    binary::encode_point
);
impl_geometric_value!(
    Line,
    Line,
    text::parse_line,
    text::write_line,
    binary::decode_line,
    binary::encode_line
);
impl_geometric_value!(
    LineSegment,
    Lseg,
    text::parse_lseg,
    text::write_lseg,
    binary::decode_lseg,
    binary::encode_lseg
);
impl_geometric_value!(
    PgBox,
    Box,
    text::parse_box,
    text::write_box,
    binary::decode_box,
    binary::encode_box
);
impl_geometric_value!(
    Path,
    Path,
    text::parse_path,
    text::write_path,
    binary::decode_path,
    binary::encode_path,
    Path::validate
);
impl_geometric_value!(
    Polygon,
    Polygon,
    text::parse_polygon,
    text::write_polygon,
    binary::decode_polygon,
    binary::encode_polygon,
    Polygon::validate
);
impl_geometric_value!(
    Circle,
    Circle,
    text::parse_circle,
    text::write_circle,
    binary::decode_circle,
    binary::encode_circle
);
