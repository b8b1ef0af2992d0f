//! Canonical catalog of the PostgreSQL geometric column types.
//!
//! OIDs are the fixed built-in values from `pg_type`; they are shared by the
//! Diesel type registrations and the `xtask catalog` listing.

/// One of the seven built-in geometric column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometricKind {
    Point,
    Line,
    Lseg,
    Box,
    Path,
    Polygon,
    Circle,
}

/// Registration metadata for a geometric column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometricTypeSpec {
    pub kind: GeometricKind,
    pub sql_name: &'static str,
    pub oid: u32,
    pub array_oid: u32,
    pub input_hint: &'static str,
}

pub const GEOMETRIC_TYPES: &[GeometricTypeSpec] = &[
    GeometricTypeSpec {
        kind: GeometricKind::Point,
        sql_name: "point",
        oid: 600,
        array_oid: 1017,
        input_hint: "Enter a point as (x,y)",
    },
    GeometricTypeSpec {
        kind: GeometricKind::Line,
        sql_name: "line",
        oid: 628,
        array_oid: 629,
        input_hint: "Enter a line as {A,B,C} or as two points (x1,y1),(x2,y2)",
    },
    GeometricTypeSpec {
        kind: GeometricKind::Lseg,
        sql_name: "lseg",
        oid: 601,
        array_oid: 1018,
        input_hint: "Enter two points as (x1,y1),(x2,y2)",
    },
    GeometricTypeSpec {
        kind: GeometricKind::Box,
        sql_name: "box",
        oid: 603,
        array_oid: 1020,
        input_hint: "Enter two opposite corner points as (x1,y1),(x2,y2)",
    },
    GeometricTypeSpec {
        kind: GeometricKind::Path,
        sql_name: "path",
        oid: 602,
        array_oid: 1019,
        input_hint: "Enter two or more points as (x1,y1),(x2,y2),...",
    },
    GeometricTypeSpec {
        kind: GeometricKind::Polygon,
        sql_name: "polygon",
        oid: 604,
        array_oid: 1027,
        input_hint: "Enter three or more points as (x1,y1),(x2,y2),(x3,y3),...",
    },
    GeometricTypeSpec {
        kind: GeometricKind::Circle,
        sql_name: "circle",
        oid: 718,
        array_oid: 719,
        input_hint: "Enter circle as <(x,y),r>",
    },
];

impl GeometricKind {
    /// Catalog entry for this kind.
    pub fn spec(self) -> &'static GeometricTypeSpec {
        // Entries are listed in declaration order of the enum.
        &GEOMETRIC_TYPES[self as usize]
    }

    /// PostgreSQL type name, as used in `CREATE TABLE`.
    pub fn sql_name(self) -> &'static str {
        self.spec().sql_name
    }

    pub fn oid(self) -> u32 {
        self.spec().oid
    }

    pub fn array_oid(self) -> u32 {
        self.spec().array_oid
    }

    pub fn input_hint(self) -> &'static str {
        self.spec().input_hint
    }

    /// Resolve a PostgreSQL type name (case-insensitive, surrounding
    /// whitespace ignored).
    ///
    /// # Example
    ///
    /// ```
    /// use pgeom_core::type_catalog::GeometricKind;
    ///
    /// assert_eq!(GeometricKind::from_sql_name("LSEG"), Some(GeometricKind::Lseg));
    /// assert_eq!(GeometricKind::from_sql_name("geometry"), None);
    /// ```
    pub fn from_sql_name(name: &str) -> Option<Self> {
        let name = name.trim();
        GEOMETRIC_TYPES
            .iter()
            .find(|spec| spec.sql_name.eq_ignore_ascii_case(name))
            .map(|spec| spec.kind)
    }

    /// Resolve a type OID (element or array OID is not accepted
    /// interchangeably; arrays return `None`).
    pub fn from_oid(oid: u32) -> Option<Self> {
        GEOMETRIC_TYPES
            .iter()
            .find(|spec| spec.oid == oid)
            .map(|spec| spec.kind)
    }
}

impl std::fmt::Display for GeometricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sql_name())
    }
}
