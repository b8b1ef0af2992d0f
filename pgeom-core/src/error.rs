use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid input syntax for type {kind}: \"{input}\"")]
    InvalidSyntax { kind: &'static str, input: String },

    #[error("invalid external \"{kind}\" value: {reason}")]
    InvalidWire {
        kind: &'static str,
        reason: &'static str,
    },

    #[error("{kind} needs {expected} points (got {actual})")]
    PointCount {
        kind: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("invalid line specification: {0}")]
    InvalidLine(&'static str),

    #[error("invalid circle radius: {0}")]
    InvalidRadius(f64),

    #[error("geometry is not a {0}")]
    WrongType(&'static str),

    #[error("geozero error: {0}")]
    Geozero(#[from] geozero::error::GeozeroError),
}

impl GeometryError {
    pub(crate) fn syntax(kind: &'static str, input: &str) -> Self {
        GeometryError::InvalidSyntax {
            kind,
            input: input.to_string(),
        }
    }

    /// True for malformed text or wire input, as opposed to well-formed
    /// input describing an invalid value.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            GeometryError::InvalidSyntax { .. } | GeometryError::InvalidWire { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GeometryError>;
