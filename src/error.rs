use thiserror::Error;

/// Top-level error type for the edge processor.
#[derive(Debug, Error)]
pub enum EdgeprocError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric primitives and their text form.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("cannot parse {kind} from {input:?}: {reason}")]
    Parse {
        kind: &'static str,
        input: String,
        reason: String,
    },
}

impl GeometryError {
    pub(crate) fn parse(kind: &'static str, input: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            kind,
            input: input.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Errors related to triangulation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`EdgeprocError`].
pub type Result<T> = std::result::Result<T, EdgeprocError>;
