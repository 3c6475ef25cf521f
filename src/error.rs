use thiserror::Error;

use crate::roots::RootFindingError;
use crate::{NativeFloat, Span};

/// Failure of one of the analytic geometry primitives.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("lines are parallel")]
    ParallelLines,

    #[error("triangle vertices coincide")]
    DegenerateTriangle,

    #[error("linear system is singular")]
    SingularSystem,
}

/// Reason an input was rejected before any fitting took place.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InvalidInput {
    #[error("control point coordinates must be finite")]
    NonFiniteCoordinate,

    #[error("allowable error must be positive, got {0}")]
    NonPositiveTolerance(NativeFloat),

    #[error("curve turns by {0} rad, must be less than pi")]
    ExcessiveTurning(NativeFloat),
}

/// Errors that can occur while fitting arcs to a curve.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("curve parameter {t} is outside [0, 1]")]
    OutOfRange { t: NativeFloat },

    #[error("degenerate geometry over t = [{}, {}]: {cause}", .span.start, .span.end)]
    DegenerateGeometry {
        #[source]
        cause: GeometryError,
        span: Span,
    },

    #[error("junction solver failed over t = [{}, {}]: {cause}", .span.start, .span.end)]
    ConvergenceFailure {
        #[source]
        cause: RootFindingError,
        span: Span,
    },

    #[error("subdivision of t = [{}, {}] exceeds depth {max_depth}", .span.start, .span.end)]
    SubdivisionLimitExceeded { span: Span, max_depth: usize },
}

impl Error {
    /// The parameter range the failure belongs to, if it is tied to one
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::DegenerateGeometry { span, .. }
            | Error::ConvergenceFailure { span, .. }
            | Error::SubdivisionLimitExceeded { span, .. } => Some(*span),
            Error::InvalidInput(..) | Error::OutOfRange { .. } => None,
        }
    }
}
