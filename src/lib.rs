//! Approximation of planar cubic Bézier curves by chains of circular arcs.
//!
//! A cubic Bézier span is replaced by a *biarc*: two circular arcs meeting
//! tangentially at the incenter of the triangle formed by the span's endpoints
//! and the intersection of its end tangents. Spans whose biarc deviates more
//! than the allowable error from the curve are split at the junction parameter
//! and fitted again.
//!
//! ```rust
//! use biarc::{fit_arcs, CubicBezier, Point2};
//!
//! let curve = CubicBezier::new(
//!     Point2::new(0.0, 0.0),
//!     Point2::new(0.0, 50.0),
//!     Point2::new(100.0, 100.0),
//!     Point2::new(150.0, 100.0),
//! );
//! let arcs = fit_arcs(&curve, 0.1).unwrap();
//! assert!(arcs.len() >= 2);
//! ```
//!
//! The curve is cut at its inflection points; each piece must turn by less than
//! 180 degrees.
#![no_std]

extern crate alloc;

/// The float type used for all coordinates and parameters
pub type NativeFloat = f64;

/// Default magnitude below which determinants and lengths count as zero
pub const EPSILON: NativeFloat = 1e-9;

pub mod arc;
pub mod biarc;
pub mod cubic_bezier;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod point2;
pub mod roots;
pub mod svg;

pub use arc::Arc;
pub use biarc::Biarc;
pub use cubic_bezier::CubicBezier;
pub use error::{Error, GeometryError, InvalidInput};
pub use fit::{fit_arcs, fit_arcs_into, fit_arcs_with, FitConfig, JunctionSolver, Span};
pub use point2::Point2;
pub use roots::RootFindingError;
