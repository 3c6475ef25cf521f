//! Biarc construction over a parameter span of a cubic Bezier curve.
//!
//! The two endpoints of the span and their tangent lines form the triangle
//! (A0, V, A1), V being where the tangent lines meet. Both arcs pass through
//! the incenter G of that triangle: the first is tangent to the curve at A0,
//! the second at A1, and they share the tangent direction H at G.

use super::*;
use crate::error::GeometryError;
use crate::geometry::{incenter, line_intersection, solve_2x2, unit_tangent_of_circle};

/// Two circular arcs meeting tangentially at the junction point
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Biarc {
    pub(crate) span: Span,
    pub(crate) start: Point2,
    pub(crate) end: Point2,
    pub(crate) tangent_intersection: Point2,
    pub(crate) junction: Point2,
    pub(crate) start_center: Point2,
    pub(crate) end_center: Point2,
    pub(crate) junction_tangent: Point2,
}

impl Biarc {
    /// Builds the biarc matching `curve` at both ends of `span`.
    pub fn new(curve: &CubicBezier, span: Span, eps: NativeFloat) -> Result<Self, Error> {
        let degenerate = |cause: GeometryError| Error::DegenerateGeometry { cause, span };

        let start = curve.point_on_curve(span.start)?;
        let end = curve.point_on_curve(span.end)?;
        let start_tangent = curve.unit_tangent(span.start, eps)?;
        let end_tangent = curve.unit_tangent(span.end, eps)?;

        let tangent_intersection =
            line_intersection(start, start + start_tangent, end + end_tangent, end, eps)
                .map_err(degenerate)?;
        let junction = incenter(start, tangent_intersection, end, eps).map_err(degenerate)?;

        let start_center =
            center_through(start, tangent_intersection, junction, eps).map_err(degenerate)?;
        let end_center =
            center_through(end, tangent_intersection, junction, eps).map_err(degenerate)?;
        let junction_tangent = unit_tangent_of_circle(start_center, junction, eps);

        Ok(Biarc {
            span,
            start,
            end,
            tangent_intersection,
            junction,
            start_center,
            end_center,
            junction_tangent,
        })
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// A0, the curve point at the start of the span
    pub fn start(&self) -> Point2 {
        self.start
    }

    /// A1, the curve point at the end of the span
    pub fn end(&self) -> Point2 {
        self.end
    }

    /// V
    pub fn tangent_intersection(&self) -> Point2 {
        self.tangent_intersection
    }

    /// G
    pub fn junction(&self) -> Point2 {
        self.junction
    }

    pub fn start_center(&self) -> Point2 {
        self.start_center
    }

    pub fn end_center(&self) -> Point2 {
        self.end_center
    }

    /// H, unit tangent of the first circle at the junction
    pub fn junction_tangent(&self) -> Point2 {
        self.junction_tangent
    }

    /// The arc from A0 to G followed by the arc from G to A1
    pub fn arcs(&self) -> [Arc; 2] {
        [
            Arc::from_endpoints(self.start_center, self.start, self.junction),
            Arc::from_endpoints(self.end_center, self.junction, self.end),
        ]
    }
}

/// Center of the circle through `p` and `junction` whose radius at `p` is
/// perpendicular to the line p -> `v`.
/// It lies on the normal of pv at p and on the perpendicular bisector of p and the junction.
fn center_through(
    p: Point2,
    v: Point2,
    junction: Point2,
    eps: NativeFloat,
) -> Result<Point2, GeometryError> {
    let normal = v - p;
    let chord = junction - p;
    let mid = p.midpoint(junction);
    solve_2x2(
        normal.x,
        normal.y,
        p.dot(normal),
        chord.x,
        chord.y,
        mid.dot(chord),
        eps,
    )
}
