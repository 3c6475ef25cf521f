use num_traits::Float;
use tinyvec::ArrayVec;

use super::*;

/// A 2d cubic Bezier curve defined by four points: the starting point, two successive
/// control points and the ending point.
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * start + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * end```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubicBezier {
    pub(crate) start: Point2,
    pub(crate) ctrl1: Point2,
    pub(crate) ctrl2: Point2,
    pub(crate) end: Point2,
}

impl CubicBezier {
    pub fn new(start: Point2, ctrl1: Point2, ctrl2: Point2, end: Point2) -> Self {
        CubicBezier {
            start,
            ctrl1,
            ctrl2,
            end,
        }
    }

    pub fn start(&self) -> Point2 {
        self.start
    }

    pub fn ctrl1(&self) -> Point2 {
        self.ctrl1
    }

    pub fn ctrl2(&self) -> Point2 {
        self.ctrl2
    }

    pub fn end(&self) -> Point2 {
        self.end
    }

    pub fn control_points(&self) -> [Point2; 4] {
        [self.start, self.ctrl1, self.ctrl2, self.end]
    }

    /// Evaluate the curve at t by direct evaluation of the Bernstein polynomial.
    /// t is not checked, use `point_on_curve` for that.
    pub fn eval(&self, t: NativeFloat) -> Point2 {
        let one_t = 1.0 - t;
        self.start * (one_t * one_t * one_t)
            + self.ctrl1 * (3.0 * t * one_t * one_t)
            + self.ctrl2 * (3.0 * t * t * one_t)
            + self.end * (t * t * t)
    }

    /// Evaluate the (non-unit) tangent vector dP/dt at t. t is not checked.
    pub fn eval_derivative(&self, t: NativeFloat) -> Point2 {
        let one_t = 1.0 - t;
        (self.ctrl1 - self.start) * (3.0 * one_t * one_t)
            + (self.ctrl2 - self.ctrl1) * (6.0 * t * one_t)
            + (self.end - self.ctrl2) * (3.0 * t * t)
    }

    /// Point on the curve at t, which must lie in [0, 1]
    pub fn point_on_curve(&self, t: NativeFloat) -> Result<Point2, Error> {
        check_parameter(t)?;
        Ok(self.eval(t))
    }

    /// Derivative of the curve at t, which must lie in [0, 1]
    pub fn derivative(&self, t: NativeFloat) -> Result<Point2, Error> {
        check_parameter(t)?;
        Ok(self.eval_derivative(t))
    }

    /// Unit tangent of the curve at t in [0, 1].
    /// A derivative with an x component within `eps` of zero yields (0, ±1) by the sign of y.
    ///
    /// Where the derivative vanishes, as at the start of a curve with `ctrl1 == start`,
    /// the direction is taken from the chord to the next distinct control point.
    pub fn unit_tangent(&self, t: NativeFloat, eps: NativeFloat) -> Result<Point2, Error> {
        let mut d = self.derivative(t)?;
        if d.squared_length() <= eps * eps {
            let chords = if t < 0.5 {
                [self.ctrl2 - self.start, self.end - self.start]
            } else {
                [self.end - self.ctrl1, self.end - self.start]
            };
            if let Some(chord) = chords.into_iter().find(|c| c.squared_length() > eps * eps) {
                d = chord;
            }
        }
        if d.x.abs() <= eps {
            return Ok(if d.y >= 0.0 {
                Point2::new(0.0, 1.0)
            } else {
                Point2::new(0.0, -1.0)
            });
        }
        Ok(d * (1.0 / d.length()))
    }

    // Returns if the whole set of control points can be considered one singular point
    // given some tolerance.
    pub(crate) fn is_a_point(&self, tolerance: NativeFloat) -> bool {
        let tolerance_squared = tolerance * tolerance;
        // Use <= so that tolerance can be zero.
        (self.start - self.end).squared_length() <= tolerance_squared
            && (self.start - self.ctrl1).squared_length() <= tolerance_squared
            && (self.end - self.ctrl2).squared_length() <= tolerance_squared
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.control_points().iter().all(Point2::is_finite)
    }

    /// Net signed turning of the tangent direction from start to end, in radians.
    /// Positive is counterclockwise. Sampled at `nsteps` + 1 parameters, skipping
    /// samples where the derivative vanishes.
    pub fn net_turning(&self, nsteps: usize) -> NativeFloat {
        self.turning_between(0.0, 1.0, nsteps)
    }

    /// Same as `net_turning`, restricted to the parameter range [t0, t1]
    pub fn turning_between(&self, t0: NativeFloat, t1: NativeFloat, nsteps: usize) -> NativeFloat {
        let mut turning = 0.0;
        let mut previous: Option<Point2> = None;
        for i in 0..=nsteps {
            let t = t0 + (t1 - t0) * (i as NativeFloat / nsteps as NativeFloat);
            let d = self.eval_derivative(t);
            if d.squared_length() <= EPSILON * EPSILON {
                continue;
            }
            if let Some(p) = previous {
                turning += p.cross(d).atan2(p.dot(d));
            }
            previous = Some(d);
        }
        turning
    }

    /// Parameters in (0, 1) where the curvature changes sign, in increasing order.
    ///
    /// These are the roots of cross(P'(t), P''(t)), a quadratic in t. A double root
    /// touches zero without a sign change and is not reported.
    pub fn inflections(&self, eps: NativeFloat) -> ArrayVec<[NativeFloat; 2]> {
        let mut result = ArrayVec::new();

        // P'(t) / 3 = a + 2 * b * t + c * t²
        // P''(t) / 6 = b + c * t
        let a = self.ctrl1 - self.start;
        let b = self.ctrl2 - self.ctrl1 - a;
        let c = self.end - self.ctrl2 * 2.0 + self.ctrl1 - b;

        // cross(a + 2bt + ct², b + ct) = cross(a, b) + cross(a, c) t + cross(b, c) t²
        let q2 = b.cross(c);
        let q1 = a.cross(c);
        let q0 = a.cross(b);

        let mut push_inside = |t: NativeFloat| {
            if t > eps && t < 1.0 - eps {
                result.push(t);
            }
        };
        if q2.abs() <= eps {
            // linear
            if q1.abs() > eps {
                push_inside(-q0 / q1);
            }
        } else {
            let delta = q1 * q1 - q2 * q0 * 4.0;
            if delta > 0.0 {
                let sqrt_delta = delta.sqrt();
                let r1 = (-q1 - sqrt_delta) / (q2 * 2.0);
                let r2 = (-q1 + sqrt_delta) / (q2 * 2.0);
                push_inside(r1.min(r2));
                push_inside(r1.max(r2));
            }
        }

        result
    }
}

fn check_parameter(t: NativeFloat) -> Result<(), Error> {
    if (0.0..=1.0).contains(&t) {
        Ok(())
    } else {
        Err(Error::OutOfRange { t })
    }
}
