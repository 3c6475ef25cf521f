use core::f64::consts::PI;

use num_traits::Float;

use super::*;
use crate::geometry::angle_to_x_axis;

/// A circular arc defined by center, radius and angular range.
///
/// Angles are in radians, measured counterclockwise from the positive x-axis.
/// `start_angle` lies in [-pi, pi] and `end_angle` is normalized into
/// [start_angle - pi, start_angle + pi], so the arc always runs the short way
/// around. `clockwise` is set iff `end_angle < start_angle`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arc {
    pub(crate) center: Point2,
    pub(crate) radius: NativeFloat,
    pub(crate) start_angle: NativeFloat,
    pub(crate) end_angle: NativeFloat,
    pub(crate) clockwise: bool,
}

impl Arc {
    /// Creates a new arc, normalizing `end_angle` against `start_angle` and
    /// deriving the direction from the result.
    pub fn new(
        center: Point2,
        radius: NativeFloat,
        start_angle: NativeFloat,
        end_angle: NativeFloat,
    ) -> Self {
        let end_angle = normalize_end_angle(start_angle, end_angle);
        Arc {
            center,
            radius,
            start_angle,
            end_angle,
            clockwise: end_angle < start_angle,
        }
    }

    /// Arc on the circle around `center` running from `from` to `to`.
    /// The radius is taken from `to`.
    pub fn from_endpoints(center: Point2, from: Point2, to: Point2) -> Self {
        Arc::new(
            center,
            center.distance(to),
            angle_to_x_axis(center, from),
            angle_to_x_axis(center, to),
        )
    }

    pub fn center(&self) -> Point2 {
        self.center
    }

    pub fn radius(&self) -> NativeFloat {
        self.radius
    }

    pub fn start_angle(&self) -> NativeFloat {
        self.start_angle
    }

    pub fn end_angle(&self) -> NativeFloat {
        self.end_angle
    }

    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    /// Returns the point at the given angle on the arc's circle.
    #[inline]
    pub fn point_at_angle(&self, angle: NativeFloat) -> Point2 {
        self.center + Point2::new(angle.cos(), angle.sin()) * self.radius
    }

    #[inline]
    pub fn start_point(&self) -> Point2 {
        self.point_at_angle(self.start_angle)
    }

    #[inline]
    pub fn end_point(&self) -> Point2 {
        self.point_at_angle(self.end_angle)
    }

    /// Signed sweep angle, positive is counterclockwise
    #[inline]
    pub fn sweep_angle(&self) -> NativeFloat {
        self.end_angle - self.start_angle
    }

    pub fn arc_length(&self) -> NativeFloat {
        self.radius * self.sweep_angle().abs()
    }

    /// Whether the arc spans more than half of its circle (the SVG large-arc flag)
    pub fn is_large_arc(&self) -> bool {
        self.sweep_angle().abs() > PI
    }

    /// Whether the ray from the center at `angle` hits the arc
    pub fn contains_angle(&self, angle: NativeFloat) -> bool {
        let sweep = self.sweep_angle();
        // offset of angle from the start, in the direction of travel
        let offset = (angle - self.start_angle) * sweep.signum();
        let offset = offset - 2.0 * PI * (offset / (2.0 * PI)).floor();
        offset <= sweep.abs()
    }

    /// Shortest distance from `p` to the arc: radial if `p` lies inside the
    /// angular range, else the distance to the nearer endpoint.
    pub fn distance_to_point(&self, p: Point2) -> NativeFloat {
        if p == self.center {
            return self.radius;
        }
        if self.contains_angle(angle_to_x_axis(self.center, p)) {
            (self.center.distance(p) - self.radius).abs()
        } else {
            self.start_point().distance(p).min(self.end_point().distance(p))
        }
    }
}

/// Shifts `end_angle` by whole turns into [start_angle - pi, start_angle + pi]
fn normalize_end_angle(start_angle: NativeFloat, mut end_angle: NativeFloat) -> NativeFloat {
    while end_angle < start_angle - PI {
        end_angle += 2.0 * PI;
    }
    while end_angle > start_angle + PI {
        end_angle -= 2.0 * PI;
    }
    end_angle
}
