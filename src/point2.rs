use core::ops::{Add, Mul, Neg, Sub};

use num_traits::Float;

use super::NativeFloat;

/// Two-dimensional point (or vector from the origin) with `NativeFloat` coordinates.
/// It is a plain value: copied freely, compared by value.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point2 {
    pub x: NativeFloat,
    pub y: NativeFloat,
}

impl Point2 {
    pub const fn new(x: NativeFloat, y: NativeFloat) -> Self {
        Point2 { x, y }
    }

    /// Dot product, interpreting both points as vectors from the origin
    pub fn dot(&self, other: Point2) -> NativeFloat {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3d cross product of the two vectors
    pub fn cross(&self, other: Point2) -> NativeFloat {
        self.x * other.y - self.y * other.x
    }

    pub fn squared_length(&self) -> NativeFloat {
        self.x * self.x + self.y * self.y
    }

    /// Interprets the Point2 as a vector and returns its norm (distance from origin)
    pub fn length(&self) -> NativeFloat {
        self.squared_length().sqrt()
    }

    /// Returns the euclidean distance between self and other
    pub fn distance(&self, other: Point2) -> NativeFloat {
        (*self - other).length()
    }

    pub fn midpoint(&self, other: Point2) -> Point2 {
        Point2::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(NativeFloat, NativeFloat)> for Point2 {
    fn from((x, y): (NativeFloat, NativeFloat)) -> Self {
        Point2::new(x, y)
    }
}

impl From<Point2> for (NativeFloat, NativeFloat) {
    fn from(p: Point2) -> Self {
        (p.x, p.y)
    }
}

impl Add for Point2 {
    type Output = Self;

    fn add(self, other: Point2) -> Point2 {
        Point2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Point2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<NativeFloat> for Point2 {
    type Output = Point2;

    fn mul(self, rhs: NativeFloat) -> Point2 {
        Point2 {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Neg for Point2 {
    type Output = Point2;

    fn neg(self) -> Point2 {
        Point2 {
            x: -self.x,
            y: -self.y,
        }
    }
}
