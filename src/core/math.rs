// 2D vector algebra used by the force integrator

use glam::DVec2;
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Immutable 2D vector
///
/// Every operation returns a new value. Backed by `glam::DVec2` so the
/// arithmetic stays in `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector(DVec2);

impl Vector {
    /// The zero vector
    pub const ZERO: Self = Self(DVec2::ZERO);

    /// Create a vector from its components
    pub const fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    /// Squared magnitude (`x² + y²`)
    pub fn length_squared(&self) -> f64 {
        self.0.length_squared()
    }

    /// Component-wise sum
    pub fn add(self, other: Vector) -> Self {
        Self(self.0 + other.0)
    }

    /// Multiply both components by a scalar
    pub fn scale(self, value: f64) -> Self {
        Self(self.0 * value)
    }

    /// Difference, computed as `self + other * -1`
    pub fn sub(self, other: Vector) -> Self {
        self.add(other.scale(-1.0))
    }

    /// Element-wise product
    pub fn mul(self, other: Vector) -> Self {
        Self(self.0 * other.0)
    }

    /// Divide by the squared magnitude.
    ///
    /// Zero and unit vectors are returned unchanged. Note the divisor is
    /// `x² + y²`, not the length, so non-unit results are not unit length;
    /// force directions are stored in this form and the integrator depends
    /// on it.
    pub fn normalize(self) -> Self {
        let mag = self.length_squared();
        if mag == 0.0 || mag == 1.0 {
            return self;
        }
        Self(self.0 / mag)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0.x, self.0.y)
    }
}

impl Add for Vector {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vector::add(self, rhs)
    }
}

impl Sub for Vector {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vector::sub(self, rhs)
    }
}

impl Mul<f64> for Vector {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}
