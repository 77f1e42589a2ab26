//! Rigid 2D pose primitive.
//!
//! A [`Pose`] is a rotation followed by a translation. Poses compose with
//! [`Pose::transform`], invert with [`Pose::inverse`], and re-express each
//! other with [`Pose::relative_to`]. The algebra here is exact (sin/cos
//! based); every equality decision downstream goes through an explicit
//! tolerance, never through this module.
//!
//! ## Rotation Convention
//!
//! Angles are in radians, counter-clockwise positive, Y axis pointing up.
//! A pose's rotation is applied before its translation:
//! ```text
//! p' = R(rotation) * p + (x, y)
//! ```

use serde::{Deserialize, Serialize};

/// A 2D point in the puzzle coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Midpoint of the segment between two points.
    pub fn midpoint(&self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// A rigid 2D transform: rotate by `rotation` radians, then translate by `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    /// Rotation in radians, counter-clockwise positive.
    pub rotation: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, rotation: f64) -> Self {
        Self { x, y, rotation }
    }

    /// The identity pose: no rotation, no translation.
    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
        }
    }

    /// Compose `other` into this pose's frame: rotate `other`'s translation
    /// by this pose's rotation, add this pose's translation, sum rotations.
    ///
    /// If `self` maps frame B to frame A and `other` maps frame C to frame B,
    /// the result maps frame C to frame A.
    pub fn transform(&self, other: &Pose) -> Pose {
        let cos_a = self.rotation.cos();
        let sin_a = self.rotation.sin();
        Pose {
            x: self.x + other.x * cos_a - other.y * sin_a,
            y: self.y + other.x * sin_a + other.y * cos_a,
            rotation: self.rotation + other.rotation,
        }
    }

    /// The inverse transform: negate the rotation and re-express the
    /// translation in the rotated frame, so `p.inverse().transform(&p)`
    /// is the identity.
    pub fn inverse(&self) -> Pose {
        let cos_a = self.rotation.cos();
        let sin_a = self.rotation.sin();
        Pose {
            x: -(self.x * cos_a + self.y * sin_a),
            y: self.x * sin_a - self.y * cos_a,
            rotation: -self.rotation,
        }
    }

    /// The pose of `other` as seen from this pose's frame:
    /// `self.inverse().transform(other)`.
    pub fn relative_to(&self, other: &Pose) -> Pose {
        self.inverse().transform(other)
    }

    /// Transform a point from this pose's local frame to its parent frame.
    pub fn apply(&self, point: Point) -> Point {
        let cos_a = self.rotation.cos();
        let sin_a = self.rotation.sin();
        Point {
            x: self.x + point.x * cos_a - point.y * sin_a,
            y: self.y + point.x * sin_a + point.y * cos_a,
        }
    }

    /// Approximate equality within `tolerance` on all three components.
    pub fn approx_eq(&self, other: &Pose, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance
            && (self.y - other.y).abs() < tolerance
            && (self.rotation - other.rotation).abs() < tolerance
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}
