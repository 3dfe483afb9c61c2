//! 2D vector helpers used by the steering rules.
//!
//! Plain arithmetic (add, subtract, scale, magnitude) comes straight from
//! [`glam::Vec2`]. This module adds the two operations the flocking rules
//! lean on, both guarded against zero-length input:
//!
//! - [`SteerExt::with_magnitude`] - rescale a vector to a given length
//! - [`SteerExt::limit`] - clamp a vector's length to a maximum
//!
//! ```ignore
//! use murmur::math::SteerExt;
//!
//! let desired = (target - position).with_magnitude(MAX_SPEED);
//! let steer = (desired - velocity).limit(MAX_FORCE);
//! ```

use glam::Vec2;

/// Steering operations on 2D vectors.
pub trait SteerExt: Sized {
    /// Rescale to the given length.
    ///
    /// A zero (or non-finite) vector has no direction and comes back as
    /// [`Vec2::ZERO`] instead of NaN.
    fn with_magnitude(self, magnitude: f32) -> Self;

    /// Clamp the length to at most `max`, keeping the direction.
    fn limit(self, max: f32) -> Self;

    /// Heading angle in radians, measured from +X toward +Y.
    fn heading(self) -> f32;
}

impl SteerExt for Vec2 {
    #[inline]
    fn with_magnitude(self, magnitude: f32) -> Self {
        self.normalize_or_zero() * magnitude
    }

    #[inline]
    fn limit(self, max: f32) -> Self {
        let mag_sq = self.length_squared();
        if mag_sq > max * max {
            let mag = mag_sq.sqrt();
            self / mag * max
        } else {
            self
        }
    }

    #[inline]
    fn heading(self) -> f32 {
        self.y.atan2(self.x)
    }
}

/// Rotate `point` around `origin` by `angle` radians.
pub fn rotate_around(point: Vec2, origin: Vec2, angle: f32) -> Vec2 {
    origin + Vec2::from_angle(angle).rotate(point - origin)
}
