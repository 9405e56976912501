//! 2D vector primitive used by every entity
//!
//! Pure operations return new values; the `*_in_place` style (and the
//! `+=`/`-=`/`*=` operators) mutate the receiver and hand it back for chaining.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A mutable `(x, y)` pair owned by the entity that embeds it
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Euclidean norm
    #[inline]
    pub fn length(&self) -> f32 {
        self.as_vec2().length()
    }

    /// Distance from `self` to `other`; neither operand is modified
    #[inline]
    pub fn distance_to(&self, other: Vector2) -> f32 {
        (other - *self).length()
    }

    /// Dot product
    #[inline]
    pub fn dot(&self, other: Vector2) -> f32 {
        self.as_vec2().dot(other.as_vec2())
    }

    /// Unsigned angle between the two vectors in radians (0 if either is zero)
    pub fn angle_to(&self, other: Vector2) -> f32 {
        let a = self.as_vec2();
        let b = other.as_vec2();
        if a.length_squared() == 0.0 || b.length_squared() == 0.0 {
            return 0.0;
        }
        a.angle_to(b).abs()
    }

    /// Unit-length copy, or the zero vector unchanged
    #[inline]
    pub fn normalized(&self) -> Vector2 {
        let mut v = *self;
        v.normalize();
        v
    }

    /// Copy scaled by `scalar`
    #[inline]
    pub fn scaled(&self, scalar: f32) -> Vector2 {
        Vector2::new(self.x * scalar, self.y * scalar)
    }

    /// Add `other` in place
    #[inline]
    pub fn add_in_place(&mut self, other: Vector2) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self
    }

    /// Subtract `other` in place
    #[inline]
    pub fn sub_in_place(&mut self, other: Vector2) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self
    }

    /// Scale in place
    #[inline]
    pub fn mul_in_place(&mut self, scalar: f32) -> &mut Self {
        self.x *= scalar;
        self.y *= scalar;
        self
    }

    /// Scale to unit length in place. Zero-length vectors are left alone.
    pub fn normalize(&mut self) -> &mut Self {
        let length = self.length();
        if length > 0.0 {
            self.x /= length;
            self.y /= length;
        }
        self
    }

    pub fn to_array(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl From<Vec2> for Vector2 {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2> for Vec2 {
    fn from(v: Vector2) -> Self {
        v.as_vec2()
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f32) -> Vector2 {
        self.scaled(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.add_in_place(rhs);
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.sub_in_place(rhs);
    }
}

impl MulAssign<f32> for Vector2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.mul_in_place(rhs);
    }
}
