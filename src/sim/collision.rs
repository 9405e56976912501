//! Axis-aligned collision primitives
//!
//! Everything collidable in the playfield is a box, so collision is a
//! separating-axis test on x and y independently.

use serde::{Deserialize, Serialize};

use super::geometry::Vector2;

/// Top-left anchored rectangle, used for presentation and scene bounds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Box defined by its center and half extents
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vector2,
    pub half_size: Vector2,
}

impl Aabb {
    pub const fn new(center: Vector2, half_size: Vector2) -> Self {
        Self { center, half_size }
    }

    /// Box covering the same area as `rect`
    pub fn from_rect(rect: Rect) -> Self {
        let half_size = Vector2::new(rect.width / 2.0, rect.height / 2.0);
        Self::new(
            Vector2::new(rect.x + half_size.x, rect.y + half_size.y),
            half_size,
        )
    }

    /// True when the boxes touch or intersect. Symmetric in its operands.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        if (self.center.x - other.center.x).abs() > self.half_size.x + other.half_size.x {
            return false;
        }
        if (self.center.y - other.center.y).abs() > self.half_size.y + other.half_size.y {
            return false;
        }
        true
    }

    /// Top-left/width/height form (presentation only)
    pub fn build_rect(&self) -> Rect {
        Rect::new(
            self.center.x - self.half_size.x,
            self.center.y - self.half_size.y,
            self.half_size.x * 2.0,
            self.half_size.y * 2.0,
        )
    }

    pub fn copy_from(&mut self, other: &Aabb) {
        self.center = other.center;
        self.half_size = other.half_size;
    }
}

/// Whether `point` lies within `range` of `other`
#[inline]
pub fn point_in_range(point: Vector2, other: Vector2, range: f32) -> bool {
    point.distance_to(other) <= range
}
