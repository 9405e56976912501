//! Renderer binding
//!
//! The simulation never draws. Each visual entity keeps a `SpriteView` that an
//! external renderer reads once per frame.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteView {
    /// Display position, rounded to whole pixels so textures don't bleed
    pub x: f32,
    pub y: f32,
    pub alpha: f32,
    pub visible: bool,
    /// Horizontal scale; the sign mirrors the sprite to face left or right
    pub scale_x: f32,
    /// Texture within the entity's frame set
    pub texture_index: u32,
}

impl Default for SpriteView {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            alpha: 1.0,
            visible: true,
            scale_x: 1.0,
            texture_index: 0,
        }
    }
}

impl SpriteView {
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x.round();
        self.y = y.round();
    }
}
