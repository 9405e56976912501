//! Snack Snatcher - catch the falling snacks, don't let too many hit the floor
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (snacks, player, scoring, scene flow)
//! - `game`: Host-facing driver that boots, ticks and restarts scenes
//! - `platform`: Browser/native platform abstraction (input)
//! - `assets`: Logical frame naming for the external texture cache
//! - `ui`: HUD readouts driven by gameplay events
//! - `settings`: Data-driven game configuration

pub mod assets;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
///
/// Time-based values are expressed in host frames: `dt` is the per-frame delta
/// reported by the ticker (1.0 at 60 fps), so `dt / 60` converts to seconds.
pub mod consts {
    /// Frames per second the `dt` unit is normalised to
    pub const FRAMES_PER_SECOND: f32 = 60.0;

    /// Canvas dimensions (9 * 45 square)
    pub const CANVAS_WIDTH: f32 = 405.0;
    pub const CANVAS_HEIGHT: f32 = 405.0;
    /// Share of the canvas height used by the playfield (rest is the HUD strip)
    pub const SCENE_HEIGHT_RATIO: f32 = 0.85;

    /// Player defaults
    pub const STARTING_LIVES: i32 = 10;
    pub const PLAYER_SPEED: f32 = 580.0;
    pub const PLAYER_EDGE_MARGIN: f32 = 16.0;
    pub const PLAYER_HALF_SIZE: (f32, f32) = (30.0, 32.0);
    pub const PLAYER_AABB_OFFSET: (f32, f32) = (0.0, -20.0);

    /// Snack physics
    pub const SNACK_GRAVITY: f32 = 0.5;
    pub const SNACK_HORIZONTAL_DAMP: f32 = 1.0;
    /// Seconds between spawn batches
    pub const SPAWN_INTERVAL: f32 = 1.2;
    /// Seconds a collected snack keeps animating before it is freed
    pub const SNACK_COLLECT_ANIM_DURATION: f32 = 2.0;
    pub const SNACK_HALF_SIZE: f32 = 8.0;
    /// Upward kick given to a snack on collection
    pub const SNACK_COLLECT_LIFT: f32 = -0.5;
    /// Largest batch spawned at once (batches are 1..=MAX_SPAWN_BATCH)
    pub const MAX_SPAWN_BATCH: u32 = 3;
    /// Vertical stagger between snacks of the same batch
    pub const SPAWN_STAGGER: f32 = 8.0;
    pub const SPAWN_Y: f32 = -16.0;
    /// Where freed snacks are parked, off screen
    pub const PARKED_POSITION: f32 = -32.0;
    /// How far below the playfield a snack may fall before it is lost
    pub const POOL_BELOW_MARGIN: f32 = 32.0;
    /// Half width of the drop zone around the scene centre
    pub const DROP_ZONE_HALF_WIDTH: f32 = 125.0;
    /// Snacks allocated up front so the pool rarely grows
    pub const INITIAL_POOL_SIZE: usize = 32;

    /// Food textures in the sprite sheet, and their score values
    pub const FOOD_TEXTURE_COUNT: u32 = 64;
    pub const SNACK_BASE_SCORE: u64 = 1000;
    pub const SNACK_SCORE_PER_TEXTURE: u64 = 125;
}
