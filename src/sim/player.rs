//! The snack catcher
//!
//! Walks left/right along the bottom of the playfield. Movement, animation
//! choice and the collision box are all derived from held input each tick.

use super::collision::{Aabb, Rect};
use super::geometry::Vector2;
use super::sprite::SpriteView;
use crate::consts::*;
use crate::platform::InputSource;
use crate::settings::Settings;

/// Player animations in the sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    Idle,
    Walk,
    FaceSide,
}

/// Frames and playback speed for one animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationMeta {
    pub frame_prefix: &'static str,
    pub frame_count: usize,
    /// Frames advanced per host frame
    pub speed: f32,
}

impl AnimationKey {
    pub fn name(&self) -> &'static str {
        match self {
            AnimationKey::Idle => "idle",
            AnimationKey::Walk => "walk",
            AnimationKey::FaceSide => "face-side",
        }
    }

    pub fn meta(&self) -> AnimationMeta {
        match self {
            AnimationKey::Idle => AnimationMeta {
                frame_prefix: "player/idle-",
                frame_count: 2,
                speed: 1.0 / FRAMES_PER_SECOND / 1.0,
            },
            AnimationKey::Walk => AnimationMeta {
                frame_prefix: "player/walk-",
                frame_count: 6,
                speed: 1.0 / FRAMES_PER_SECOND / 0.055,
            },
            AnimationKey::FaceSide => AnimationMeta {
                frame_prefix: "player/face-side-",
                frame_count: 1,
                speed: 0.0,
            },
        }
    }
}

/// Which way the sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Player {
    position: Vector2,
    aabb: Aabb,
    /// Collision box center relative to the sprite's bottom-center anchor
    aabb_offset: Vector2,
    scene_rect: Rect,
    speed: f32,
    left_key: String,
    right_key: String,
    current_animation: AnimationKey,
    /// Bumped whenever a different animation starts playing
    animation_changes: u32,
    facing: Facing,
    sprite: SpriteView,
}

impl Player {
    pub fn new(scene_rect: Rect, settings: &Settings) -> Self {
        let mut player = Self {
            position: Vector2::ZERO,
            aabb: Aabb::new(
                Vector2::ZERO,
                Vector2::new(PLAYER_HALF_SIZE.0, PLAYER_HALF_SIZE.1),
            ),
            aabb_offset: Vector2::new(PLAYER_AABB_OFFSET.0, PLAYER_AABB_OFFSET.1),
            scene_rect,
            speed: settings.player_speed,
            left_key: settings.keys.left.clone(),
            right_key: settings.keys.right.clone(),
            current_animation: AnimationKey::Idle,
            animation_changes: 0,
            facing: Facing::Right,
            sprite: SpriteView::default(),
        };
        player.update_positions();
        player
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vector2::new(x, y);
        self.update_positions();
    }

    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    pub fn current_animation(&self) -> AnimationKey {
        self.current_animation
    }

    pub fn animation_changes(&self) -> u32 {
        self.animation_changes
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn sprite(&self) -> &SpriteView {
        &self.sprite
    }

    pub fn tick(&mut self, dt: f32, input: &(impl InputSource + ?Sized)) {
        let direction = self.read_input(input);
        self.update_movement(direction, dt);
        self.update_animations(direction);
        self.update_positions();
    }

    pub fn handle_game_over(&mut self) {
        self.play_animation(AnimationKey::Idle);
    }

    /// Switch animation. Returns false when `key` is already playing.
    pub fn play_animation(&mut self, key: AnimationKey) -> bool {
        if key == self.current_animation {
            return false;
        }
        self.current_animation = key;
        self.animation_changes += 1;
        true
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
        let magnitude = self.sprite.scale_x.abs();
        self.sprite.scale_x = match facing {
            Facing::Right => magnitude,
            Facing::Left => -magnitude,
        };
    }

    /// Held direction; opposite keys cancel out
    fn read_input(&self, input: &(impl InputSource + ?Sized)) -> Vector2 {
        let mut direction = Vector2::ZERO;
        if input.is_held(&self.left_key) {
            direction.x -= 1.0;
        }
        if input.is_held(&self.right_key) {
            direction.x += 1.0;
        }
        direction
    }

    fn update_movement(&mut self, direction: Vector2, dt: f32) {
        let force = direction.normalized() * (self.speed * dt / 100.0);

        let rect = &self.scene_rect;
        self.position.x = (self.position.x + force.x)
            .max(rect.left() + PLAYER_EDGE_MARGIN)
            .min(rect.right() - PLAYER_EDGE_MARGIN);
        self.position.y += force.y;
    }

    fn update_animations(&mut self, direction: Vector2) {
        if direction.length() > 0.0 {
            self.play_animation(AnimationKey::Walk);
            if direction.x > 0.0 {
                self.set_facing(Facing::Right);
            } else if direction.x < 0.0 {
                self.set_facing(Facing::Left);
            }
        } else {
            self.play_animation(AnimationKey::Idle);
        }
    }

    fn update_positions(&mut self) {
        self.sprite.set_position(self.position.x, self.position.y);
        self.aabb.center = Vector2::new(
            (self.position.x + self.aabb_offset.x).round(),
            (self.position.y + self.aabb_offset.y).round(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::KeyboardInput;

    fn keyboard() -> KeyboardInput {
        let mut input = KeyboardInput::new();
        input.register("a");
        input.register("d");
        input
    }

    fn player_at(x: f32) -> Player {
        let settings = Settings::default();
        let rect = settings.scene_rect();
        let mut player = Player::new(rect, &settings);
        player.set_position(x, rect.height);
        player
    }

    #[test]
    fn test_left_moves_by_speed_over_hundred() {
        let mut input = keyboard();
        input.set_pressed("a", true);
        let mut player = player_at(200.0);

        player.tick(1.0, &input);
        assert!((player.position().x - (200.0 - PLAYER_SPEED / 100.0)).abs() < 1e-4);
        assert_eq!(player.current_animation(), AnimationKey::Walk);
        assert_eq!(player.facing(), Facing::Left);
        assert!(player.sprite().scale_x < 0.0);
    }

    #[test]
    fn test_clamped_to_scene_margin() {
        let mut input = keyboard();
        input.set_pressed("a", true);
        let mut player = player_at(18.0);
        player.tick(1.0, &input);
        assert_eq!(player.position().x, 16.0);

        input.set_pressed("a", false);
        input.set_pressed("d", true);
        let mut player = player_at(400.0);
        player.tick(10.0, &input);
        assert_eq!(player.position().x, 405.0 - 16.0);
        assert_eq!(player.facing(), Facing::Right);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = keyboard();
        input.set_pressed("a", true);
        input.set_pressed("d", true);
        let mut player = player_at(200.0);
        player.tick(1.0, &input);
        assert_eq!(player.position().x, 200.0);
        assert_eq!(player.current_animation(), AnimationKey::Idle);
    }

    #[test]
    fn test_aabb_offset_and_rounding() {
        let player = player_at(100.4);
        assert_eq!(player.aabb().center, Vector2::new(100.0, (344.25f32 - 20.0).round()));
        assert_eq!(player.sprite().x, 100.0);
    }

    #[test]
    fn test_play_animation_only_on_change() {
        let mut input = keyboard();
        let mut player = player_at(200.0);
        player.tick(1.0, &input);
        assert_eq!(player.animation_changes(), 0);

        input.set_pressed("d", true);
        player.tick(1.0, &input);
        player.tick(1.0, &input);
        assert_eq!(player.animation_changes(), 1);

        player.handle_game_over();
        assert_eq!(player.current_animation(), AnimationKey::Idle);
        assert_eq!(player.animation_changes(), 2);
        assert!(!player.play_animation(AnimationKey::Idle));
    }

    #[test]
    fn test_animation_meta() {
        let walk = AnimationKey::Walk.meta();
        assert_eq!(walk.frame_count, 6);
        assert!((walk.speed - 1.0 / 60.0 / 0.055).abs() < 1e-6);
        assert_eq!(AnimationKey::FaceSide.name(), "face-side");
    }
}
