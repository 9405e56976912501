//! Falling snacks: a recycling pool plus the spawner that drives it
//!
//! Snacks are allocated once and never destroyed. Each one cycles
//! `Free -> Falling -> (Collected ->) Free`; the manager hands out free slots
//! for new batches and only grows the pool when every slot is busy.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Aabb, Rect};
use super::events::{BusEvent, EventBus};
use super::geometry::Vector2;
use super::sprite::SpriteView;
use crate::consts::*;
use crate::settings::{Settings, SnackPhysics};

/// Lifecycle of a pooled snack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnackState {
    /// Idle in the pool, invisible
    Free,
    /// Dropping through the playfield, collectable
    Falling,
    /// Caught; playing the fade-out before returning to the pool
    Collected,
}

/// Notifications published by the snack manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnackEvent {
    /// A falling snack dropped past the bottom of the playfield
    Lost,
}

impl BusEvent for SnackEvent {
    type Kind = SnackEvent;

    fn kind(&self) -> SnackEvent {
        *self
    }
}

/// A single pooled snack
#[derive(Debug, Clone)]
pub struct Snack {
    state: SnackState,
    position: Vector2,
    velocity: Vector2,
    aabb: Aabb,
    score_value: u64,
    anim_countdown: f32,
    /// Falling past this y loses the snack
    lost_boundary: f32,
    sprite: SpriteView,
}

impl Snack {
    pub fn new(texture_index: u32, lost_boundary: f32) -> Self {
        let mut snack = Self {
            state: SnackState::Free,
            position: Vector2::ZERO,
            velocity: Vector2::ZERO,
            aabb: Aabb::new(
                Vector2::ZERO,
                Vector2::new(SNACK_HALF_SIZE, SNACK_HALF_SIZE),
            ),
            score_value: SNACK_BASE_SCORE + texture_index as u64 * SNACK_SCORE_PER_TEXTURE,
            anim_countdown: 0.0,
            lost_boundary,
            sprite: SpriteView {
                texture_index,
                ..Default::default()
            },
        };
        snack.free();
        snack
    }

    pub fn state(&self) -> SnackState {
        self.state
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    pub fn score_value(&self) -> u64 {
        self.score_value
    }

    pub fn anim_countdown(&self) -> f32 {
        self.anim_countdown
    }

    pub fn sprite(&self) -> &SpriteView {
        &self.sprite
    }

    /// Move the snack without changing its state
    pub fn place(&mut self, x: f32, y: f32) {
        self.position = Vector2::new(x, y);
        self.update_box_position();
        self.sprite.set_position(x, y);
    }

    /// Start falling from the current position.
    /// Only free snacks can be dropped; returns false otherwise.
    pub fn initialize(&mut self, horizontal_velocity: f32) -> bool {
        if self.state != SnackState::Free {
            return false;
        }
        self.velocity = Vector2::new(horizontal_velocity, 0.0);
        self.sprite.visible = true;
        self.sprite.alpha = 1.0;
        self.state = SnackState::Falling;
        true
    }

    /// Catch a falling snack: stop its drift, pop it up and start the fade.
    /// Returns false (and changes nothing) unless the snack is falling.
    pub fn collect(&mut self, collect_anim_duration: f32) -> bool {
        if self.state != SnackState::Falling {
            return false;
        }
        self.state = SnackState::Collected;
        self.anim_countdown = collect_anim_duration;
        self.velocity = Vector2::new(0.0, SNACK_COLLECT_LIFT);
        true
    }

    /// Return to the pool, parked off screen
    pub fn free(&mut self) {
        self.state = SnackState::Free;
        self.position = Vector2::new(PARKED_POSITION, PARKED_POSITION);
        self.sprite.set_position(PARKED_POSITION, PARKED_POSITION);
        self.sprite.visible = false;
    }

    /// Advance one frame. Returns `SnackEvent::Lost` on the tick a falling
    /// snack crosses the lost boundary.
    pub fn tick(&mut self, dt: f32, physics: &SnackPhysics) -> Option<SnackEvent> {
        match self.state {
            SnackState::Free => None,
            SnackState::Falling => {
                if self.position.y > self.lost_boundary {
                    self.free();
                    return Some(SnackEvent::Lost);
                }

                // Position uses last tick's velocity; damp and gravity land next tick
                self.apply_velocity(dt);
                self.apply_damp(dt, physics.horizontal_damp);
                self.apply_gravity(dt, physics.gravity);
                self.update_box_position();
                self.update_sprite_position();
                None
            }
            SnackState::Collected => {
                if self.anim_countdown > 0.0 {
                    self.anim_countdown -= dt / FRAMES_PER_SECOND;
                    let progress = 1.0
                        - (self.anim_countdown / physics.collect_anim_duration).clamp(0.0, 1.0);
                    self.sprite.alpha = 1.0 - progress;
                    self.position.x += (progress * 15.0).sin() * 0.5 * dt;
                    self.apply_velocity(dt);
                    self.apply_gravity(dt, physics.gravity);
                    self.update_sprite_position();
                    return None;
                }

                self.free();
                None
            }
        }
    }

    fn apply_velocity(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    fn apply_damp(&mut self, dt: f32, damp: f32) {
        self.velocity.x *= 1.0 - damp * dt / 100.0;
    }

    fn apply_gravity(&mut self, dt: f32, gravity: f32) {
        self.velocity.y += gravity * dt / 100.0;
    }

    fn update_box_position(&mut self) {
        self.aabb.center = self.position;
    }

    fn update_sprite_position(&mut self) {
        self.sprite.set_position(self.position.x, self.position.y);
    }
}

/// Horizontal span new snacks are dropped from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZone {
    pub from: f32,
    pub to: f32,
}

impl DropZone {
    /// Zone of `half_width` either side of the scene's horizontal centre
    pub fn centered(scene_rect: &Rect, half_width: f32) -> Self {
        let center = scene_rect.x + scene_rect.width / 2.0;
        Self {
            from: center - half_width,
            to: center + half_width,
        }
    }

    pub fn width(&self) -> f32 {
        self.to - self.from
    }
}

/// Owns the snack pool and the spawn timer
#[derive(Debug)]
pub struct SnackManager {
    snacks: Vec<Snack>,
    drop_zone: DropZone,
    lost_boundary: f32,
    countdown: f32,
    spawn_interval: f32,
    max_pool_size: Option<usize>,
    physics: SnackPhysics,
    rng: Pcg32,
    events: EventBus<SnackEvent>,
}

impl SnackManager {
    pub fn new(scene_rect: Rect, settings: &Settings, seed: u64) -> Self {
        let initial = match settings.max_pool_size {
            Some(cap) => settings.initial_pool_size.min(cap),
            None => settings.initial_pool_size,
        };
        let mut manager = Self {
            snacks: Vec::with_capacity(initial),
            drop_zone: DropZone::centered(&scene_rect, settings.drop_zone_half_width),
            lost_boundary: scene_rect.bottom() + POOL_BELOW_MARGIN,
            countdown: 0.0,
            spawn_interval: settings.spawn_interval,
            max_pool_size: settings.max_pool_size,
            physics: settings.snack_physics(),
            rng: Pcg32::seed_from_u64(seed),
            events: EventBus::new(),
        };

        // Allocate the pool up front so early batches reuse slots
        for _ in 0..initial {
            let snack = manager.instance_snack();
            manager.snacks.push(snack);
        }

        manager
    }

    /// Subscribe here for `SnackEvent::Lost`
    pub fn events_mut(&mut self) -> &mut EventBus<SnackEvent> {
        &mut self.events
    }

    pub fn snacks(&self) -> &[Snack] {
        &self.snacks
    }

    pub fn pool_size(&self) -> usize {
        self.snacks.len()
    }

    /// Snacks that are falling or still animating
    pub fn active_count(&self) -> usize {
        self.snacks
            .iter()
            .filter(|s| s.state != SnackState::Free)
            .count()
    }

    pub fn drop_zone(&self) -> DropZone {
        self.drop_zone
    }

    pub fn lost_boundary(&self) -> f32 {
        self.lost_boundary
    }

    /// Seconds until the next batch
    pub fn countdown(&self) -> f32 {
        self.countdown
    }

    /// Run the spawn timer, then advance every snack that isn't free
    pub fn tick(&mut self, dt: f32) {
        self.countdown -= dt / FRAMES_PER_SECOND;
        if self.countdown <= 0.0 {
            let amount = self.rng.random_range(1..=MAX_SPAWN_BATCH);
            self.spawn_batch(amount);
            self.countdown = self.spawn_interval;
        }

        self.update_snacks(dt);
    }

    /// Collect every falling snack overlapping `other` and return their
    /// combined score value (0 if nothing was caught)
    pub fn collect_at_overlap_with(&mut self, other: &Aabb) -> u64 {
        let mut collected_value = 0;
        for snack in &mut self.snacks {
            if snack.state == SnackState::Falling
                && other.overlaps(&snack.aabb)
                && snack.collect(self.physics.collect_anim_duration)
            {
                collected_value += snack.score_value;
            }
        }
        collected_value
    }

    /// Drop `amount` snacks at once. The drop zone is split into `amount`
    /// equal cells and snack `i` starts somewhere inside cell `i`, each one
    /// a little higher than the last, so a batch never stacks up.
    pub fn spawn_batch(&mut self, amount: u32) {
        if amount == 0 {
            return;
        }
        let cell_len = self.drop_zone.width() / amount as f32;

        for i in 0..amount {
            let Some(index) = self.get_snack() else {
                log::warn!(
                    "Snack pool exhausted at {} entries, skipping {} spawn(s)",
                    self.snacks.len(),
                    amount - i
                );
                return;
            };

            let x = self.drop_zone.from + cell_len * i as f32 + self.rng.random::<f32>() * cell_len;
            let y = SPAWN_Y - i as f32 * SPAWN_STAGGER;
            let horizontal_velocity = self.rng.random::<f32>() - 0.5;

            let snack = &mut self.snacks[index];
            snack.place(x, y);
            snack.initialize(horizontal_velocity);
        }
    }

    fn update_snacks(&mut self, dt: f32) {
        for snack in &mut self.snacks {
            if snack.state == SnackState::Free {
                continue;
            }
            if let Some(event) = snack.tick(dt, &self.physics) {
                self.events.emit(&event);
            }
        }
    }

    /// Index of the first free snack, growing the pool if none is free.
    /// `None` only when a pool cap is configured and reached.
    fn get_snack(&mut self) -> Option<usize> {
        if let Some(index) = self
            .snacks
            .iter()
            .position(|s| s.state == SnackState::Free)
        {
            return Some(index);
        }

        if self
            .max_pool_size
            .is_some_and(|cap| self.snacks.len() >= cap)
        {
            return None;
        }

        let snack = self.instance_snack();
        self.snacks.push(snack);
        log::debug!("Snack pool grew to {}", self.snacks.len());
        Some(self.snacks.len() - 1)
    }

    fn instance_snack(&mut self) -> Snack {
        let texture_index = self.rng.random_range(0..FOOD_TEXTURE_COUNT);
        Snack::new(texture_index, self.lost_boundary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn scene_rect() -> Rect {
        Settings::default().scene_rect()
    }

    fn manager(seed: u64) -> SnackManager {
        SnackManager::new(scene_rect(), &Settings::default(), seed)
    }

    fn falling_snack(x: f32, y: f32) -> Snack {
        let mut snack = Snack::new(0, 1000.0);
        snack.place(x, y);
        assert!(snack.initialize(0.0));
        snack
    }

    #[test]
    fn test_new_snack_is_free_and_hidden() {
        let snack = Snack::new(4, 100.0);
        assert_eq!(snack.state(), SnackState::Free);
        assert!(!snack.sprite().visible);
        assert_eq!(snack.score_value(), 1000 + 4 * 125);
    }

    #[test]
    fn test_collect_requires_falling() {
        let mut snack = Snack::new(0, 100.0);
        assert!(!snack.collect(2.0));
        assert_eq!(snack.state(), SnackState::Free);

        snack.place(10.0, 10.0);
        snack.initialize(0.3);
        assert!(snack.collect(2.0));
        assert_eq!(snack.state(), SnackState::Collected);
        assert_eq!(snack.velocity(), Vector2::new(0.0, -0.5));
        assert_eq!(snack.anim_countdown(), 2.0);
        // Already collected
        assert!(!snack.collect(2.0));
        assert!(!snack.initialize(0.0));
    }

    #[test]
    fn test_gravity_integration_order() {
        let physics = SnackPhysics::default();
        let mut snack = falling_snack(100.0, 0.0);

        let mut expected_y = 0.0;
        let mut expected_vy = 0.0;
        for _ in 0..10 {
            // Position moves by the velocity from before this tick's gravity
            expected_y += expected_vy;
            expected_vy += physics.gravity / 100.0;
            assert_eq!(snack.tick(1.0, &physics), None);
        }

        let v = snack.velocity();
        assert!((v.y - 10.0 * physics.gravity / 100.0).abs() < 1e-5);
        assert!((snack.position().y - expected_y).abs() < 1e-4);
        // First tick did not move the snack at all
        assert!(snack.position().y < 10.0 * v.y);
    }

    #[test]
    fn test_horizontal_damping() {
        let physics = SnackPhysics::default();
        let mut snack = Snack::new(0, 1000.0);
        snack.place(100.0, 0.0);
        snack.initialize(0.4);

        snack.tick(1.0, &physics);
        assert!((snack.position().x - 100.4).abs() < 1e-4);
        assert!((snack.velocity().x - 0.4 * 0.99).abs() < 1e-6);
        assert_eq!(snack.aabb().center, snack.position());
    }

    #[test]
    fn test_lost_fires_once() {
        let physics = SnackPhysics::default();
        let mut snack = Snack::new(0, 50.0);
        snack.place(100.0, 49.0);
        snack.initialize(0.0);

        let mut lost = 0;
        for _ in 0..500 {
            if snack.tick(1.0, &physics) == Some(SnackEvent::Lost) {
                lost += 1;
            }
        }
        assert_eq!(lost, 1);
        assert_eq!(snack.state(), SnackState::Free);
        assert!(!snack.sprite().visible);
    }

    #[test]
    fn test_collected_fades_then_frees_without_loss() {
        let physics = SnackPhysics::default();
        let mut snack = falling_snack(100.0, 100.0);
        snack.collect(physics.collect_anim_duration);

        snack.tick(60.0, &physics);
        assert_eq!(snack.state(), SnackState::Collected);
        assert!((snack.sprite().alpha - 0.5).abs() < 1e-4);

        let mut events = Vec::new();
        for _ in 0..3 {
            events.extend(snack.tick(60.0, &physics));
        }
        assert!(events.is_empty());
        assert_eq!(snack.state(), SnackState::Free);
    }

    #[test]
    fn test_collected_wobbles_and_lifts() {
        let physics = SnackPhysics::default();
        let mut snack = falling_snack(100.0, 200.0);
        assert!(snack.collect(physics.collect_anim_duration));

        snack.tick(1.0, &physics);
        let countdown = physics.collect_anim_duration - 1.0 / FRAMES_PER_SECOND;
        let progress = 1.0 - countdown / physics.collect_anim_duration;
        let wobble = (progress * 15.0).sin() * 0.5;

        assert!((snack.anim_countdown() - countdown).abs() < 1e-6);
        assert!((snack.position().x - (100.0 + wobble)).abs() < 1e-4);
        assert!((snack.position().y - (200.0 + SNACK_COLLECT_LIFT)).abs() < 1e-4);
        assert!((snack.velocity().y - (SNACK_COLLECT_LIFT + physics.gravity / 100.0)).abs() < 1e-6);
        assert_eq!(snack.velocity().x, 0.0);
        assert!((snack.sprite().alpha - (1.0 - progress)).abs() < 1e-5);
    }

    #[test]
    fn test_pool_preallocated_and_reused() {
        let mut manager = manager(1);
        assert_eq!(manager.pool_size(), INITIAL_POOL_SIZE);
        assert_eq!(manager.active_count(), 0);

        manager.spawn_batch(3);
        assert_eq!(manager.active_count(), 3);
        assert_eq!(manager.pool_size(), INITIAL_POOL_SIZE);
        // First free slots are handed out first
        assert!(manager.snacks()[..3]
            .iter()
            .all(|s| s.state() == SnackState::Falling));
    }

    #[test]
    fn test_pool_grows_when_exhausted() {
        let mut manager = manager(2);
        for _ in 0..INITIAL_POOL_SIZE {
            manager.spawn_batch(1);
        }
        assert_eq!(manager.pool_size(), INITIAL_POOL_SIZE);
        manager.spawn_batch(2);
        assert_eq!(manager.pool_size(), INITIAL_POOL_SIZE + 2);
        assert_eq!(manager.active_count(), INITIAL_POOL_SIZE + 2);
    }

    #[test]
    fn test_pool_cap_skips_spawns() {
        let settings = Settings {
            initial_pool_size: 2,
            max_pool_size: Some(3),
            ..Default::default()
        };
        let mut manager = SnackManager::new(scene_rect(), &settings, 3);
        manager.spawn_batch(3);
        manager.spawn_batch(3);
        assert_eq!(manager.pool_size(), 3);
        assert_eq!(manager.active_count(), 3);
    }

    #[test]
    fn test_spawn_cells() {
        let mut manager = manager(42);
        let zone = manager.drop_zone();
        assert_eq!(zone.width(), 250.0);
        assert_eq!(zone.from, 405.0 / 2.0 - 125.0);

        manager.spawn_batch(2);
        let snacks = manager.snacks();
        for (i, snack) in snacks[..2].iter().enumerate() {
            let cell_from = zone.from + 125.0 * i as f32;
            let x = snack.position().x;
            assert!(x >= cell_from && x <= cell_from + 125.0, "snack {i} at {x}");
            assert_eq!(snack.position().y, -16.0 - 8.0 * i as f32);
            assert!(snack.velocity().x.abs() <= 0.5);
        }
    }

    #[test]
    fn test_tick_spawns_on_timer() {
        let mut manager = manager(7);
        manager.tick(1.0);
        let first_batch = manager.active_count();
        assert!((1..=3).contains(&first_batch));
        assert!((manager.countdown() - SPAWN_INTERVAL).abs() < 1e-6);

        // A frame short of 1.2s: no new batch
        for _ in 0..71 {
            manager.tick(1.0);
        }
        assert_eq!(manager.active_count(), first_batch);

        manager.tick(1.0);
        manager.tick(1.0);
        assert!(manager.active_count() > first_batch);
    }

    #[test]
    fn test_collect_sums_overlapping_falling_snacks() {
        let mut manager = manager(9);
        manager.spawn_batch(3);
        let expected: u64 = manager.snacks()[..3].iter().map(Snack::score_value).sum();

        let everything = Aabb::new(Vector2::new(200.0, 0.0), Vector2::new(500.0, 500.0));
        assert_eq!(manager.collect_at_overlap_with(&everything), expected);
        assert!(manager.snacks()[..3]
            .iter()
            .all(|s| s.state() == SnackState::Collected));

        // Already collected snacks are not counted twice
        assert_eq!(manager.collect_at_overlap_with(&everything), 0);
    }

    #[test]
    fn test_collect_misses_far_box() {
        let mut manager = manager(9);
        manager.spawn_batch(2);
        let far = Aabb::new(Vector2::new(200.0, 300.0), Vector2::new(30.0, 32.0));
        assert_eq!(manager.collect_at_overlap_with(&far), 0);
        assert_eq!(manager.active_count(), 2);
    }

    #[test]
    fn test_lost_events_reach_subscribers() {
        let lost = Rc::new(Cell::new(0));
        let mut manager = manager(5);
        let counter = lost.clone();
        manager
            .events_mut()
            .on(SnackEvent::Lost, move |_| counter.set(counter.get() + 1));

        manager.spawn_batch(1);
        // Run long enough for one batch to fall out, spawning nothing new
        manager.countdown = f32::MAX;
        for _ in 0..2000 {
            manager.tick(1.0);
        }
        assert_eq!(lost.get(), 1);
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = manager(1234);
        let mut b = manager(1234);
        for _ in 0..300 {
            a.tick(1.0);
            b.tick(1.0);
        }
        let pa: Vec<_> = a.snacks().iter().map(Snack::position).collect();
        let pb: Vec<_> = b.snacks().iter().map(Snack::position).collect();
        assert_eq!(pa, pb);
    }
}
