//! Host-facing game driver
//!
//! Keeps exactly one booted scene, forwards frame ticks to it and swaps in a
//! fresh scene when the current one asks for a restart. Scene seeds come from
//! the game's own generator, so a whole session replays from one seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::platform::{InputSource, KeyboardInput};
use crate::settings::Settings;
use crate::sim::{MainScene, SceneCommand};

#[derive(Debug)]
pub struct Game {
    settings: Settings,
    scene: Option<MainScene>,
    rng: Pcg32,
    /// Scenes booted so far, including the current one
    boots: u32,
}

impl Game {
    /// Create the game and boot its first scene
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut game = Self {
            settings,
            scene: None,
            rng: Pcg32::seed_from_u64(seed),
            boots: 0,
        };
        let scene = game.new_scene();
        game.boot(scene);
        game
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scene(&self) -> Option<&MainScene> {
        self.scene.as_ref()
    }

    pub fn is_scene_booted(&self) -> bool {
        self.scene.is_some()
    }

    pub fn boots(&self) -> u32 {
        self.boots
    }

    /// Start tracking every key the scenes poll
    pub fn register_keys(&self, keyboard: &mut KeyboardInput) {
        let keys = &self.settings.keys;
        for key in [&keys.left, &keys.right, &keys.restart] {
            keyboard.register(key);
        }
    }

    /// Build a scene with the next seed from the game's generator
    pub fn new_scene(&mut self) -> MainScene {
        let seed = self.rng.random::<u64>();
        MainScene::new(&self.settings, seed)
    }

    /// Make `scene` the current scene, destroying any previous one
    pub fn boot(&mut self, scene: MainScene) {
        if self.is_scene_booted() {
            self.destroy_current_scene();
        }
        self.scene = Some(scene);
        self.boots += 1;
        log::info!("Scene booted (#{})", self.boots);
    }

    /// Tear down the current scene, then build and boot a fresh one
    pub fn restart(&mut self) {
        self.destroy_current_scene();
        let scene = self.new_scene();
        self.boot(scene);
    }

    /// Forward one host frame to the current scene
    pub fn tick(&mut self, dt: f32, input: &(impl InputSource + ?Sized)) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        if scene.tick(dt, input) == SceneCommand::Restart {
            self.restart();
        }
    }

    /// Drop the current scene, leaving nothing booted
    pub fn destroy_current_scene(&mut self) {
        if let Some(scene) = self.scene.take() {
            log::info!(
                "Destroying scene (score {}, pool {})",
                scene.gameplay().score(),
                scene.snack_manager().pool_size()
            );
        }
    }
}
