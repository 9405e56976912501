//! Game settings and tuning
//!
//! Defaults mirror `consts`. Persisted as JSON in LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Rect;

/// Logical key names bound to player actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: String,
    pub right: String,
    pub restart: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: "a".to_string(),
            right: "d".to_string(),
            restart: "r".to_string(),
        }
    }
}

/// Motion constants shared by every snack in a pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnackPhysics {
    pub gravity: f32,
    pub horizontal_damp: f32,
    pub collect_anim_duration: f32,
}

impl Default for SnackPhysics {
    fn default() -> Self {
        Self {
            gravity: SNACK_GRAVITY,
            horizontal_damp: SNACK_HORIZONTAL_DAMP,
            collect_anim_duration: SNACK_COLLECT_ANIM_DURATION,
        }
    }
}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Layout ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Share of the canvas height given to the playfield
    pub scene_height_ratio: f32,

    // === Rules ===
    pub starting_lives: i32,

    // === Player ===
    pub player_speed: f32,

    // === Snacks ===
    pub snack_gravity: f32,
    pub snack_horizontal_damp: f32,
    /// Seconds between spawn batches
    pub spawn_interval: f32,
    /// Seconds a collected snack fades before it returns to the pool
    pub collect_anim_duration: f32,
    pub drop_zone_half_width: f32,
    pub initial_pool_size: usize,
    /// Hard cap on pool growth. `None` lets the pool grow on demand.
    pub max_pool_size: Option<usize>,

    // === Input ===
    pub keys: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            scene_height_ratio: SCENE_HEIGHT_RATIO,

            starting_lives: STARTING_LIVES,

            player_speed: PLAYER_SPEED,

            snack_gravity: SNACK_GRAVITY,
            snack_horizontal_damp: SNACK_HORIZONTAL_DAMP,
            spawn_interval: SPAWN_INTERVAL,
            collect_anim_duration: SNACK_COLLECT_ANIM_DURATION,
            drop_zone_half_width: DROP_ZONE_HALF_WIDTH,
            initial_pool_size: INITIAL_POOL_SIZE,
            max_pool_size: None,

            keys: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Whole canvas, including the HUD strip
    pub fn screen_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.canvas_width, self.canvas_height)
    }

    /// Playfield the player and snacks live in
    pub fn scene_rect(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.canvas_width,
            self.canvas_height * self.scene_height_ratio,
        )
    }

    pub fn snack_physics(&self) -> SnackPhysics {
        SnackPhysics {
            gravity: self.snack_gravity,
            horizontal_damp: self.snack_horizontal_damp,
            collect_anim_duration: self.collect_anim_duration,
        }
    }

    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "snack_snatcher_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                    Ok(()) => log::info!("Settings saved"),
                    Err(e) => log::warn!("Could not save settings: {:?}", e),
                },
                Err(e) => log::warn!("Could not serialize settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
