//! The main scene: one run of the game
//!
//! Composes the player, the snack pool, the run's gameplay state and the HUD,
//! and routes each frame according to the gameplay state:
//!
//! | State    | Ticks                  | Leaves on                          |
//! |----------|------------------------|------------------------------------|
//! | Starting | player                 | any movement key -> Playing        |
//! | Playing  | player, snacks, score  | lives <= 0 -> GameOver; restart key|
//! | GameOver | snacks (no scoring)    | restart key                        |
//!
//! Restart is reported to the host as `SceneCommand::Restart`; the host
//! throws this scene away and boots a fresh one.

use std::cell::Cell;
use std::rc::Rc;

use super::collision::Rect;
use super::gameplay::{GameplayEventKind, GameplayManager, GameplayState};
use super::player::Player;
use super::snack::{SnackEvent, SnackManager, SnackState};
use super::sprite::SpriteView;
use crate::platform::InputSource;
use crate::settings::Settings;
use crate::ui::Hud;

/// What the host should do after a scene tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    Continue,
    Restart,
}

#[derive(Debug)]
pub struct MainScene {
    scene_rect: Rect,
    player: Player,
    snack_manager: SnackManager,
    gameplay: GameplayManager,
    hud: Hud,
    movement_keys: [String; 2],
    restart_key: String,
    /// Snacks lost during the current snack tick, applied once it returns
    lost_snacks: Rc<Cell<u32>>,
    /// Set by the gameplay bus when the run ends
    game_over_pending: Rc<Cell<bool>>,
}

impl MainScene {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let scene_rect = settings.scene_rect();
        let mut gameplay = GameplayManager::new(settings.starting_lives);

        let mut player = Player::new(scene_rect, settings);
        player.set_position(scene_rect.width * 0.5, scene_rect.height);

        let mut snack_manager = SnackManager::new(scene_rect, settings, seed);
        let lost_snacks = Rc::new(Cell::new(0));
        let lost = lost_snacks.clone();
        snack_manager
            .events_mut()
            .on(SnackEvent::Lost, move |_| lost.set(lost.get() + 1));

        let game_over_pending = Rc::new(Cell::new(false));
        let pending = game_over_pending.clone();
        gameplay
            .events_mut()
            .once(GameplayEventKind::GameOver, move |_| pending.set(true));

        let keys = &settings.keys;
        let mut hud = Hud::new(&keys.left, &keys.right, &keys.restart);
        hud.show_start_screen();

        log::info!("Scene initialized with seed {}", seed);

        Self {
            scene_rect,
            player,
            snack_manager,
            gameplay,
            hud,
            movement_keys: [keys.left.clone(), keys.right.clone()],
            restart_key: keys.restart.clone(),
            lost_snacks,
            game_over_pending,
        }
    }

    pub fn scene_rect(&self) -> Rect {
        self.scene_rect
    }

    pub fn state(&self) -> GameplayState {
        self.gameplay.state()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn snack_manager(&self) -> &SnackManager {
        &self.snack_manager
    }

    pub fn gameplay(&self) -> &GameplayManager {
        &self.gameplay
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    /// Visible snack sprites for the renderer
    pub fn snack_sprites(&self) -> impl Iterator<Item = &SpriteView> {
        self.snack_manager
            .snacks()
            .iter()
            .filter(|s| s.state() != SnackState::Free)
            .map(|s| s.sprite())
    }

    /// Advance the scene by one host frame
    pub fn tick(&mut self, dt: f32, input: &(impl InputSource + ?Sized)) -> SceneCommand {
        match self.gameplay.state() {
            GameplayState::Starting => {
                self.player.tick(dt, input);
                if self.movement_keys.iter().any(|k| input.is_held(k))
                    && self.gameplay.start_game()
                {
                    self.hud.handle_game_start(&mut self.gameplay);
                }
                SceneCommand::Continue
            }
            GameplayState::Playing => {
                self.player.tick(dt, input);
                self.snack_manager.tick(dt);
                self.apply_lost_snacks();

                // Catches on the tick that ends the run still count
                let collected = self
                    .snack_manager
                    .collect_at_overlap_with(self.player.aabb());
                if collected > 0 {
                    self.gameplay.add_score(collected);
                }

                self.handle_game_over();
                self.handle_restart_input(input)
            }
            GameplayState::GameOver => {
                self.snack_manager.tick(dt);
                // The run is over; late misses no longer cost lives
                self.lost_snacks.set(0);
                self.handle_restart_input(input)
            }
        }
    }

    /// One life per snack that hit the floor
    fn apply_lost_snacks(&mut self) {
        let lost = self.lost_snacks.replace(0);
        for _ in 0..lost {
            self.gameplay.lose_life();
        }
    }

    fn handle_game_over(&mut self) {
        if self.game_over_pending.replace(false) {
            self.hud.handle_game_over();
            self.player.handle_game_over();
        }
    }

    fn handle_restart_input(&self, input: &(impl InputSource + ?Sized)) -> SceneCommand {
        if input.is_held(&self.restart_key) {
            SceneCommand::Restart
        } else {
            SceneCommand::Continue
        }
    }
}
