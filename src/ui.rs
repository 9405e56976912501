//! HUD readouts
//!
//! Holds the text the host should show: title screen, live score/lives, and
//! the game over panel. Score and lives follow the gameplay bus; screen
//! changes are driven by the scene.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::sim::{GameplayEvent, GameplayEventKind, GameplayManager};

pub const TITLE: &str = "SNACK SNATCHER";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HudScreen {
    #[default]
    Start,
    Playing,
    GameOver,
}

/// One centered line of panel text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudLine {
    pub text: String,
    pub font_size: u32,
}

impl HudLine {
    fn new(text: impl Into<String>, font_size: u32) -> Self {
        Self {
            text: text.into(),
            font_size,
        }
    }
}

/// What the host renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HudState {
    pub screen: HudScreen,
    /// Score/lives readouts; hidden outside `Playing`
    pub readouts_visible: bool,
    pub score_text: String,
    pub lives_text: String,
    /// Panel lines for the start and game over screens
    pub lines: Vec<HudLine>,
}

#[derive(Debug, Default)]
pub struct Hud {
    state: Rc<RefCell<HudState>>,
    left_key: String,
    right_key: String,
    restart_key: String,
}

impl Hud {
    pub fn new(left_key: &str, right_key: &str, restart_key: &str) -> Self {
        Self {
            state: Rc::default(),
            left_key: left_key.to_uppercase(),
            right_key: right_key.to_uppercase(),
            restart_key: restart_key.to_uppercase(),
        }
    }

    pub fn state(&self) -> Ref<'_, HudState> {
        self.state.borrow()
    }

    pub fn show_start_screen(&mut self) {
        let mut state = self.state.borrow_mut();
        state.screen = HudScreen::Start;
        state.readouts_visible = false;
        state.lines = vec![
            HudLine::new(TITLE, 24),
            HudLine::new(format!("{}        {}", self.left_key, self.right_key), 16),
        ];
    }

    /// Swap the title for live readouts and follow `gameplay` from now on
    pub fn handle_game_start(&mut self, gameplay: &mut GameplayManager) {
        {
            let mut state = self.state.borrow_mut();
            state.screen = HudScreen::Playing;
            state.readouts_visible = true;
            state.lines.clear();
            state.score_text = gameplay.score().to_string();
            state.lives_text = gameplay.lives().to_string();
        }

        let events = gameplay.events_mut();
        let state = self.state.clone();
        events.on(GameplayEventKind::ScoreChange, move |e| {
            if let GameplayEvent::ScoreChange { new, .. } = e {
                state.borrow_mut().score_text = new.to_string();
            }
        });
        let state = self.state.clone();
        events.on(GameplayEventKind::LivesChange, move |e| {
            if let GameplayEvent::LivesChange { new, .. } = e {
                state.borrow_mut().lives_text = new.to_string();
            }
        });
    }

    pub fn handle_game_over(&mut self) {
        let mut state = self.state.borrow_mut();
        state.screen = HudScreen::GameOver;
        state.readouts_visible = false;
        let score = state.score_text.clone();
        state.lines = vec![
            HudLine::new("GAME OVER", 32),
            HudLine::new(format!("your score: {score}"), 16),
            HudLine::new(format!("press {} to play again", self.restart_key), 16),
        ];
    }
}
