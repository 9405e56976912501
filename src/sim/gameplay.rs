//! Score, lives and the run's state machine
//!
//! `Starting -> Playing -> GameOver`, with no way back: a new run gets a new
//! manager. Every score/lives write is announced on the manager's own bus.

use serde::{Deserialize, Serialize};

use super::events::{BusEvent, EventBus};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameplayState {
    /// Start screen; waiting for the first movement key
    #[default]
    Starting,
    /// Snacks are falling
    Playing,
    /// Out of lives
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameplayEvent {
    ScoreChange { old: u64, new: u64 },
    LivesChange { old: i32, new: i32 },
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplayEventKind {
    ScoreChange,
    LivesChange,
    GameOver,
}

impl BusEvent for GameplayEvent {
    type Kind = GameplayEventKind;

    fn kind(&self) -> GameplayEventKind {
        match self {
            GameplayEvent::ScoreChange { .. } => GameplayEventKind::ScoreChange,
            GameplayEvent::LivesChange { .. } => GameplayEventKind::LivesChange,
            GameplayEvent::GameOver => GameplayEventKind::GameOver,
        }
    }
}

#[derive(Debug)]
pub struct GameplayManager {
    score: u64,
    lives: i32,
    state: GameplayState,
    events: EventBus<GameplayEvent>,
}

impl GameplayManager {
    pub fn new(starting_lives: i32) -> Self {
        Self {
            score: 0,
            lives: starting_lives,
            state: GameplayState::Starting,
            events: EventBus::new(),
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn state(&self) -> GameplayState {
        self.state
    }

    /// Subscribe here for score, lives and game over notifications
    pub fn events_mut(&mut self) -> &mut EventBus<GameplayEvent> {
        &mut self.events
    }

    /// Set the score and announce it, even when the value is unchanged
    pub fn set_score(&mut self, value: u64) {
        let old = self.score;
        self.score = value;
        self.events
            .emit(&GameplayEvent::ScoreChange { old, new: value });
    }

    pub fn add_score(&mut self, amount: u64) {
        self.set_score(self.score.saturating_add(amount));
    }

    /// Set lives, announce it, then end the run if none are left
    pub fn set_lives(&mut self, value: i32) {
        let old = self.lives;
        self.lives = value;
        self.events
            .emit(&GameplayEvent::LivesChange { old, new: value });
        self.check_if_game_over();
    }

    pub fn lose_life(&mut self) {
        self.set_lives(self.lives - 1);
    }

    /// Leave the start screen. Returns false outside `Starting`.
    pub fn start_game(&mut self) -> bool {
        if self.state != GameplayState::Starting {
            return false;
        }
        self.state = GameplayState::Playing;
        log::info!("Game started with {} lives", self.lives);
        true
    }

    fn check_if_game_over(&mut self) {
        if self.lives <= 0 {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        if self.state == GameplayState::GameOver {
            return;
        }
        self.state = GameplayState::GameOver;
        log::info!("Game over, final score {}", self.score);
        self.events.emit(&GameplayEvent::GameOver);
    }
}
