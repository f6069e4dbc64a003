//! Game state and core simulation types
//!
//! `GameState` is the single owned aggregate the driver mutates each tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Ball, Brick, Firework, Laser, Paddle, Particle};
use super::level::build_wall;
use super::powerup::{PowerUp, PowerUpKind};
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start signal
    TitleScreen,
    /// Active gameplay
    Playing,
    /// Out of lives
    GameOver,
    /// Final level cleared
    YouWin,
}

/// Something that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball bounced off a wall or the paddle
    Bounce,
    /// A brick was destroyed
    BrickBroken,
    LaserFired,
    PowerUpCollected(PowerUpKind),
    /// Last ball lost with lives remaining
    LifeLost,
    /// New level started
    LevelStarted(u32),
    GameOver,
    Won,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Screen width and height
    pub bounds: Vec2,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    pub lives: u8,
    /// Banner text and its remaining display ticks
    pub message: String,
    pub message_timer: u32,
    /// Ticks until the next win-screen firework
    pub firework_timer: u32,
    pub sound_enabled: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub power_ups: Vec<PowerUp>,
    pub lasers: Vec<Laser>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub fireworks: Vec<Firework>,
    /// Next brick ID
    next_id: u32,
}

impl GameState {
    /// Fresh game on the title screen
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        let paddle = Paddle::new(bounds);
        let balls = vec![Ball::on_paddle(&paddle)];
        let mut state = Self {
            seed,
            bounds,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::TitleScreen,
            level: 1,
            score: 0,
            lives: INITIAL_LIVES,
            message: String::new(),
            message_timer: 0,
            firework_timer: 0,
            sound_enabled: true,
            time_ticks: 0,
            paddle,
            balls,
            bricks: Vec::new(),
            power_ups: Vec::new(),
            lasers: Vec::new(),
            particles: Vec::new(),
            fireworks: Vec::new(),
            next_id: 1,
        };
        state.bricks = build_wall(state.level, &mut state.next_id);
        state
    }

    /// Reinitialize everything except the sound flag and go straight to play
    pub fn restart(&mut self) {
        let sound_enabled = self.sound_enabled;
        *self = Self::new(self.seed, self.bounds);
        self.sound_enabled = sound_enabled;
        self.phase = GamePhase::Playing;
        log::info!("Game restarted (seed {})", self.seed);
    }

    /// Fresh ball on a default paddle
    pub fn reset_ball_and_paddle(&mut self) {
        self.paddle.reset(self.bounds);
        self.balls.clear();
        self.balls.push(Ball::on_paddle(&self.paddle));
    }

    /// Regenerate the wall for the current level
    pub fn rebuild_wall(&mut self) {
        self.bricks = build_wall(self.level, &mut self.next_id);
    }

    pub fn show_message(&mut self, text: impl Into<String>) {
        self.message = text.into();
        self.message_timer = MESSAGE_TICKS;
    }
}
