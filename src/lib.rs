//! Arkanoid - a classic brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, power-ups, game phases)
//! - `game`: Per-frame driver wiring the simulation to its collaborators
//! - `renderer`: Data-only draw requests handed to an external renderer
//! - `audio`: Sound events routed to an optional audio backend
//! - `platform`: Keyboard input sampling and key bindings
//! - `settings`: Startup configuration (screen bounds, seed, sound)

pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use game::Game;
pub use settings::Settings;

/// RGB color
pub type Color = [u8; 3];

/// Game configuration constants
///
/// Speeds are in pixels per tick; durations are in ticks.
pub mod consts {
    use crate::Color;

    /// Fixed simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Reference screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Smallest screen the brick wall fits on
    pub const MIN_SCREEN_WIDTH: f32 = 800.0;
    pub const MIN_SCREEN_HEIGHT: f32 = 400.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Gap between paddle bottom and screen bottom
    pub const PADDLE_BOTTOM_MARGIN: f32 = 40.0;
    /// Width multiplier while `grow` is active
    pub const PADDLE_GROW_FACTOR: f32 = 1.5;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 14.0;
    pub const BALL_LAUNCH_SPEED_X: f32 = 4.0;
    pub const BALL_LAUNCH_SPEED_Y: f32 = 5.0;
    /// Velocity multiplier while `slow` is active
    pub const BALL_SLOW_FACTOR: f32 = 0.5;
    /// Extra horizontal speed from hitting the paddle edge
    pub const PADDLE_ENGLISH: f32 = 3.0;

    /// Brick wall layout
    pub const BRICK_COLUMNS: usize = 10;
    /// Rows at level 1; each later level adds one
    pub const BRICK_BASE_ROWS: usize = 3;
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 5.0;
    pub const BRICK_OFFSET_Y: f32 = 50.0;
    pub const BRICK_COLORS: [Color; 4] = [
        [178, 34, 34],  // Firebrick
        [255, 165, 0],  // Orange
        [255, 215, 0],  // Gold
        [50, 205, 50],  // Lime green
    ];

    /// Scoring and progression
    pub const BRICK_SCORE: u64 = 10;
    pub const INITIAL_LIVES: u8 = 3;
    pub const MAX_LEVEL: u32 = 3;

    /// Power-ups
    pub const POWERUP_WIDTH: f32 = 30.0;
    pub const POWERUP_HEIGHT: f32 = 15.0;
    pub const POWERUP_FALL_SPEED: f32 = 3.0;
    /// Ticks after spawning before a power-up can be collected
    pub const POWERUP_ARM_TICKS: u32 = 30;
    pub const POWERUP_DROP_CHANCE: f64 = 0.3;
    /// Paddle and ball effect duration (10 seconds)
    pub const EFFECT_DURATION_TICKS: u32 = 10 * TICKS_PER_SECOND;
    pub const LASER_CHARGES: u32 = 10;

    /// Lasers
    pub const LASER_WIDTH: f32 = 4.0;
    pub const LASER_HEIGHT: f32 = 15.0;
    pub const LASER_SPEED: f32 = 10.0;
    /// Horizontal offset of each beam in a spread shot
    pub const LASER_SPREAD_OFFSET: f32 = 30.0;
    pub const LASER_COLOR: Color = [255, 60, 60];

    /// Particle bursts
    pub const PARTICLE_SHRINK_RATE: f32 = 0.1;
    pub const BRICK_BURST: usize = 15;
    pub const LASER_BURST: usize = 10;
    pub const BOUNCE_BURST: usize = 5;
    pub const BOUNCE_COLOR: Color = [255, 255, 0];

    /// Banner message display time (2 seconds)
    pub const MESSAGE_TICKS: u32 = 2 * TICKS_PER_SECOND;

    /// Win screen firework spawn interval range
    pub const FIREWORK_MIN_INTERVAL: u32 = 20;
    pub const FIREWORK_MAX_INTERVAL: u32 = 50;
    pub const FIREWORK_SPARKS: usize = 40;
}
