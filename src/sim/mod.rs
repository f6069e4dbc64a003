//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick, every timer counts down exactly once per tick
//! - Seeded RNG only
//! - Stable iteration order (collections keep insertion order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entities;
pub mod level;
pub mod powerup;
pub mod rect;
pub mod state;
pub mod tick;

pub use entities::{
    Ball, BallOutcome, Brick, Firework, Laser, Paddle, PaddleEffect, Particle, Surface,
};
pub use level::{build_wall, check_level_progress};
pub use powerup::{PowerUp, PowerUpKind, apply_power_up};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
