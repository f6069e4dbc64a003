//! Power-ups and the effect dispatcher
//!
//! Broken bricks sometimes drop a power-up capsule. It falls toward the
//! paddle, becomes collectible after a short arming delay, and applies its
//! effect on contact.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::{Ball, Paddle, PaddleEffect};
use super::rect::Rect;
use crate::Color;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Grow,
    Laser,
    Glue,
    Slow,
    Multi,
}

/// Static per-type properties
#[derive(Debug, Clone, Copy)]
pub struct PowerUpProperties {
    /// Banner shown on collection
    pub message: &'static str,
    pub color: Color,
    /// Label drawn on the capsule
    pub label: &'static str,
}

/// What collecting a power-up does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Timed paddle modification
    Paddle(PaddleEffect),
    /// Every live ball slows down for a while
    SlowBalls,
    /// One-shot: two extra balls
    MultiBall,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Grow,
        PowerUpKind::Laser,
        PowerUpKind::Glue,
        PowerUpKind::Slow,
        PowerUpKind::Multi,
    ];

    /// Uniformly random kind
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn properties(self) -> PowerUpProperties {
        match self {
            PowerUpKind::Grow => PowerUpProperties {
                message: "Paddle enlarged!",
                color: [0, 120, 255],
                label: "G",
            },
            PowerUpKind::Laser => PowerUpProperties {
                message: "Lasers armed! SPACE fires, F fires a spread",
                color: [255, 60, 60],
                label: "L",
            },
            PowerUpKind::Glue => PowerUpProperties {
                message: "Sticky paddle! Balls stick until launched",
                color: [50, 205, 50],
                label: "C",
            },
            PowerUpKind::Slow => PowerUpProperties {
                message: "Ball slowed down!",
                color: [255, 165, 0],
                label: "S",
            },
            PowerUpKind::Multi => PowerUpProperties {
                message: "Multi-ball!",
                color: [200, 80, 255],
                label: "M",
            },
        }
    }

    pub fn effect(self) -> Effect {
        match self {
            PowerUpKind::Grow => Effect::Paddle(PaddleEffect::Grow),
            PowerUpKind::Laser => Effect::Paddle(PaddleEffect::Laser),
            PowerUpKind::Glue => Effect::Paddle(PaddleEffect::Glue),
            PowerUpKind::Slow => Effect::SlowBalls,
            PowerUpKind::Multi => Effect::MultiBall,
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
    pub speed_y: f32,
    /// Ticks left before the capsule can be collected
    pub active_timer: u32,
}

impl PowerUp {
    pub fn new(center: Vec2, kind: PowerUpKind) -> Self {
        Self {
            rect: Rect::from_center(center, Vec2::new(POWERUP_WIDTH, POWERUP_HEIGHT)),
            kind,
            speed_y: POWERUP_FALL_SPEED,
            active_timer: POWERUP_ARM_TICKS,
        }
    }

    pub fn update(&mut self) {
        self.rect.pos.y += self.speed_y;
        self.active_timer = self.active_timer.saturating_sub(1);
    }

    pub fn is_collectible(&self) -> bool {
        self.active_timer == 0
    }

    /// Fell past the bottom boundary
    pub fn is_off_screen(&self, bounds: Vec2) -> bool {
        self.rect.top() > bounds.y
    }
}

/// Apply a collected power-up's effect
pub fn apply_power_up<R: Rng + ?Sized>(
    kind: PowerUpKind,
    paddle: &mut Paddle,
    balls: &mut Vec<Ball>,
    bounds: Vec2,
    rng: &mut R,
) {
    match kind.effect() {
        Effect::Paddle(effect) => paddle.activate(effect, bounds),
        Effect::SlowBalls => {
            for ball in balls.iter_mut() {
                ball.activate_slow();
            }
        }
        Effect::MultiBall => spawn_multi_ball(balls, rng),
    }
}

/// Clone the first ball twice: same center, same speed magnitudes, random
/// horizontal direction, always heading up
fn spawn_multi_ball<R: Rng + ?Sized>(balls: &mut Vec<Ball>, rng: &mut R) {
    let Some(source) = balls.first() else {
        return;
    };
    let center = source.rect.center();
    // A glued source has no speed yet; use launch speed instead
    let speed_x = if source.speed_x == 0.0 {
        BALL_LAUNCH_SPEED_X
    } else {
        source.speed_x.abs()
    };
    let speed_y = if source.speed_y == 0.0 {
        BALL_LAUNCH_SPEED_Y
    } else {
        source.speed_y.abs()
    };

    for _ in 0..2 {
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        balls.push(Ball::free(center, sign * speed_x, -speed_y));
    }
}
