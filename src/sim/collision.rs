//! Collision detection and resolution
//!
//! Everything here is axis-aligned rectangle overlap, tested once per tick
//! after all entities have moved. Each ball and each laser destroys at most
//! one brick per tick: the first overlapping brick in wall order wins. A
//! destroyed brick is removed immediately, so it cannot be scored twice.
//!
//! Ball-vs-wall and ball-vs-paddle bounces happen in `Ball::update`.

use glam::Vec2;
use rand::Rng;

use super::entities::{BRICK_STYLE, Brick, LASER_STYLE, Particle};
use super::powerup::{PowerUp, PowerUpKind, apply_power_up};
use super::rect::Rect;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Index of the first brick overlapping `rect`
pub fn first_hit(rect: &Rect, bricks: &[Brick]) -> Option<usize> {
    bricks.iter().position(|b| rect.overlaps(&b.rect))
}

/// Ball vs bricks: bounce vertically, break the brick, score, maybe drop a
/// power-up
pub fn resolve_ball_bricks(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for ball in state.balls.iter_mut().filter(|b| !b.is_glued) {
        let Some(idx) = first_hit(&ball.rect, &state.bricks) else {
            continue;
        };
        ball.speed_y = -ball.speed_y;

        let brick = state.bricks.remove(idx);
        let center = brick.rect.center();
        Particle::burst(
            &mut state.particles,
            center,
            brick.color,
            BRICK_BURST,
            BRICK_STYLE,
            &mut state.rng,
        );
        state.score += BRICK_SCORE;
        events.push(GameEvent::BrickBroken);

        if let Some(power_up) = roll_power_up(center, &mut state.rng) {
            state.power_ups.push(power_up);
        }
    }
}

/// Laser vs bricks: both the laser and the first brick it touches are
/// destroyed
pub fn resolve_laser_bricks(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut spent = Vec::new();

    for (i, laser) in state.lasers.iter().enumerate() {
        let Some(idx) = first_hit(&laser.rect, &state.bricks) else {
            continue;
        };
        let brick = state.bricks.remove(idx);
        Particle::burst(
            &mut state.particles,
            brick.rect.center(),
            brick.color,
            LASER_BURST,
            LASER_STYLE,
            &mut state.rng,
        );
        state.score += BRICK_SCORE;
        events.push(GameEvent::BrickBroken);
        spent.push(i);
    }

    remove_indices(&mut state.lasers, &spent);
}

/// Power-up vs paddle: collect armed capsules the paddle touches, drop the
/// ones that fell off screen
pub fn resolve_power_ups(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut gone = Vec::new();
    let mut collected = Vec::new();

    for (i, power_up) in state.power_ups.iter().enumerate() {
        if power_up.is_off_screen(state.bounds) {
            gone.push(i);
        } else if power_up.is_collectible() && power_up.rect.overlaps(&state.paddle.rect) {
            gone.push(i);
            collected.push(power_up.kind);
        }
    }
    remove_indices(&mut state.power_ups, &gone);

    for kind in collected {
        state.show_message(kind.properties().message);
        apply_power_up(
            kind,
            &mut state.paddle,
            &mut state.balls,
            state.bounds,
            &mut state.rng,
        );
        log::debug!("Collected {:?}", kind);
        events.push(GameEvent::PowerUpCollected(kind));
    }
}

/// Drop chance roll for a broken brick
fn roll_power_up<R: Rng + ?Sized>(center: Vec2, rng: &mut R) -> Option<PowerUp> {
    if rng.random_bool(POWERUP_DROP_CHANCE) {
        Some(PowerUp::new(center, PowerUpKind::random(rng)))
    } else {
        None
    }
}

/// Remove the entries at `indices` (ascending) in one compaction pass
pub fn remove_indices<T>(items: &mut Vec<T>, indices: &[usize]) {
    if indices.is_empty() {
        return;
    }
    let mut next = indices.iter().peekable();
    let mut i = 0;
    items.retain(|_| {
        let drop = next.peek() == Some(&&i);
        if drop {
            next.next();
        }
        i += 1;
        !drop
    });
}
