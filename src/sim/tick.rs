//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. Within a
//! `Playing` tick the order is fixed: commands, paddle, balls (and life
//! loss), lasers and power-ups, collisions, level progression. Cosmetic
//! effects and timers update last in every phase.

use std::cmp::Ordering;

use rand::Rng;

use super::collision::{
    remove_indices, resolve_ball_bricks, resolve_laser_bricks, resolve_power_ups,
};
use super::entities::{BOUNCE_STYLE, BallOutcome, Firework, Particle};
use super::level::check_level_progress;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held: move paddle left
    pub move_left: bool,
    /// Held: move paddle right
    pub move_right: bool,
    /// Pressed: start game / launch ball / fire a single laser
    pub launch: bool,
    /// Pressed: fire two lasers without spending a charge
    pub fire_spread: bool,
    /// Pressed: toggle sound
    pub toggle_mute: bool,
    /// Pressed: start over from the game-over or win screen
    pub restart: bool,
    /// Demo mode - the paddle plays itself
    pub autopilot: bool,
}

impl TickInput {
    /// Paddle direction: -1, 0 or +1
    pub fn direction(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    let mut input = input.clone();
    if input.autopilot {
        steer_autopilot(state, &mut input);
    }
    let input = &input;

    if input.toggle_mute {
        state.sound_enabled = !state.sound_enabled;
        log::info!("Sound {}", if state.sound_enabled { "on" } else { "off" });
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::TitleScreen => {
            if input.launch {
                state.phase = GamePhase::Playing;
                log::info!("Game started (seed {})", state.seed);
            }
        }
        GamePhase::Playing => play(state, input, &mut events),
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
            }
        }
        GamePhase::YouWin => {
            if input.restart {
                state.restart();
            } else {
                spawn_fireworks(state);
            }
        }
    }

    update_cosmetics(state);
    events
}

/// One `Playing` tick
fn play(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    // --- Commands ---
    if input.launch {
        for ball in &mut state.balls {
            ball.launch();
        }
        if let Some(laser) = state.paddle.fire_laser() {
            state.lasers.push(laser);
            events.push(GameEvent::LaserFired);
        }
    }
    if input.fire_spread {
        if let Some(pair) = state.paddle.fire_spread() {
            state.lasers.extend(pair);
            events.push(GameEvent::LaserFired);
        }
    }

    // --- Paddle ---
    state.paddle.update(input.direction(), state.bounds);

    // --- Balls ---
    let mut lost = Vec::new();
    for (i, ball) in state.balls.iter_mut().enumerate() {
        match ball.update(&state.paddle, state.bounds) {
            BallOutcome::Continuing => {}
            BallOutcome::Lost => lost.push(i),
            BallOutcome::Bounced(_) => {
                events.push(GameEvent::Bounce);
                Particle::burst(
                    &mut state.particles,
                    ball.rect.center(),
                    BOUNCE_COLOR,
                    BOUNCE_BURST,
                    BOUNCE_STYLE,
                    &mut state.rng,
                );
            }
        }
    }
    remove_indices(&mut state.balls, &lost);

    if !lost.is_empty() && state.balls.is_empty() {
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            log::info!("Game over at level {} with score {}", state.level, state.score);
            events.push(GameEvent::GameOver);
            return;
        }
        log::debug!("Ball lost, {} lives left", state.lives);
        state.reset_ball_and_paddle();
        events.push(GameEvent::LifeLost);
    }

    // --- Lasers and power-ups ---
    for laser in &mut state.lasers {
        laser.update();
    }
    state.lasers.retain(|l| !l.is_off_screen());
    for power_up in &mut state.power_ups {
        power_up.update();
    }

    // --- Collisions ---
    resolve_ball_bricks(state, events);
    resolve_power_ups(state, events);
    resolve_laser_bricks(state, events);

    // --- Level progression ---
    check_level_progress(state, events);
}

/// Win screen fireworks, one every `firework_timer` ticks
fn spawn_fireworks(state: &mut GameState) {
    state.firework_timer = state.firework_timer.saturating_sub(1);
    if state.firework_timer == 0 {
        let firework = Firework::new(state.bounds, &mut state.rng);
        state.fireworks.push(firework);
        state.firework_timer = state
            .rng
            .random_range(FIREWORK_MIN_INTERVAL..=FIREWORK_MAX_INTERVAL);
    }
}

/// Particles, fireworks and the banner timer
fn update_cosmetics(state: &mut GameState) {
    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(|p| !p.is_dead());

    for firework in &mut state.fireworks {
        firework.update();
    }
    state.fireworks.retain(|f| !f.is_dead());

    state.message_timer = state.message_timer.saturating_sub(1);
}

/// Demo player: launch, follow the lowest falling ball (or a power-up when
/// no ball is coming down), restart when the game ends
fn steer_autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::TitleScreen => input.launch = true,
        GamePhase::GameOver | GamePhase::YouWin => input.restart = true,
        GamePhase::Playing => {
            if state.balls.iter().any(|b| b.is_glued) {
                input.launch = true;
            }

            let lowest = |a: &f32, b: &f32| a.partial_cmp(b).unwrap_or(Ordering::Equal);
            let target_x = state
                .balls
                .iter()
                .filter(|b| !b.is_glued && b.speed_y > 0.0)
                .map(|b| (b.rect.bottom(), b.rect.center().x))
                .max_by(|a, b| lowest(&a.0, &b.0))
                .or_else(|| {
                    state
                        .power_ups
                        .iter()
                        .map(|p| (p.rect.bottom(), p.rect.center().x))
                        .max_by(|a, b| lowest(&a.0, &b.0))
                })
                .map(|(_, x)| x);

            input.move_left = false;
            input.move_right = false;
            if let Some(x) = target_x {
                let cx = state.paddle.rect.center().x;
                let dead_zone = state.paddle.speed;
                input.move_left = x < cx - dead_zone;
                input.move_right = x > cx + dead_zone;
            }

            input.fire_spread = state.paddle.has_laser && state.time_ticks.is_multiple_of(30);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Ball, PaddleEffect};
    use glam::Vec2;
    use proptest::prelude::*;

    fn bounds() -> Vec2 {
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed, bounds());
        tick(&mut state, &launch());
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    fn launch() -> TickInput {
        TickInput {
            launch: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_title_to_playing() {
        let mut state = GameState::new(12345, bounds());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::TitleScreen);

        tick(&mut state, &launch());
        assert_eq!(state.phase, GamePhase::Playing);
        // The start press does not launch the ball
        assert!(state.balls[0].is_glued);

        tick(&mut state, &launch());
        assert!(!state.balls[0].is_glued);
    }

    #[test]
    fn test_mute_toggle_any_phase() {
        let mut state = GameState::new(1, bounds());
        let mute = TickInput {
            toggle_mute: true,
            ..Default::default()
        };
        tick(&mut state, &mute);
        assert!(!state.sound_enabled);
        state.phase = GamePhase::GameOver;
        tick(&mut state, &mute);
        assert!(state.sound_enabled);
    }

    #[test]
    fn test_clearing_level_one() {
        let mut state = playing(3);
        assert_eq!(state.bricks.len(), 30);

        // Break the last brick standing with a ball moving into it
        state.bricks.truncate(1);
        let center = state.bricks[0].rect.center();
        state.balls = vec![Ball::free(center, 0.0, -5.0)];
        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.level, 2);
        assert_eq!(state.bricks.len(), 40);
        assert_eq!(state.balls.len(), 1);
        assert!(state.balls[0].is_glued);
        assert!(state.power_ups.is_empty());
        assert!(state.lasers.is_empty());
        assert_eq!(state.score, BRICK_SCORE);
        assert!(events.contains(&GameEvent::LevelStarted(2)));
        assert_eq!(state.message, "Level 2");
    }

    #[test]
    fn test_laser_fire_charges() {
        let mut state = playing(3);
        state.paddle.activate(PaddleEffect::Laser, bounds());

        let events = tick(&mut state, &launch());
        assert_eq!(state.paddle.laser_charges, LASER_CHARGES - 1);
        assert_eq!(state.lasers.len(), 1);
        assert!(events.contains(&GameEvent::LaserFired));

        tick(&mut state, &launch());
        assert_eq!(state.paddle.laser_charges, LASER_CHARGES - 2);
        assert_eq!(state.lasers.len(), 2);

        let spread = TickInput {
            fire_spread: true,
            ..Default::default()
        };
        tick(&mut state, &spread);
        assert_eq!(state.paddle.laser_charges, LASER_CHARGES - 2);
        assert_eq!(state.lasers.len(), 4);
        let cx = state.paddle.rect.center().x;
        assert_eq!(state.lasers[2].rect.center().x, cx - LASER_SPREAD_OFFSET);
        assert_eq!(state.lasers[3].rect.center().x, cx + LASER_SPREAD_OFFSET);
    }

    #[test]
    fn test_last_life_lost_is_game_over() {
        let mut state = playing(3);
        state.lives = 1;
        state.balls = vec![Ball::free(Vec2::new(100.0, SCREEN_HEIGHT + 10.0), 0.0, 5.0)];

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(events, vec![GameEvent::GameOver]);

        // Terminal until restart
        let score = state.score;
        for _ in 0..10 {
            tick(&mut state, &launch());
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, score);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_life_lost_respawns_ball() {
        let mut state = playing(3);
        state.paddle.activate(PaddleEffect::Grow, bounds());
        state.balls = vec![Ball::free(Vec2::new(100.0, SCREEN_HEIGHT + 10.0), 0.0, 5.0)];

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, INITIAL_LIVES - 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.balls.len(), 1);
        assert!(state.balls[0].is_glued);
        assert_eq!(state.paddle.rect.size.x, PADDLE_WIDTH);
        assert!(events.contains(&GameEvent::LifeLost));
    }

    #[test]
    fn test_one_of_many_balls_lost_keeps_lives() {
        let mut state = playing(3);
        state.balls = vec![
            Ball::free(Vec2::new(100.0, SCREEN_HEIGHT + 10.0), 0.0, 5.0),
            Ball::free(Vec2::new(400.0, 300.0), 3.0, 3.0),
        ];
        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.balls.len(), 1);
    }

    #[test]
    fn test_restart_matches_fresh_start() {
        let mut state = playing(77);
        state.score = 120;
        state.level = 2;
        state.lives = 0;
        state.sound_enabled = false;
        state.phase = GamePhase::GameOver;

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.balls.len(), 1);
        assert!(!state.sound_enabled);

        let fresh = GameState::new(77, bounds());
        let layout = |s: &GameState| -> Vec<_> {
            s.bricks.iter().map(|b| (b.id, b.rect, b.color)).collect()
        };
        assert_eq!(layout(&state), layout(&fresh));
    }

    #[test]
    fn test_win_screen_fireworks() {
        let mut state = playing(9);
        state.level = MAX_LEVEL;
        state.bricks.truncate(1);
        let center = state.bricks[0].rect.center();
        state.balls = vec![Ball::free(center, 0.0, -5.0)];

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::YouWin);
        assert!(events.contains(&GameEvent::Won));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.fireworks.len(), 1);
        assert!((FIREWORK_MIN_INTERVAL..=FIREWORK_MAX_INTERVAL).contains(&state.firework_timer));

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.fireworks.is_empty());
    }

    #[test]
    fn test_firework_interval_matches_timer() {
        let mut state = playing(9);
        state.phase = GamePhase::YouWin;
        state.firework_timer = FIREWORK_MIN_INTERVAL;

        for _ in 1..FIREWORK_MIN_INTERVAL {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.fireworks.is_empty());
        assert_eq!(state.firework_timer, 1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.fireworks.len(), 1);
        assert!((FIREWORK_MIN_INTERVAL..=FIREWORK_MAX_INTERVAL).contains(&state.firework_timer));
    }

    #[test]
    fn test_message_timer_counts_down() {
        let mut state = GameState::new(1, bounds());
        state.show_message("hello");
        tick(&mut state, &TickInput::default());
        assert_eq!(state.message_timer, MESSAGE_TICKS - 1);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999, bounds());
        let mut b = GameState::new(99999, bounds());
        let demo = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..600 {
            let ea = tick(&mut a, &demo);
            let eb = tick(&mut b, &demo);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.bricks.len(), b.bricks.len());
        assert_eq!(a.balls.len(), b.balls.len());
        assert_eq!(a.paddle.rect, b.paddle.rect);
        assert_eq!(a.particles.len(), b.particles.len());
    }

    #[test]
    fn test_snapshot_resumes_identically() {
        let mut state = playing(4242);
        tick(&mut state, &launch());
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }

        let json = serde_json::to_string(&state).unwrap();
        let mut restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(serde_json::to_string(&restored).unwrap(), json);

        let demo = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..600 {
            assert_eq!(tick(&mut state, &demo), tick(&mut restored, &demo));
        }
        assert_eq!(
            serde_json::to_string(&state).unwrap(),
            serde_json::to_string(&restored).unwrap()
        );
    }

    #[test]
    fn test_autopilot_leaves_title_and_plays() {
        let mut state = GameState::new(5, bounds());
        let demo = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &demo);
        }
        assert_ne!(state.phase, GamePhase::TitleScreen);
        assert!(state.score > 0);
    }

    fn input_strategy() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(move_left, move_right, launch, fire_spread)| TickInput {
                move_left,
                move_right,
                launch,
                fire_spread,
                ..Default::default()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_tick_invariants(
            seed in any::<u64>(),
            laser in any::<bool>(),
            inputs in prop::collection::vec(input_strategy(), 1..300),
        ) {
            let mut state = playing(seed);
            if laser {
                state.paddle.activate(PaddleEffect::Laser, bounds());
            }

            for input in &inputs {
                let level = state.level;
                let score = state.score;
                let lives = state.lives;
                let ids: Vec<u32> = state.bricks.iter().map(|b| b.id).collect();

                let events = tick(&mut state, input);

                let broken = events.iter().filter(|e| **e == GameEvent::BrickBroken).count();
                prop_assert!(state.score >= score);
                prop_assert_eq!(state.score - score, broken as u64 * BRICK_SCORE);
                prop_assert!(state.lives <= lives);

                if state.level == level {
                    // Bricks only disappear, and never come back
                    prop_assert_eq!(state.bricks.len() + broken, ids.len());
                    prop_assert!(state.bricks.iter().all(|b| ids.contains(&b.id)));
                } else {
                    prop_assert_eq!(state.level, level + 1);
                }

                if state.phase == GamePhase::Playing {
                    prop_assert!(!state.balls.is_empty());
                }
                if state.lives == 0 {
                    prop_assert_eq!(state.phase, GamePhase::GameOver);
                }
            }
        }
    }
}
