//! Per-frame draw requests built from `GameState`

use glam::Vec2;

use crate::Color;
use crate::consts::LASER_COLOR;
use crate::sim::{Ball, Brick, GamePhase, GameState, Laser, Paddle, Particle, PowerUp};

const WHITE: Color = [255, 255, 255];
const GREY: Color = [200, 200, 200];

/// A live entity to draw
#[derive(Debug, Clone, Copy)]
pub enum EntityView<'a> {
    Paddle(&'a Paddle),
    Ball(&'a Ball),
    Brick(&'a Brick),
    PowerUp(&'a PowerUp),
    Laser(&'a Laser),
    /// Loose particles and firework sparks
    Particle(&'a Particle),
}

/// Font size class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Game,
    Message,
}

/// Horizontal anchoring of a text position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// External renderer. Calls are expected to return immediately.
pub trait Renderer {
    fn draw_entity(&mut self, entity: EntityView<'_>);
    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle, align: Align, color: Color);
}

/// Submit everything visible this frame
pub fn submit_frame(state: &GameState, renderer: &mut dyn Renderer) {
    let w = state.bounds.x;
    let h = state.bounds.y;

    match state.phase {
        GamePhase::TitleScreen => {
            let lines = [
                ("Welcome to ARKANOID!", -50.0, TextStyle::Title, WHITE),
                ("Press SPACE to Start", 20.0, TextStyle::Game, WHITE),
                ("Press M to mute/unmute sounds", 60.0, TextStyle::Message, GREY),
            ];
            for (text, dy, style, color) in lines {
                let pos = Vec2::new(w / 2.0, h / 2.0 + dy);
                renderer.draw_text(text, pos, style, Align::Center, color);
            }
        }
        GamePhase::Playing => {
            submit_playfield(state, renderer);
            submit_hud(state, renderer);
        }
        GamePhase::GameOver | GamePhase::YouWin => {
            for spark in state.fireworks.iter().flat_map(|f| &f.sparks) {
                renderer.draw_entity(EntityView::Particle(spark));
            }
            let headline = if state.phase == GamePhase::GameOver {
                "GAME OVER"
            } else {
                "YOU WIN!"
            };
            let pos = Vec2::new(w / 2.0, h / 2.0 - 20.0);
            renderer.draw_text(headline, pos, TextStyle::Game, Align::Center, WHITE);
            renderer.draw_text(
                &format!("Final score: {}", state.score),
                Vec2::new(w / 2.0, h / 2.0 + 20.0),
                TextStyle::Message,
                Align::Center,
                GREY,
            );
            renderer.draw_text(
                "Press SPACE to play again",
                Vec2::new(w / 2.0, h / 2.0 + 60.0),
                TextStyle::Game,
                Align::Center,
                WHITE,
            );
        }
    }

    if state.message_timer > 0 {
        let pos = Vec2::new(w / 2.0, h - 60.0);
        renderer.draw_text(&state.message, pos, TextStyle::Message, Align::Center, WHITE);
    }
    for particle in &state.particles {
        renderer.draw_entity(EntityView::Particle(particle));
    }
}

fn submit_playfield(state: &GameState, renderer: &mut dyn Renderer) {
    renderer.draw_entity(EntityView::Paddle(&state.paddle));
    for ball in &state.balls {
        renderer.draw_entity(EntityView::Ball(ball));
    }
    for brick in &state.bricks {
        renderer.draw_entity(EntityView::Brick(brick));
    }
    for power_up in &state.power_ups {
        renderer.draw_entity(EntityView::PowerUp(power_up));
    }
    for laser in &state.lasers {
        renderer.draw_entity(EntityView::Laser(laser));
    }
}

fn submit_hud(state: &GameState, renderer: &mut dyn Renderer) {
    let w = state.bounds.x;
    let hud = [
        (format!("Score: {}", state.score), 10.0, Align::Left),
        (format!("Level: {}", state.level), w / 2.0, Align::Center),
        (format!("Lives: {}", state.lives), w - 10.0, Align::Right),
    ];
    for (text, x, align) in hud {
        renderer.draw_text(&text, Vec2::new(x, 10.0), TextStyle::Game, align, WHITE);
    }
    if state.paddle.has_laser {
        renderer.draw_text(
            &format!("Laser: {}", state.paddle.laser_charges),
            Vec2::new(w - 220.0, 10.0),
            TextStyle::Game,
            Align::Left,
            LASER_COLOR,
        );
    }
}
