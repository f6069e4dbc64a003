//! Arkanoid entry point
//!
//! Runs the simulation headless in demo mode: the autopilot plays, audio is
//! logged, and a counting renderer stands in for a window. A scripted
//! keyboard presses Escape once the demo time is up. Windowing, fonts and
//! sound devices belong to the hosting platform layer.

use glam::Vec2;

use arkanoid::audio::{AudioManager, LogBackend};
use arkanoid::consts::TICKS_PER_SECOND;
use arkanoid::renderer::{Align, EntityView, Renderer, TextStyle};
use arkanoid::platform::{Key, KeyboardState, quit_requested};
use arkanoid::sim::{GameEvent, GamePhase};
use arkanoid::{Color, Game, Settings};

/// Environment variable naming a JSON settings file
const SETTINGS_ENV: &str = "ARKANOID_SETTINGS";
/// Demo length (two minutes of play)
const DEMO_TICKS: u32 = 120 * TICKS_PER_SECOND;

/// Renderer that only counts what it is asked to draw
#[derive(Default)]
struct CountingRenderer {
    entities: u64,
    texts: u64,
}

impl Renderer for CountingRenderer {
    fn draw_entity(&mut self, _entity: EntityView<'_>) {
        self.entities += 1;
    }

    fn draw_text(
        &mut self,
        _text: &str,
        _pos: Vec2,
        _style: TextStyle,
        _align: Align,
        _color: Color,
    ) {
        self.texts += 1;
    }
}

fn load_settings() -> Settings {
    match std::env::var(SETTINGS_ENV) {
        Ok(path) => match Settings::load_from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Could not load {}: {} - using defaults", path, e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

fn main() {
    env_logger::init();
    log::info!("Arkanoid (headless demo) starting...");

    let settings = load_settings();
    let audio = AudioManager::new(Some(Box::new(LogBackend)));
    let mut game = match Game::new(&settings, audio) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            std::process::exit(1);
        }
    };
    game.set_autopilot(true);

    let mut renderer = CountingRenderer::default();
    let mut keyboard = KeyboardState::new();
    let mut games_played = 0u32;
    let mut best_score = 0u64;
    let mut t = 0u32;

    loop {
        if t == DEMO_TICKS {
            keyboard.key_down(Key::Escape);
        }
        if quit_requested(&keyboard) {
            log::info!("Quit requested after {} ticks", t);
            break;
        }

        let events = game.frame(&keyboard, &mut renderer);
        keyboard.end_tick();
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver | GameEvent::Won))
        {
            games_played += 1;
            best_score = best_score.max(game.state.score);
        }

        if t.is_multiple_of(10 * TICKS_PER_SECOND) && game.state.phase == GamePhase::Playing {
            log::info!(
                "t={}s level={} score={} lives={} balls={} bricks={}",
                t / TICKS_PER_SECOND,
                game.state.level,
                game.state.score,
                game.state.lives,
                game.state.balls.len(),
                game.state.bricks.len()
            );
        }
        t += 1;
    }

    best_score = best_score.max(game.state.score);
    println!(
        "Demo finished: {} ticks, {} games completed, best score {}, {} entity / {} text draws",
        DEMO_TICKS, games_played, best_score, renderer.entities, renderer.texts
    );
}
