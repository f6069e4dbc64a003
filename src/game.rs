//! Simulation driver
//!
//! Owns the game state for the whole run. Each frame: sample input, advance
//! the simulation one tick, route the tick's events to audio and hand the
//! resulting state to the renderer.

use crate::audio::AudioManager;
use crate::error::ConfigError;
use crate::platform::{InputSource, sample_input};
use crate::renderer::{Renderer, submit_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    audio: AudioManager,
    /// Demo mode - the paddle plays itself
    autopilot: bool,
}

impl Game {
    /// Validate settings and build a fresh game on the title screen
    pub fn new(settings: &Settings, audio: AudioManager) -> Result<Self, ConfigError> {
        settings.validate()?;
        let mut state = GameState::new(settings.seed, settings.bounds());
        state.sound_enabled = settings.sound_enabled;
        log::info!(
            "New game {}x{} (seed {}, audio {})",
            settings.width,
            settings.height,
            settings.seed,
            if audio.is_available() { "on" } else { "unavailable" }
        );
        Ok(Self {
            state,
            audio,
            autopilot: false,
        })
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Run one frame from live keyboard input
    pub fn frame(
        &mut self,
        input: &dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> Vec<GameEvent> {
        let mut tick_input = sample_input(input);
        tick_input.autopilot = self.autopilot;
        self.step(&tick_input, renderer)
    }

    /// Run one frame from an already-built tick input
    pub fn step(&mut self, input: &TickInput, renderer: &mut dyn Renderer) -> Vec<GameEvent> {
        let events = tick(&mut self.state, input);
        self.audio.handle_events(&events, self.state.sound_enabled);
        submit_frame(&self.state, renderer);
        events
    }
}
