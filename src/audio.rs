//! Audio routing
//!
//! The simulation emits `GameEvent`s; this module maps them to named sound
//! effects and forwards them to whatever backend is available. A missing
//! backend is decided once at startup and turns playback into a no-op.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits a wall or the paddle
    Bounce,
    /// Brick destroyed
    BrickBreak,
    /// Out of lives
    GameOver,
    /// Laser fired
    Laser,
}

impl SoundEffect {
    /// Asset name of the effect
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Bounce => "bounce",
            SoundEffect::BrickBreak => "brick_break",
            SoundEffect::GameOver => "game_over",
            SoundEffect::Laser => "laser",
        }
    }

    /// Sound for a simulation event, if it has one
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::Bounce => Some(SoundEffect::Bounce),
            GameEvent::BrickBroken => Some(SoundEffect::BrickBreak),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::LaserFired => Some(SoundEffect::Laser),
            GameEvent::PowerUpCollected(_)
            | GameEvent::LifeLost
            | GameEvent::LevelStarted(_)
            | GameEvent::Won => None,
        }
    }
}

/// An audio device that can play named effects. Fire-and-forget: a backend
/// that fails to play a sound stays silent.
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect);
}

/// Backend that only logs what it would play
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("play {}", effect.name());
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend available - audio disabled");
        }
        Self { backend }
    }

    /// Manager with no backend
    pub fn silent() -> Self {
        Self { backend: None }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Play a sound effect when sound is enabled
    pub fn play(&mut self, effect: SoundEffect, sound_enabled: bool) {
        if !sound_enabled {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.play(effect);
    }

    /// Play the sounds for a tick's events
    pub fn handle_events(&mut self, events: &[GameEvent], sound_enabled: bool) {
        for effect in events.iter().copied().filter_map(SoundEffect::for_event) {
            self.play(effect, sound_enabled);
        }
    }
}
