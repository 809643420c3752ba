//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! The mapping from gameplay events to effects is platform independent; the
//! `AudioManager` that plays them exists only in the browser build.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ship fired
    Shot,
    /// Hostile shot down
    Explosion,
    /// Hostile rammed the ship
    ShipHit,
    /// New level reached
    LevelUp,
    /// Game over
    GameOver,
    /// Game over with a new record
    HighScore,
}

impl SoundEffect {
    /// Effect for a gameplay event (None for silent events)
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started => None,
            GameEvent::Fired { .. } => Some(Self::Shot),
            GameEvent::HostileDestroyed { .. } => Some(Self::Explosion),
            GameEvent::ShipHit { lives_left, .. } if *lives_left > 0 => Some(Self::ShipHit),
            // The game over sting covers the final hit
            GameEvent::ShipHit { .. } => None,
            GameEvent::LevelUp { .. } => Some(Self::LevelUp),
            GameEvent::GameOver {
                new_high_score: true,
                ..
            } => Some(Self::HighScore),
            GameEvent::GameOver { .. } => Some(Self::GameOver),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: 0.6,
                muted: false,
            }
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.muted {
                return;
            }
            let vol = self.volume;
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Shot => self.sweep(ctx, vol * 0.3, 880.0, 440.0, 0.08, OscillatorType::Square),
                SoundEffect::Explosion => {
                    self.sweep(ctx, vol * 0.5, 220.0, 40.0, 0.25, OscillatorType::Sawtooth)
                }
                SoundEffect::ShipHit => self.sweep(ctx, vol * 0.7, 160.0, 50.0, 0.4, OscillatorType::Square),
                SoundEffect::LevelUp => self.arpeggio(ctx, vol * 0.4, &[523.25, 659.25, 783.99]),
                SoundEffect::GameOver => self.arpeggio(ctx, vol * 0.5, &[392.0, 311.13, 261.63, 196.0]),
                SoundEffect::HighScore => {
                    self.arpeggio(ctx, vol * 0.5, &[523.25, 659.25, 783.99, 1046.5])
                }
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Single tone gliding from `from` to `to` Hz
        fn sweep(
            &self,
            ctx: &AudioContext,
            vol: f32,
            from: f32,
            to: f32,
            duration: f64,
            osc_type: OscillatorType,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + duration + 0.05).ok();
        }

        /// Short notes in sequence
        fn arpeggio(&self, ctx: &AudioContext, vol: f32, notes: &[f32]) {
            let t = ctx.current_time();
            for (i, &freq) in notes.iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
                    continue;
                };
                let start = t + i as f64 * 0.1;
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.15)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.2).ok();
            }
        }
    }
}
