//! Audio system using Web Audio API
//!
//! Every effect is a single square-wave beep, fire-and-forget. Without an
//! audio context (native builds, insecure pages) playback silently does nothing.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left a platform
    Jump,
    /// New platform reached
    Score,
    /// Run ended without a new best
    GameOver,
    /// Run ended with a new best
    HighScore,
}

/// Pitch and length of a beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f64,
}

/// Starting gain of a beep before volume scaling
#[cfg(target_arch = "wasm32")]
const PEAK_GAIN: f32 = 0.1;
/// Gain at the end of the exponential release
#[cfg(target_arch = "wasm32")]
const TAIL_GAIN: f32 = 0.01;

impl SoundEffect {
    pub fn tone(self) -> Tone {
        let (frequency, duration) = match self {
            SoundEffect::Jump => (220.0, 0.1),
            SoundEffect::Score => (440.0, 0.1),
            SoundEffect::GameOver => (150.0, 0.3),
            SoundEffect::HighScore => (660.0, 0.2),
        };
        Tone {
            frequency,
            duration,
        }
    }

    /// The sound that accompanies a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::RunStarted => None,
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::GameOver { new_best: true, .. } => Some(SoundEffect::HighScore),
            GameEvent::GameOver { new_best: false, .. } => Some(SoundEffect::GameOver),
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<web_sys::AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        #[cfg(target_arch = "wasm32")]
        let ctx = {
            // May fail outside a secure context
            let ctx = web_sys::AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            ctx
        };

        Self {
            #[cfg(target_arch = "wasm32")]
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Pick up volume/mute changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Resume audio context (required after user gesture)
    #[cfg(target_arch = "wasm32")]
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn resume(&self) {}

    /// Play whatever sound belongs to `event`
    pub fn play_event(&self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        self.emit(effect, effect.tone());
    }

    #[cfg(target_arch = "wasm32")]
    fn emit(&self, effect: SoundEffect, tone: Tone) {
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        if beep(ctx, tone, self.volume).is_none() {
            log::debug!("Sound playback failed ({:?})", effect);
        }
    }

    /// Native builds have no audio backend
    #[cfg(not(target_arch = "wasm32"))]
    fn emit(&self, effect: SoundEffect, tone: Tone) {
        log::trace!(
            "Beep {:?}: {} Hz for {}s",
            effect,
            tone.frequency,
            tone.duration
        );
    }
}

/// Square-wave beep with an exponential release
#[cfg(target_arch = "wasm32")]
fn beep(ctx: &web_sys::AudioContext, tone: Tone, vol: f32) -> Option<()> {
    use web_sys::OscillatorType;

    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(OscillatorType::Square);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    let t = ctx.current_time();
    osc.frequency().set_value_at_time(tone.frequency, t).ok()?;
    gain.gain().set_value_at_time(PEAK_GAIN * vol, t).ok()?;
    gain.gain()
        .exponential_ramp_to_value_at_time(TAIL_GAIN * vol, t + tone.duration)
        .ok()?;

    osc.start_with_when(t).ok()?;
    osc.stop_with_when(t + tone.duration).ok()?;
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_sounds() {
        assert_eq!(SoundEffect::for_event(&GameEvent::RunStarted), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Jumped),
            Some(SoundEffect::Jump)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Scored { score: 1 }),
            Some(SoundEffect::Score)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver {
                score: 3,
                new_best: true
            }),
            Some(SoundEffect::HighScore)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver {
                score: 3,
                new_best: false
            }),
            Some(SoundEffect::GameOver)
        );
    }

    #[test]
    fn test_tones_are_distinct() {
        let tones = [
            SoundEffect::Jump,
            SoundEffect::Score,
            SoundEffect::GameOver,
            SoundEffect::HighScore,
        ]
        .map(|e| e.tone().frequency);
        for (i, a) in tones.iter().enumerate() {
            for b in &tones[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(SoundEffect::GameOver.tone().duration, 0.3);
    }

    #[test]
    fn test_default_volume_is_full() {
        assert_eq!(AudioManager::default().volume(), 1.0);
    }

    #[test]
    fn test_muted_manager_is_silent() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let manager = AudioManager::new(&settings);
        assert_eq!(manager.volume(), 0.0);
        // Must not panic even with no backend
        manager.play(SoundEffect::Score);
    }
}
