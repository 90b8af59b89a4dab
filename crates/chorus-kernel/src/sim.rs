//! In-process host that simulates playback without an audio device.
//!
//! Every emitter shares a voice table with its [`SimulatedHost`]. Advancing
//! the host moves each playing voice's cursor forward; non-looping voices stop
//! once the cursor passes the end of their clip. Drivers use it to run the
//! pool headless and tests use it to decide exactly when a sound finishes.

use std::sync::Arc;

use glam::Vec3;
use parking_lot::Mutex;

use crate::host::{AudioHost, Emitter};
use crate::ids::SourceId;

/// A clip known only by name and length.
#[derive(Debug, Clone, PartialEq)]
pub struct SimClip {
    name: Arc<str>,
    duration: f32,
}

impl SimClip {
    /// Create a clip lasting `duration` seconds at pitch 1.0.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration: duration.max(0.0),
        }
    }

    /// Clip name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length in seconds.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }
}

/// Snapshot of one simulated voice.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceState {
    /// Enabled in the scene.
    pub enabled: bool,
    /// Bound clip.
    pub clip: Option<SimClip>,
    /// Volume multiplier.
    pub volume: f32,
    /// Playback rate multiplier.
    pub pitch: f32,
    /// Loop flag.
    pub looping: bool,
    /// Spatial blend.
    pub spatial_blend: f32,
    /// World position.
    pub position: Vec3,
    /// Currently playing.
    pub playing: bool,
    /// Playback cursor in clip seconds.
    pub cursor: f32,
    /// Number of times playback was started.
    pub play_count: u32,
}

impl Default for VoiceState {
    fn default() -> Self {
        Self {
            enabled: false,
            clip: None,
            volume: 1.0,
            pitch: 1.0,
            looping: false,
            spatial_blend: 0.0,
            position: Vec3::ZERO,
            playing: false,
            cursor: 0.0,
            play_count: 0,
        }
    }
}

impl VoiceState {
    /// Move the cursor forward. Returns true if a one-shot finished.
    fn advance(&mut self, dt: f32) -> bool {
        if !self.playing || !self.enabled {
            return false;
        }
        let duration = match &self.clip {
            Some(clip) => clip.duration(),
            None => {
                self.playing = false;
                return false;
            },
        };

        self.cursor += dt * self.pitch.abs();
        if self.cursor < duration {
            return false;
        }

        if self.looping && duration > 0.0 {
            self.cursor %= duration;
            false
        } else {
            self.cursor = duration;
            self.playing = false;
            true
        }
    }
}

type VoiceTable = Arc<Mutex<Vec<VoiceState>>>;

/// Headless [`AudioHost`] backed by a shared voice table.
#[derive(Debug, Clone, Default)]
pub struct SimulatedHost {
    voices: VoiceTable,
}

impl SimulatedHost {
    /// Create an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of emitters spawned so far.
    #[must_use]
    pub fn voice_count(&self) -> usize {
        self.voices.lock().len()
    }

    /// Snapshot of the voice behind a source.
    #[must_use]
    pub fn voice(&self, id: SourceId) -> Option<VoiceState> {
        self.voices.lock().get(id.index()).cloned()
    }

    /// Number of voices currently playing.
    #[must_use]
    pub fn playing_count(&self) -> usize {
        self.voices.lock().iter().filter(|v| v.playing).count()
    }

    /// Advance every playing voice by `dt` seconds.
    ///
    /// Returns the number of one-shot voices that reached the end of their
    /// clip during this step.
    pub fn advance(&self, dt: f32) -> usize {
        let dt = dt.max(0.0);
        self.voices
            .lock()
            .iter_mut()
            .map(|voice| voice.advance(dt))
            .filter(|finished| *finished)
            .count()
    }

    /// Stop a voice immediately, as if its clip ended.
    ///
    /// Returns false if the voice was not playing.
    pub fn finish(&self, id: SourceId) -> bool {
        let mut voices = self.voices.lock();
        match voices.get_mut(id.index()) {
            Some(voice) if voice.playing => {
                voice.playing = false;
                true
            },
            _ => false,
        }
    }
}

impl AudioHost for SimulatedHost {
    type Clip = SimClip;
    type Emitter = SimEmitter;

    fn spawn_emitter(&mut self, id: SourceId) -> SimEmitter {
        let slot = id.index();
        {
            let mut voices = self.voices.lock();
            if voices.len() <= slot {
                voices.resize_with(slot + 1, VoiceState::default);
            } else {
                voices[slot] = VoiceState::default();
            }
        }
        SimEmitter {
            slot,
            voices: Arc::clone(&self.voices),
        }
    }
}

/// Emitter handle into a [`SimulatedHost`] voice table.
#[derive(Debug)]
pub struct SimEmitter {
    slot: usize,
    voices: VoiceTable,
}

impl SimEmitter {
    fn with_voice<R>(&self, f: impl FnOnce(&mut VoiceState) -> R) -> R {
        let mut voices = self.voices.lock();
        f(&mut voices[self.slot])
    }
}

impl Emitter for SimEmitter {
    type Clip = SimClip;

    fn set_enabled(&mut self, enabled: bool) {
        self.with_voice(|v| {
            v.enabled = enabled;
            // Disabling a scene node silences its emitter
            if !enabled {
                v.playing = false;
            }
        });
    }

    fn set_clip(&mut self, clip: Option<SimClip>) {
        self.with_voice(|v| {
            v.clip = clip;
            v.cursor = 0.0;
        });
    }

    fn set_volume(&mut self, volume: f32) {
        self.with_voice(|v| v.volume = volume);
    }

    fn set_pitch(&mut self, pitch: f32) {
        self.with_voice(|v| v.pitch = pitch);
    }

    fn set_looping(&mut self, looping: bool) {
        self.with_voice(|v| v.looping = looping);
    }

    fn set_spatial_blend(&mut self, blend: f32) {
        self.with_voice(|v| v.spatial_blend = blend);
    }

    fn set_position(&mut self, position: Vec3) {
        self.with_voice(|v| v.position = position);
    }

    fn play(&mut self) {
        self.with_voice(|v| {
            v.cursor = 0.0;
            v.playing = v.enabled && v.clip.is_some();
            v.play_count += 1;
        });
    }

    fn stop(&mut self) {
        self.with_voice(|v| v.playing = false);
    }

    fn is_playing(&self) -> bool {
        self.with_voice(|v| v.playing)
    }
}
