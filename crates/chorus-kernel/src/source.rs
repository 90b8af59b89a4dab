//! Pooled sound sources and their playback settings.
//!
//! A [`PooledSource`] pairs a host [`Emitter`] with the settings the pool last
//! applied to it, so the pool can answer queries without asking the host.
//!
//! ```text
//!            acquire                 sweep / release
//!   Ready ───────────► Detached ─┐ ┌──────────────────► Ready
//!                                │ │
//!                  one-shot play ▼ │ looping play
//!                             Active   Lent
//! ```

use glam::Vec3;

use crate::host::Emitter;
use crate::ids::SourceId;

/// Spatial blend applied by ambient (non-positional) playback.
pub const SPATIAL_BLEND_AMBIENT: f32 = 0.0;

/// Spatial blend applied by positional playback.
pub const SPATIAL_BLEND_POSITIONAL: f32 = 1.0;

/// Which pool collection currently holds a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotState {
    /// Idle in the ready queue.
    #[default]
    Ready,
    /// Playing a one-shot; reclaimed by the sweep.
    Active,
    /// Playing a loop; the caller owns reclamation.
    Lent,
    /// Handed out by a bare acquire and not enrolled anywhere.
    Detached,
}

impl SlotState {
    /// Check if the source is lent out in any form.
    #[must_use]
    pub const fn is_in_use(&self) -> bool {
        !matches!(self, Self::Ready)
    }
}

/// Per-request playback parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayParams {
    /// Volume multiplier (nominally 0.0-1.0, not clamped).
    pub volume: f32,
    /// Playback rate multiplier (1.0 = normal).
    pub pitch: f32,
    /// Whether to loop the clip.
    pub looping: bool,
}

impl Default for PlayParams {
    fn default() -> Self {
        Self {
            volume: 1.0,
            pitch: 1.0,
            looping: false,
        }
    }
}

impl PlayParams {
    /// Create new params with volume.
    #[must_use]
    pub const fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    /// Create new params with pitch.
    #[must_use]
    pub const fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    /// Create new params with looping.
    #[must_use]
    pub const fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Looping playback at full volume and normal pitch.
    #[must_use]
    pub fn looped() -> Self {
        Self::default().with_looping(true)
    }
}

/// Settings last applied to a source's emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSettings<C> {
    /// Bound clip; `None` while idle.
    pub clip: Option<C>,
    /// Volume multiplier.
    pub volume: f32,
    /// Playback rate multiplier.
    pub pitch: f32,
    /// Whether playback loops.
    pub looping: bool,
    /// 0.0 = non-positional, 1.0 = fully positional.
    pub spatial_blend: f32,
    /// World position; only meaningful when `spatial_blend` is 1.0.
    pub position: Vec3,
}

impl<C> Default for SourceSettings<C> {
    fn default() -> Self {
        Self {
            clip: None,
            volume: 1.0,
            pitch: 1.0,
            looping: false,
            spatial_blend: SPATIAL_BLEND_AMBIENT,
            position: Vec3::ZERO,
        }
    }
}

/// A reusable sound source owned by the pool.
#[derive(Debug)]
pub struct PooledSource<E: Emitter> {
    id: SourceId,
    emitter: E,
    settings: SourceSettings<E::Clip>,
    enabled: bool,
    pub(crate) state: SlotState,
}

impl<E: Emitter> PooledSource<E>
where
    E::Clip: Clone,
{
    /// Wrap a freshly spawned emitter as an idle, disabled source.
    pub(crate) fn new(id: SourceId, mut emitter: E) -> Self {
        emitter.set_enabled(false);
        emitter.set_clip(None);
        Self {
            id,
            emitter,
            settings: SourceSettings::default(),
            enabled: false,
            state: SlotState::Ready,
        }
    }

    /// Bind a clip and apply playback settings without starting playback.
    pub(crate) fn configure(
        &mut self,
        clip: E::Clip,
        params: PlayParams,
        spatial_blend: f32,
        position: Option<Vec3>,
    ) {
        self.emitter.set_spatial_blend(spatial_blend);
        self.emitter.set_looping(params.looping);
        self.emitter.set_clip(Some(clip.clone()));
        self.emitter.set_volume(params.volume);
        self.emitter.set_pitch(params.pitch);

        self.settings.spatial_blend = spatial_blend;
        self.settings.looping = params.looping;
        self.settings.clip = Some(clip);
        self.settings.volume = params.volume;
        self.settings.pitch = params.pitch;

        if let Some(position) = position {
            self.set_position(position);
        }
    }

    /// Enable the emitter and start playback.
    pub(crate) fn start(&mut self) {
        self.emitter.set_enabled(true);
        self.enabled = true;
        self.emitter.play();
    }

    /// Stop, disable and unbind the emitter so it can idle in the ready queue.
    pub(crate) fn park(&mut self) {
        self.emitter.stop();
        self.emitter.set_enabled(false);
        self.emitter.set_clip(None);
        self.enabled = false;
        self.settings.clip = None;
    }

    /// Source identifier.
    #[must_use]
    pub const fn id(&self) -> SourceId {
        self.id
    }

    /// Collection currently holding this source.
    #[must_use]
    pub const fn state(&self) -> SlotState {
        self.state
    }

    /// Settings last applied to the emitter.
    #[must_use]
    pub const fn settings(&self) -> &SourceSettings<E::Clip> {
        &self.settings
    }

    /// Bound clip, if any.
    #[must_use]
    pub fn clip(&self) -> Option<&E::Clip> {
        self.settings.clip.as_ref()
    }

    /// Whether the emitter is enabled in the scene.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the host reports the clip as still playing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.emitter.is_playing()
    }

    /// Host emitter.
    #[must_use]
    pub const fn emitter(&self) -> &E {
        &self.emitter
    }

    /// Change the volume of a playing source.
    pub fn set_volume(&mut self, volume: f32) {
        self.emitter.set_volume(volume);
        self.settings.volume = volume;
    }

    /// Change the pitch of a playing source.
    pub fn set_pitch(&mut self, pitch: f32) {
        self.emitter.set_pitch(pitch);
        self.settings.pitch = pitch;
    }

    /// Move the source to a world position.
    pub fn set_position(&mut self, position: Vec3) {
        self.emitter.set_position(position);
        self.settings.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct RecordingEmitter {
        enabled: bool,
        clip: Option<&'static str>,
        volume: f32,
        pitch: f32,
        looping: bool,
        blend: f32,
        position: Vec3,
        playing: bool,
    }

    impl Emitter for RecordingEmitter {
        type Clip = &'static str;

        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }
        fn set_clip(&mut self, clip: Option<Self::Clip>) {
            self.clip = clip;
        }
        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
        }
        fn set_pitch(&mut self, pitch: f32) {
            self.pitch = pitch;
        }
        fn set_looping(&mut self, looping: bool) {
            self.looping = looping;
        }
        fn set_spatial_blend(&mut self, blend: f32) {
            self.blend = blend;
        }
        fn set_position(&mut self, position: Vec3) {
            self.position = position;
        }
        fn play(&mut self) {
            self.playing = self.clip.is_some();
        }
        fn stop(&mut self) {
            self.playing = false;
        }
        fn is_playing(&self) -> bool {
            self.playing
        }
    }

    #[test]
    fn test_play_params_default() {
        let params = PlayParams::default();
        assert!((params.volume - 1.0).abs() < f32::EPSILON);
        assert!((params.pitch - 1.0).abs() < f32::EPSILON);
        assert!(!params.looping);
    }

    #[test]
    fn test_play_params_builder() {
        let params = PlayParams::default()
            .with_volume(0.25)
            .with_pitch(1.5)
            .with_looping(true);

        assert!((params.volume - 0.25).abs() < f32::EPSILON);
        assert!((params.pitch - 1.5).abs() < f32::EPSILON);
        assert!(params.looping);
        assert!(PlayParams::looped().looping);
    }

    #[test]
    fn test_new_source_is_idle() {
        let emitter = RecordingEmitter {
            enabled: true,
            clip: Some("stale"),
            ..Default::default()
        };
        let source = PooledSource::new(SourceId::from_raw(0), emitter);

        assert_eq!(source.state(), SlotState::Ready);
        assert!(!source.is_enabled());
        assert!(source.clip().is_none());
        assert!(!source.emitter().enabled);
        assert!(source.emitter().clip.is_none());
    }

    #[test]
    fn test_configure_and_start() {
        let mut source = PooledSource::new(SourceId::from_raw(3), RecordingEmitter::default());
        let position = Vec3::new(1.0, 2.0, 3.0);
        source.configure(
            "boom",
            PlayParams::default().with_volume(0.5).with_pitch(0.8),
            SPATIAL_BLEND_POSITIONAL,
            Some(position),
        );
        source.start();

        let emitter = source.emitter();
        assert!(emitter.enabled);
        assert!(emitter.playing);
        assert_eq!(emitter.clip, Some("boom"));
        assert!((emitter.blend - 1.0).abs() < f32::EPSILON);
        assert_eq!(emitter.position, position);
        assert_eq!(source.settings().position, position);
        assert!((source.settings().volume - 0.5).abs() < f32::EPSILON);
        assert!(source.is_playing());
    }

    #[test]
    fn test_park_stops_and_unbinds() {
        let mut source = PooledSource::new(SourceId::from_raw(1), RecordingEmitter::default());
        source.configure("loop", PlayParams::looped(), SPATIAL_BLEND_AMBIENT, None);
        source.start();
        source.park();

        assert!(!source.is_enabled());
        assert!(!source.is_playing());
        assert!(source.clip().is_none());
        assert!(source.emitter().clip.is_none());
    }

    #[test]
    fn test_slot_state_in_use() {
        assert!(!SlotState::Ready.is_in_use());
        assert!(SlotState::Active.is_in_use());
        assert!(SlotState::Lent.is_in_use());
        assert!(SlotState::Detached.is_in_use());
    }
}
