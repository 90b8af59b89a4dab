//! Host engine capabilities consumed by the pool.
//!
//! The pool never talks to an audio device or scene graph directly. The
//! embedding engine implements these traits over whatever it uses for
//! playback; [`crate::sim`] provides an in-process implementation.

use glam::Vec3;

use crate::ids::SourceId;

/// Factory side of the host: creates emitters owned by the pool.
pub trait AudioHost {
    /// Audio asset type bound to emitters.
    type Clip: Clone + std::fmt::Debug;
    /// Emitter type created for each pooled source.
    type Emitter: Emitter<Clip = Self::Clip>;

    /// Create an emitter attached under the pool's scene node.
    ///
    /// Called once per pooled source. The emitter must start disabled, with no
    /// clip bound and without playing on creation.
    fn spawn_emitter(&mut self, id: SourceId) -> Self::Emitter;
}

/// One sound-emitting resource inside the host engine.
pub trait Emitter {
    /// Audio asset type.
    type Clip;

    /// Enable or disable the emitter in the scene.
    fn set_enabled(&mut self, enabled: bool);

    /// Bind a clip, or clear the binding with `None`.
    fn set_clip(&mut self, clip: Option<Self::Clip>);

    /// Set the volume (nominally 0.0-1.0, not clamped).
    fn set_volume(&mut self, volume: f32);

    /// Set the playback rate multiplier.
    fn set_pitch(&mut self, pitch: f32);

    /// Set whether playback loops.
    fn set_looping(&mut self, looping: bool);

    /// Set the spatial blend (0.0 = non-positional, 1.0 = fully positional).
    fn set_spatial_blend(&mut self, blend: f32);

    /// Move the emitter to a world position.
    fn set_position(&mut self, position: Vec3);

    /// Start playback of the bound clip from the beginning.
    fn play(&mut self);

    /// Stop playback.
    fn stop(&mut self);

    /// Whether the bound clip is still playing.
    fn is_playing(&self) -> bool;
}
