//! # Chorus Kernel
//!
//! Pooled sound-source playback for per-frame game loops.
//!
//! Triggering a sound effect should never cost an allocation or an emitter
//! spawn in the middle of a frame. This crate pre-builds a batch of reusable
//! sources, lends one out for each sound, and takes it back when the sound is
//! done:
//!
//! - [`SourcePool`](pool::SourcePool): ready queue, active set, overflow and
//!   the periodic sweep
//! - [`AudioHost`](host::AudioHost) / [`Emitter`](host::Emitter): the
//!   capabilities the pool needs from the host engine
//! - [`SimulatedHost`](sim::SimulatedHost): a headless host for drivers and
//!   tests
//!
//! ## Threading
//!
//! The pool is single-threaded and driven by the host frame loop. All
//! operations take `&mut self` and complete within the call.
//!
//! ## Reclamation
//!
//! One-shot sounds are reclaimed by polling: every `sweep_interval` seconds
//! of accumulated frame time, finished sources go back to the ready queue.
//! Looping sounds are handed to the caller and are only reclaimed by an
//! explicit release.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod host;
pub mod ids;
pub mod pool;
pub mod sim;
pub mod source;
pub mod sweep;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::host::*;
    pub use crate::ids::*;
    pub use crate::pool::*;
    pub use crate::sim::*;
    pub use crate::source::*;
    pub use crate::sweep::*;
    pub use glam::Vec3;
}

pub use prelude::*;
