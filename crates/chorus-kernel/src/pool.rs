//! Sound Source Pool
//!
//! Pre-allocates reusable sound sources so triggering a sound effect never
//! spawns an emitter mid-frame. Sources are lent out while a sound plays and
//! come back to the ready queue when it ends.
//!
//! # Lifecycle
//!
//! ```text
//! ┌──────────────┐  acquire   ┌──────────────┐  sweep (finished)  ┌──────────────┐
//! │ ready (FIFO) │──────────► │ active       │──────────────────► │ ready (back) │
//! └──────────────┘            └──────────────┘                    └──────────────┘
//!        │  looping play      ┌──────────────┐  release
//!        └──────────────────► │ lent         │──────────────────► ready (back)
//!                             └──────────────┘
//! ```
//!
//! One-shot sounds are reclaimed by the pool. Looping sounds are handed to the
//! caller, who must [`release`](SourcePool::release) them; the sweep never
//! touches them.
//!
//! # Example
//!
//! ```
//! use chorus_kernel::prelude::*;
//!
//! let mut pool = SourcePool::new(SimulatedHost::new(), PoolConfig::default());
//! let hit = SimClip::new("hit", 0.4);
//!
//! // One-shot: reclaimed by the sweep once it ends
//! let _ = pool.play_ambient(hit, PlayParams::default());
//!
//! // Loop: the caller owns the handle
//! let hum = SimClip::new("hum", 2.0);
//! let engine_loop = pool
//!     .play_positional(hum, Vec3::new(4.0, 0.0, 1.0), PlayParams::looped())
//!     .ok()
//!     .flatten();
//!
//! // Per frame
//! pool.host().advance(1.0 / 60.0);
//! pool.tick(1.0 / 60.0);
//!
//! if let Some(id) = engine_loop {
//!     pool.release(id);
//! }
//! ```

use std::collections::VecDeque;

use glam::Vec3;
use tracing::{debug, error, info, warn};

use crate::config::PoolConfig;
use crate::error::{PoolError, PoolResult};
use crate::host::AudioHost;
use crate::ids::SourceId;
use crate::source::{
    PlayParams, PooledSource, SlotState, SPATIAL_BLEND_AMBIENT, SPATIAL_BLEND_POSITIONAL,
};
use crate::sweep::SweepTimer;

/// Snapshot of pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Sources owned by the pool.
    pub total: usize,
    /// Idle sources in the ready queue.
    pub ready: usize,
    /// One-shot sources awaiting the sweep.
    pub active: usize,
    /// Looping sources held by callers.
    pub lent: usize,
    /// Sources handed out by a bare acquire.
    pub detached: usize,
    /// Sources created on demand after construction.
    pub overflow_created: usize,
}

impl PoolStats {
    /// Sources currently lent out in any form.
    #[must_use]
    pub const fn in_use(&self) -> usize {
        self.active + self.lent + self.detached
    }
}

/// Fixed-capacity pool of reusable sound sources.
///
/// The pool owns its host and every emitter it spawns. Create one at startup,
/// pass it by `&mut` to whatever triggers sounds, and drop it at shutdown.
pub struct SourcePool<H: AudioHost> {
    /// Host that spawns and drives emitters.
    host: H,
    /// Every source ever created, indexed by `SourceId`.
    sources: Vec<PooledSource<H::Emitter>>,
    /// Idle sources, oldest first.
    ready: VecDeque<SourceId>,
    /// One-shots checked by the sweep.
    active: Vec<SourceId>,
    /// Loops owned by callers.
    lent: Vec<SourceId>,
    /// Sweep cadence.
    timer: SweepTimer,
    /// Configuration.
    config: PoolConfig,
    /// Sources created after construction.
    overflow_created: usize,
}

impl<H: AudioHost> std::fmt::Debug for SourcePool<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourcePool")
            .field("stats", &self.stats())
            .field("config", &self.config)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl<H: AudioHost> SourcePool<H> {
    /// Create a pool and build its initial batch of idle sources.
    ///
    /// The config is validated first, so a pooling amount of zero becomes one.
    pub fn new(host: H, mut config: PoolConfig) -> Self {
        config.validate();

        let amount = config.pooling_amount;
        let mut pool = Self {
            host,
            sources: Vec::with_capacity(amount),
            ready: VecDeque::with_capacity(amount),
            active: Vec::with_capacity(amount),
            lent: Vec::new(),
            timer: SweepTimer::new(config.sweep_interval),
            config,
            overflow_created: 0,
        };

        for _ in 0..amount {
            let id = pool.spawn_source();
            pool.ready.push_back(id);
        }

        info!(
            "Sound source pool initialized with {} sources (overflow: {})",
            amount, pool.config.overflow_allowed
        );
        pool
    }

    /// Create a new source in the `Ready` state without enqueuing it.
    fn spawn_source(&mut self) -> SourceId {
        let id = SourceId::from_raw(self.sources.len() as u32);
        let emitter = self.host.spawn_emitter(id);
        self.sources.push(PooledSource::new(id, emitter));
        id
    }

    /// Build one extra source for an empty ready queue, if allowed.
    fn overflow(&mut self) -> PoolResult<SourceId> {
        let total = self.sources.len();

        if !self.config.overflow_allowed {
            let err = PoolError::PoolExhausted { pooled: total };
            error!("{err}");
            return Err(err);
        }

        if let Some(max) = self.config.max_pool_size {
            if total >= max {
                let err = PoolError::PoolCapacityReached { max };
                error!("{err}");
                return Err(err);
            }
        }

        let id = self.spawn_source();
        self.overflow_created += 1;
        debug!("Pool overflow: created {} ({} total)", id, self.sources.len());
        Ok(id)
    }

    // ============================================
    // Acquire / Release
    // ============================================

    /// Take the oldest idle source.
    ///
    /// With an empty ready queue, builds exactly one new source when overflow
    /// is allowed; otherwise fails with [`PoolError::PoolExhausted`] and
    /// leaves the pool untouched. The returned source is detached: neither
    /// the sweep nor the loop bookkeeping tracks it until it is released.
    pub fn acquire(&mut self) -> PoolResult<SourceId> {
        let id = match self.ready.pop_front() {
            Some(id) => id,
            None => self.overflow()?,
        };
        self.sources[id.index()].state = SlotState::Detached;
        Ok(id)
    }

    /// Return a source to the back of the ready queue.
    ///
    /// Works for any lent-out source: a loop handed out by a play call, a
    /// one-shot that has not been swept yet, or a detached source. The
    /// source is stopped, disabled and unbound first. Releasing a source
    /// that is already idle, or one this pool never issued, is ignored.
    pub fn release(&mut self, id: SourceId) {
        let source = match self.sources.get_mut(id.index()) {
            Some(source) => source,
            None => {
                warn!("Ignoring release of unknown {}", id);
                return;
            },
        };

        match source.state {
            SlotState::Ready => {
                warn!("Ignoring release of {} which is already idle", id);
                return;
            },
            SlotState::Active => remove_id(&mut self.active, id),
            SlotState::Lent => remove_id(&mut self.lent, id),
            SlotState::Detached => {},
        }

        source.park();
        source.state = SlotState::Ready;
        self.ready.push_back(id);
        debug!("Released {} back to pool", id);
    }

    // ============================================
    // Playback
    // ============================================

    /// Play a clip without spatial blending.
    ///
    /// One-shots are tracked by the pool and return `Ok(None)`. Looping
    /// playback returns `Ok(Some(id))`; the caller must [`release`] it.
    /// `Err` means the request was dropped.
    ///
    /// [`release`]: Self::release
    pub fn play_ambient(&mut self, clip: H::Clip, params: PlayParams) -> PoolResult<Option<SourceId>> {
        self.play(clip, params, SPATIAL_BLEND_AMBIENT, None)
    }

    /// Play a clip fully spatialized at a world position.
    ///
    /// Same ownership contract as [`play_ambient`](Self::play_ambient).
    pub fn play_positional(
        &mut self,
        clip: H::Clip,
        position: Vec3,
        params: PlayParams,
    ) -> PoolResult<Option<SourceId>> {
        self.play(clip, params, SPATIAL_BLEND_POSITIONAL, Some(position))
    }

    fn play(
        &mut self,
        clip: H::Clip,
        params: PlayParams,
        spatial_blend: f32,
        position: Option<Vec3>,
    ) -> PoolResult<Option<SourceId>> {
        let id = self.acquire()?;

        let source = &mut self.sources[id.index()];
        source.configure(clip, params, spatial_blend, position);
        source.start();

        if params.looping {
            source.state = SlotState::Lent;
            self.lent.push(id);
            debug!("Playing looped sound on {}", id);
            Ok(Some(id))
        } else {
            source.state = SlotState::Active;
            self.active.push(id);
            debug!("Playing sound on {}", id);
            Ok(None)
        }
    }

    // ============================================
    // Update
    // ============================================

    /// Advance the sweep timer (call each frame).
    ///
    /// Sweeps once the configured interval has accumulated and returns the
    /// number of sources reclaimed; returns 0 on frames without a sweep.
    pub fn tick(&mut self, dt: f32) -> usize {
        if self.timer.accumulate(dt) {
            self.sweep()
        } else {
            0
        }
    }

    /// Move every finished one-shot back to the ready queue.
    ///
    /// Sources that are still playing stay active. Reclaimed sources keep
    /// their relative order at the back of the ready queue.
    pub fn sweep(&mut self) -> usize {
        let sources = &mut self.sources;
        let ready = &mut self.ready;
        let mut reclaimed = 0;

        self.active.retain(|&id| {
            let source = &mut sources[id.index()];
            if source.is_playing() {
                return true;
            }
            source.park();
            source.state = SlotState::Ready;
            ready.push_back(id);
            reclaimed += 1;
            false
        });

        if reclaimed > 0 {
            debug!(
                "Sweep reclaimed {} sources ({} still active)",
                reclaimed,
                self.active.len()
            );
        }
        reclaimed
    }

    /// Stop every tracked sound and return its source to the pool.
    ///
    /// Covers active one-shots and caller-held loops. Detached sources from
    /// a bare [`acquire`](Self::acquire) stay with their caller.
    pub fn stop_all(&mut self) -> usize {
        let stopped: Vec<SourceId> = self.active.drain(..).chain(self.lent.drain(..)).collect();

        for &id in &stopped {
            let source = &mut self.sources[id.index()];
            source.park();
            source.state = SlotState::Ready;
            self.ready.push_back(id);
        }

        info!("Stopped {} pooled sounds", stopped.len());
        stopped.len()
    }

    // ============================================
    // Source access
    // ============================================

    /// Borrow a source.
    #[must_use]
    pub fn source(&self, id: SourceId) -> Option<&PooledSource<H::Emitter>> {
        self.sources.get(id.index())
    }

    /// Mutably borrow a source, e.g. to adjust a playing loop.
    pub fn source_mut(&mut self, id: SourceId) -> Option<&mut PooledSource<H::Emitter>> {
        self.sources.get_mut(id.index())
    }

    /// Move a source. Returns false for an unknown id.
    pub fn set_position(&mut self, id: SourceId, position: Vec3) -> bool {
        match self.sources.get_mut(id.index()) {
            Some(source) => {
                source.set_position(position);
                true
            },
            None => false,
        }
    }

    /// Whether the host reports the source as playing.
    #[must_use]
    pub fn is_playing(&self, id: SourceId) -> bool {
        self.source(id).is_some_and(PooledSource::is_playing)
    }

    /// Idle sources in dequeue order.
    pub fn ready_ids(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.ready.iter().copied()
    }

    /// One-shot sources awaiting the sweep.
    pub fn active_ids(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.active.iter().copied()
    }

    /// Looping sources held by callers.
    pub fn lent_ids(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.lent.iter().copied()
    }

    // ============================================
    // Statistics
    // ============================================

    /// Occupancy snapshot.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        let total = self.sources.len();
        let tracked = self.ready.len() + self.active.len() + self.lent.len();
        PoolStats {
            total,
            ready: self.ready.len(),
            active: self.active.len(),
            lent: self.lent.len(),
            detached: total.saturating_sub(tracked),
            overflow_created: self.overflow_created,
        }
    }

    /// Total number of sources owned by the pool.
    #[must_use]
    pub fn total_sources(&self) -> usize {
        self.sources.len()
    }

    /// Number of idle sources.
    #[must_use]
    pub fn ready_count(&self) -> usize {
        self.ready.len()
    }

    /// Number of one-shot sources awaiting the sweep.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of looping sources held by callers.
    #[must_use]
    pub fn lent_count(&self) -> usize {
        self.lent.len()
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Get the sweep timer.
    #[must_use]
    pub const fn sweep_timer(&self) -> &SweepTimer {
        &self.timer
    }

    /// Restart the sweep countdown, e.g. after a pause or a level load.
    pub fn reset_sweep_timer(&mut self) {
        self.timer.reset();
    }

    /// Change the time between sweeps. Values below the minimum are raised.
    pub fn set_sweep_interval(&mut self, seconds: f32) {
        self.timer.set_interval(seconds);
        self.config.sweep_interval = self.timer.interval();
    }

    /// Get the host.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Get the host mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

/// Remove an id from an unordered list.
fn remove_id(list: &mut Vec<SourceId>, id: SourceId) {
    if let Some(pos) = list.iter().position(|&other| other == id) {
        list.swap_remove(pos);
    }
}
