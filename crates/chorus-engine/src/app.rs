//! Simulated frame loop.
//!
//! Drives a [`SourcePool`] the way a game loop would: scheduled one-shots and
//! a looping ambience are triggered from "game logic", the simulated host
//! advances playback, and the pool is ticked once per frame.

use std::f32::consts::TAU;

use chorus_kernel::prelude::*;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;

/// What happened during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames simulated.
    pub frames: u64,
    /// Sound requests that got a source.
    pub played: u64,
    /// Sound requests dropped because the pool had no source.
    pub dropped: u64,
    /// Sources reclaimed by sweeps.
    pub reclaimed: u64,
    /// Highest number of sources lent out at once.
    pub peak_in_use: usize,
    /// Pool occupancy at the end of the run, after shutdown.
    pub final_stats: PoolStats,
}

/// Run the simulated scene to completion.
pub fn run(config: &EngineConfig) -> RunSummary {
    let mut pool = SourcePool::new(SimulatedHost::new(), config.pool.clone());
    let summary = drive(&mut pool, config);
    info!(
        "Run finished: {} frames, {} played, {} dropped, peak {} in use",
        summary.frames, summary.played, summary.dropped, summary.peak_in_use
    );
    summary
}

/// Drive an existing pool through the configured scene.
pub fn drive(pool: &mut SourcePool<SimulatedHost>, config: &EngineConfig) -> RunSummary {
    let dt = config.frame_dt();
    let total_frames = config.total_frames();
    let stats_every = frames_for(config.stats_interval, config.target_fps);
    let release_at = frames_for(config.loop_release_after, config.target_fps);

    let clips: Vec<SimClip> = config
        .clips
        .iter()
        .map(|c| SimClip::new(c.name.as_str(), c.duration))
        .collect();

    let mut summary = RunSummary::default();

    let mut ambience = if config.loop_duration > 0.0 {
        let hum = SimClip::new("ambience", config.loop_duration);
        let params = PlayParams::looped().with_volume(0.6);
        match pool.play_ambient(hum, params) {
            Ok(id) => {
                summary.played += 1;
                id
            },
            Err(_) => {
                summary.dropped += 1;
                None
            },
        }
    } else {
        None
    };

    for frame in 0..total_frames {
        for (scheduled, clip) in config.clips.iter().zip(&clips) {
            if scheduled.every_frames == 0 || frame % u64::from(scheduled.every_frames) != 0 {
                continue;
            }

            let params = PlayParams::default().with_volume(scheduled.volume);
            let result = if scheduled.positional {
                let position = ring_position(frame, config.emitter_radius);
                pool.play_positional(clip.clone(), position, params)
            } else {
                pool.play_ambient(clip.clone(), params)
            };

            match result {
                Ok(_) => summary.played += 1,
                Err(e) => {
                    debug!("Dropped {} on frame {}: {}", scheduled.name, frame, e);
                    summary.dropped += 1;
                },
            }
        }

        if release_at > 0 && frame == release_at {
            if let Some(id) = ambience.take() {
                info!("Releasing ambience loop on {}", id);
                pool.release(id);
            }
        }

        pool.host().advance(dt);
        summary.reclaimed += pool.tick(dt) as u64;

        let stats = pool.stats();
        summary.peak_in_use = summary.peak_in_use.max(stats.in_use());
        summary.frames += 1;

        if stats_every > 0 && (frame + 1) % stats_every == 0 {
            info!(
                "Pool: {} total, {} ready, {} active, {} looping",
                stats.total, stats.ready, stats.active, stats.lent
            );
        }
    }

    if ambience.is_some() {
        warn!("Ambience loop still held at shutdown");
    }
    pool.stop_all();
    summary.final_stats = pool.stats();
    summary
}

/// Convert seconds to a frame count (0 stays 0).
fn frames_for(seconds: f32, fps: u32) -> u64 {
    (seconds.max(0.0) * fps as f32).round() as u64
}

/// Spread positional sounds around the listener on a ring.
fn ring_position(frame: u64, radius: f32) -> Vec3 {
    let angle = (frame % 360) as f32 / 360.0 * TAU;
    Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
}
