//! Driver configuration.
//!
//! Holds the sound-source pool settings plus the parameters of the simulated
//! frame loop. Configuration can be loaded from and saved to a TOML file.

use chorus_kernel::config::PoolConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "chorus.toml";

/// A clip the driver triggers on a fixed schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduledClip {
    /// Clip name (for logs)
    pub name: String,
    /// Clip length in seconds
    pub duration: f32,
    /// Trigger every N frames (0 = never)
    pub every_frames: u32,
    /// Play spatialized around the listener
    pub positional: bool,
    /// Volume multiplier
    pub volume: f32,
}

impl Default for ScheduledClip {
    fn default() -> Self {
        Self {
            name: "sfx".to_string(),
            duration: 0.5,
            every_frames: 30,
            positional: false,
            volume: 1.0,
        }
    }
}

/// Driver configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Frame Loop ===
    /// Simulated frames per second
    pub target_fps: u32,
    /// How long to run, in simulated seconds
    pub run_seconds: f32,
    /// Log pool statistics every N seconds (0 = never)
    pub stats_interval: f32,

    // === Pool ===
    /// Sound-source pool settings
    pub pool: PoolConfig,

    // === Scene ===
    /// One-shot clips triggered on a schedule
    pub clips: Vec<ScheduledClip>,
    /// Length of the looping ambience clip (0 = no loop)
    pub loop_duration: f32,
    /// Release the loop after this many seconds (0 = keep until shutdown)
    pub loop_release_after: f32,
    /// Radius of the ring positional clips are placed on
    pub emitter_radius: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            run_seconds: 10.0,
            stats_interval: 1.0,

            pool: PoolConfig::default(),

            clips: vec![
                ScheduledClip {
                    name: "footstep".to_string(),
                    duration: 0.3,
                    every_frames: 20,
                    positional: false,
                    volume: 0.8,
                },
                ScheduledClip {
                    name: "explosion".to_string(),
                    duration: 1.5,
                    every_frames: 45,
                    positional: true,
                    volume: 1.0,
                },
            ],
            loop_duration: 4.0,
            loop_release_after: 5.0,
            emitter_radius: 12.0,
        }
    }
}

impl EngineConfig {
    /// Read a config file, falling back to defaults.
    ///
    /// A missing, unreadable or malformed file is logged and replaced by
    /// [`EngineConfig::default`]; the driver always gets something runnable.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(Some(config)) => {
                info!("Using config {}", path.display());
                config
            },
            Ok(None) => {
                info!("No config at {}, running with defaults", path.display());
                Self::default()
            },
            Err(e) => {
                warn!("Ignoring config {}: {e}", path.display());
                Self::default()
            },
        }
    }

    /// Parse the file at `path`, or `None` when there is no such file.
    fn read(path: &Path) -> io::Result<Option<Self>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        toml::from_str(&text)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write the config as TOML, creating parent directories as needed.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let text = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, text)?;

        info!("Wrote config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.target_fps = self.target_fps.clamp(1, 1000);
        self.run_seconds = finite_or(self.run_seconds, 10.0).clamp(0.0, 3600.0);
        self.stats_interval = finite_or(self.stats_interval, 1.0).max(0.0);

        self.pool.validate();

        for clip in &mut self.clips {
            clip.duration = finite_or(clip.duration, 0.5).max(0.0);
            clip.volume = finite_or(clip.volume, 1.0).max(0.0);
        }
        self.loop_duration = finite_or(self.loop_duration, 0.0).max(0.0);
        self.loop_release_after = finite_or(self.loop_release_after, 0.0).max(0.0);
        self.emitter_radius = finite_or(self.emitter_radius, 12.0).max(0.0);
    }

    /// Seconds per simulated frame.
    #[must_use]
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }

    /// Number of frames in the run.
    #[must_use]
    pub fn total_frames(&self) -> u64 {
        (self.run_seconds.max(0.0) * self.target_fps as f32).round() as u64
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
