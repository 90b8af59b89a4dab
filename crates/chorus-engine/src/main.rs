//! # Chorus Engine
//!
//! Headless driver for the Chorus sound-source pool.
//!
//! Loads a TOML configuration (path as the first argument, `chorus.toml` by
//! default), builds a pool over the simulated host and runs a scripted scene
//! through a fixed-rate frame loop.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod config;

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{EngineConfig, CONFIG_FILE};

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("chorus=info".parse()?))
        .init();

    info!("Chorus starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_FILE.to_string());
    let mut config = EngineConfig::load_from(&path);
    config.validate();

    // Leave an editable copy of the defaults behind on first run
    if !Path::new(&path).exists() {
        if let Err(e) = config.save_to(&path) {
            warn!("Failed to write default config: {e}");
        }
    }

    let summary = app::run(&config);
    info!(
        "Pool ended with {} sources ({} created on overflow), {} reclaimed by sweeps",
        summary.final_stats.total, summary.final_stats.overflow_created, summary.reclaimed
    );

    info!("Chorus shutdown complete");
    Ok(())
}
