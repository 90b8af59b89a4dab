//! Pool configuration.

use serde::{Deserialize, Serialize};

use crate::sweep::{DEFAULT_SWEEP_INTERVAL, MIN_SWEEP_INTERVAL};

/// Default number of sources built when the pool is created.
pub const DEFAULT_POOLING_AMOUNT: usize = 10;

/// Sound-source pool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// How many sources to build up front
    pub pooling_amount: usize,
    /// Build extra sources on demand when the ready queue runs dry
    pub overflow_allowed: bool,
    /// Seconds between sweeps for finished one-shots
    pub sweep_interval: f32,
    /// Ceiling on total sources when overflowing (None = unbounded)
    pub max_pool_size: Option<usize>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            pooling_amount: DEFAULT_POOLING_AMOUNT,
            overflow_allowed: true,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            max_pool_size: None,
        }
    }
}

impl PoolConfig {
    /// Create config with a pooling amount.
    #[must_use]
    pub const fn with_pooling_amount(mut self, amount: usize) -> Self {
        self.pooling_amount = amount;
        self
    }

    /// Create config with overflow enabled/disabled.
    #[must_use]
    pub const fn with_overflow(mut self, allowed: bool) -> Self {
        self.overflow_allowed = allowed;
        self
    }

    /// Create config with a sweep interval.
    #[must_use]
    pub const fn with_sweep_interval(mut self, seconds: f32) -> Self {
        self.sweep_interval = seconds;
        self
    }

    /// Create config with an overflow ceiling.
    #[must_use]
    pub const fn with_max_pool_size(mut self, max: Option<usize>) -> Self {
        self.max_pool_size = max;
        self
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.pooling_amount = self.pooling_amount.max(1);

        if !self.sweep_interval.is_finite() {
            self.sweep_interval = DEFAULT_SWEEP_INTERVAL;
        }
        self.sweep_interval = self.sweep_interval.max(MIN_SWEEP_INTERVAL);

        // A ceiling below the initial batch would be unreachable
        if let Some(max) = self.max_pool_size {
            self.max_pool_size = Some(max.max(self.pooling_amount));
        }
    }
}
