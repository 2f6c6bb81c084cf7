//! Core configuration for vizij-tween-core.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TweenError};

/// Pool growth multiplier. Fixed; not part of [`Config`].
pub const GROWTH_FACTOR: usize = 2;

/// Configuration for scheduler sizing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Slots allocated up front. Also the floor the pool shrinks back to.
    pub initial_capacity: usize,

    /// Shrink the pool back to `initial_capacity` once no tween is active.
    pub shrink_when_idle: bool,

    /// Optional upper bound applied to both scaled and unscaled frame deltas.
    /// Hosts that hitch (debugger pauses, tab switches) use this to avoid
    /// tweens jumping straight to completion.
    pub max_delta: Option<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 6,
            shrink_when_idle: true,
            max_delta: None,
        }
    }
}

impl Config {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Config = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(TweenError::InvalidConfig(
                "initial_capacity must be at least 1".into(),
            ));
        }
        if let Some(max) = self.max_delta {
            if max.is_nan() || max <= 0.0 {
                return Err(TweenError::InvalidConfig(format!(
                    "max_delta must be positive, got {max}"
                )));
            }
        }
        Ok(())
    }
}
