//! Scratch buffers and frame lifecycle.
//!
//! The eligible-tween snapshot is rebuilt every frame into the same buffer so
//! steady-state stepping does not allocate.

use crate::config::Config;
use crate::ids::TweenId;

#[derive(Debug, Default)]
pub struct Scratch {
    /// Tweens to step this frame, captured before any of them runs.
    pub eligible: Vec<TweenId>,
}

impl Scratch {
    pub fn new(cfg: &Config) -> Self {
        Self {
            eligible: Vec::with_capacity(cfg.initial_capacity),
        }
    }

    #[inline]
    pub fn begin_frame(&mut self) {
        self.eligible.clear();
    }
}
