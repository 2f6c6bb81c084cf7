//! Input contracts for the scheduler.
//!
//! Hosts pass a [`FrameTime`] every frame and, optionally, a batch of
//! serializable commands (web/Bevy adapters build these from their own
//! events) applied before the frame is stepped.

use serde::{Deserialize, Serialize};

use crate::easing::Ease;
use crate::ids::{OwnerKey, TweenId};

/// Elapsed time for one frame, in seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Delta after the host's time scale.
    pub delta: f32,
    /// Wall-clock delta, used by tweens flagged to ignore time scale.
    pub unscaled_delta: f32,
}

impl FrameTime {
    /// Frame with no time scaling.
    pub fn new(delta: f32) -> Self {
        Self {
            delta,
            unscaled_delta: delta,
        }
    }

    /// Frame whose scaled delta is `unscaled_delta * time_scale`.
    pub fn scaled(unscaled_delta: f32, time_scale: f32) -> Self {
        Self {
            delta: unscaled_delta * time_scale,
            unscaled_delta,
        }
    }

    pub(crate) fn clamped(self, max: Option<f32>) -> Self {
        match max {
            Some(m) => Self {
                delta: self.delta.min(m),
                unscaled_delta: self.unscaled_delta.min(m),
            },
            None => self,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// Commands applied in order before stepping.
    #[serde(default)]
    pub commands: Vec<TweenCommand>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TweenCommand {
    Pause {
        id: TweenId,
    },
    Resume {
        id: TweenId,
        #[serde(default)]
        rebaseline: bool,
    },
    Cancel {
        id: TweenId,
        #[serde(default)]
        invoke_on_complete: bool,
    },
    PauseOwner {
        owner: OwnerKey,
    },
    ResumeOwner {
        owner: OwnerKey,
        #[serde(default)]
        rebaseline: bool,
    },
    CancelOwner {
        owner: OwnerKey,
        #[serde(default)]
        invoke_on_complete: bool,
    },
    PauseAll,
    ResumeAll,
    CancelAll {
        #[serde(default)]
        invoke_on_complete: bool,
    },
    SetEase {
        id: TweenId,
        ease: Ease,
    },
    SetLoop {
        id: TweenId,
        count: u32,
        #[serde(default)]
        ping_pong: bool,
    },
    SetSpeed {
        id: TweenId,
        speed: u32,
    },
    SetUnscaledTime {
        id: TweenId,
        enabled: bool,
    },
}
