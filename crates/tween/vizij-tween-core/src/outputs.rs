//! Output contracts from the scheduler.
//!
//! Outputs carry the values produced this frame, keyed by the tween and the
//! external target handle, plus a separate list of lifecycle events.
//! Adapters (Bevy/WASM) apply changes to the host and transport events.
//! Float tweens never appear in `changes`; their values only reach callbacks.

use serde::{Deserialize, Serialize};

use crate::ids::{OwnerKey, TargetHandle, TweenId};
use crate::slot::TweenMode;
use crate::value::TweenValue;

/// One value to write to an external property this frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub tween: TweenId,
    pub owner: OwnerKey,
    pub target: TargetHandle,
    pub mode: TweenMode,
    /// Whether the adapter should write the local-space property.
    pub is_local: bool,
    pub value: TweenValue,
}

/// Lifecycle signals emitted while stepping or handling commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoreEvent {
    Completed {
        tween: TweenId,
        owner: OwnerKey,
    },
    Cancelled {
        tween: TweenId,
        owner: OwnerKey,
    },
    LoopCompleted {
        tween: TweenId,
        owner: OwnerKey,
        loop_counter: u16,
    },
    Error {
        message: String,
    },
}

/// Outputs returned by Scheduler::advance().
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Last change written for `target` this frame.
    pub fn latest_for(&self, target: TargetHandle) -> Option<&Change> {
        self.changes.iter().rev().find(|c| c.target == target)
    }
}
