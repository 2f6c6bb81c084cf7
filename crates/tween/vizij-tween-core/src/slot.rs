//! Pooled tween record and its per-mode payload.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::easing::Ease;
use crate::ids::{OwnerKey, TargetHandle, TweenId};
use crate::value::{TweenValue, QUAT_IDENTITY};

/// Index stored on free slots.
pub const FREE_INDEX: i32 = -1;

/// Which external property a tween drives; selects the interpolation kernel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TweenMode {
    #[default]
    Position,
    Rotation,
    Scale,
    Float,
    Translate,
    AnchoredPosition,
    SizeDelta,
    RotateAround,
}

impl TweenMode {
    /// Modes driven by the component-wise vector kernel.
    pub fn is_vector(self) -> bool {
        matches!(
            self,
            TweenMode::Position
                | TweenMode::Translate
                | TweenMode::Scale
                | TweenMode::AnchoredPosition
                | TweenMode::SizeDelta
        )
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SlotFlags: u8 {
        const PING_PONG              = 1 << 0;
        const IS_LOCAL               = 1 << 1;
        const FLIP_TICK              = 1 << 2;
        const COMPLETE_REPEAT_NOTIFY = 1 << 3;
        const PAUSED                 = 1 << 4;
        const UNSCALED_TIME          = 1 << 5;
        const CALLBACK_ASSIGNED      = 1 << 6;
        const INFINITE_LOOP          = 1 << 7;
    }
}

/// Inputs of an orbit: the object's pose at start and the pivot to revolve around.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitParams {
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub pivot: [f32; 3],
    pub axis: [f32; 3],
    /// Total sweep in radians.
    pub angle: f32,
}

/// Per-mode interpolation state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Payload {
    Vector {
        from: [f32; 3],
        to: [f32; 3],
    },
    Float {
        from: f32,
        to: f32,
    },
    Rotation {
        from: [f32; 4],
        axis: [f32; 3],
        angle: f32,
    },
    Orbit(OrbitParams),
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Vector {
            from: [0.0; 3],
            to: [0.0; 3],
        }
    }
}

/// One interpolation instance.
#[derive(Clone, Debug)]
pub struct Slot {
    pub(crate) index: i32,
    pub(crate) generation: u32,
    pub(crate) owner: OwnerKey,
    pub(crate) target: TargetHandle,
    pub(crate) mode: TweenMode,
    pub(crate) payload: Payload,
    pub(crate) duration: f32,
    pub(crate) running_time: f32,
    pub(crate) running_speed: f32,
    pub(crate) ease: Ease,
    pub(crate) speed: u8,
    pub(crate) loop_count: u8,
    pub(crate) loop_counter: u16,
    pub(crate) flags: SlotFlags,
    /// Set by the first step; locks the timing source.
    pub(crate) started: bool,
    pub(crate) last_tick: f32,
    pub(crate) last_value: Option<TweenValue>,
    /// Payload as allocated, held while a rebaselined leg runs.
    pub(crate) origin: Option<Payload>,
}

impl Default for Slot {
    fn default() -> Self {
        Slot::FREE
    }
}

impl Slot {
    /// A free slot; also the sentinel returned by owner lookups that miss.
    pub const FREE: Slot = Slot {
        index: FREE_INDEX,
        generation: 0,
        owner: OwnerKey::NONE,
        target: TargetHandle(0),
        mode: TweenMode::Position,
        payload: Payload::Vector {
            from: [0.0; 3],
            to: [0.0; 3],
        },
        duration: 0.0,
        running_time: 0.0,
        running_speed: 0.0,
        ease: Ease::Linear,
        speed: 0,
        loop_count: 0,
        loop_counter: 0,
        flags: SlotFlags::empty(),
        started: false,
        last_tick: 0.0,
        last_value: None,
        origin: None,
    };

    #[inline]
    pub fn is_free(&self) -> bool {
        self.index == FREE_INDEX
    }

    /// Position in the pool, or `-1` when free.
    #[inline]
    pub fn index(&self) -> i32 {
        self.index
    }

    /// Handle for this slot; `None` when free.
    pub fn id(&self) -> Option<TweenId> {
        if self.is_free() {
            return None;
        }
        Some(TweenId {
            index: self.index as u32,
            generation: self.generation,
        })
    }

    #[inline]
    pub(crate) fn matches(&self, id: TweenId) -> bool {
        !self.is_free() && self.index as u32 == id.index && self.generation == id.generation
    }

    pub fn owner(&self) -> OwnerKey {
        self.owner
    }

    pub fn target(&self) -> TargetHandle {
        self.target
    }

    pub fn mode(&self) -> TweenMode {
        self.mode
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn ease(&self) -> Ease {
        self.ease
    }

    pub fn flags(&self) -> SlotFlags {
        self.flags
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn running_time(&self) -> f32 {
        self.running_time
    }

    pub fn running_speed(&self) -> f32 {
        self.running_speed
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn loop_count(&self) -> u8 {
        self.loop_count
    }

    pub fn loop_counter(&self) -> u16 {
        self.loop_counter
    }

    /// Speed-based progress is authoritative when a non-zero speed is set.
    #[inline]
    pub fn is_speed_based(&self) -> bool {
        self.speed != 0
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.flags.contains(SlotFlags::PAUSED)
    }

    /// Most recent tick produced by a step (0 before the first step).
    pub fn last_tick(&self) -> f32 {
        self.last_tick
    }

    /// Most recent value produced by a step, or the start value before the first step.
    pub fn current_value(&self) -> Option<TweenValue> {
        if self.is_free() {
            return None;
        }
        Some(self.last_value.unwrap_or_else(|| self.payload.start_value()))
    }

    pub(crate) fn release(&mut self) {
        *self = Slot::default();
    }
}

impl Payload {
    /// Start of the interpolation expressed as a value.
    pub fn start_value(&self) -> TweenValue {
        match *self {
            Payload::Vector { from, .. } => TweenValue::Vec3(from),
            Payload::Float { from, .. } => TweenValue::Float(from),
            Payload::Rotation { from, .. } => TweenValue::Quat(from),
            Payload::Orbit(o) => TweenValue::Pose {
                position: o.position,
                rotation: o.rotation,
            },
        }
    }
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: QUAT_IDENTITY,
            pivot: [0.0; 3],
            axis: [0.0, 1.0, 0.0],
            angle: 0.0,
        }
    }
}
