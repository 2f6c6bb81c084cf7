//! Per-slot frame step: progress, tick, kernel evaluation and loop policy.
//!
//! Everything here is a pure function of one slot and the frame time. Event
//! delivery and output bookkeeping stay in the scheduler.

use crate::inputs::FrameTime;
use crate::interp;
use crate::slot::{Payload, Slot, SlotFlags};
use crate::value::TweenValue;

/// Speed-based progress per second for each unit of `speed`.
pub const SPEED_UNIT: f32 = 1.0 / 3.0;

/// What the loop policy decided at a terminal frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Running,
    /// Crossed a loop boundary and keeps going.
    LoopBoundary { notify_complete: bool },
    Finished,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepResult {
    pub tick: f32,
    pub value: Option<TweenValue>,
    pub outcome: Outcome,
}

impl StepResult {
    /// Payload for update/complete events: the value for float tweens, the tick otherwise.
    pub fn event_value(&self) -> f32 {
        match self.value {
            Some(TweenValue::Float(v)) => v,
            _ => self.tick,
        }
    }
}

#[inline]
fn flipped(slot: &Slot) -> bool {
    slot.flags.contains(SlotFlags::FLIP_TICK)
}

/// Move progress forward (or backward on the flipped leg of a ping-pong).
pub fn advance_progress(slot: &mut Slot, time: &FrameTime) {
    let dt = if slot.flags.contains(SlotFlags::UNSCALED_TIME) {
        time.unscaled_delta
    } else {
        time.delta
    };
    let dir = if flipped(slot) { -1.0 } else { 1.0 };
    if slot.is_speed_based() {
        let step = slot.speed as f32 * SPEED_UNIT * dt * dir;
        slot.running_speed = (slot.running_speed + step).clamp(0.0, 1.0);
    } else {
        slot.running_time += dt * dir;
    }
}

/// Normalized progress before easing, clamped to [0,1].
pub fn normalized(slot: &Slot) -> f32 {
    if slot.is_speed_based() {
        return slot.running_speed;
    }
    if slot.duration <= 0.0 {
        return if flipped(slot) { 0.0 } else { 1.0 };
    }
    // An infinite duration gives 0 here, i.e. ease(0).
    (slot.running_time / slot.duration).clamp(0.0, 1.0)
}

/// Whether progress reached the end of the current leg.
pub fn is_terminal(slot: &Slot) -> bool {
    match (slot.is_speed_based(), flipped(slot)) {
        (true, false) => slot.running_speed >= 1.0,
        (true, true) => slot.running_speed <= 0.0,
        (false, false) => slot.running_time >= slot.duration,
        (false, true) => slot.running_time <= 0.0,
    }
}

/// Tick written on a terminal frame: exactly the end of the current leg.
#[inline]
pub fn boundary_tick(slot: &Slot) -> f32 {
    if flipped(slot) {
        0.0
    } else {
        1.0
    }
}

/// Apply the loop policy at a terminal frame. Resets progress for the next
/// leg unless the tween is done.
pub fn loop_policy(slot: &mut Slot) -> Outcome {
    let infinite = slot.flags.contains(SlotFlags::INFINITE_LOOP);
    if slot.loop_count == 0 && !infinite {
        return Outcome::Finished;
    }
    let ping_pong = slot.flags.contains(SlotFlags::PING_PONG);
    slot.loop_counter = slot.loop_counter.saturating_add(1);
    let limit = if ping_pong {
        u16::from(slot.loop_count) * 2
    } else {
        u16::from(slot.loop_count)
    };
    // Ping-pong reports completion once per round trip.
    let notify_complete = slot.flags.contains(SlotFlags::COMPLETE_REPEAT_NOTIFY)
        && (!ping_pong || slot.loop_counter % 2 == 0);
    if slot.loop_counter >= limit {
        if !infinite {
            return Outcome::Finished;
        }
        slot.loop_counter = 0;
    }
    if let Some(origin) = slot.origin.take() {
        slot.payload = origin;
    }
    if ping_pong {
        // Pin to the boundary so the next leg starts exactly there.
        if flipped(slot) {
            slot.running_time = 0.0;
            slot.running_speed = 0.0;
        } else {
            slot.running_time = slot.duration.max(0.0);
            slot.running_speed = 1.0;
        }
        slot.flags.toggle(SlotFlags::FLIP_TICK);
    } else {
        slot.running_time = 0.0;
        slot.running_speed = 0.0;
    }
    Outcome::LoopBoundary { notify_complete }
}

/// Run one frame of `slot`.
pub fn step(slot: &mut Slot, time: &FrameTime) -> StepResult {
    advance_progress(slot, time);
    slot.started = true;
    let terminal = is_terminal(slot);
    let tick = if terminal {
        boundary_tick(slot)
    } else if slot.is_speed_based() {
        slot.running_speed
    } else {
        slot.ease.apply(normalized(slot))
    };
    let value = interp::evaluate(
        slot.mode,
        &slot.payload,
        tick,
        slot.flags.contains(SlotFlags::IS_LOCAL),
    );
    slot.last_tick = tick;
    slot.last_value = value;
    let outcome = if terminal {
        loop_policy(slot)
    } else {
        Outcome::Running
    };
    StepResult {
        tick,
        value,
        outcome,
    }
}

/// Write the end-of-leg value without stepping. Used when cancelling.
pub fn snap_to_boundary(slot: &mut Slot) -> Option<TweenValue> {
    let tick = boundary_tick(slot);
    let value = interp::evaluate(
        slot.mode,
        &slot.payload,
        tick,
        slot.flags.contains(SlotFlags::IS_LOCAL),
    );
    slot.last_tick = tick;
    slot.last_value = value;
    value
}

/// Restart the current leg from the last value toward the same end.
///
/// A forward leg moves its start to the last value and runs again from tick
/// 0. A flipped leg moves the end it is returning from and runs again from
/// tick 1, so it still lands on the start. Rotations and orbits keep their
/// axis and sweep only the angle still left in that direction. The
/// allocated payload comes back at the next loop boundary.
pub fn rebaseline(slot: &mut Slot) {
    let Some(current) = slot.last_value else {
        return;
    };
    let back = flipped(slot);
    let left = if back {
        slot.last_tick
    } else {
        1.0 - slot.last_tick
    };
    let origin = slot.payload;
    slot.origin.get_or_insert(origin);
    match (&mut slot.payload, current) {
        (Payload::Vector { to, .. }, TweenValue::Vec3(v)) if back => *to = v,
        (Payload::Vector { from, .. }, TweenValue::Vec3(v)) => *from = v,
        (Payload::Float { to, .. }, TweenValue::Float(v)) if back => *to = v,
        (Payload::Float { from, .. }, TweenValue::Float(v)) => *from = v,
        (Payload::Rotation { from, angle, .. }, TweenValue::Quat(q)) => {
            if !back {
                *from = q;
            }
            *angle *= left;
        }
        (Payload::Orbit(o), TweenValue::Pose { position, rotation }) => {
            if !back {
                o.position = position;
                o.rotation = rotation;
            }
            o.angle *= left;
        }
        _ => {}
    }
    if back {
        slot.running_time = slot.duration.max(0.0);
        slot.running_speed = 1.0;
        slot.last_tick = 1.0;
    } else {
        slot.running_time = 0.0;
        slot.running_speed = 0.0;
        slot.last_tick = 0.0;
    }
}
