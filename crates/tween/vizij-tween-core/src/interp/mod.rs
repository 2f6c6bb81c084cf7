//! Interpolation kernels.
//!
//! Each kernel is a pure function of the slot's payload, the current tick and
//! the local-space flag. Ticks are not clamped: overshooting easing curves
//! (back, elastic, bounce, spring) push them outside [0,1] on purpose.

pub mod functions;

use crate::slot::{OrbitParams, Payload, TweenMode};
use crate::value::TweenValue;
use functions::{
    add3, axis_angle, conjugate_quat, lerp_f32, lerp_vec3, mul_quat, normalize3, rotate_vec3,
    sub3,
};

/// Evaluate the kernel selected by `mode` at `tick`.
///
/// Returns `None` when the payload does not belong to the mode (fail-soft; the
/// allocation API never builds such a slot).
pub fn evaluate(mode: TweenMode, payload: &Payload, tick: f32, is_local: bool) -> Option<TweenValue> {
    match (mode, payload) {
        (m, Payload::Vector { from, to }) if m.is_vector() => {
            Some(TweenValue::Vec3(lerp_vec3(*from, *to, tick)))
        }
        (TweenMode::Float, Payload::Float { from, to }) => {
            Some(TweenValue::Float(lerp_f32(*from, *to, tick)))
        }
        (TweenMode::Rotation, Payload::Rotation { from, axis, angle }) => Some(TweenValue::Quat(
            rotation(*from, *axis, *angle, tick, is_local),
        )),
        (TweenMode::RotateAround, Payload::Orbit(params)) => {
            let (position, rotation) = orbit(params, tick, is_local);
            Some(TweenValue::Pose { position, rotation })
        }
        _ => None,
    }
}

/// Rotation kernel: `from ⊗ axis_angle(axis_local, angle * tick)`.
///
/// This is the unclamped slerp from `from` to `from ⊗ axis_angle(axis_local, angle)`
/// along the rotation's own arc, so sweeps of 180° or more keep their direction.
/// `axis` is taken in the object's local frame when `is_local`; otherwise it
/// is a world axis and is carried into local space by the inverse of `from`.
/// A degenerate axis skips the rotation and returns `from`.
pub fn rotation(from: [f32; 4], axis: [f32; 3], angle: f32, tick: f32, is_local: bool) -> [f32; 4] {
    let Some(axis) = normalize3(axis) else {
        return from;
    };
    let local_axis = if is_local {
        axis
    } else {
        rotate_vec3(conjugate_quat(from), axis)
    };
    mul_quat(from, axis_angle(local_axis, angle * tick))
}

/// Orbit kernel: revolve the start pose about `pivot` by `angle * tick`.
///
/// Position is `pivot + q · (position - pivot)` and rotation is `q ⊗ rotation`,
/// where `q` is the world-space partial rotation. With `is_local` the axis is
/// given in the object's start frame and is carried into world space first.
/// A degenerate axis leaves the start pose untouched.
pub fn orbit(params: &OrbitParams, tick: f32, is_local: bool) -> ([f32; 3], [f32; 4]) {
    let Some(axis) = normalize3(params.axis) else {
        return (params.position, params.rotation);
    };
    let world_axis = if is_local {
        rotate_vec3(params.rotation, axis)
    } else {
        axis
    };
    let q = axis_angle(world_axis, params.angle * tick);
    let offset = rotate_vec3(q, sub3(params.position, params.pivot));
    (add3(params.pivot, offset), mul_quat(q, params.rotation))
}
