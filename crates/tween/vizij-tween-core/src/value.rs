//! Values produced by the interpolation kernels.

use serde::{Deserialize, Serialize};

/// Identity quaternion (x, y, z, w).
pub const QUAT_IDENTITY: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ValueKind {
    Float,
    Vec3,
    Quat,
    Pose,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum TweenValue {
    /// Scalar
    Float(f32),
    /// Position, scale, size and other three-component properties
    Vec3([f32; 3]),
    /// Quaternion (x, y, z, w)
    Quat([f32; 4]),
    /// Position and orientation written together (orbiting)
    Pose {
        position: [f32; 3],
        rotation: [f32; 4],
    },
}

impl TweenValue {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            TweenValue::Float(_) => ValueKind::Float,
            TweenValue::Vec3(_) => ValueKind::Vec3,
            TweenValue::Quat(_) => ValueKind::Quat,
            TweenValue::Pose { .. } => ValueKind::Pose,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            TweenValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<[f32; 3]> {
        match self {
            TweenValue::Vec3(v) => Some(*v),
            TweenValue::Pose { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub fn as_quat(&self) -> Option<[f32; 4]> {
        match self {
            TweenValue::Quat(q) => Some(*q),
            TweenValue::Pose { rotation, .. } => Some(*rotation),
            _ => None,
        }
    }
}
