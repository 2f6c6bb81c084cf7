//! Vizij Tween Core (engine-agnostic)
//!
//! Frame-driven tween scheduler: a growable pool of interpolation slots,
//! an active set walked once per frame, per-slot loop/ping-pong state, the
//! interpolation kernels (vector, quaternion, scalar, orbit) and the easing
//! library. Hosts feed a [`FrameTime`] each frame and apply the returned
//! [`Change`]s to their own properties.

pub mod active;
pub mod callbacks;
pub mod config;
pub mod easing;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod outputs;
pub mod pool;
pub mod scheduler;
pub mod scratch;
pub mod slot;
pub mod step;
pub mod value;

// Re-exports for consumers (adapters)
pub use callbacks::{EventKind, TweenEvent};
pub use config::Config;
pub use easing::Ease;
pub use error::{Result, TweenError};
pub use ids::{OwnerKey, TargetHandle, TweenId};
pub use inputs::{FrameTime, Inputs, TweenCommand};
pub use outputs::{Change, CoreEvent, Outputs};
pub use scheduler::Scheduler;
pub use slot::{OrbitParams, Payload, Slot, SlotFlags, TweenMode};
pub use value::{TweenValue, ValueKind, QUAT_IDENTITY};
