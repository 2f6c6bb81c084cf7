//! Easing library.
//!
//! Each curve maps normalized time to eased time and is selected by a one-byte
//! code ([`Ease`] is `#[repr(u8)]`) so a slot only spends a byte on it.

pub mod bezier;
pub mod functions;

use serde::{Deserialize, Serialize};

use crate::error::TweenError;
use functions as f;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Ease {
    #[default]
    Linear = 0,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    SineIn,
    SineOut,
    SineInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    CircIn,
    CircOut,
    CircInOut,
    BackIn,
    BackOut,
    BackInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
    Spring,
    SpringTight,
    WeightedIn,
    WeightedOut,
    QuadBezier,
    BezierIn,
    BezierOut,
    BezierInOut,
    BezierBrake,
}

impl Ease {
    /// Every curve, indexed by its code.
    pub const ALL: [Ease; 40] = [
        Ease::Linear,
        Ease::QuadIn,
        Ease::QuadOut,
        Ease::QuadInOut,
        Ease::CubicIn,
        Ease::CubicOut,
        Ease::CubicInOut,
        Ease::QuartIn,
        Ease::QuartOut,
        Ease::QuartInOut,
        Ease::QuintIn,
        Ease::QuintOut,
        Ease::QuintInOut,
        Ease::SineIn,
        Ease::SineOut,
        Ease::SineInOut,
        Ease::ExpoIn,
        Ease::ExpoOut,
        Ease::ExpoInOut,
        Ease::CircIn,
        Ease::CircOut,
        Ease::CircInOut,
        Ease::BackIn,
        Ease::BackOut,
        Ease::BackInOut,
        Ease::ElasticIn,
        Ease::ElasticOut,
        Ease::ElasticInOut,
        Ease::BounceIn,
        Ease::BounceOut,
        Ease::BounceInOut,
        Ease::Spring,
        Ease::SpringTight,
        Ease::WeightedIn,
        Ease::WeightedOut,
        Ease::QuadBezier,
        Ease::BezierIn,
        Ease::BezierOut,
        Ease::BezierInOut,
        Ease::BezierBrake,
    ];

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Curves that leave [0,1] on purpose (anticipation, overshoot, wobble).
    pub fn overshoots(self) -> bool {
        matches!(
            self,
            Ease::BackIn
                | Ease::BackOut
                | Ease::BackInOut
                | Ease::ElasticIn
                | Ease::ElasticOut
                | Ease::ElasticInOut
                | Ease::BounceIn
                | Ease::BounceOut
                | Ease::BounceInOut
                | Ease::Spring
                | Ease::SpringTight
        )
    }

    /// Map normalized time to eased time.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        self.function()(t)
    }

    #[inline]
    pub fn function(self) -> fn(f32) -> f32 {
        match self {
            Ease::Linear => f::linear,
            Ease::QuadIn => f::quad_in,
            Ease::QuadOut => f::quad_out,
            Ease::QuadInOut => f::quad_in_out,
            Ease::CubicIn => f::cubic_in,
            Ease::CubicOut => f::cubic_out,
            Ease::CubicInOut => f::cubic_in_out,
            Ease::QuartIn => f::quart_in,
            Ease::QuartOut => f::quart_out,
            Ease::QuartInOut => f::quart_in_out,
            Ease::QuintIn => f::quint_in,
            Ease::QuintOut => f::quint_out,
            Ease::QuintInOut => f::quint_in_out,
            Ease::SineIn => f::sine_in,
            Ease::SineOut => f::sine_out,
            Ease::SineInOut => f::sine_in_out,
            Ease::ExpoIn => f::expo_in,
            Ease::ExpoOut => f::expo_out,
            Ease::ExpoInOut => f::expo_in_out,
            Ease::CircIn => f::circ_in,
            Ease::CircOut => f::circ_out,
            Ease::CircInOut => f::circ_in_out,
            Ease::BackIn => f::back_in,
            Ease::BackOut => f::back_out,
            Ease::BackInOut => f::back_in_out,
            Ease::ElasticIn => f::elastic_in,
            Ease::ElasticOut => f::elastic_out,
            Ease::ElasticInOut => f::elastic_in_out,
            Ease::BounceIn => f::bounce_in,
            Ease::BounceOut => f::bounce_out,
            Ease::BounceInOut => f::bounce_in_out,
            Ease::Spring => f::spring,
            Ease::SpringTight => f::spring_tight,
            Ease::WeightedIn => f::weighted_in,
            Ease::WeightedOut => f::weighted_out,
            Ease::QuadBezier => f::quad_bezier,
            Ease::BezierIn => f::bezier_in,
            Ease::BezierOut => f::bezier_out,
            Ease::BezierInOut => f::bezier_in_out,
            Ease::BezierBrake => f::bezier_brake,
        }
    }
}

impl TryFrom<u8> for Ease {
    type Error = TweenError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ease::ALL
            .get(code as usize)
            .copied()
            .ok_or(TweenError::UnknownEase(code))
    }
}
