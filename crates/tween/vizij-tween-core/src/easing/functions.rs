//! Easing curves as plain `fn(f32) -> f32`.
//!
//! Curves that stay inside [0,1] on [0,1] clamp their upper bound at 1 so a
//! tick pushed past the end never overshoots. Back, elastic, bounce and spring
//! curves leave overshoot alone.

use core::f32::consts::PI;

use super::bezier::{cubic_bezier_ease, quadratic_bezier};

const BACK_C1: f32 = 1.70158;
const BACK_C2: f32 = BACK_C1 * 1.525;
const BACK_C3: f32 = BACK_C1 + 1.0;
const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f32 = (2.0 * PI) / 4.5;

#[inline]
fn cap(v: f32) -> f32 {
    v.min(1.0)
}

#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

#[inline]
pub fn quad_in(t: f32) -> f32 {
    cap(t * t)
}

#[inline]
pub fn quad_out(t: f32) -> f32 {
    cap(1.0 - (1.0 - t) * (1.0 - t))
}

#[inline]
pub fn quad_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        cap(1.0 - (-2.0 * t + 2.0).powi(2) / 2.0)
    }
}

#[inline]
pub fn cubic_in(t: f32) -> f32 {
    cap(t * t * t)
}

#[inline]
pub fn cubic_out(t: f32) -> f32 {
    cap(1.0 - (1.0 - t).powi(3))
}

#[inline]
pub fn cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        cap(1.0 - (-2.0 * t + 2.0).powi(3) / 2.0)
    }
}

#[inline]
pub fn quart_in(t: f32) -> f32 {
    cap(t * t * t * t)
}

#[inline]
pub fn quart_out(t: f32) -> f32 {
    cap(1.0 - (1.0 - t).powi(4))
}

#[inline]
pub fn quart_in_out(t: f32) -> f32 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        cap(1.0 - (-2.0 * t + 2.0).powi(4) / 2.0)
    }
}

#[inline]
pub fn quint_in(t: f32) -> f32 {
    cap(t * t * t * t * t)
}

#[inline]
pub fn quint_out(t: f32) -> f32 {
    cap(1.0 - (1.0 - t).powi(5))
}

#[inline]
pub fn quint_in_out(t: f32) -> f32 {
    if t < 0.5 {
        16.0 * t * t * t * t * t
    } else {
        cap(1.0 - (-2.0 * t + 2.0).powi(5) / 2.0)
    }
}

#[inline]
pub fn sine_in(t: f32) -> f32 {
    cap(1.0 - ((t * PI) / 2.0).cos())
}

#[inline]
pub fn sine_out(t: f32) -> f32 {
    cap(((t * PI) / 2.0).sin())
}

#[inline]
pub fn sine_in_out(t: f32) -> f32 {
    cap(-((PI * t).cos() - 1.0) / 2.0)
}

#[inline]
pub fn expo_in(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else {
        cap(2f32.powf(10.0 * t - 10.0))
    }
}

#[inline]
pub fn expo_out(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f32.powf(-10.0 * t)
    }
}

#[inline]
pub fn expo_in_out(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        2f32.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
    }
}

// Circular curves are only defined on [0,1]; the sqrt would go NaN outside.

#[inline]
pub fn circ_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t * t).sqrt()
}

#[inline]
pub fn circ_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (1.0 - (t - 1.0) * (t - 1.0)).sqrt()
}

#[inline]
pub fn circ_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
    } else {
        ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
    }
}

#[inline]
pub fn back_in(t: f32) -> f32 {
    BACK_C3 * t * t * t - BACK_C1 * t * t
}

#[inline]
pub fn back_out(t: f32) -> f32 {
    1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2)
}

#[inline]
pub fn back_in_out(t: f32) -> f32 {
    if t < 0.5 {
        ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
    } else {
        ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2) + 2.0) / 2.0
    }
}

#[inline]
pub fn elastic_in(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        -(2f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
    }
}

#[inline]
pub fn elastic_out(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
    }
}

#[inline]
pub fn elastic_in_out(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        -(2f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
    } else {
        (2f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0 + 1.0
    }
}

#[inline]
pub fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

#[inline]
pub fn bounce_in(t: f32) -> f32 {
    1.0 - bounce_out(1.0 - t)
}

#[inline]
pub fn bounce_in_out(t: f32) -> f32 {
    if t < 0.5 {
        (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
    } else {
        (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
    }
}

/// Loose spring: overshoots and settles with a decaying wobble.
#[inline]
pub fn spring(t: f32) -> f32 {
    let rest = (1.0 - t).max(0.0);
    ((t * PI * (0.2 + 2.5 * t * t * t)).sin() * rest.powf(2.2) + t) * (1.0 + 1.2 * (1.0 - t))
}

/// Stiffer spring: more wobbles, smaller amplitude.
#[inline]
pub fn spring_tight(t: f32) -> f32 {
    let rest = (1.0 - t).max(0.0);
    ((t * PI * (0.4 + 4.0 * t * t * t)).sin() * rest * rest * rest + t) * (1.0 + 0.6 * (1.0 - t))
}

#[inline]
fn weighted(t: f32) -> f32 {
    t * t * (0.35 + 0.65 * t)
}

/// Asymmetric ease-in: quadratic start blended into a cubic body.
#[inline]
pub fn weighted_in(t: f32) -> f32 {
    cap(weighted(t))
}

/// Mirror of [`weighted_in`].
#[inline]
pub fn weighted_out(t: f32) -> f32 {
    cap(1.0 - weighted(1.0 - t))
}

#[inline]
pub fn quad_bezier(t: f32) -> f32 {
    cap(quadratic_bezier(0.0, 0.75, 1.0, t))
}

#[inline]
pub fn bezier_in(t: f32) -> f32 {
    cubic_bezier_ease(t, 0.42, 0.0, 1.0, 1.0)
}

#[inline]
pub fn bezier_out(t: f32) -> f32 {
    cubic_bezier_ease(t, 0.0, 0.0, 0.58, 1.0)
}

#[inline]
pub fn bezier_in_out(t: f32) -> f32 {
    cubic_bezier_ease(t, 0.42, 0.0, 0.58, 1.0)
}

/// Fast start, hard stop.
#[inline]
pub fn bezier_brake(t: f32) -> f32 {
    cubic_bezier_ease(t, 0.0, 0.9, 0.15, 1.0)
}
