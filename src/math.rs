//! HSV/RGB conversions on normalized channels.
//! All functions use normalized f64 in 0.0–1.0.

/// Below this, saturation or value carries no usable hue.
pub(crate) const DEGENERATE_EPSILON: f64 = 1e-3;

/// HSV → RGB. All values 0.0–1.0. A hue of 1.0 wraps to red.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let h6 = (h * 6.0) % 6.0;
    let i = h6.floor() as u32;
    let f = h6 - h6.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// RGB → HSV. All values 0.0–1.0.
///
/// Grey and black inputs have no defined hue; this returns 0.0 for them and
/// leaves the choice of a better hue to the caller.
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };

    (h, s, v)
}

/// True when an HSV triple sits on the grey axis or at black, where the hue
/// cannot be recovered from RGB.
pub(crate) fn is_degenerate(s: f64, v: f64) -> bool {
    s < DEGENERATE_EPSILON || v < DEGENERATE_EPSILON
}

/// RGB → HSV for a color replacing one whose hue was `previous_hue`.
///
/// S and V always come from the conversion. H does too, unless the result is
/// degenerate (S or V below 1e-3), in which case `previous_hue` is kept so the
/// hue handle stays where the user left it.
pub fn rgb_to_hsv_keeping_hue(r: f64, g: f64, b: f64, previous_hue: f64) -> (f64, f64, f64) {
    let (h, s, v) = rgb_to_hsv(r, g, b);
    if is_degenerate(s, v) {
        (previous_hue, s, v)
    } else {
        (h, s, v)
    }
}
