//! Color math — direct conversions without external dependencies.
//!
//! Hue is carried in degrees; saturation, value, lightness and the RGB
//! channels are normalized f64 in 0.0–1.0. Callers wrap/clamp before
//! storing results.

/// HSV → RGB. Hue in degrees (wrapped modulo 360), s/v 0.0–1.0.
pub(crate) fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let h6 = h.rem_euclid(360.0) / 60.0;
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

/// RGB → HSV. Channels 0.0–1.0; returned hue in degrees, [0, 360).
///
/// Achromatic input (max == min) yields h = 0.
pub(crate) fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) * 60.0
    } else if max == g {
        ((b - r) / delta + 2.0) * 60.0
    } else {
        ((r - g) / delta + 4.0) * 60.0
    };

    (h, s, v)
}

/// HSL → HSV. Hue in degrees, passed through untouched.
pub(crate) fn hsl_to_hsv(h: f64, s_hsl: f64, l: f64) -> (f64, f64, f64) {
    let v = l + s_hsl * l.min(1.0 - l);
    let s_hsv = if v == 0.0 { 0.0 } else { 2.0 * (1.0 - l / v) };
    (h, s_hsv, v)
}

/// HSV → HSL. Hue in degrees, passed through untouched.
///
/// Canonical formula: l = v·(1 − s/2), s_hsl = (v − l) / min(l, 1 − l).
/// Exact inverse of [`hsl_to_hsv`].
pub(crate) fn hsv_to_hsl(h: f64, s_hsv: f64, v: f64) -> (f64, f64, f64) {
    let l = v * (1.0 - s_hsv / 2.0);
    let s_hsl = if l == 0.0 || l == 1.0 {
        0.0
    } else {
        (v - l) / l.min(1.0 - l)
    };
    (h, s_hsl, l)
}
