//! Hsva type — the canonical color representation for floem-hsva.
//!
//! Stores hue in degrees and saturation/value/alpha as f64 in 0.0–1.0.
//! Uses direct math for color space conversions; string parsing follows
//! the CSS-like grammars `#hex`, `rgb()`/`rgba()`, `hsl()`/`hsla()` and
//! `hsv()`/`hsva()`.

use std::str::FromStr;

use thiserror::Error;

use crate::math;

/// Output formats for rendered color strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorFormat {
    /// `rgb(r, g, b)` / `rgba(r, g, b, a)` — the default.
    #[default]
    Rgb,
    /// `#rrggbb`, lowercase.
    Hex,
    /// `hsl(h, s%, l%)` / `hsla(h, s%, l%, a)`.
    Hsl,
    /// `hsv(h, s%, v%)` / `hsva(h, s%, v%, a)`.
    Hsv,
}

/// A color string that matches none of the supported grammars, or whose
/// derived RGB fails the range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unparseable color string")]
pub struct ParseColorError;

/// HSVA color with hue in degrees and s/v/a in the 0.0–1.0 range.
///
/// Hue spans 0–360 inclusive; 360 is kept distinct from 0 so a hue thumb
/// can rest at the strip's right edge. Conversions wrap hue modulo 360.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsva {
    h: f64,
    s: f64,
    v: f64,
    a: f64,
}

impl Default for Hsva {
    /// The reset color: h = 360, s = 1, v = 1, a = 1 (full-intensity red
    /// at the far edge of the hue strip).
    fn default() -> Self {
        Self {
            h: 360.0,
            s: 1.0,
            v: 1.0,
            a: 1.0,
        }
    }
}

fn clamp01(x: f64) -> f64 {
    if x.is_finite() {
        x.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

impl Hsva {
    /// Create a color, wrapping hue into 0–360 and clamping s/v/a to 0–1.
    pub fn new(h: f64, s: f64, v: f64, a: f64) -> Self {
        let h = if h.is_finite() {
            if (0.0..=360.0).contains(&h) {
                h
            } else {
                h.rem_euclid(360.0)
            }
        } else {
            0.0
        };
        Self {
            h,
            s: clamp01(s),
            v: clamp01(v),
            a: clamp01(a),
        }
    }

    /// Hue in degrees (0–360).
    pub fn h(&self) -> f64 {
        self.h
    }
    /// Saturation (0.0–1.0).
    pub fn s(&self) -> f64 {
        self.s
    }
    /// Value/brightness (0.0–1.0).
    pub fn v(&self) -> f64 {
        self.v
    }
    /// Alpha (0.0–1.0).
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Create from 0–255 RGB values with full opacity.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let (h, s, v) = math::rgb_to_hsv(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
        Self::new(h, s, v, 1.0)
    }

    /// Convert to 0–255 RGB, rounding each channel to the nearest integer.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let (r, g, b) = math::hsv_to_rgb(self.h, self.s, self.v);
        (
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
        )
    }

    /// RGB channels as normalized f64, for rasterizing.
    pub(crate) fn to_rgb_unit(&self) -> (f64, f64, f64) {
        math::hsv_to_rgb(self.h, self.s, self.v)
    }

    /// Format as `#rrggbb` (lowercase).
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        rgb_to_hex(r, g, b)
    }

    /// Render the color in `format`. Hue and percentages are rounded to
    /// integers; alpha (appended only when `with_alpha` is set, and never
    /// for hex) is printed as a plain decimal in 0–1.
    pub fn format(&self, format: ColorFormat, with_alpha: bool) -> String {
        match format {
            ColorFormat::Hex => self.to_hex(),
            ColorFormat::Rgb => {
                let (r, g, b) = self.to_rgb8();
                if with_alpha {
                    format!("rgba({}, {}, {}, {})", r, g, b, self.a)
                } else {
                    format!("rgb({}, {}, {})", r, g, b)
                }
            }
            ColorFormat::Hsl => {
                let (h, s, l) = math::hsv_to_hsl(self.h, self.s, self.v);
                let (h, s, l) = (
                    h.round() as i64,
                    (s * 100.0).round() as i64,
                    (l * 100.0).round() as i64,
                );
                if with_alpha {
                    format!("hsla({}, {}%, {}%, {})", h, s, l, self.a)
                } else {
                    format!("hsl({}, {}%, {}%)", h, s, l)
                }
            }
            ColorFormat::Hsv => {
                let (h, s, v) = (
                    self.h.round() as i64,
                    (self.s * 100.0).round() as i64,
                    (self.v * 100.0).round() as i64,
                );
                if with_alpha {
                    format!("hsva({}, {}%, {}%, {})", h, s, v, self.a)
                } else {
                    format!("hsv({}, {}%, {}%)", h, s, v)
                }
            }
        }
    }
}

/// Parse a hex color (leading `#` optional, 3 or 6 digits). The 3-digit
/// form expands by doubling each nibble.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let stripped = hex.strip_prefix('#').unwrap_or(hex);
    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match stripped.len() {
        3 => {
            let r = u8::from_str_radix(&stripped[0..1], 16).ok()?;
            let g = u8::from_str_radix(&stripped[1..2], 16).ok()?;
            let b = u8::from_str_radix(&stripped[2..3], 16).ok()?;
            Some((r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&stripped[0..2], 16).ok()?;
            let g = u8::from_str_radix(&stripped[2..4], 16).ok()?;
            let b = u8::from_str_radix(&stripped[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Format 0–255 channels as `#rrggbb`, lowercase and zero-padded.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Parsed components before the acceptance gate; may be out of range.
struct RawHsva {
    h: f64,
    s: f64,
    v: f64,
    a: f64,
}

/// Alpha defaulting: a missing, non-numeric, non-finite or out-of-0–1
/// value becomes 1.
fn parse_alpha(raw: Option<&str>) -> f64 {
    match raw.and_then(|s| s.trim().parse::<f64>().ok()) {
        Some(a) if a.is_finite() && (0.0..=1.0).contains(&a) => a,
        _ => 1.0,
    }
}

/// Strip `name`, an optional single space, and the surrounding parens
/// from a lowercased `name(...)` call, returning the argument body.
fn strip_call<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(name)?;
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    let body = rest.strip_prefix('(')?;
    let body = body.trim();
    Some(body.strip_suffix(')').unwrap_or(body))
}

fn split_args(body: &str) -> Vec<&str> {
    body.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect()
}

/// A number with an optional trailing `%`, scaled from percent to 0–1.
fn parse_percent(raw: &str) -> Option<f64> {
    let raw = raw.strip_suffix('%').unwrap_or(raw);
    raw.trim().parse::<f64>().ok().map(|v| v / 100.0)
}

fn parse_components(input: &str) -> Option<RawHsva> {
    let lower = input.trim().to_ascii_lowercase();
    if lower.is_empty() {
        return None;
    }

    // hex
    if lower.starts_with('#') {
        let (r, g, b) = hex_to_rgb(&lower)?;
        let (h, s, v) = math::rgb_to_hsv(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
        return Some(RawHsva { h, s, v, a: 1.0 });
    }

    // rgb / rgba
    if let Some(body) = strip_call(&lower, "rgba").or_else(|| strip_call(&lower, "rgb")) {
        let args = split_args(body);
        if args.len() < 3 {
            return None;
        }
        let r = args[0].parse::<f64>().ok()?;
        let g = args[1].parse::<f64>().ok()?;
        let b = args[2].parse::<f64>().ok()?;
        let a = parse_alpha(args.get(3).copied());
        // Components are not range-checked here; the derived RGB gate in
        // FromStr is the acceptance test.
        let (h, s, v) = math::rgb_to_hsv(r / 255.0, g / 255.0, b / 255.0);
        return Some(RawHsva { h, s, v, a });
    }

    // hsv / hsva
    if let Some(body) = strip_call(&lower, "hsva").or_else(|| strip_call(&lower, "hsv")) {
        let args = split_args(body);
        if args.len() < 3 {
            return None;
        }
        let h = args[0].parse::<f64>().ok()?;
        let s = parse_percent(args[1])?;
        let v = parse_percent(args[2])?;
        let a = parse_alpha(args.get(3).copied());
        return Some(RawHsva { h, s, v, a });
    }

    // hsl / hsla
    if let Some(body) = strip_call(&lower, "hsla").or_else(|| strip_call(&lower, "hsl")) {
        let args = split_args(body);
        if args.len() < 3 {
            return None;
        }
        let h = args[0].parse::<f64>().ok()?;
        let s = parse_percent(args[1])?;
        let l = parse_percent(args[2])?;
        let a = parse_alpha(args.get(3).copied());
        let (h, s, v) = math::hsl_to_hsv(h, s, l);
        return Some(RawHsva { h, s, v, a });
    }

    None
}

/// Grammar and range check for a rendered `rgb(r, g, b)` string: exact
/// shape with three integer channels in 0–255. Acceptance oracle for
/// parse results, run on the re-rendered derived RGB.
pub(crate) fn check_color(color: &str) -> bool {
    let Some(body) = color.strip_prefix("rgb(") else {
        return false;
    };
    let Some(body) = body.strip_suffix(')') else {
        return false;
    };
    let mut channels = 0;
    for part in body.split(',') {
        channels += 1;
        if channels > 3 {
            return false;
        }
        let Ok(c) = part.trim().parse::<i64>() else {
            return false;
        };
        if !(0..=255).contains(&c) {
            return false;
        }
    }
    channels == 3
}

impl FromStr for Hsva {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = parse_components(s).ok_or(ParseColorError)?;
        // Re-render the derived RGB and gate on the explicit validator.
        let (r, g, b) = math::hsv_to_rgb(raw.h, raw.s, raw.v);
        if !(r.is_finite() && g.is_finite() && b.is_finite()) {
            return Err(ParseColorError);
        }
        let rendered = format!(
            "rgb({}, {}, {})",
            (r * 255.0).round() as i64,
            (g * 255.0).round() as i64,
            (b * 255.0).round() as i64
        );
        if !check_color(&rendered) {
            log::debug!("rejected color string {s:?} (derived {rendered})");
            return Err(ParseColorError);
        }
        Ok(Hsva::new(raw.h, raw.s, raw.v, raw.a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── hex ───────────────────────────────────────────────────

    #[test]
    fn hex_six_digit() {
        assert_eq!(hex_to_rgb("#6bc30d"), Some((107, 195, 13)));
        assert_eq!(hex_to_rgb("6bc30d"), Some((107, 195, 13)));
    }

    #[test]
    fn hex_three_digit_doubles_nibbles() {
        assert_eq!(hex_to_rgb("#f80"), Some((255, 136, 0)));
        assert_eq!(hex_to_rgb("fff"), Some((255, 255, 255)));
    }

    #[test]
    fn hex_rejects_bad_lengths_and_digits() {
        assert_eq!(hex_to_rgb("#12"), None);
        assert_eq!(hex_to_rgb("#12345"), None);
        assert_eq!(hex_to_rgb("#12345678"), None);
        assert_eq!(hex_to_rgb("#gg0000"), None);
    }

    #[test]
    fn hex_formatting_is_lowercase_padded() {
        assert_eq!(rgb_to_hex(0, 160, 255), "#00a0ff");
        assert_eq!(rgb_to_hex(255, 255, 255), "#ffffff");
    }

    #[test]
    fn hex_round_trip() {
        for hex in ["#000000", "#6bc30d", "#ffffff", "#0a0b0c"] {
            let (r, g, b) = hex_to_rgb(hex).unwrap();
            assert_eq!(rgb_to_hex(r, g, b), hex);
        }
    }

    // ── parsing ───────────────────────────────────────────────

    #[test]
    fn parse_hex_string() {
        let c: Hsva = "#6bc30d".parse().unwrap();
        assert_eq!(c.to_rgb8(), (107, 195, 13));
        assert_eq!(c.a(), 1.0);
    }

    #[test]
    fn parse_rgb_alpha_defaults() {
        assert_eq!("rgb(10, 20, 30)".parse::<Hsva>().unwrap().a(), 1.0);
        assert_eq!("rgba(10, 20, 30, 0.5)".parse::<Hsva>().unwrap().a(), 0.5);
        // Out-of-range alpha defaults to 1
        assert_eq!("rgba(10, 20, 30, 9)".parse::<Hsva>().unwrap().a(), 1.0);
        assert_eq!("rgba(10, 20, 30, foo)".parse::<Hsva>().unwrap().a(), 1.0);
    }

    #[test]
    fn parse_is_case_insensitive_and_tolerates_a_space() {
        assert!("RGB (255, 0, 0)".parse::<Hsva>().is_ok());
        assert!("  HSL(120, 50%, 50%)  ".parse::<Hsva>().is_ok());
    }

    #[test]
    fn parse_hsv_string_direct() {
        let c: Hsva = "hsv(200, 40%, 80%)".parse().unwrap();
        assert_eq!(c.h(), 200.0);
        assert!((c.s() - 0.4).abs() < 1e-9);
        assert!((c.v() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn parse_hsl_string_converts() {
        // hsl(0, 100%, 50%) is pure red
        let c: Hsva = "hsla(0, 100%, 50%, 0.25)".parse().unwrap();
        assert_eq!(c.to_rgb8(), (255, 0, 0));
        assert_eq!(c.a(), 0.25);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("not-a-color".parse::<Hsva>().is_err());
        assert!("".parse::<Hsva>().is_err());
        assert!("   ".parse::<Hsva>().is_err());
        assert!("rgb(1, 2)".parse::<Hsva>().is_err());
        assert!("rgb(a, b, c)".parse::<Hsva>().is_err());
        assert!("hsb(1, 2, 3)".parse::<Hsva>().is_err());
    }

    #[test]
    fn parse_rejects_out_of_range_rgb() {
        assert!("rgb(300, 0, 0)".parse::<Hsva>().is_err());
        // All-negative channels overflow downward
        assert!("rgb(-10, -20, -30)".parse::<Hsva>().is_err());
        // A negative channel under a zero max degrades to black
        assert_eq!(
            "rgb(-10, 0, 0)".parse::<Hsva>().unwrap().to_rgb8(),
            (0, 0, 0)
        );
    }

    #[test]
    fn check_color_grammar() {
        assert!(check_color("rgb(0, 0, 0)"));
        assert!(check_color("rgb(255, 128, 1)"));
        assert!(!check_color("rgb(256, 0, 0)"));
        assert!(!check_color("rgb(-1, 0, 0)"));
        assert!(!check_color("rgb(1, 2)"));
        assert!(!check_color("rgb(1, 2, 3, 4)"));
        assert!(!check_color("rgba(1, 2, 3)"));
        assert!(!check_color("rgb(1, 2, 3"));
    }

    // ── formatting ────────────────────────────────────────────

    #[test]
    fn format_rgb_and_rgba() {
        let c = Hsva::from_rgb8(107, 195, 13);
        assert_eq!(c.format(ColorFormat::Rgb, false), "rgb(107, 195, 13)");
        assert_eq!(c.format(ColorFormat::Rgb, true), "rgba(107, 195, 13, 1)");
        let c = Hsva::new(c.h(), c.s(), c.v(), 0.5);
        assert_eq!(c.format(ColorFormat::Rgb, true), "rgba(107, 195, 13, 0.5)");
    }

    #[test]
    fn format_hsv_default_color() {
        let c = Hsva::default();
        assert_eq!(c.format(ColorFormat::Hsv, false), "hsv(360, 100%, 100%)");
        assert_eq!(c.format(ColorFormat::Hsv, true), "hsva(360, 100%, 100%, 1)");
    }

    #[test]
    fn format_hsl_rounds_percentages() {
        let c: Hsva = "hsv(120, 100%, 100%)".parse().unwrap();
        assert_eq!(c.format(ColorFormat::Hsl, false), "hsl(120, 100%, 50%)");
    }

    #[test]
    fn format_hex_never_carries_alpha() {
        let c = Hsva::new(0.0, 1.0, 1.0, 0.5);
        assert_eq!(c.format(ColorFormat::Hex, true), "#ff0000");
    }

    // ── type invariants ───────────────────────────────────────

    #[test]
    fn new_wraps_and_clamps() {
        let c = Hsva::new(540.0, 2.0, -1.0, 7.0);
        assert_eq!(c.h(), 180.0);
        assert_eq!(c.s(), 1.0);
        assert_eq!(c.v(), 0.0);
        assert_eq!(c.a(), 1.0);
    }

    #[test]
    fn new_keeps_hue_360() {
        assert_eq!(Hsva::new(360.0, 1.0, 1.0, 1.0).h(), 360.0);
    }

    #[test]
    fn default_is_red_edge() {
        let c = Hsva::default();
        assert_eq!((c.h(), c.s(), c.v(), c.a()), (360.0, 1.0, 1.0, 1.0));
        assert_eq!(c.to_rgb8(), (255, 0, 0));
    }
}
