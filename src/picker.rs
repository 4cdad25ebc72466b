//! Picker state controller: canonical HSVA components plus the
//! coordinate→color arithmetic shared by the drag surfaces.
//!
//! Host-agnostic — the Floem views in this crate drive it through
//! [`crate::drag::DragController`] hooks, but any host that can deliver
//! clamped coordinates can do the same.

use crate::color::{ColorFormat, Hsva};
use crate::drag::{Coordinate, SurfaceRect};
use crate::math;

/// Change notification: the formatted value plus the raw HSVA snapshot.
pub type ChangeFn = Box<dyn Fn(&str, Hsva)>;

/// Construction options.
#[derive(Default)]
pub struct PickerOptions {
    /// Initial color string; unparseable or absent values fall back to
    /// the default color.
    pub value: Option<String>,
    /// Output format for [`PickerState::get_value`].
    pub format: ColorFormat,
    /// Whether alpha is user-adjustable and included in output strings.
    pub alpha: bool,
    /// Invoked on every committed color change.
    pub change: Option<ChangeFn>,
}

/// Owns the canonical HSVA state for one picker instance.
pub struct PickerState {
    h: f64,
    s: f64,
    v: f64,
    a: f64,
    format: ColorFormat,
    alpha: bool,
    change: Option<ChangeFn>,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Division guarded against a zero-measured surface dimension, which
/// occurs transiently before first layout.
fn ratio(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole
    } else {
        0.0
    }
}

impl PickerState {
    /// Create a controller, applying `options.value` (when parseable)
    /// without firing the change callback.
    pub fn new(options: PickerOptions) -> Self {
        let mut state = Self {
            h: 0.0,
            s: 0.0,
            v: 0.0,
            a: 0.0,
            format: options.format,
            alpha: options.alpha,
            change: options.change,
        };
        state.reset();
        if let Some(value) = options.value.as_deref() {
            state.apply(value);
        }
        state
    }

    fn reset(&mut self) {
        self.store(Hsva::default());
    }

    fn store(&mut self, color: Hsva) {
        self.h = color.h();
        self.s = color.s();
        self.v = color.v();
        self.a = color.a();
    }

    /// Parse and store `value`. Unparseable input leaves the state
    /// untouched and returns false.
    fn apply(&mut self, value: &str) -> bool {
        match value.parse::<Hsva>() {
            Ok(color) => {
                self.store(color);
                true
            }
            Err(_) => {
                log::debug!("ignoring unparseable color value {value:?}");
                false
            }
        }
    }

    fn notify(&self) {
        if let Some(change) = &self.change {
            change(&self.get_value(), self.hsva());
        }
    }

    /// Snapshot of the current color.
    pub fn hsva(&self) -> Hsva {
        Hsva::new(self.h, self.s, self.v, self.a)
    }

    /// Whether alpha is adjustable/rendered for this instance.
    pub fn alpha_enabled(&self) -> bool {
        self.alpha
    }

    /// Replace the color. `None` resets to the default color; a string
    /// that fails parsing or validation is a no-op. Committed changes
    /// fire the change callback.
    pub fn set_value(&mut self, value: Option<&str>) {
        match value {
            None => {
                self.reset();
                self.notify();
            }
            Some(v) => {
                if self.apply(v) {
                    self.notify();
                }
            }
        }
    }

    /// Current color in the instance's configured format.
    pub fn get_value(&self) -> String {
        self.get_value_as(self.format)
    }

    /// Current color in an explicit format. Alpha is omitted whenever the
    /// instance's alpha option is off.
    pub fn get_value_as(&self, format: ColorFormat) -> String {
        self.hsva().format(format, self.alpha)
    }

    // ── drag surface arithmetic ───────────────────────────────

    /// Saturation/value panel: left maps to saturation, top to value
    /// (inverted), both rounded to two decimals.
    pub fn sat_drag(&mut self, coordinate: Coordinate, surface: SurfaceRect) {
        self.s = round2(ratio(coordinate.left, surface.width));
        self.v = round2(1.0 - ratio(coordinate.top, surface.height));
        self.notify();
    }

    /// Hue strip: left maps to degrees across the full wheel.
    pub fn hue_drag(&mut self, coordinate: Coordinate, surface: SurfaceRect) {
        self.h = round2(ratio(coordinate.left, surface.width) * 360.0);
        self.notify();
    }

    /// Alpha strip: left maps to opacity.
    pub fn alpha_drag(&mut self, coordinate: Coordinate, surface: SurfaceRect) {
        self.a = round2(ratio(coordinate.left, surface.width));
        self.notify();
    }

    // ── inverse mapping for rendering ─────────────────────────

    /// Thumb position on the saturation/value panel, in whole pixels.
    pub fn sat_thumb(&self, surface: SurfaceRect) -> Coordinate {
        Coordinate {
            left: (self.s * surface.width).round(),
            top: ((1.0 - self.v) * surface.height).round(),
        }
    }

    /// Thumb offset on the hue strip.
    pub fn hue_thumb_left(&self, width: f64) -> f64 {
        (self.h / 360.0 * width).round()
    }

    /// Thumb offset on the alpha strip.
    pub fn alpha_thumb_left(&self, width: f64) -> f64 {
        self.a * width
    }

    /// Panel background: the current hue at full saturation and value.
    pub fn panel_rgb(&self) -> (f64, f64, f64) {
        math::hsv_to_rgb(self.h, 1.0, 1.0)
    }

    /// The current color's RGB channels, for the alpha gradient.
    pub fn current_rgb(&self) -> (f64, f64, f64) {
        math::hsv_to_rgb(self.h, self.s, self.v)
    }

    /// The thumb indicator flips dark in the near-white corner of the
    /// panel, where a white ring would vanish.
    pub fn thumb_is_dark(&self) -> bool {
        self.s <= 0.2 && self.v >= 0.8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_picker(
        value: Option<&str>,
        format: ColorFormat,
        alpha: bool,
    ) -> (PickerState, Rc<RefCell<Vec<(String, Hsva)>>>) {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let state = PickerState::new(PickerOptions {
            value: value.map(str::to_string),
            format,
            alpha,
            change: Some(Box::new({
                let changes = changes.clone();
                move |css: &str, c| changes.borrow_mut().push((css.to_string(), c))
            })),
        });
        (state, changes)
    }

    fn panel() -> SurfaceRect {
        SurfaceRect::from_size(200.0, 150.0)
    }

    // ── construction & set_value ──────────────────────────────

    #[test]
    fn starts_at_default_color() {
        let state = PickerState::new(PickerOptions::default());
        let c = state.hsva();
        assert_eq!((c.h(), c.s(), c.v(), c.a()), (360.0, 1.0, 1.0, 1.0));
        assert_eq!(state.get_value(), "rgb(255, 0, 0)");
    }

    #[test]
    fn initial_value_is_applied_silently() {
        let (state, changes) = recording_picker(Some("#6bc30d"), ColorFormat::Rgb, true);
        assert_eq!(state.get_value_as(ColorFormat::Hex), "#6bc30d");
        assert_eq!(state.get_value(), "rgba(107, 195, 13, 1)");
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn bad_initial_value_falls_back_to_default() {
        let (state, _) = recording_picker(Some("bogus"), ColorFormat::Hsv, false);
        assert_eq!(state.get_value(), "hsv(360, 100%, 100%)");
    }

    #[test]
    fn set_value_none_resets_and_notifies() {
        let (mut state, changes) = recording_picker(Some("#123456"), ColorFormat::Hsv, true);
        state.set_value(None);
        assert_eq!(state.get_value(), "hsva(360, 100%, 100%, 1)");
        let changes = changes.borrow();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].0, "hsva(360, 100%, 100%, 1)");
        assert_eq!(changes[0].1.h(), 360.0);
    }

    #[test]
    fn set_value_replaces_all_components() {
        let (mut state, changes) = recording_picker(None, ColorFormat::Rgb, true);
        state.set_value(Some("rgba(10, 20, 30, 0.5)"));
        assert_eq!(state.get_value(), "rgba(10, 20, 30, 0.5)");
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn unparseable_set_value_is_a_silent_no_op() {
        let (mut state, changes) = recording_picker(Some("#6bc30d"), ColorFormat::Hex, false);
        state.set_value(Some("not-a-color"));
        state.set_value(Some(""));
        state.set_value(Some("rgb(300, 0, 0)"));
        assert_eq!(state.get_value(), "#6bc30d");
        assert!(changes.borrow().is_empty());
    }

    // ── formatting options ────────────────────────────────────

    #[test]
    fn default_format_is_rgb_without_alpha() {
        let state = PickerState::new(PickerOptions {
            value: Some("rgba(1, 2, 3, 0.5)".to_string()),
            ..Default::default()
        });
        // Alpha tracked internally but omitted while the option is off
        assert_eq!(state.get_value(), "rgb(1, 2, 3)");
        assert_eq!(state.hsva().a(), 0.5);
    }

    #[test]
    fn explicit_format_overrides_configured_one() {
        let (state, _) = recording_picker(Some("#ff0000"), ColorFormat::Rgb, false);
        assert_eq!(state.get_value_as(ColorFormat::Hsl), "hsl(0, 100%, 50%)");
        assert_eq!(state.get_value_as(ColorFormat::Hex), "#ff0000");
    }

    // ── drag arithmetic ───────────────────────────────────────

    #[test]
    fn sat_drag_maps_and_rounds() {
        let (mut state, changes) = recording_picker(None, ColorFormat::Rgb, false);
        state.sat_drag(
            Coordinate {
                top: 30.0,
                left: 150.0,
            },
            panel(),
        );
        let c = state.hsva();
        assert_eq!(c.s(), 0.75);
        assert_eq!(c.v(), 0.8);
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn sat_drag_rounds_to_two_decimals() {
        let (mut state, _) = recording_picker(None, ColorFormat::Rgb, false);
        state.sat_drag(
            Coordinate {
                top: 100.0,
                left: 100.5,
            },
            SurfaceRect::from_size(233.0, 233.0),
        );
        let c = state.hsva();
        assert_eq!(c.s(), 0.43);
        assert_eq!(c.v(), 0.57);
    }

    #[test]
    fn hue_drag_maps_to_degrees() {
        let (mut state, _) = recording_picker(None, ColorFormat::Rgb, false);
        let strip = SurfaceRect::from_size(200.0, 12.0);
        state.hue_drag(
            Coordinate {
                top: 0.0,
                left: 50.0,
            },
            strip,
        );
        assert_eq!(state.hsva().h(), 90.0);
        state.hue_drag(
            Coordinate {
                top: 0.0,
                left: 200.0,
            },
            strip,
        );
        assert_eq!(state.hsva().h(), 360.0);
    }

    #[test]
    fn alpha_drag_maps_to_opacity() {
        let (mut state, _) = recording_picker(None, ColorFormat::Rgb, true);
        state.alpha_drag(
            Coordinate {
                top: 0.0,
                left: 60.0,
            },
            SurfaceRect::from_size(240.0, 12.0),
        );
        assert_eq!(state.hsva().a(), 0.25);
    }

    #[test]
    fn zero_sized_surface_contributes_zero() {
        let (mut state, _) = recording_picker(None, ColorFormat::Rgb, false);
        state.sat_drag(
            Coordinate {
                top: 10.0,
                left: 10.0,
            },
            SurfaceRect::from_size(0.0, 0.0),
        );
        let c = state.hsva();
        assert_eq!(c.s(), 0.0);
        assert_eq!(c.v(), 1.0);
    }

    #[test]
    fn change_reports_formatted_value_and_snapshot() {
        let (mut state, changes) = recording_picker(None, ColorFormat::Hsv, false);
        state.hue_drag(
            Coordinate {
                top: 0.0,
                left: 100.0,
            },
            SurfaceRect::from_size(200.0, 12.0),
        );
        let changes = changes.borrow();
        assert_eq!(changes[0].0, "hsv(180, 100%, 100%)");
        assert_eq!(changes[0].1.h(), 180.0);
    }

    // ── rendering helpers ─────────────────────────────────────

    #[test]
    fn sat_thumb_is_the_inverse_mapping() {
        let (mut state, _) = recording_picker(None, ColorFormat::Rgb, false);
        state.sat_drag(
            Coordinate {
                top: 30.0,
                left: 150.0,
            },
            panel(),
        );
        assert_eq!(
            state.sat_thumb(panel()),
            Coordinate {
                top: 30.0,
                left: 150.0
            }
        );
    }

    #[test]
    fn strip_thumbs_follow_components() {
        let (state, _) = recording_picker(Some("hsva(90, 100%, 100%, 0.5)"), ColorFormat::Rgb, true);
        assert_eq!(state.hue_thumb_left(200.0), 50.0);
        assert_eq!(state.alpha_thumb_left(200.0), 100.0);
    }

    #[test]
    fn panel_background_ignores_current_sat_val() {
        let (state, _) = recording_picker(Some("hsv(120, 10%, 30%)"), ColorFormat::Rgb, false);
        assert_eq!(state.panel_rgb(), (0.0, 1.0, 0.0));
    }

    #[test]
    fn thumb_contrast_flips_near_white() {
        let (mut state, _) = recording_picker(None, ColorFormat::Rgb, false);
        state.sat_drag(
            Coordinate {
                top: 15.0,
                left: 20.0,
            },
            panel(),
        );
        // s = 0.1, v = 0.9 — near-white corner
        assert!(state.thumb_is_dark());
        state.sat_drag(
            Coordinate {
                top: 15.0,
                left: 180.0,
            },
            panel(),
        );
        assert!(!state.thumb_is_dark());
    }
}
