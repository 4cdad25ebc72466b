//! # floem-hsva
//!
//! An HSV color picker widget for [Floem](https://github.com/lapce/floem).
//!
//! Provides a draggable saturation/value panel, a hue strip, and an
//! optional alpha strip, kept in sync with a canonical HSVA color state
//! and exposed through a change callback and RGB/HSL/HSV/hex string
//! conversion.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem_hsva::{hsva_picker, Picker, PickerOptions};
//!
//! let picker = Picker::new(PickerOptions {
//!     value: Some("#6bc30d".into()),
//!     alpha: true,
//!     ..Default::default()
//! });
//! // Use `hsva_picker(&picker)` in your Floem view tree;
//! // `picker.get_value()` / `picker.set_value(..)` from the outside.
//! ```
//!
//! The color conversion, drag-coordinate, and state-controller layers
//! ([`Hsva`], [`DragController`], [`PickerState`]) are plain types with
//! no rendering dependencies, usable on their own.

#[cfg(feature = "alpha")]
mod alpha_strip;
mod color;
mod constants;
mod drag;
mod hue_strip;
mod math;
mod picker;
mod sat_panel;
mod thumb;
mod widget;

pub use color::{hex_to_rgb, rgb_to_hex, ColorFormat, Hsva, ParseColorError};
pub use drag::{Coordinate, DragArbiter, DragController, DragHooks, SurfaceRect};
pub use picker::{ChangeFn, PickerOptions, PickerState};
pub use widget::Picker;

use floem::IntoView;

/// Creates the color picker view for an existing [`Picker`] handle.
///
/// The view reads from and writes to the handle's state: drags update the
/// color and fire the change callback, and `set_value` calls on the
/// handle are reflected in the UI.
pub fn hsva_picker(picker: &Picker) -> impl IntoView {
    picker.view()
}
