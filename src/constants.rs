//! Sizing, color, and styling constants for the picker.

/// Saturation/value panel height
pub const PANEL_HEIGHT: f32 = 150.0;

/// 1D strip track height
pub const STRIP_HEIGHT: f32 = 12.0;

/// Thumb ring radius on the panel and strips
pub const THUMB_RADIUS: f64 = 7.0;

/// Border radius for strip tracks
pub const RADIUS: f32 = 4.0;

/// Gap between picker elements
pub const GAP: f32 = 8.0;

/// Padding around the whole picker
pub const PADDING: f32 = 8.0;

/// Overall widget width
pub const PICKER_WIDTH: f32 = 232.0;

/// Checkerboard cell size (for the alpha background)
#[cfg(feature = "alpha")]
pub const CHECKER_CELL: f64 = 5.0;
