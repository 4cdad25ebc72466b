//! Thumb ring indicator shared by the picker surfaces.

use floem::context::PaintCx;
use floem::kurbo::{Circle, Point, Stroke};
use floem::peniko::Color;
use floem_renderer::Renderer;

use crate::constants;

/// Paint the triple-ring thumb: faint outlines around a contrast ring.
///
/// The ring color is white over saturated regions and near-black in the
/// near-white corner of the panel, where white would vanish.
pub(crate) fn paint_thumb_ring(cx: &mut PaintCx, center: Point, ring: Color) {
    let radius = constants::THUMB_RADIUS;
    let outer = Circle::new(center, radius);
    cx.stroke(&outer, Color::rgba8(0, 0, 0, 80), &Stroke::new(1.0));
    let mid = Circle::new(center, radius - 1.5);
    cx.stroke(&mid, ring, &Stroke::new(2.0));
    let inner = Circle::new(center, radius - 3.0);
    cx.stroke(&inner, Color::rgba8(0, 0, 0, 80), &Stroke::new(1.0));
}

/// Ring color for the current contrast choice.
pub(crate) fn ring_color(dark: bool) -> Color {
    if dark {
        Color::rgba8(0, 0, 0, 178)
    } else {
        Color::WHITE
    }
}
