//! Saturation/value panel: the 2D drag surface.
//!
//! Renders the saturation × value field for the current hue as a
//! rasterized image (cached per hue and physical size, avoiding vger's
//! broken two-axis gradient handling), with a contrast-aware thumb ring.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use floem::kurbo::{Point, Rect};
use floem::peniko::{self, Blob, Color};

use floem::reactive::{create_effect, RwSignal, SignalGet};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::Hsva;
use crate::constants;
use crate::drag::{DragArbiter, DragController, SurfaceRect};
use crate::math;
use crate::picker::PickerState;
use crate::thumb;
use crate::widget::commit_hooks;

/// Rasterize the panel for a fixed hue: saturation sweeps left to right,
/// value sweeps bottom to top.
fn rasterize_panel(width: u32, height: u32, hue: f64) -> Vec<u8> {
    let mut buf = vec![0u8; (width * height * 4) as usize];
    for py in 0..height {
        let v = 1.0 - py as f64 / (height - 1).max(1) as f64;
        let row_offset = (py * width * 4) as usize;
        for px in 0..width {
            let s = px as f64 / (width - 1).max(1) as f64;
            let (r, g, b) = math::hsv_to_rgb(hue, s, v);
            let offset = row_offset + (px * 4) as usize;
            buf[offset] = (r * 255.0 + 0.5) as u8;
            buf[offset + 1] = (g * 255.0 + 0.5) as u8;
            buf[offset + 2] = (b * 255.0 + 0.5) as u8;
            buf[offset + 3] = 255;
        }
    }
    buf
}

pub(crate) struct SatValPanel {
    id: ViewId,
    drag: DragController,
    state: Rc<RefCell<PickerState>>,
    size: floem::taffy::prelude::Size<f32>,
    /// Cached field image for the current hue.
    panel_img: Option<peniko::Image>,
    panel_hash: Vec<u8>,
    cached_hue: u16,
    cached_dims: (u32, u32),
}

/// Creates the saturation/value panel surface.
pub(crate) fn sat_val_panel(
    state: Rc<RefCell<PickerState>>,
    mirror: RwSignal<Hsva>,
    arbiter: Rc<DragArbiter>,
) -> SatValPanel {
    let id = ViewId::new();

    create_effect(move |_| {
        let color = mirror.get();
        id.update_state(color);
    });

    let drag = DragController::new(
        arbiter,
        commit_hooks(state.clone(), mirror, PickerState::sat_drag),
    );

    SatValPanel {
        id,
        drag,
        state,
        size: Default::default(),
        panel_img: None,
        panel_hash: Vec::new(),
        cached_hue: u16::MAX,
        cached_dims: (0, 0),
    }
    .style(|s| {
        s.height(constants::PANEL_HEIGHT)
            .width_full()
            .border_radius(constants::RADIUS)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl SatValPanel {
    fn surface(&self) -> SurfaceRect {
        SurfaceRect::from_size(self.size.width as f64, self.size.height as f64)
    }

    fn ensure_panel_image(&mut self, scale: f64, hue: f64) {
        let s = scale.max(1.0);
        let pw = (self.size.width as f64 * s).round() as u32;
        let ph = (self.size.height as f64 * s).round() as u32;
        if pw == 0 || ph == 0 {
            return;
        }

        // Tenth-of-a-degree quantization is below what a drag can resolve
        let hue_key = (hue.rem_euclid(360.0) * 10.0).round() as u16;
        let dims = (pw, ph);
        if self.cached_dims == dims && self.cached_hue == hue_key {
            return;
        }

        let pixels = rasterize_panel(pw, ph, hue);
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, pw, ph);

        let id = blob.id();
        self.panel_hash = id.to_le_bytes().to_vec();
        self.panel_img = Some(img);
        self.cached_hue = hue_key;
        self.cached_dims = dims;
    }
}

impl View for SatValPanel {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if state.downcast::<Hsva>().is_ok() {
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                if self.drag.pointer_down(e.pos.x, e.pos.y, self.surface()) {
                    cx.update_active(self.id());
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerMove(e) => {
                if self.drag.pointer_move(e.pos.x, e.pos.y, self.surface()) {
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(e) => {
                self.drag.pointer_up(e.pos.x, e.pos.y, self.surface());
                EventPropagation::Continue
            }
            Event::FocusLost => {
                self.drag.teardown();
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::RADIUS as f64);

        let hue = self.state.borrow().hsva().h();

        cx.save();
        cx.clip(&rrect);
        let scale = cx.scale();
        self.ensure_panel_image(scale, hue);
        if let Some(ref img) = self.panel_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.panel_hash,
                },
                rect,
            );
        }
        cx.restore();

        // Panel outline
        cx.stroke(
            &rrect,
            Color::rgba8(0, 0, 0, 40),
            &floem::kurbo::Stroke::new(1.0),
        );

        // Thumb at the inverse mapping of the current saturation/value
        let (thumb_pos, dark) = {
            let state = self.state.borrow();
            (state.sat_thumb(self.surface()), state.thumb_is_dark())
        };
        thumb::paint_thumb_ring(
            cx,
            Point::new(thumb_pos.left, thumb_pos.top),
            thumb::ring_color(dark),
        );
    }
}
