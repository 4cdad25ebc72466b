//! Hue strip (0–360 degrees).
//!
//! Renders the full hue sweep at full saturation/value as a rasterized
//! image, avoiding vger's broken linear gradient coordinate handling.

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

/// Rasterize the hue sweep: 0° on the left through 360° on the right.
fn rasterize_hue_sweep(width: u32, height: u32) -> Vec<u8> {
    let mut buf = vec![0u8; (width * height * 4) as usize];
    for px in 0..width {
        let hue = px as f64 / (width - 1).max(1) as f64 * 360.0;
        let (r, g, b) = math::hsv_to_rgb(hue, 1.0, 1.0);
        let cr = (r * 255.0 + 0.5) as u8;
        let cg = (g * 255.0 + 0.5) as u8;
        let cb = (b * 255.0 + 0.5) as u8;
        for py in 0..height {
            let offset = ((py * width + px) * 4) as usize;
            buf[offset] = cr;
            buf[offset + 1] = cg;
            buf[offset + 2] = cb;
            buf[offset + 3] = 255;
        }
    }
    buf
}

pub(crate) struct HueStrip {
    id: ViewId,
    drag: DragController,
    state: Rc<RefCell<PickerState>>,
    size: floem::taffy::prelude::Size<f32>,
    /// Cached sweep image; only depends on the physical size.
    sweep_img: Option<peniko::Image>,
    sweep_hash: Vec<u8>,
    cached_dims: (u32, u32),
}

/// Creates the horizontal hue strip.
pub(crate) fn hue_strip(
    state: Rc<RefCell<PickerState>>,
    mirror: RwSignal<Hsva>,
    arbiter: Rc<DragArbiter>,
) -> HueStrip {
    let id = ViewId::new();

    create_effect(move |_| {
        let color = mirror.get();
        id.update_state(color);
    });

    let drag = DragController::new(
        arbiter,
        commit_hooks(state.clone(), mirror, PickerState::hue_drag),
    );

    HueStrip {
        id,
        drag,
        state,
        size: Default::default(),
        sweep_img: None,
        sweep_hash: Vec::new(),
        cached_dims: (0, 0),
    }
    .style(|s| {
        s.height(constants::STRIP_HEIGHT)
            .width_full()
            .border_radius(constants::RADIUS)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl HueStrip {
    fn surface(&self) -> SurfaceRect {
        SurfaceRect::from_size(self.size.width as f64, self.size.height as f64)
    }

    fn ensure_sweep_image(&mut self, scale: f64) {
        let s = scale.max(1.0);
        let pw = (self.size.width as f64 * s).round() as u32;
        let ph = (self.size.height as f64 * s).round() as u32;
        if pw == 0 || ph == 0 {
            return;
        }

        let dims = (pw, ph);
        if self.cached_dims == dims {
            return;
        }

        let pixels = rasterize_hue_sweep(pw, ph);
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, pw, ph);

        let id = blob.id();
        self.sweep_hash = id.to_le_bytes().to_vec();
        self.sweep_img = Some(img);
        self.cached_dims = dims;
    }
}

impl View for HueStrip {
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

        cx.save();
        cx.clip(&rrect);
        let scale = cx.scale();
        self.ensure_sweep_image(scale);
        if let Some(ref img) = self.sweep_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.sweep_hash,
                },
                rect,
            );
        }
        cx.restore();

        // Strip outline
        cx.stroke(
            &rrect,
            Color::rgba8(0, 0, 0, 40),
            &floem::kurbo::Stroke::new(1.0),
        );

        let thumb_x = self.state.borrow().hue_thumb_left(w);
        thumb::paint_thumb_ring(cx, Point::new(thumb_x, h / 2.0), Color::WHITE);
    }
}
