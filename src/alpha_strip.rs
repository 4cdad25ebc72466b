//! Alpha strip with checkerboard background + transparent-to-opaque
//! gradient of the current color. Left is fully transparent, right is
//! opaque, matching the opacity mapping `a = left / width`.

use std::cell::RefCell;
use std::rc::Rc;

use floem::kurbo::{Point, Rect, Shape};
use floem::peniko::{Color, Gradient};

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
use crate::picker::PickerState;
use crate::thumb;
use crate::widget::commit_hooks;

const CHECKER_LIGHT: Color = Color::rgb8(255, 255, 255);
const CHECKER_DARK: Color = Color::rgb8(204, 204, 204);

/// Paint a checkerboard pattern into `rect`.
fn paint_checkerboard(cx: &mut PaintCx, rect: Rect) {
    let cell = constants::CHECKER_CELL;
    cx.fill(&rect, CHECKER_LIGHT, 0.0);
    let cols = (rect.width() / cell).ceil() as usize;
    let rows = (rect.height() / cell).ceil() as usize;
    for row in 0..rows {
        for col in 0..cols {
            if (row + col) % 2 == 1 {
                let x = rect.x0 + col as f64 * cell;
                let y = rect.y0 + row as f64 * cell;
                let cell_rect = Rect::new(x, y, (x + cell).min(rect.x1), (y + cell).min(rect.y1));
                cx.fill(&cell_rect, CHECKER_DARK, 0.0);
            }
        }
    }
}

pub(crate) struct AlphaStrip {
    id: ViewId,
    drag: DragController,
    state: Rc<RefCell<PickerState>>,
    size: floem::taffy::prelude::Size<f32>,
}

/// Creates the horizontal alpha strip.
pub(crate) fn alpha_strip(
    state: Rc<RefCell<PickerState>>,
    mirror: RwSignal<Hsva>,
    arbiter: Rc<DragArbiter>,
) -> AlphaStrip {
    let id = ViewId::new();

    create_effect(move |_| {
        let color = mirror.get();
        id.update_state(color);
    });

    let drag = DragController::new(
        arbiter,
        commit_hooks(state.clone(), mirror, PickerState::alpha_drag),
    );

    AlphaStrip {
        id,
        drag,
        state,
        size: Default::default(),
    }
    .style(|s| {
        s.height(constants::STRIP_HEIGHT)
            .width_full()
            .border_radius(constants::RADIUS)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl AlphaStrip {
    fn surface(&self) -> SurfaceRect {
        SurfaceRect::from_size(self.size.width as f64, self.size.height as f64)
    }
}

impl View for AlphaStrip {
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
        paint_checkerboard(cx, rect);

        // Transparent (left) → opaque current color (right)
        let (r, g, b) = self.state.borrow().current_rgb();
        let transparent = Color::rgba(r, g, b, 0.0);
        let solid = Color::rgba(r, g, b, 1.0);
        let gradient = Gradient::new_linear((0.0, h / 2.0), (w, h / 2.0))
            .with_stops([transparent, solid]);
        // Convert to BezPath so the vello renderer uses the general path
        // handler (its Rect fast-path only supports solid colors).
        let path = rect.to_path(0.1);
        cx.fill(&path, &gradient, 0.0);
        cx.restore();

        // Strip outline
        cx.stroke(
            &rrect,
            Color::rgba8(0, 0, 0, 40),
            &floem::kurbo::Stroke::new(1.0),
        );

        let thumb_x = self.state.borrow().alpha_thumb_left(w);
        thumb::paint_thumb_ring(cx, Point::new(thumb_x, h / 2.0), Color::WHITE);
    }
}
