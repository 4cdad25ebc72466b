//! Picker handle and the composed widget view.
//!
//! `Picker` is the public face: it owns the shared [`PickerState`], the
//! reactive mirror signal the surface views repaint from, and the drag
//! arbiter that keeps the three surfaces to one session at a time.

use std::cell::RefCell;
use std::rc::Rc;

use floem::reactive::{RwSignal, SignalGet, SignalUpdate};
use floem::views::{v_stack_from_iter, Decorators};
use floem::{AnyView, IntoView};

#[cfg(feature = "alpha")]
use crate::alpha_strip::alpha_strip;
use crate::color::{ColorFormat, Hsva};
use crate::constants;
use crate::drag::{Coordinate, DragArbiter, DragHooks, SurfaceRect};
use crate::hue_strip::hue_strip;
use crate::picker::{PickerOptions, PickerState};
use crate::sat_panel::sat_val_panel;

/// Build drag hooks that apply a surface's arithmetic to the shared
/// state and push the result into the repaint mirror. Both `drag` and
/// `end` commit, so a zero-distance click lands the color too.
pub(crate) fn commit_hooks(
    state: Rc<RefCell<PickerState>>,
    mirror: RwSignal<Hsva>,
    apply: fn(&mut PickerState, Coordinate, SurfaceRect),
) -> DragHooks {
    let commit = Rc::new(move |coordinate: Coordinate, surface: SurfaceRect| {
        let snapshot = {
            let mut state = state.borrow_mut();
            apply(&mut state, coordinate, surface);
            state.hsva()
        };
        mirror.set(snapshot);
    });
    let on_drag = commit.clone();
    DragHooks {
        on_start: None,
        on_drag: Some(Box::new(move |coordinate, surface| {
            on_drag(coordinate, surface)
        })),
        on_end: Some(Box::new(move |coordinate, surface| {
            commit(coordinate, surface)
        })),
    }
}

/// A color picker instance: canonical HSVA state plus the widget view.
///
/// The handle stays valid while the view tree lives; dropping the view
/// tree releases the drag sessions.
pub struct Picker {
    state: Rc<RefCell<PickerState>>,
    mirror: RwSignal<Hsva>,
    arbiter: Rc<DragArbiter>,
}

impl Picker {
    pub fn new(options: PickerOptions) -> Self {
        let state = PickerState::new(options);
        let mirror = RwSignal::new(state.hsva());
        Self {
            state: Rc::new(RefCell::new(state)),
            mirror,
            arbiter: DragArbiter::new(),
        }
    }

    /// Replace the color. `None` resets to the default color; an
    /// unparseable string is ignored. Committed changes fire the change
    /// callback and repaint the surfaces.
    pub fn set_value(&self, value: Option<&str>) {
        self.state.borrow_mut().set_value(value);
        self.mirror.set(self.state.borrow().hsva());
    }

    /// Current color in the configured format.
    pub fn get_value(&self) -> String {
        self.state.borrow().get_value()
    }

    /// Current color in an explicit format.
    pub fn get_value_as(&self, format: ColorFormat) -> String {
        self.state.borrow().get_value_as(format)
    }

    /// Snapshot of the current color.
    pub fn hsva(&self) -> Hsva {
        self.mirror.get_untracked()
    }

    /// Build the widget view: saturation/value panel over the hue strip,
    /// with the alpha strip appended when enabled.
    pub fn view(&self) -> impl IntoView {
        let state = self.state.clone();
        let mirror = self.mirror;
        let arbiter = self.arbiter.clone();

        let mut surfaces: Vec<AnyView> = vec![
            sat_val_panel(state.clone(), mirror, arbiter.clone()).into_any(),
            hue_strip(state.clone(), mirror, arbiter.clone()).into_any(),
        ];
        #[cfg(feature = "alpha")]
        if state.borrow().alpha_enabled() {
            surfaces.push(alpha_strip(state.clone(), mirror, arbiter.clone()).into_any());
        }

        v_stack_from_iter(surfaces).style(|s| {
            s.width(constants::PICKER_WIDTH)
                .gap(constants::GAP)
                .padding(constants::PADDING)
        })
    }
}
