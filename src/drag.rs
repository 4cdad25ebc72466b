//! Pointer drag controller for bounded rectangular surfaces.
//!
//! Turns raw pointer positions into clamped surface-relative coordinates
//! with start/drag/end lifecycle hooks. A shared [`DragArbiter`] enforces
//! that at most one surface drags at a time; tearing a controller down
//! (including by drop) force-ends its session without firing `on_end`.

use std::cell::Cell;
use std::rc::Rc;

/// A clamped pointer position relative to a surface, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub top: f64,
    pub left: f64,
}

/// A surface's bounding box: origin in host coordinates plus size.
///
/// Plain data so the clamping math runs without a rendering host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    /// A surface whose origin coincides with the pointer coordinate space.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    /// Clamp a host-space pointer position into this surface.
    pub fn clamp_pointer(&self, px: f64, py: f64) -> Coordinate {
        Coordinate {
            left: (px - self.x).clamp(0.0, self.width.max(0.0)),
            top: (py - self.y).clamp(0.0, self.height.max(0.0)),
        }
    }
}

/// Shared drag session manager: at most one holder at a time.
///
/// Every surface that must honor the single-session invariant gets a
/// clone of the same `Rc<DragArbiter>`.
#[derive(Debug, Default)]
pub struct DragArbiter {
    dragging: Cell<bool>,
}

impl DragArbiter {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Claim the session. Returns false when another surface holds it.
    pub fn try_acquire(&self) -> bool {
        if self.dragging.get() {
            return false;
        }
        self.dragging.set(true);
        true
    }

    pub fn release(&self) {
        self.dragging.set(false);
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.get()
    }
}

/// Drag session state. `Dragging` carries the clamped start coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DragPhase {
    #[default]
    Idle,
    Dragging {
        start: Coordinate,
    },
}

/// Lifecycle callbacks. Omitted callbacks are no-ops.
#[derive(Default)]
pub struct DragHooks {
    pub on_start: Option<Box<dyn Fn(Coordinate, SurfaceRect)>>,
    pub on_drag: Option<Box<dyn Fn(Coordinate, SurfaceRect)>>,
    pub on_end: Option<Box<dyn Fn(Coordinate, SurfaceRect)>>,
}

/// Per-surface drag state machine fed raw pointer positions by the host.
///
/// A pointer-down/up pair with no move in between is a zero-distance drag
/// and still fires `on_end` with the click's coordinate.
pub struct DragController {
    arbiter: Rc<DragArbiter>,
    hooks: DragHooks,
    phase: DragPhase,
}

impl DragController {
    pub fn new(arbiter: Rc<DragArbiter>, hooks: DragHooks) -> Self {
        Self {
            arbiter,
            hooks,
            phase: DragPhase::Idle,
        }
    }

    /// Whether this controller holds the active session.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// The clamped coordinate the active session started at.
    pub fn start_coordinate(&self) -> Option<Coordinate> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Dragging { start } => Some(start),
        }
    }

    /// Start a session. A no-op returning false while another surface
    /// holds the arbiter.
    pub fn pointer_down(&mut self, px: f64, py: f64, surface: SurfaceRect) -> bool {
        if !self.arbiter.try_acquire() {
            return false;
        }
        let start = surface.clamp_pointer(px, py);
        self.phase = DragPhase::Dragging { start };
        log::trace!("drag session started at {start:?}");
        if let Some(cb) = &self.hooks.on_start {
            cb(start, surface);
        }
        true
    }

    /// Feed a pointer move. Fires `on_drag` while a session is active.
    pub fn pointer_move(&mut self, px: f64, py: f64, surface: SurfaceRect) -> bool {
        if !self.is_active() {
            return false;
        }
        let coordinate = surface.clamp_pointer(px, py);
        if let Some(cb) = &self.hooks.on_drag {
            cb(coordinate, surface);
        }
        true
    }

    /// End the session, firing `on_end` with the final clamped coordinate.
    pub fn pointer_up(&mut self, px: f64, py: f64, surface: SurfaceRect) -> bool {
        if !self.is_active() {
            return false;
        }
        self.phase = DragPhase::Idle;
        self.arbiter.release();
        let coordinate = surface.clamp_pointer(px, py);
        log::trace!("drag session ended at {coordinate:?}");
        if let Some(cb) = &self.hooks.on_end {
            cb(coordinate, surface);
        }
        true
    }

    /// Force-end any in-progress session without firing `on_end`.
    pub fn teardown(&mut self) {
        if self.is_active() {
            self.phase = DragPhase::Idle;
            self.arbiter.release();
            log::trace!("drag session torn down");
        }
    }
}

impl Drop for DragController {
    fn drop(&mut self) {
        self.teardown();
    }
}
