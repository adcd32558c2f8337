//! Viewport pan/zoom interaction controller.
//!
//! Pan and zoom operate on the viewport transform only; object anchoring is
//! driven by the reference frame, which moves on viewport *resize*.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom bounds for scroll-driven zooming.
pub const MIN_ZOOM: f64 = 0.01;
pub const MAX_ZOOM: f64 = 20.0;

/// State of the modifier-gated drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        last: Point,
    },
}

/// The pannable, zoomable viewport the label area lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    size: Size,
    zoom: f64,
    pan: Vec2,
    drag: DragState,
    /// Object selection is suppressed while a drag pan is in progress.
    pub selection_enabled: bool,
}

impl Viewport {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            zoom: 1.0,
            pan: Vec2::ZERO,
            drag: DragState::Idle,
            selection_enabled: true,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Set the viewport dimensions. Returns false when nothing changed.
    pub fn resize(&mut self, size: Size) -> bool {
        if self.size == size {
            return false;
        }
        self.size = size;
        true
    }

    /// The viewport transform applied when rendering the scene.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    /// Reset the transform to identity, returning the previous (zoom, pan)
    /// so the caller can restore it after export.
    pub fn reset_transform(&mut self) -> (f64, Vec2) {
        let previous = (self.zoom, self.pan);
        self.zoom = 1.0;
        self.pan = Vec2::ZERO;
        previous
    }

    /// Restore a transform previously returned by [`Self::reset_transform`].
    pub fn restore_transform(&mut self, saved: (f64, Vec2)) {
        self.zoom = saved.0;
        self.pan = saved.1;
    }

    /// The next zoom level for a scroll delta, clamped so it can never go
    /// invalid. Scrolling up (negative delta) zooms in.
    pub fn compute_zoom(&self, delta: f64) -> f64 {
        (self.zoom * (1.0 - 0.001 * delta)).clamp(MIN_ZOOM, MAX_ZOOM)
    }

    /// Set the zoom directly (slider bridge), clamped.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Handle a scroll event. Without the modifier held the controller
    /// ignores it. Returns true when the event was consumed.
    pub fn scroll(&mut self, point: Point, delta: f64, modifier: bool) -> bool {
        if !modifier {
            return false;
        }
        let zoom = self.compute_zoom(delta);
        self.zoom_to_point(point, zoom);
        true
    }

    /// Zoom to the given level, keeping `point` (in viewport units) fixed
    /// on screen.
    pub fn zoom_to_point(&mut self, point: Point, zoom: f64) {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if (zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        // Scene point under the anchor before the zoom change.
        let scene = Point::new(
            (point.x - self.pan.x) / self.zoom,
            (point.y - self.pan.y) / self.zoom,
        );
        self.zoom = zoom;
        self.pan = Vec2::new(point.x - scene.x * zoom, point.y - scene.y * zoom);
    }

    /// Begin a drag pan. Only starts while the modifier is held.
    pub fn pointer_down(&mut self, point: Point, modifier: bool) {
        if modifier {
            self.drag = DragState::Dragging { last: point };
            self.selection_enabled = false;
        }
    }

    /// Continue a drag pan. Returns true when the viewport moved.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        match self.drag {
            DragState::Dragging { last } => {
                self.pan += point - last;
                self.drag = DragState::Dragging { last: point };
                true
            }
            DragState::Idle => false,
        }
    }

    /// End a drag pan, committing the transform.
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
        self.selection_enabled = true;
    }

    /// The viewport center, in scene units.
    pub fn center(&self) -> Point {
        Point::new(self.size.width / 2.0, self.size.height / 2.0)
    }
}
