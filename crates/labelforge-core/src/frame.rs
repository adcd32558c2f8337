//! The reference frame: the fixed-size label area objects anchor to.

use kurbo::{Affine, Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Default label dimensions.
pub const DEFAULT_LABEL_SIZE: Size = Size::new(500.0, 250.0);

/// The label area rectangle. One per design session, never destroyed;
/// recentered on every viewport resize. Rotation is always zero and the
/// frame is never scaled, so its world transform is pure translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceFrame {
    label_size: Size,
    center: Point,
}

impl Default for ReferenceFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceFrame {
    pub fn new() -> Self {
        Self {
            label_size: DEFAULT_LABEL_SIZE,
            center: Point::ZERO,
        }
    }

    /// The logical label dimensions.
    pub fn label_size(&self) -> Size {
        self.label_size
    }

    /// Resize the label itself (not the viewport).
    pub fn set_label_size(&mut self, size: Size) {
        self.label_size = size;
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// The frame's absolute pose within the scene.
    pub fn world_transform(&self) -> Affine {
        Affine::translate(self.center.to_vec2())
    }

    /// Center the frame within a viewport of the given size. Idempotent
    /// for repeated identical sizes.
    pub fn recenter(&mut self, viewport: Size) {
        self.center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
    }

    /// The label rectangle in scene coordinates, for clipping and export.
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, self.label_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recenter_is_idempotent() {
        let mut frame = ReferenceFrame::new();
        frame.recenter(Size::new(1024.0, 768.0));
        let first = frame.clone();
        frame.recenter(Size::new(1024.0, 768.0));
        assert_eq!(frame, first);
        assert_eq!(frame.center(), Point::new(512.0, 384.0));
    }

    #[test]
    fn test_world_transform_is_translation() {
        let mut frame = ReferenceFrame::new();
        frame.recenter(Size::new(800.0, 600.0));
        let coeffs = frame.world_transform().as_coeffs();
        assert_eq!(coeffs[0], 1.0);
        assert_eq!(coeffs[3], 1.0);
        assert_eq!(coeffs[4], 400.0);
        assert_eq!(coeffs[5], 300.0);
    }

    #[test]
    fn test_bounds_centered_on_frame() {
        let mut frame = ReferenceFrame::new();
        frame.recenter(Size::new(1000.0, 500.0));
        let bounds = frame.bounds();
        assert_eq!(bounds.center(), Point::new(500.0, 250.0));
        assert_eq!(bounds.width(), DEFAULT_LABEL_SIZE.width);
        assert_eq!(bounds.height(), DEFAULT_LABEL_SIZE.height);
    }
}
