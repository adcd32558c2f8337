//! Export seam: rasterizing the label area.
//!
//! The pixel work happens in a collaborator; the core only owns the
//! transform bookkeeping around the call (see `LabelDesigner::download`).

use kurbo::Rect;

use crate::error::DesignResult;
use crate::layer::ObjectHandle;

/// Collaborator that rasterizes the label bounds into an encoded image.
pub trait Rasterizer {
    /// Rasterize `bounds` (scene coordinates, viewport transform already
    /// reset to identity) over the given objects, back to front.
    fn rasterize(&mut self, bounds: Rect, objects: &[ObjectHandle]) -> DesignResult<Vec<u8>>;
}
