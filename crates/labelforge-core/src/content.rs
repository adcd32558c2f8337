//! Vector content produced by plugin content generators.
//!
//! The encoding algorithms themselves (barcode symbologies, QR matrices)
//! live behind the plugins' generator seam; the core only stores and
//! transports their output.

use kurbo::Size;
use serde::{Deserialize, Serialize};

/// One primitive element of generated vector content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VectorElement {
    /// A filled axis-aligned rectangle (barcode bars, QR modules).
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// An arbitrary path in SVG path-data syntax.
    Path { data: String },
    /// A run of text (human-readable barcode captions).
    Text { x: f64, y: f64, text: String, font_size: f64 },
}

/// The vector description a generator produces for one object.
///
/// Replacing an object's content swaps this wholesale; the object's pose is
/// untouched by the swap.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VectorContent {
    pub elements: Vec<VectorElement>,
    pub width: f64,
    pub height: f64,
}

impl VectorContent {
    /// Create content with the given natural dimensions.
    pub fn new(elements: Vec<VectorElement>, width: f64, height: f64) -> Self {
        Self {
            elements,
            width,
            height,
        }
    }

    /// The natural (unscaled) size of the content.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
