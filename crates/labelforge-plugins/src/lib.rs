//! Built-in labelforge plugins.
//!
//! Three object kinds ship with the designer: a textbox (all-native
//! options, no regeneration), a 1D barcode and a QR code (plugin-bound
//! options regenerated through a pluggable [`ContentSource`]).

pub mod barcode;
pub mod qrcode;
pub mod source;
pub mod textbox;

pub use barcode::BarcodePlugin;
pub use qrcode::QrcodePlugin;
pub use source::{ContentSource, FnSource};
pub use textbox::TextboxPlugin;
