//! The generator seam between a plugin and its encoder.
//!
//! Barcode and QR plugins do not encode anything themselves; they hand the
//! current value and option map to a [`ContentSource`] and install whatever
//! vector content comes back. Swapping the source swaps the encoder (a real
//! symbology library, a remote renderer, a test stub) without touching the
//! plugin.

use labelforge_core::{BoxFuture, PluginError, PluginOptions, VectorContent};

/// Produces vector content for a value under the given options.
///
/// Sources are geometry-pure: they never see or produce an object pose,
/// only content with its natural dimensions.
pub trait ContentSource {
    fn generate(
        &self,
        value: &str,
        options: &PluginOptions,
    ) -> BoxFuture<'static, Result<VectorContent, PluginError>>;
}

/// Adapts a synchronous closure into a [`ContentSource`].
pub struct FnSource<F>(F);

impl<F> FnSource<F>
where
    F: Fn(&str, &PluginOptions) -> Result<VectorContent, PluginError>,
{
    pub fn new(generate: F) -> Self {
        Self(generate)
    }
}

impl<F> ContentSource for FnSource<F>
where
    F: Fn(&str, &PluginOptions) -> Result<VectorContent, PluginError>,
{
    fn generate(
        &self,
        value: &str,
        options: &PluginOptions,
    ) -> BoxFuture<'static, Result<VectorContent, PluginError>> {
        let result = (self.0)(value, options);
        Box::pin(async move { result })
    }
}
