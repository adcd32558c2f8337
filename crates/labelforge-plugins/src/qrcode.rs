//! The QR code plugin.
//!
//! Like the barcode plugin, the matrix itself comes from a
//! [`ContentSource`]; this module only declares the options and wires the
//! regeneration contract.

use std::rc::Rc;

use labelforge_core::{
    BoxFuture, DrawableObject, LabelPlugin, PluginError, PluginOptions, SettingProp,
    VectorContent,
};

use crate::source::ContentSource;

const DEFAULT_TEXT: &str = "https://labelforge.example";

pub struct QrcodePlugin {
    source: Rc<dyn ContentSource>,
}

impl QrcodePlugin {
    pub fn new(source: Rc<dyn ContentSource>) -> Self {
        Self { source }
    }
}

impl LabelPlugin for QrcodePlugin {
    fn name(&self) -> &str {
        "qrcode"
    }

    fn default_options(&self) -> PluginOptions {
        PluginOptions::new()
            .with("text", SettingProp::plugin(DEFAULT_TEXT))
            .with("margin", SettingProp::plugin(0.5))
            .with("width", SettingProp::plugin(125.0))
    }

    fn create_object(&self) -> BoxFuture<'_, Result<DrawableObject, PluginError>> {
        let options = self.default_options();
        let value = options.text("text").unwrap_or_default().to_string();
        let content = self.source.generate(&value, &options);
        Box::pin(async move {
            let content = content.await?;
            let mut object = DrawableObject::new("qrcode", content.size());
            object.content = content;
            object.options = options;
            Ok(object)
        })
    }

    fn regenerate(
        &self,
        options: &PluginOptions,
        prop_name: &str,
    ) -> BoxFuture<'static, Result<VectorContent, PluginError>> {
        if !options.contains(prop_name) {
            let err = PluginError::unsupported("qrcode", prop_name);
            return Box::pin(async move { Err(err) });
        }
        let value = options.text("text").unwrap_or_default().to_string();
        self.source.generate(&value, options)
    }
}
