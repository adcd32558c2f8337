//! The barcode plugin: plugin-bound options regenerated through a
//! [`ContentSource`].

use std::rc::Rc;

use labelforge_core::{
    BoxFuture, DrawableObject, LabelPlugin, PluginError, PluginOptions, SettingProp,
    VectorContent,
};

use crate::source::ContentSource;

/// A 1D barcode whose bars come from an external encoder.
pub struct BarcodePlugin {
    source: Rc<dyn ContentSource>,
}

impl BarcodePlugin {
    pub fn new(source: Rc<dyn ContentSource>) -> Self {
        Self { source }
    }
}

impl LabelPlugin for BarcodePlugin {
    fn name(&self) -> &str {
        "barcode"
    }

    fn default_options(&self) -> PluginOptions {
        PluginOptions::new()
            .with("text", SettingProp::plugin("1234567890"))
            .with(
                "format",
                SettingProp::plugin_select("CODE128", &["CODE128", "CODE39", "MSI"]),
            )
            .with("width", SettingProp::plugin(2.0))
            .with("height", SettingProp::plugin(100.0))
            .with("margin", SettingProp::plugin(5.0))
            .with("displayValue", SettingProp::plugin(true))
            .with(
                "font",
                SettingProp::plugin_select("monospace", &["monospace", "serif", "sans-serif"]),
            )
            .with("fontSize", SettingProp::plugin(20.0))
            .with(
                "textAlign",
                SettingProp::plugin_select("center", &["left", "center", "right"]),
            )
            .with("textMargin", SettingProp::plugin(1.0))
            .with(
                "textPosition",
                SettingProp::plugin_select("bottom", &["top", "bottom"]),
            )
    }

    fn create_object(&self) -> BoxFuture<'_, Result<DrawableObject, PluginError>> {
        let options = self.default_options();
        let value = options.text("text").unwrap_or_default().to_string();
        let content = self.source.generate(&value, &options);
        Box::pin(async move {
            let content = content.await?;
            let mut object = DrawableObject::new("barcode", content.size());
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
            let err = PluginError::unsupported("barcode", prop_name);
            return Box::pin(async move { Err(err) });
        }
        let value = options.text("text").unwrap_or_default().to_string();
        self.source.generate(&value, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FnSource;
    use labelforge_core::VectorElement;
    use pollster::block_on;

    /// One bar per character, scaled by the `width` option.
    fn stub_source() -> Rc<dyn ContentSource> {
        Rc::new(FnSource::new(|value, options| {
            let bar = options.number("width").unwrap_or(1.0);
            let height = options.number("height").unwrap_or(50.0);
            let elements = value
                .char_indices()
                .map(|(i, _)| VectorElement::Rect {
                    x: i as f64 * bar * 2.0,
                    y: 0.0,
                    width: bar,
                    height,
                })
                .collect();
            Ok(VectorContent::new(
                elements,
                value.len() as f64 * bar * 2.0,
                height,
            ))
        }))
    }

    #[test]
    fn test_create_object_encodes_default_value() {
        let plugin = BarcodePlugin::new(stub_source());
        let object = block_on(plugin.create_object()).unwrap();
        assert_eq!(object.kind, "barcode");
        assert_eq!(object.content.elements.len(), 10);
        assert!((object.size.width - 40.0).abs() < 1e-12);
        assert!((object.size.height - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_regenerate_reads_updated_options() {
        let plugin = BarcodePlugin::new(stub_source());
        let mut options = plugin.default_options();
        options.set_value("text", "987".into()).unwrap();
        options.set_value("width", 3.0.into()).unwrap();

        let content = block_on(plugin.regenerate(&options, "width")).unwrap();
        assert_eq!(content.elements.len(), 3);
        assert!((content.width - 18.0).abs() < 1e-12);
    }

    #[test]
    fn test_undeclared_property_rejected_without_encoding() {
        let plugin = BarcodePlugin::new(stub_source());
        let err = block_on(plugin.regenerate(&plugin.default_options(), "angle")).unwrap_err();
        assert_eq!(err, PluginError::unsupported("barcode", "angle"));
    }

    #[test]
    fn test_defaults_match_declared_shapes() {
        let options = BarcodePlugin::new(stub_source()).default_options();
        assert!(options.iter().all(|(_, prop)| !prop.is_native));
        assert_eq!(options.text("format"), Some("CODE128"));
        assert_eq!(options.bool("displayValue"), Some(true));
        assert_eq!(options.number("fontSize"), Some(20.0));
        assert_eq!(options.text("textPosition"), Some("bottom"));
    }
}
