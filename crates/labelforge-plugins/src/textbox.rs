//! The textbox plugin: editable text with purely native styling options.
//!
//! Every option mirrors a property the object already understands, so edits
//! apply synchronously and no content regeneration ever runs.

use kurbo::Size;

use labelforge_core::{
    BoxFuture, DrawableObject, LabelPlugin, PluginError, PluginOptions, SettingProp,
    TextProps, TextareaSpec, VectorContent, VectorElement,
};

const DEFAULT_TEXT: &str = "labelforge";

/// Plain text on the label. All options are native.
#[derive(Default)]
pub struct TextboxPlugin;

impl TextboxPlugin {
    pub fn new() -> Self {
        Self
    }
}

/// Approximate the natural size of a run of text. A renderer with real
/// font metrics will tighten this on first draw.
fn text_extent(props: &TextProps) -> Size {
    let widest = props
        .text
        .lines()
        .map(str::len)
        .max()
        .unwrap_or(0)
        .max(1);
    let lines = props.text.lines().count().max(1);
    Size::new(
        widest as f64 * props.font_size * 0.6,
        lines as f64 * props.font_size * props.line_height,
    )
}

fn text_content(props: &TextProps) -> VectorContent {
    let extent = text_extent(props);
    let elements = props
        .text
        .lines()
        .enumerate()
        .map(|(i, line)| VectorElement::Text {
            x: 0.0,
            y: (i as f64 + 1.0) * props.font_size * props.line_height,
            text: line.to_string(),
            font_size: props.font_size,
        })
        .collect();
    VectorContent::new(elements, extent.width, extent.height)
}

impl LabelPlugin for TextboxPlugin {
    fn name(&self) -> &str {
        "textbox"
    }

    fn default_options(&self) -> PluginOptions {
        PluginOptions::new()
            .with(
                "text",
                SettingProp::native_textarea(DEFAULT_TEXT, TextareaSpec::default()),
            )
            .with("fontSize", SettingProp::native(16.0))
            .with(
                "textAlign",
                SettingProp::native_select(&[
                    "left",
                    "center",
                    "right",
                    "justify",
                    "justify-left",
                    "justify-center",
                    "justify-right",
                ]),
            )
            .with(
                "fontStyle",
                SettingProp::native_select(&["normal", "italic", "oblique"]),
            )
            .with(
                "fontWeight",
                SettingProp::native_select(&["normal", "bold"]),
            )
            .with("lineHeight", SettingProp::native_blank())
            .with("charSpacing", SettingProp::native_blank())
            .with("underline", SettingProp::native_blank())
            .with("linethrough", SettingProp::native_blank())
            .with("overline", SettingProp::native_blank())
    }

    fn create_object(&self) -> BoxFuture<'_, Result<DrawableObject, PluginError>> {
        let options = self.default_options();
        Box::pin(async move {
            let mut object = DrawableObject::new("textbox", Size::ZERO);
            object.options = options;
            object
                .apply_native_option_defaults()
                .map_err(|err| PluginError::Generator {
                    plugin: "textbox".to_string(),
                    message: err.to_string(),
                })?;
            object.content = text_content(&object.text_props);
            object.size = object.content.size();
            Ok(object)
        })
    }

    fn regenerate(
        &self,
        _options: &PluginOptions,
        prop_name: &str,
    ) -> BoxFuture<'static, Result<VectorContent, PluginError>> {
        let err = PluginError::unsupported("textbox", prop_name);
        Box::pin(async move { Err(err) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelforge_core::PropValue;
    use pollster::block_on;

    #[test]
    fn test_create_object_seeds_text_and_size() {
        let object = block_on(TextboxPlugin::new().create_object()).unwrap();
        assert_eq!(object.kind, "textbox");
        assert_eq!(object.text_props.text, DEFAULT_TEXT);
        assert_eq!(
            object.get("fontSize").unwrap(),
            PropValue::Number(16.0)
        );
        assert!(object.size.width > 0.0);
        assert!(object.size.height > 0.0);
        assert_eq!(object.content.elements.len(), 1);
    }

    #[test]
    fn test_all_options_native() {
        let options = TextboxPlugin::new().default_options();
        assert!(options.iter().all(|(_, prop)| prop.is_native));
        assert!(options.get("text").unwrap().textarea.is_some());
        assert!(options.get("textAlign").unwrap().select.is_some());
    }

    #[test]
    fn test_regenerate_always_rejects() {
        let plugin = TextboxPlugin::new();
        let err = block_on(plugin.regenerate(&plugin.default_options(), "text")).unwrap_err();
        assert_eq!(err, PluginError::unsupported("textbox", "text"));
    }

    #[test]
    fn test_multiline_extent() {
        let mut props = TextProps::default();
        props.text = "ab\ncdef".to_string();
        let extent = text_extent(&props);
        assert!((extent.width - 4.0 * 16.0 * 0.6).abs() < 1e-12);
        assert!((extent.height - 2.0 * 16.0 * 1.16).abs() < 1e-12);
    }
}
