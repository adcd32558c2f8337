//! The plugin contract and the explicit plugin registry.
//!
//! A plugin is a factory for one kind of drawable object plus the
//! regeneration hook that rebuilds the object's vector content when a
//! plugin-bound option changes. Registration is explicit at startup; the
//! registry doubles as the tag-to-factory map for polymorphic
//! reconstruction.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::content::VectorContent;
use crate::error::{DesignError, DesignResult, PluginError};
use crate::object::DrawableObject;
use crate::settings::PluginOptions;

/// Boxed future for the core's suspension points (plugin creation and
/// content regeneration). The core stays runtime-agnostic.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Contract every plugin (textbox, barcode, QR, ...) satisfies.
pub trait LabelPlugin {
    /// The plugin tag; also the object `kind` and the registry key.
    fn name(&self) -> &str;

    /// The options newly created objects start with.
    fn default_options(&self) -> PluginOptions;

    /// Build a new object with the plugin's defaults applied and a fresh
    /// identity.
    fn create_object(&self) -> BoxFuture<'_, Result<DrawableObject, PluginError>>;

    /// Regenerate vector content for the given options after `prop_name`
    /// changed. Pure with respect to geometry: implementations never look
    /// at or produce a pose, only content.
    ///
    /// A `prop_name` the plugin does not recognize rejects with
    /// [`PluginError::UnsupportedProperty`].
    fn regenerate(
        &self,
        options: &PluginOptions,
        prop_name: &str,
    ) -> BoxFuture<'static, Result<VectorContent, PluginError>>;

    /// Invoked once after the object is registered on the layer, for
    /// plugin-specific post-insertion fixups.
    fn on_added(&self, _object: &mut DrawableObject) {}
}

/// Tag-to-plugin map, populated by explicit registration at startup.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, Rc<dyn LabelPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin under its tag. Duplicate tags are rejected.
    pub fn register(&mut self, plugin: Rc<dyn LabelPlugin>) -> DesignResult<()> {
        let name = plugin.name().to_string();
        if self.plugins.contains_key(&name) {
            return Err(DesignError::DuplicatePlugin { name });
        }
        log::debug!("plugin `{name}` registered");
        self.plugins.insert(name, plugin);
        Ok(())
    }

    /// Look a plugin up by tag.
    pub fn get(&self, name: &str) -> DesignResult<Rc<dyn LabelPlugin>> {
        self.plugins
            .get(name)
            .cloned()
            .ok_or_else(|| DesignError::UnknownPlugin {
                name: name.to_string(),
            })
    }

    /// Iterate plugins in registration-tag order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<dyn LabelPlugin>> {
        self.plugins.values()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    struct DummyPlugin;

    impl LabelPlugin for DummyPlugin {
        fn name(&self) -> &str {
            "dummy"
        }

        fn default_options(&self) -> PluginOptions {
            PluginOptions::new()
        }

        fn create_object(&self) -> BoxFuture<'_, Result<DrawableObject, PluginError>> {
            Box::pin(async { Ok(DrawableObject::new("dummy", Size::new(1.0, 1.0))) })
        }

        fn regenerate(
            &self,
            _options: &PluginOptions,
            prop_name: &str,
        ) -> BoxFuture<'static, Result<VectorContent, PluginError>> {
            let err = PluginError::unsupported("dummy", prop_name);
            Box::pin(async move { Err(err) })
        }
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = PluginRegistry::new();
        registry.register(Rc::new(DummyPlugin)).unwrap();
        assert!(matches!(
            registry.register(Rc::new(DummyPlugin)),
            Err(DesignError::DuplicatePlugin { .. })
        ));
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let registry = PluginRegistry::new();
        assert!(matches!(
            registry.get("nothing"),
            Err(DesignError::UnknownPlugin { .. })
        ));
    }

    #[test]
    fn test_lookup_by_tag() {
        let mut registry = PluginRegistry::new();
        registry.register(Rc::new(DummyPlugin)).unwrap();
        assert_eq!(registry.get("dummy").unwrap().name(), "dummy");
        assert_eq!(registry.len(), 1);
    }
}
