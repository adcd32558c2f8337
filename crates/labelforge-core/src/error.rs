//! Error types for the label designer core.

use thiserror::Error;

/// Errors produced by plugin object creation and content regeneration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PluginError {
    /// A plugin was asked to regenerate a property it does not implement.
    #[error("plugin `{plugin}` does not implement property `{name}`")]
    UnsupportedProperty { plugin: String, name: String },

    /// The content generator backing a plugin failed.
    #[error("content generator for plugin `{plugin}` failed: {message}")]
    Generator { plugin: String, message: String },
}

impl PluginError {
    /// Convenience constructor for the unsupported-property rejection.
    pub fn unsupported(plugin: &str, name: &str) -> Self {
        Self::UnsupportedProperty {
            plugin: plugin.to_string(),
            name: name.to_string(),
        }
    }
}

/// Errors produced by the designer core.
#[derive(Debug, Error)]
pub enum DesignError {
    /// A property name outside the object's enumerated schema.
    #[error("unknown property: {name}")]
    UnknownProperty { name: String },

    /// A property write with a value of the wrong type.
    #[error("property `{name}` expects a {expected} value")]
    TypeMismatch { name: String, expected: &'static str },

    /// A reactive bridge was read or written before being wired.
    #[error("no bridge has been initialized")]
    UninitializedBridge,

    /// A toolbox action id that does not exist.
    #[error("unknown toolbox action: {id}")]
    UnknownAction { id: String },

    /// A plugin tag with no registered factory.
    #[error("no plugin registered under tag `{name}`")]
    UnknownPlugin { name: String },

    /// A plugin tag registered twice.
    #[error("plugin tag `{name}` is already registered")]
    DuplicatePlugin { name: String },

    /// A settings operation with no single selected object.
    #[error("no object is selected")]
    NoSelection,

    /// An object id that is not present on the layer.
    #[error("object {0} is not on the layer")]
    UnknownObject(uuid::Uuid),

    /// A plugin creation or regeneration failure.
    #[error(transparent)]
    Plugin(#[from] PluginError),
}

/// Result type for designer operations.
pub type DesignResult<T> = Result<T, DesignError>;
