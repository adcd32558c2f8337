//! Labelforge Core Library
//!
//! Platform-agnostic core for the labelforge label designer: the affine
//! relationship engine that keeps objects anchored to the label area, and
//! the property-binding surface over plugin-defined objects.

pub mod bridge;
pub mod content;
pub mod designer;
pub mod error;
pub mod events;
pub mod export;
pub mod frame;
pub mod layer;
pub mod object;
pub mod plugin;
pub mod relationship;
pub mod selection;
pub mod settings;
pub mod toolbox;
pub mod transform;
pub mod viewport;

pub use bridge::{ValueBridge, ZoomSlider};
pub use content::{VectorContent, VectorElement};
pub use designer::LabelDesigner;
pub use error::{DesignError, DesignResult, PluginError};
pub use events::{DesignEvent, EventQueue};
pub use export::Rasterizer;
pub use frame::{DEFAULT_LABEL_SIZE, ReferenceFrame};
pub use layer::{ObjectHandle, ObjectLayer};
pub use object::{DrawableObject, ObjectId, Pose, SelectionStyle, TextProps};
pub use plugin::{BoxFuture, LabelPlugin, PluginRegistry};
pub use relationship::RelationshipTracker;
pub use selection::{SelectionEvent, SettingsPanel};
pub use settings::{
    PluginOptions, PropValue, Setting, SettingBinder, SettingKind, SettingProp, TextareaSpec,
};
pub use toolbox::{Action, Toolbox};
pub use transform::{Decomposed, decompose};
pub use viewport::{DragState, MAX_ZOOM, MIN_ZOOM, Viewport};
