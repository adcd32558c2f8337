//! Property binding: a uniform, typed editing surface over plugin objects.
//!
//! Every editable property is projected as a [`Setting`] with a `{get, set}`
//! binder behind it. Native properties pass straight through to the object;
//! plugin-bound properties mutate the option map and trigger asynchronous
//! content regeneration.

mod binders;
pub mod strings;

pub use binders::{NativeBinder, PluginBinder, SettingBinder};

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{DesignError, DesignResult};
use crate::events::EventQueue;
use crate::object::DrawableObject;
use crate::plugin::{BoxFuture, LabelPlugin};
use strings::{camel_to_kebab_case, camel_to_title_case};

/// The value of one editable property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl PropValue {
    pub fn as_number(self, name: &str) -> DesignResult<f64> {
        match self {
            PropValue::Number(n) => Ok(n),
            _ => Err(DesignError::TypeMismatch {
                name: name.to_string(),
                expected: "number",
            }),
        }
    }

    pub fn as_text(self, name: &str) -> DesignResult<String> {
        match self {
            PropValue::Text(s) => Ok(s),
            _ => Err(DesignError::TypeMismatch {
                name: name.to_string(),
                expected: "text",
            }),
        }
    }

    pub fn as_bool(self, name: &str) -> DesignResult<bool> {
        match self {
            PropValue::Bool(b) => Ok(b),
            _ => Err(DesignError::TypeMismatch {
                name: name.to_string(),
                expected: "bool",
            }),
        }
    }

    /// Borrow the text without consuming, if this is a text value.
    pub fn text(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

/// Multi-line input declaration for a text property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextareaSpec {
    pub rows: u32,
    pub cols: u32,
    pub spellcheck: bool,
    pub maxlength: u32,
    pub minlength: u32,
}

impl Default for TextareaSpec {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 20,
            spellcheck: true,
            maxlength: 100,
            minlength: 0,
        }
    }
}

/// One plugin-declared option.
///
/// `is_native` options mirror a property the object already understands;
/// the rest are plugin-private state only the regeneration hook interprets.
/// A native option may omit its value, in which case the object's own
/// default backs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingProp {
    pub value: Option<PropValue>,
    pub is_native: bool,
    pub select: Option<Vec<String>>,
    pub textarea: Option<TextareaSpec>,
}

impl SettingProp {
    pub fn native(value: impl Into<PropValue>) -> Self {
        Self {
            value: Some(value.into()),
            is_native: true,
            select: None,
            textarea: None,
        }
    }

    /// A native option whose initial value comes from the object itself.
    pub fn native_blank() -> Self {
        Self {
            value: None,
            is_native: true,
            select: None,
            textarea: None,
        }
    }

    pub fn native_select(values: &[&str]) -> Self {
        Self {
            value: None,
            is_native: true,
            select: Some(values.iter().map(|v| v.to_string()).collect()),
            textarea: None,
        }
    }

    pub fn native_textarea(value: impl Into<PropValue>, textarea: TextareaSpec) -> Self {
        Self {
            value: Some(value.into()),
            is_native: true,
            select: None,
            textarea: Some(textarea),
        }
    }

    pub fn plugin(value: impl Into<PropValue>) -> Self {
        Self {
            value: Some(value.into()),
            is_native: false,
            select: None,
            textarea: None,
        }
    }

    pub fn plugin_select(value: impl Into<PropValue>, values: &[&str]) -> Self {
        Self {
            value: Some(value.into()),
            is_native: false,
            select: Some(values.iter().map(|v| v.to_string()).collect()),
            textarea: None,
        }
    }
}

/// The option map a plugin declares for its objects. Keys iterate in
/// sorted order so the settings list is stable across rebuilds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PluginOptions(BTreeMap<String, SettingProp>);

impl PluginOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, prop: SettingProp) {
        self.0.insert(name.to_string(), prop);
    }

    pub fn with(mut self, name: &str, prop: SettingProp) -> Self {
        self.insert(name, prop);
        self
    }

    pub fn get(&self, name: &str) -> Option<&SettingProp> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// The current value of an option, if declared and set.
    pub fn value(&self, name: &str) -> Option<&PropValue> {
        self.0.get(name).and_then(|p| p.value.as_ref())
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(PropValue::text)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(PropValue::number)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.value(name).and_then(PropValue::bool)
    }

    /// Overwrite an option's value, returning the previous one. Writing a
    /// key the plugin never declared is rejected.
    pub fn set_value(
        &mut self,
        name: &str,
        value: PropValue,
    ) -> DesignResult<Option<PropValue>> {
        match self.0.get_mut(name) {
            Some(prop) => Ok(prop.value.replace(value)),
            None => Err(DesignError::UnknownProperty {
                name: name.to_string(),
            }),
        }
    }

    /// Put back a value previously returned by [`Self::set_value`].
    pub fn restore_value(&mut self, name: &str, previous: Option<PropValue>) {
        if let Some(prop) = self.0.get_mut(name) {
            prop.value = previous;
        }
    }

    /// Iterate options in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingProp)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The input widget a setting renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingKind {
    Select,
    Textarea,
    Text,
    Number,
    Checkbox,
}

/// A UI-facing projection of one option: metadata plus a live binder.
/// Ephemeral; rebuilt whenever the selection changes.
pub struct Setting {
    pub id: String,
    pub label: String,
    pub prop_name: String,
    pub kind: SettingKind,
    binder: Box<dyn SettingBinder>,
}

impl Setting {
    pub fn value(&self) -> DesignResult<PropValue> {
        self.binder.get_value()
    }

    pub fn set_value(&self, value: PropValue) -> BoxFuture<'_, DesignResult<()>> {
        self.binder.set_value(value)
    }
}

impl std::fmt::Debug for Setting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Setting")
            .field("id", &self.id)
            .field("prop_name", &self.prop_name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Build one setting from a declared option and its binder.
///
/// The widget kind comes from the option's declared shape first (select,
/// textarea), then from the runtime type of the current value.
pub fn create_setting(
    prop_name: &str,
    prop: &SettingProp,
    binder: Box<dyn SettingBinder>,
) -> DesignResult<Setting> {
    let kind = if prop.select.is_some() {
        SettingKind::Select
    } else if prop.textarea.is_some() {
        SettingKind::Textarea
    } else {
        match binder.get_value()? {
            PropValue::Number(_) => SettingKind::Number,
            PropValue::Text(_) => SettingKind::Text,
            PropValue::Bool(_) => SettingKind::Checkbox,
        }
    };

    Ok(Setting {
        id: format!("sg-{}", camel_to_kebab_case(prop_name)),
        label: camel_to_title_case(prop_name),
        prop_name: prop_name.to_string(),
        kind,
        binder,
    })
}

/// Produce the ordered setting list for an object, choosing the binder
/// flavor per option.
pub fn bound_settings(
    object: &Rc<RefCell<DrawableObject>>,
    plugin: &Rc<dyn LabelPlugin>,
    events: &EventQueue,
) -> DesignResult<Vec<Setting>> {
    let declared: Vec<(String, SettingProp)> = object
        .borrow()
        .options
        .iter()
        .map(|(name, prop)| (name.clone(), prop.clone()))
        .collect();

    let mut settings = Vec::with_capacity(declared.len());
    for (name, prop) in declared {
        let binder: Box<dyn SettingBinder> = if prop.is_native {
            // Validate against the object's schema up front.
            object.borrow().get(&name)?;
            Box::new(NativeBinder::new(object.clone(), &name, events.clone()))
        } else {
            Box::new(PluginBinder::new(
                object.clone(),
                &name,
                plugin.clone(),
                events.clone(),
            ))
        };
        settings.push(create_setting(&name, &prop, binder)?);
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_kind_from_shape() {
        let select = SettingProp::plugin_select("CODE128", &["CODE128", "CODE39"]);
        assert!(select.select.is_some());

        let textarea = SettingProp::native_textarea("hi", TextareaSpec::default());
        assert!(textarea.textarea.is_some());
    }

    #[test]
    fn test_options_sorted_iteration() {
        let options = PluginOptions::new()
            .with("width", SettingProp::plugin(2.0))
            .with("format", SettingProp::plugin("CODE128"))
            .with("text", SettingProp::plugin("1234"));
        let keys: Vec<&str> = options.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["format", "text", "width"]);
    }

    #[test]
    fn test_set_value_returns_previous_and_rejects_unknown() {
        let mut options = PluginOptions::new().with("text", SettingProp::plugin("old"));
        let previous = options.set_value("text", PropValue::from("new")).unwrap();
        assert_eq!(previous, Some(PropValue::from("old")));
        assert_eq!(options.text("text"), Some("new"));

        assert!(matches!(
            options.set_value("bogus", PropValue::from(1.0)),
            Err(DesignError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn test_restore_value() {
        let mut options = PluginOptions::new().with("text", SettingProp::plugin("old"));
        let previous = options.set_value("text", PropValue::from("new")).unwrap();
        options.restore_value("text", previous);
        assert_eq!(options.text("text"), Some("old"));
    }
}
