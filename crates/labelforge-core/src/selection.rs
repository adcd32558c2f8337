//! Selection state and the reactive settings collection.

use crate::error::{DesignError, DesignResult};
use crate::events::EventQueue;
use crate::layer::{ObjectHandle, ObjectLayer};
use crate::object::ObjectId;
use crate::plugin::PluginRegistry;
use crate::settings::{Setting, bound_settings};

/// Payload of a canvas selection event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionEvent {
    pub selected: Vec<ObjectId>,
    pub deselected: Vec<ObjectId>,
}

/// The editable setting list, rebuilt from the current selection.
///
/// `has_selection` is true exactly when one object is selected; zero or
/// multiple selections leave the collection empty.
#[derive(Default)]
pub struct SettingsPanel {
    has_selection: bool,
    selected: Option<ObjectHandle>,
    items: Vec<Setting>,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the collection from a selection event.
    pub fn refill(
        &mut self,
        event: &SelectionEvent,
        layer: &ObjectLayer,
        registry: &PluginRegistry,
        events: &EventQueue,
    ) -> DesignResult<()> {
        self.items.clear();
        self.selected = None;
        self.has_selection = event.selected.len() == 1;
        if !self.has_selection {
            return Ok(());
        }

        let id = event.selected[0];
        let handle = layer
            .get(id)
            .cloned()
            .ok_or(DesignError::UnknownObject(id))?;
        let plugin = registry.get(&handle.borrow().kind)?;

        self.items = bound_settings(&handle, &plugin, events)?;
        self.selected = Some(handle);
        Ok(())
    }

    pub fn has_selection(&self) -> bool {
        self.has_selection
    }

    pub fn selected(&self) -> Option<&ObjectHandle> {
        self.selected.as_ref()
    }

    pub fn items(&self) -> &[Setting] {
        &self.items
    }

    pub fn get(&self, prop_name: &str) -> Option<&Setting> {
        self.items.iter().find(|s| s.prop_name == prop_name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
