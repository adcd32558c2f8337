//! The toolbox: one insertable action per registered plugin.

use serde::{Deserialize, Serialize};

use crate::plugin::PluginRegistry;

/// A toolbox entry. Ids and icons derive from the plugin tag; clicking
/// one runs the create-and-insert flow on the designer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub icon: String,
    pub plugin_name: String,
}

impl Action {
    pub fn for_plugin(name: &str) -> Self {
        Self {
            id: format!("btn-{name}"),
            icon: format!("icon-{name}"),
            plugin_name: name.to_string(),
        }
    }
}

/// Ordered collection of toolbox actions.
#[derive(Debug, Clone, Default)]
pub struct Toolbox {
    actions: Vec<Action>,
}

impl Toolbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_registry(registry: &PluginRegistry) -> Self {
        let actions = registry
            .iter()
            .map(|plugin| Action::for_plugin(plugin.name()))
            .collect();
        log::debug!("toolbox loaded");
        Self { actions }
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn find(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_ids_derive_from_plugin_name() {
        let action = Action::for_plugin("barcode");
        assert_eq!(action.id, "btn-barcode");
        assert_eq!(action.icon, "icon-barcode");
        assert_eq!(action.plugin_name, "barcode");
    }

    #[test]
    fn test_find() {
        let mut toolbox = Toolbox::new();
        toolbox.push(Action::for_plugin("qrcode"));
        assert!(toolbox.find("btn-qrcode").is_some());
        assert!(toolbox.find("btn-missing").is_none());
    }
}
