//! The two setting binder flavors: native passthrough and plugin-bound
//! regeneration.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{DesignError, DesignResult};
use crate::events::{DesignEvent, EventQueue};
use crate::object::DrawableObject;
use crate::plugin::{BoxFuture, LabelPlugin};
use crate::settings::PropValue;

/// A `{get, set}` pair over one editable property.
pub trait SettingBinder {
    fn get_value(&self) -> DesignResult<PropValue>;

    /// Write a new value. Native binders complete synchronously (the
    /// returned future is already resolved); plugin binders suspend for
    /// content regeneration.
    fn set_value(&self, value: PropValue) -> BoxFuture<'_, DesignResult<()>>;
}

/// Direct passthrough to a property the object itself understands.
pub struct NativeBinder {
    object: Rc<RefCell<DrawableObject>>,
    prop_name: String,
    events: EventQueue,
}

impl NativeBinder {
    pub fn new(object: Rc<RefCell<DrawableObject>>, prop_name: &str, events: EventQueue) -> Self {
        Self {
            object,
            prop_name: prop_name.to_string(),
            events,
        }
    }
}

impl SettingBinder for NativeBinder {
    fn get_value(&self) -> DesignResult<PropValue> {
        self.object.borrow().get(&self.prop_name)
    }

    fn set_value(&self, value: PropValue) -> BoxFuture<'_, DesignResult<()>> {
        // All work happens before the future is returned; no suspension.
        let result = (|| {
            let mut object = self.object.borrow_mut();
            object.set(&self.prop_name, value)?;
            object.set_coords();
            Ok(object.id())
        })();

        let result = result.map(|id| {
            self.events.push(DesignEvent::RenderRequested);
            self.events.push(DesignEvent::ObjectModified(id));
        });
        Box::pin(std::future::ready(result))
    }
}

/// Binder for plugin-private options: mutates the option map, then awaits
/// a full content regeneration while preserving the object's geometry.
pub struct PluginBinder {
    object: Rc<RefCell<DrawableObject>>,
    prop_name: String,
    plugin: Rc<dyn LabelPlugin>,
    events: EventQueue,
}

impl PluginBinder {
    pub fn new(
        object: Rc<RefCell<DrawableObject>>,
        prop_name: &str,
        plugin: Rc<dyn LabelPlugin>,
        events: EventQueue,
    ) -> Self {
        Self {
            object,
            prop_name: prop_name.to_string(),
            plugin,
            events,
        }
    }
}

impl SettingBinder for PluginBinder {
    fn get_value(&self) -> DesignResult<PropValue> {
        self.object
            .borrow()
            .options
            .value(&self.prop_name)
            .cloned()
            .ok_or_else(|| DesignError::UnknownProperty {
                name: self.prop_name.clone(),
            })
    }

    fn set_value(&self, value: PropValue) -> BoxFuture<'_, DesignResult<()>> {
        Box::pin(async move {
            // Write the option and snapshot everything the regeneration
            // must leave untouched, releasing the borrow before awaiting.
            let (options, previous, ticket, pose) = {
                let mut object = self.object.borrow_mut();
                let previous = object.options.set_value(&self.prop_name, value)?;
                let ticket = object.begin_regeneration();
                (object.options.clone(), previous, ticket, object.pose)
            };

            match self.plugin.regenerate(&options, &self.prop_name).await {
                Ok(content) => {
                    let mut object = self.object.borrow_mut();
                    if object.install_content(ticket, content) {
                        object.pose = pose;
                        object.set_coords();
                        let id = object.id();
                        drop(object);
                        self.events.push(DesignEvent::RenderRequested);
                        self.events.push(DesignEvent::ObjectModified(id));
                    } else {
                        log::debug!(
                            "dropping stale regeneration of `{}` on plugin `{}`",
                            self.prop_name,
                            self.plugin.name()
                        );
                    }
                    Ok(())
                }
                Err(err) => {
                    // All-or-nothing: roll the option back, content stays.
                    self.object
                        .borrow_mut()
                        .options
                        .restore_value(&self.prop_name, previous);
                    Err(DesignError::Plugin(err))
                }
            }
        })
    }
}
