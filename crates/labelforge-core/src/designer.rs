//! The label designer: orchestrates viewport, frame, layer, plugins and
//! the reactive toolbox/settings surfaces.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use kurbo::{Point, Size};

use crate::bridge::ZoomSlider;
use crate::error::{DesignError, DesignResult};
use crate::events::{DesignEvent, EventQueue};
use crate::export::Rasterizer;
use crate::frame::ReferenceFrame;
use crate::layer::ObjectLayer;
use crate::object::ObjectId;
use crate::plugin::{LabelPlugin, PluginRegistry};
use crate::selection::SettingsPanel;
use crate::settings::PropValue;
use crate::toolbox::Toolbox;
use crate::viewport::Viewport;

/// One design session: a label area inside a pannable, zoomable viewport,
/// a set of plugin-created objects anchored to it, and the toolbox and
/// settings collections the UI renders.
pub struct LabelDesigner {
    viewport: Rc<RefCell<Viewport>>,
    frame: ReferenceFrame,
    layer: ObjectLayer,
    registry: PluginRegistry,
    toolbox: Toolbox,
    settings: SettingsPanel,
    zoom_slider: ZoomSlider,
    events: EventQueue,
}

impl LabelDesigner {
    pub fn new(viewport_size: Size) -> Self {
        let events = EventQueue::new();
        let viewport = Rc::new(RefCell::new(Viewport::new(viewport_size)));
        let mut frame = ReferenceFrame::new();
        frame.recenter(viewport_size);

        let mut zoom_slider = ZoomSlider::new();
        {
            let vp = viewport.clone();
            let get = Box::new(move || vp.borrow().zoom());
            let vp = viewport.clone();
            let ev = events.clone();
            let set = Box::new(move |zoom: f64| {
                vp.borrow_mut().set_zoom(zoom);
                ev.push(DesignEvent::RenderRequested);
            });
            zoom_slider.bridge.bind(get, set);
        }

        log::debug!("label designer created");
        Self {
            layer: ObjectLayer::new(events.clone()),
            viewport,
            frame,
            registry: PluginRegistry::new(),
            toolbox: Toolbox::new(),
            settings: SettingsPanel::new(),
            zoom_slider,
            events,
        }
    }

    /// Register a plugin at startup.
    pub fn register_plugin(&mut self, plugin: Rc<dyn LabelPlugin>) -> DesignResult<()> {
        self.registry.register(plugin)
    }

    /// Build the toolbox from the registered plugins.
    pub fn load_toolbox(&mut self) {
        self.toolbox = Toolbox::from_registry(&self.registry);
    }

    pub fn toolbox(&self) -> &Toolbox {
        &self.toolbox
    }

    pub fn settings(&self) -> &SettingsPanel {
        &self.settings
    }

    pub fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }

    pub fn layer(&self) -> &ObjectLayer {
        &self.layer
    }

    pub fn viewport(&self) -> Ref<'_, Viewport> {
        self.viewport.borrow()
    }

    pub fn zoom_slider(&self) -> &ZoomSlider {
        &self.zoom_slider
    }

    pub fn zoom_slider_mut(&mut self) -> &mut ZoomSlider {
        &mut self.zoom_slider
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Run a toolbox action: create the plugin's object, insert it on the
    /// layer (styled, clipped, centered, relationship captured, selected)
    /// and fire the plugin's post-insertion hook.
    pub async fn run_action(&mut self, action_id: &str) -> DesignResult<ObjectId> {
        let action = self
            .toolbox
            .find(action_id)
            .cloned()
            .ok_or_else(|| DesignError::UnknownAction {
                id: action_id.to_string(),
            })?;
        let plugin = self.registry.get(&action.plugin_name)?;

        let mut object = plugin.create_object().await?;
        object.kind = plugin.name().to_string();
        let id = object.id();

        let center = self.viewport.borrow().center();
        let (handle, event) = self.layer.insert(object, &self.frame, center);

        plugin.on_added(&mut handle.borrow_mut());
        // The hook may have adjusted geometry; recapture so the anchoring
        // invariant holds before the next frame change.
        self.layer.notify_modified(id, &self.frame);

        self.settings
            .refill(&event, &self.layer, &self.registry, &self.events)?;
        self.events.push(DesignEvent::RenderRequested);
        log::debug!("action `{action_id}` inserted object {id}");
        Ok(id)
    }

    /// Remove an object from the layer, discarding its relationship and
    /// clearing the selection if it was active.
    pub fn remove_object(&mut self, id: ObjectId) -> DesignResult<()> {
        let (handle, event) = self.layer.remove(id);
        if handle.is_none() {
            return Err(DesignError::UnknownObject(id));
        }
        if let Some(event) = event {
            self.settings
                .refill(&event, &self.layer, &self.registry, &self.events)?;
        }
        self.events.push(DesignEvent::RenderRequested);
        Ok(())
    }

    /// Resize the viewport: recenter the frame, then re-anchor every
    /// tracked object. Idempotent for repeated identical sizes.
    pub fn resize_viewport(&mut self, size: Size) {
        if !self.viewport.borrow_mut().resize(size) {
            return;
        }
        self.frame.recenter(size);
        self.layer.relocate_all(&self.frame);
        self.events.push(DesignEvent::RenderRequested);
    }

    /// Scroll input. Zooms only while the modifier is held; returns true
    /// when consumed.
    pub fn scroll(&mut self, point: Point, delta: f64, modifier: bool) -> bool {
        let handled = self.viewport.borrow_mut().scroll(point, delta, modifier);
        if handled {
            self.zoom_slider.bridge.notify(self.viewport.borrow().zoom());
            self.events.push(DesignEvent::RenderRequested);
        }
        handled
    }

    pub fn pointer_down(&mut self, point: Point, modifier: bool) {
        self.viewport.borrow_mut().pointer_down(point, modifier);
    }

    pub fn pointer_move(&mut self, point: Point) {
        if self.viewport.borrow_mut().pointer_move(point) {
            self.events.push(DesignEvent::RenderRequested);
        }
    }

    pub fn pointer_up(&mut self) {
        self.viewport.borrow_mut().pointer_up();
    }

    /// An object was released from a direct-manipulation gesture; its
    /// relationship to the frame is recaptured now, never mid-drag.
    pub fn end_manipulation(&mut self, id: ObjectId) {
        self.layer.notify_modified(id, &self.frame);
    }

    /// Apply a canvas selection change to the settings collection.
    pub fn select(&mut self, ids: &[ObjectId]) -> DesignResult<()> {
        let event = self.layer.select(ids);
        self.settings
            .refill(&event, &self.layer, &self.registry, &self.events)
    }

    /// Edit one setting of the selected object. Native properties apply
    /// synchronously; plugin-bound properties suspend for regeneration.
    pub async fn apply_setting(&mut self, prop_name: &str, value: PropValue) -> DesignResult<()> {
        if !self.settings.has_selection() {
            return Err(DesignError::NoSelection);
        }
        {
            let setting =
                self.settings
                    .get(prop_name)
                    .ok_or_else(|| DesignError::UnknownProperty {
                        name: prop_name.to_string(),
                    })?;
            setting.set_value(value).await?;
        }
        self.pump();
        Ok(())
    }

    /// Drain the event queue: recapture relationships for modified
    /// objects and report whether a redraw is needed.
    pub fn pump(&mut self) -> bool {
        let mut render = false;
        for event in self.events.drain() {
            match event {
                DesignEvent::ObjectModified(id) => self.layer.notify_modified(id, &self.frame),
                DesignEvent::RenderRequested => render = true,
                DesignEvent::SelectionChanged => {}
            }
        }
        render
    }

    /// Export the label: reset the viewport transform to identity,
    /// rasterize the frame bounds, restore the transform. The transform
    /// is restored on failure too.
    pub fn download(&mut self, rasterizer: &mut dyn Rasterizer) -> DesignResult<Vec<u8>> {
        let saved = self.viewport.borrow_mut().reset_transform();
        let result = rasterizer.rasterize(self.frame.bounds(), &self.layer.handles_ordered());
        self.viewport.borrow_mut().restore_transform(saved);
        self.events.push(DesignEvent::RenderRequested);
        result
    }

    /// Resize the label area itself (not the viewport).
    pub fn set_label_size(&mut self, size: Size) {
        self.frame.set_label_size(size);
        self.events.push(DesignEvent::RenderRequested);
    }
}
