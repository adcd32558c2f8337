//! The object layer: owns every drawable object on the canvas.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use kurbo::Point;

use crate::events::{DesignEvent, EventQueue};
use crate::frame::ReferenceFrame;
use crate::object::{DrawableObject, ObjectId, SelectionStyle};
use crate::relationship::RelationshipTracker;
use crate::selection::SelectionEvent;

/// Shared handle to an object on the layer.
pub type ObjectHandle = Rc<RefCell<DrawableObject>>;

/// Owns the drawable objects (map plus z-order), the active selection and
/// the relationship tracker.
pub struct ObjectLayer {
    objects: HashMap<ObjectId, ObjectHandle>,
    /// Z-order, back to front.
    z_order: Vec<ObjectId>,
    active: Option<ObjectId>,
    tracker: RelationshipTracker,
    events: EventQueue,
}

impl ObjectLayer {
    pub fn new(events: EventQueue) -> Self {
        Self {
            objects: HashMap::new(),
            z_order: Vec::new(),
            active: None,
            tracker: RelationshipTracker::new(),
            events,
        }
    }

    /// Insert an object: style it, clip it to the frame, center it at
    /// `center`, capture its relationship and make it the active object.
    pub fn insert(
        &mut self,
        mut object: DrawableObject,
        frame: &ReferenceFrame,
        center: Point,
    ) -> (ObjectHandle, SelectionEvent) {
        object.selection_style = SelectionStyle::default();
        object.clipped = true;
        object.set_position_by_center(center);
        object.set_coords();
        self.tracker.capture(&object, frame);
        object.set_attached(true);

        let id = object.id();
        log::debug!("object {id} ({}) inserted on layer", object.kind);

        let handle = Rc::new(RefCell::new(object));
        self.objects.insert(id, handle.clone());
        self.z_order.push(id);

        let event = self.set_active(Some(id));
        (handle, event)
    }

    /// Remove an object, discarding its relationship. Returns the handle
    /// (a stale regeneration may still resolve against it; the detached
    /// object makes that a no-op) and the selection event if the object
    /// was active.
    pub fn remove(&mut self, id: ObjectId) -> (Option<ObjectHandle>, Option<SelectionEvent>) {
        let handle = self.objects.remove(&id);
        if let Some(handle) = &handle {
            self.z_order.retain(|other| *other != id);
            self.tracker.discard(id);
            handle.borrow_mut().set_attached(false);
            log::debug!("object {id} removed from layer");
        }
        let event = if self.active == Some(id) {
            Some(self.set_active(None))
        } else {
            None
        };
        (handle, event)
    }

    /// Change the active object, producing the selection event payload.
    pub fn set_active(&mut self, id: Option<ObjectId>) -> SelectionEvent {
        let deselected: Vec<ObjectId> = self
            .active
            .take()
            .into_iter()
            .filter(|old| Some(*old) != id)
            .collect();
        self.active = id;
        self.events.push(DesignEvent::SelectionChanged);
        SelectionEvent {
            selected: id.into_iter().collect(),
            deselected,
        }
    }

    pub fn discard_active(&mut self) -> SelectionEvent {
        self.set_active(None)
    }

    /// Produce the selection event for an arbitrary set of ids. Only a
    /// single id becomes the active object; zero or multiple clear it.
    pub fn select(&mut self, ids: &[ObjectId]) -> SelectionEvent {
        if ids.len() == 1 && self.objects.contains_key(&ids[0]) {
            self.set_active(Some(ids[0]))
        } else {
            let mut event = self.set_active(None);
            event.selected = ids.to_vec();
            event
        }
    }

    pub fn active(&self) -> Option<ObjectId> {
        self.active
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectHandle> {
        self.objects.get(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Object handles in z-order, back to front.
    pub fn handles_ordered(&self) -> Vec<ObjectHandle> {
        self.z_order
            .iter()
            .filter_map(|id| self.objects.get(id).cloned())
            .collect()
    }

    /// Recapture one object's relationship after a completed gesture or
    /// setting edit. Unknown ids are tolerated (a stale notification for
    /// a removed object).
    pub fn notify_modified(&mut self, id: ObjectId, frame: &ReferenceFrame) {
        match self.objects.get(&id) {
            Some(handle) => self.tracker.capture(&handle.borrow(), frame),
            None => log::trace!("modified notification for unknown object {id}"),
        }
    }

    /// Re-derive every tracked object's pose from the frame. Runs after
    /// the frame's own transform was updated and must cover all objects
    /// before the next render request.
    pub fn relocate_all(&self, frame: &ReferenceFrame) {
        for id in &self.z_order {
            if let Some(handle) = self.objects.get(id) {
                self.tracker.apply_to(frame, &mut handle.borrow_mut());
            }
        }
    }

    pub fn tracker(&self) -> &RelationshipTracker {
        &self.tracker
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    fn setup() -> (ObjectLayer, ReferenceFrame) {
        let mut frame = ReferenceFrame::new();
        frame.recenter(Size::new(1024.0, 768.0));
        (ObjectLayer::new(EventQueue::new()), frame)
    }

    #[test]
    fn test_insert_styles_clips_centers_and_tracks() {
        let (mut layer, frame) = setup();
        let object = DrawableObject::new("test", Size::new(25.0, 25.0));
        let id = object.id();

        let (handle, event) = layer.insert(object, &frame, Point::new(512.0, 384.0));

        assert_eq!(event.selected, vec![id]);
        assert!(event.deselected.is_empty());
        assert_eq!(layer.active(), Some(id));
        assert!(layer.tracker().is_tracked(id));

        let object = handle.borrow();
        assert!(object.clipped);
        assert!(object.is_attached());
        assert!((object.pose.left - 499.5).abs() < 1e-12);
        assert!((object.pose.top - 371.5).abs() < 1e-12);
    }

    #[test]
    fn test_insert_replaces_active() {
        let (mut layer, frame) = setup();
        let first = DrawableObject::new("test", Size::new(10.0, 10.0));
        let first_id = first.id();
        layer.insert(first, &frame, Point::ZERO);

        let second = DrawableObject::new("test", Size::new(10.0, 10.0));
        let second_id = second.id();
        let (_, event) = layer.insert(second, &frame, Point::ZERO);

        assert_eq!(event.selected, vec![second_id]);
        assert_eq!(event.deselected, vec![first_id]);
    }

    #[test]
    fn test_remove_discards_relationship_and_detaches() {
        let (mut layer, frame) = setup();
        let object = DrawableObject::new("test", Size::new(10.0, 10.0));
        let id = object.id();
        layer.insert(object, &frame, Point::ZERO);

        let (handle, event) = layer.remove(id);
        let handle = handle.unwrap();
        assert!(!handle.borrow().is_attached());
        assert!(!layer.tracker().is_tracked(id));
        assert_eq!(event.unwrap().deselected, vec![id]);
        assert!(layer.is_empty());
    }

    #[test]
    fn test_relocate_all_follows_frame() {
        let (mut layer, mut frame) = setup();
        let object = DrawableObject::new("test", Size::new(25.0, 25.0));
        let (handle, _) = layer.insert(object, &frame, frame.center());

        frame.recenter(Size::new(1124.0, 868.0));
        layer.relocate_all(&frame);

        let object = handle.borrow();
        assert!((object.pose.left - 549.5).abs() < 1e-9);
        assert!((object.pose.top - 421.5).abs() < 1e-9);
    }

    #[test]
    fn test_notify_modified_recaptures() {
        let (mut layer, frame) = setup();
        let object = DrawableObject::new("test", Size::new(20.0, 20.0));
        let id = object.id();
        let (handle, _) = layer.insert(object, &frame, frame.center());
        let before = layer.tracker().relationship(id).unwrap();

        handle.borrow_mut().pose.left += 40.0;
        handle.borrow_mut().set_coords();
        layer.notify_modified(id, &frame);

        let after = layer.tracker().relationship(id).unwrap();
        assert!((after.as_coeffs()[4] - before.as_coeffs()[4] - 40.0).abs() < 1e-9);

        // Unknown id is tolerated.
        layer.notify_modified(ObjectId::new_v4(), &frame);
    }
}
