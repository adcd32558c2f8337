//! Relationship bookkeeping: the affine transform each object holds
//! relative to the reference frame.

use std::collections::HashMap;

use kurbo::Affine;

use crate::frame::ReferenceFrame;
use crate::object::{DrawableObject, ObjectId};
use crate::transform::decompose;

/// Stores, per object, its pose relative to the reference frame, and
/// re-derives world poses when the frame moves.
#[derive(Debug, Clone, Default)]
pub struct RelationshipTracker {
    relationships: HashMap<ObjectId, Affine>,
}

impl RelationshipTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the object's current pose relative to the frame:
    /// `relationship = frame⁻¹ ∘ world`. Called at insertion and after
    /// every completed manipulation gesture, never during intermediate
    /// drag frames.
    pub fn capture(&mut self, object: &DrawableObject, frame: &ReferenceFrame) {
        let relationship = frame.world_transform().inverse() * object.world_transform();
        self.relationships.insert(object.id(), relationship);
    }

    /// Re-derive one object's world pose from its stored relationship.
    /// Objects without a captured relationship are skipped (returns false).
    ///
    /// Flip flags are zeroed before the decomposed scale lands; a flip
    /// re-expresses as negative scale through the decomposition.
    pub fn apply_to(&self, frame: &ReferenceFrame, object: &mut DrawableObject) -> bool {
        let Some(relationship) = self.relationships.get(&object.id()) else {
            return false;
        };
        let new_world = frame.world_transform() * *relationship;
        object.apply_decomposed(&decompose(new_world));
        true
    }

    /// The stored relationship for an object, if any.
    pub fn relationship(&self, id: ObjectId) -> Option<Affine> {
        self.relationships.get(&id).copied()
    }

    pub fn is_tracked(&self, id: ObjectId) -> bool {
        self.relationships.contains_key(&id)
    }

    /// Drop the relationship when an object leaves the layer.
    pub fn discard(&mut self, id: ObjectId) {
        self.relationships.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Size};

    fn frame_at(viewport: Size) -> ReferenceFrame {
        let mut frame = ReferenceFrame::new();
        frame.recenter(viewport);
        frame
    }

    #[test]
    fn test_capture_of_centered_object_is_identity() {
        let frame = frame_at(Size::new(1024.0, 768.0));
        let mut object = DrawableObject::new("test", Size::new(50.0, 50.0));
        object.set_position_by_center(frame.center());

        let mut tracker = RelationshipTracker::new();
        tracker.capture(&object, &frame);

        let coeffs = tracker.relationship(object.id()).unwrap().as_coeffs();
        let identity = Affine::IDENTITY.as_coeffs();
        for i in 0..6 {
            assert!((coeffs[i] - identity[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_roundtrip_reproduces_world_transform() {
        let frame = frame_at(Size::new(1024.0, 768.0));
        let mut object = DrawableObject::new("test", Size::new(40.0, 20.0));
        object.pose.scale_x = 1.5;
        object.pose.scale_y = 0.75;
        object.pose.angle = 33.0;
        object.set_position_by_center(Point::new(400.0, 300.0));
        let original = object.world_transform().as_coeffs();

        let mut tracker = RelationshipTracker::new();
        tracker.capture(&object, &frame);
        assert!(tracker.apply_to(&frame, &mut object));

        let restored = object.world_transform().as_coeffs();
        for i in 0..6 {
            assert!(
                (restored[i] - original[i]).abs() < 1e-9,
                "coefficient {i}: {} vs {}",
                restored[i],
                original[i]
            );
        }
    }

    #[test]
    fn test_proportional_anchoring_after_resize() {
        // 25x25 object centered in a 1024x768 viewport; viewport grows by
        // 100 units in each dimension.
        let mut frame = frame_at(Size::new(1024.0, 768.0));
        let mut object = DrawableObject::new("test", Size::new(25.0, 25.0));
        object.set_position_by_center(frame.center());

        let mut tracker = RelationshipTracker::new();
        tracker.capture(&object, &frame);

        frame.recenter(Size::new(1124.0, 868.0));
        assert!(tracker.apply_to(&frame, &mut object));

        assert!((object.pose.left - (1124.0 / 2.0 - 25.0 / 2.0)).abs() < 1e-9);
        assert!((object.pose.top - (868.0 / 2.0 - 25.0 / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_untracked_object_skipped() {
        let frame = frame_at(Size::new(1024.0, 768.0));
        let mut object = DrawableObject::new("test", Size::new(10.0, 10.0));
        let tracker = RelationshipTracker::new();
        assert!(!tracker.apply_to(&frame, &mut object));
    }

    #[test]
    fn test_flip_is_not_preserved_through_reanchoring() {
        let mut frame = frame_at(Size::new(1024.0, 768.0));
        let mut object = DrawableObject::new("test", Size::new(30.0, 30.0));
        object.pose.flip_x = true;
        object.set_position_by_center(frame.center());
        let original_world = object.world_transform().as_coeffs();

        let mut tracker = RelationshipTracker::new();
        tracker.capture(&object, &frame);
        frame.recenter(Size::new(1024.0, 768.0));
        tracker.apply_to(&frame, &mut object);

        // Flip flags are gone, but the visual pose survives as negative
        // scale through the decomposition.
        assert!(!object.pose.flip_x);
        assert!(!object.pose.flip_y);
        let restored_world = object.world_transform().as_coeffs();
        for i in 0..6 {
            assert!((restored_world[i] - original_world[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_discard() {
        let frame = frame_at(Size::new(1024.0, 768.0));
        let object = DrawableObject::new("test", Size::new(10.0, 10.0));
        let mut tracker = RelationshipTracker::new();
        tracker.capture(&object, &frame);
        assert!(tracker.is_tracked(object.id()));
        tracker.discard(object.id());
        assert!(!tracker.is_tracked(object.id()));
    }
}
