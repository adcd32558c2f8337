//! Typed notification channel for the design session.
//!
//! Replaces fire-and-forget emitter semantics with an explicit FIFO queue:
//! components push, the designer drains in order before the next render.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::object::ObjectId;

/// A notification produced inside the design session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesignEvent {
    /// An object finished a modification (gesture end or setting edit);
    /// its relationship to the frame must be recaptured.
    ObjectModified(ObjectId),
    /// The scene needs a redraw.
    RenderRequested,
    /// The set of selected objects changed.
    SelectionChanged,
}

/// Shared FIFO queue of design events. Cloning shares the underlying
/// queue; the session is single-threaded by construction.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    inner: Rc<RefCell<VecDeque<DesignEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: DesignEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Drain all pending events in the order they were pushed.
    pub fn drain(&self) -> Vec<DesignEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_fifo_ordering() {
        let queue = EventQueue::new();
        let id = Uuid::new_v4();
        queue.push(DesignEvent::ObjectModified(id));
        queue.push(DesignEvent::RenderRequested);
        queue.push(DesignEvent::SelectionChanged);

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                DesignEvent::ObjectModified(id),
                DesignEvent::RenderRequested,
                DesignEvent::SelectionChanged,
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clone_shares_queue() {
        let queue = EventQueue::new();
        let other = queue.clone();
        other.push(DesignEvent::RenderRequested);
        assert_eq!(queue.len(), 1);
    }
}
