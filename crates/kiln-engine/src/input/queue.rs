use std::collections::VecDeque;

use super::Event;

/// FIFO of platform events waiting for the application to poll them.
///
/// Consecutive resizes and mouse moves are coalesced; only the latest value
/// matters once the application gets to look.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        if let Some(last) = self.events.back_mut() {
            let coalesce = matches!(
                (&*last, &event),
                (Event::Resize { .. }, Event::Resize { .. })
                    | (Event::MouseMove { .. }, Event::MouseMove { .. })
            );
            if coalesce {
                *last = event;
                return;
            }
        }
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    #[test]
    fn preserves_order() {
        let mut q = EventQueue::new();
        q.push(Event::Key { key: Key::F1, pressed: true });
        q.push(Event::Exit);
        assert_eq!(q.pop(), Some(Event::Key { key: Key::F1, pressed: true }));
        assert_eq!(q.pop(), Some(Event::Exit));
        assert!(q.pop().is_none());
    }

    #[test]
    fn coalesces_back_to_back_resizes() {
        let mut q = EventQueue::new();
        q.push(Event::Resize { width: 100, height: 100 });
        q.push(Event::Resize { width: 640, height: 480 });
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop(), Some(Event::Resize { width: 640, height: 480 }));
    }

    #[test]
    fn does_not_coalesce_across_other_events() {
        let mut q = EventQueue::new();
        q.push(Event::MouseMove { x: 1, y: 1 });
        q.push(Event::MouseButton { button: crate::input::MouseButton::Left, pressed: true });
        q.push(Event::MouseMove { x: 2, y: 2 });
        assert_eq!(q.len(), 3);
    }
}
