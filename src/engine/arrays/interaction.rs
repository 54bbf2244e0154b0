//! Interaction Arrays
//!
//! Layout (measurement) handlers. A component that registers an `on_layout`
//! handler is told its computed frame whenever it changes; this is how a
//! container learns its own size.

use std::cell::RefCell;
use std::rc::Rc;

/// Computed frame of a component, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutEvent {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

/// Layout handler type (Rc so it can be cloned out before being called).
pub type LayoutHandler = Rc<dyn Fn(&LayoutEvent)>;

thread_local! {
    /// Registered on_layout handlers.
    static ON_LAYOUT: RefCell<Vec<Option<LayoutHandler>>> = RefCell::new(Vec::new());

    /// Last frame delivered to each handler.
    static LAST_DELIVERED: RefCell<Vec<Option<LayoutEvent>>> = RefCell::new(Vec::new());
}

pub fn ensure_capacity(index: usize) {
    ON_LAYOUT.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(None);
        }
    });
    LAST_DELIVERED.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(None);
        }
    });
}

pub fn clear_at_index(index: usize) {
    ON_LAYOUT.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = None;
        }
    });
    LAST_DELIVERED.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = None;
        }
    });
}

pub fn reset() {
    ON_LAYOUT.with(|arr| arr.borrow_mut().clear());
    LAST_DELIVERED.with(|arr| arr.borrow_mut().clear());
}

// =============================================================================
// On Layout
// =============================================================================

/// Register the layout handler for a component, replacing any previous one.
pub fn set_on_layout(index: usize, handler: LayoutHandler) {
    ensure_capacity(index);
    ON_LAYOUT.with(|arr| arr.borrow_mut()[index] = Some(handler));
    LAST_DELIVERED.with(|arr| arr.borrow_mut()[index] = None);
}

/// Get the layout handler for a component.
pub fn get_on_layout(index: usize) -> Option<LayoutHandler> {
    ON_LAYOUT.with(|arr| arr.borrow().get(index).cloned().flatten())
}

/// Indices that currently have a layout handler.
pub fn layout_listener_indices() -> Vec<usize> {
    ON_LAYOUT.with(|arr| {
        arr.borrow()
            .iter()
            .enumerate()
            .filter_map(|(index, handler)| handler.as_ref().map(|_| index))
            .collect()
    })
}

/// Last frame delivered to the handler at `index`.
pub fn get_last_delivered(index: usize) -> Option<LayoutEvent> {
    LAST_DELIVERED.with(|arr| arr.borrow().get(index).copied().flatten())
}

/// Record the frame delivered to the handler at `index`.
pub fn set_last_delivered(index: usize, event: LayoutEvent) {
    ensure_capacity(index);
    LAST_DELIVERED.with(|arr| arr.borrow_mut()[index] = Some(event));
}

/// Forget the frame delivered at `index`, so the next pass delivers again.
pub fn clear_last_delivered(index: usize) {
    LAST_DELIVERED.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = None;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_on_layout_registration() {
        reset();

        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        set_on_layout(2, Rc::new(move |_| calls_clone.set(calls_clone.get() + 1)));

        assert_eq!(layout_listener_indices(), vec![2]);
        let handler = get_on_layout(2).unwrap();
        handler(&LayoutEvent::default());
        assert_eq!(calls.get(), 1);

        clear_at_index(2);
        assert!(get_on_layout(2).is_none());
        assert!(layout_listener_indices().is_empty());
    }

    #[test]
    fn test_clear_last_delivered() {
        reset();

        let frame = LayoutEvent { x: 0, y: 0, width: 320, height: 24 };
        set_last_delivered(1, frame);
        assert_eq!(get_last_delivered(1), Some(frame));

        clear_last_delivered(1);
        assert_eq!(get_last_delivered(1), None);
        // Out of range is a no-op
        clear_last_delivered(40);
    }
}
