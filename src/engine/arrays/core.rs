//! Core Arrays
//!
//! The most fundamental component arrays:
//! - componentType: What kind of component (box, text)
//! - parentIndex: Parent in hierarchy
//! - visible: Is component laid out
//!
//! `componentType` and `parentIndex` store values directly (not reactive);
//! they are fixed when the component is created.

use std::cell::RefCell;
use crate::types::ComponentType;
use super::BindingArray;

thread_local! {
    /// Component type - stores values directly.
    static COMPONENT_TYPE: RefCell<Vec<ComponentType>> = RefCell::new(Vec::new());

    /// Parent component index (None for root).
    static PARENT_INDEX: RefCell<Vec<Option<usize>>> = RefCell::new(Vec::new());

    /// Is component visible (false = skipped by layout).
    static VISIBLE: BindingArray<bool> = BindingArray::new(true);
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    COMPONENT_TYPE.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(ComponentType::None);
        }
    });
    PARENT_INDEX.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(None);
        }
    });
    VISIBLE.with(|arr| arr.ensure_capacity(index));
}

/// Clear values at index (called when releasing).
pub fn clear_at_index(index: usize) {
    COMPONENT_TYPE.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = ComponentType::None;
        }
    });
    PARENT_INDEX.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = None;
        }
    });
    VISIBLE.with(|arr| arr.clear(index));
}

/// Reset all arrays.
pub fn reset() {
    COMPONENT_TYPE.with(|arr| arr.borrow_mut().clear());
    PARENT_INDEX.with(|arr| arr.borrow_mut().clear());
    VISIBLE.with(|arr| arr.clear_all());
}

// =============================================================================
// Component Type
// =============================================================================

/// Get component type at index.
pub fn get_component_type(index: usize) -> ComponentType {
    COMPONENT_TYPE.with(|arr| arr.borrow().get(index).copied().unwrap_or(ComponentType::None))
}

/// Set component type at index.
pub fn set_component_type(index: usize, value: ComponentType) {
    ensure_capacity(index);
    COMPONENT_TYPE.with(|arr| arr.borrow_mut()[index] = value);
}

// =============================================================================
// Parent Index
// =============================================================================

/// Get parent index at index.
pub fn get_parent_index(index: usize) -> Option<usize> {
    PARENT_INDEX.with(|arr| arr.borrow().get(index).copied().flatten())
}

/// Set parent index at index.
pub fn set_parent_index(index: usize, parent: Option<usize>) {
    ensure_capacity(index);
    PARENT_INDEX.with(|arr| arr.borrow_mut()[index] = parent);
}

// =============================================================================
// Visible
// =============================================================================

/// Get visibility at index (reactive when bound to a getter).
pub fn get_visible(index: usize) -> bool {
    VISIBLE.with(|arr| arr.get(index))
}

/// Set visibility at index.
pub fn set_visible(index: usize, visible: bool) {
    VISIBLE.with(|arr| arr.set_value(index, visible));
}

/// Set visibility from a getter function.
pub fn set_visible_getter<F>(index: usize, getter: F)
where
    F: Fn() -> bool + 'static,
{
    VISIBLE.with(|arr| arr.set_getter(index, getter));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_type_and_parent() {
        reset();

        set_component_type(0, ComponentType::Box);
        set_component_type(1, ComponentType::Text);
        set_parent_index(1, Some(0));

        assert_eq!(get_component_type(0), ComponentType::Box);
        assert_eq!(get_component_type(1), ComponentType::Text);
        assert_eq!(get_parent_index(1), Some(0));
        assert_eq!(get_parent_index(0), None);

        clear_at_index(1);
        assert_eq!(get_component_type(1), ComponentType::None);
        assert_eq!(get_parent_index(1), None);
    }

    #[test]
    fn test_visible_defaults_true() {
        reset();

        assert!(get_visible(5));
        set_visible(5, false);
        assert!(!get_visible(5));
    }
}
