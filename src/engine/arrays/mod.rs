//! Parallel Arrays
//!
//! All component state lives in these parallel arrays.
//! Each array index corresponds to one component.
//!
//! Reactive columns are [`BindingArray`]s: each cell holds either a static
//! value or a getter. Reading a getter cell evaluates it on the spot, so a
//! derived or effect that reads the cell tracks whatever signals the getter
//! reads.
//!
//! # Array Categories
//!
//! - **core**: Component type, parent, visibility
//! - **text**: Text content
//! - **accessibility**: Accessibility flags passed through to the host
//! - **interaction**: Layout (measurement) handlers

pub mod core;
pub mod text;
pub mod accessibility;
pub mod interaction;

use std::cell::RefCell;
use std::rc::Rc;

use self::core as core_arrays;
use self::text as text_arrays;
use self::accessibility as accessibility_arrays;
use self::interaction as interaction_arrays;

// =============================================================================
// Binding cells
// =============================================================================

/// One cell of a reactive column.
pub enum Binding<T> {
    /// Plain value.
    Static(T),
    /// Evaluated on every read.
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone> Clone for Binding<T> {
    fn clone(&self) -> Self {
        match self {
            Binding::Static(v) => Binding::Static(v.clone()),
            Binding::Getter(g) => Binding::Getter(g.clone()),
        }
    }
}

impl<T: Clone> Binding<T> {
    fn read(&self) -> T {
        match self {
            Binding::Static(v) => v.clone(),
            Binding::Getter(g) => g(),
        }
    }
}

/// A growable column of [`Binding`]s with a default for unset cells.
pub struct BindingArray<T> {
    cells: RefCell<Vec<Binding<T>>>,
    default: T,
}

impl<T: Clone + 'static> BindingArray<T> {
    pub fn new(default: T) -> Self {
        Self {
            cells: RefCell::new(Vec::new()),
            default,
        }
    }

    /// Grow the column so `index` is addressable.
    pub fn ensure_capacity(&self, index: usize) {
        let mut cells = self.cells.borrow_mut();
        while cells.len() <= index {
            cells.push(Binding::Static(self.default.clone()));
        }
    }

    /// Read the cell. Getters run outside the borrow so they may read
    /// other cells of the same column.
    pub fn get(&self, index: usize) -> T {
        let binding = self.cells.borrow().get(index).cloned();
        match binding {
            Some(binding) => binding.read(),
            None => self.default.clone(),
        }
    }

    pub fn set_value(&self, index: usize, value: T) {
        self.ensure_capacity(index);
        self.cells.borrow_mut()[index] = Binding::Static(value);
    }

    pub fn set_getter(&self, index: usize, getter: impl Fn() -> T + 'static) {
        self.ensure_capacity(index);
        self.cells.borrow_mut()[index] = Binding::Getter(Rc::new(getter));
    }

    /// Reset one cell to the default, dropping any getter.
    pub fn clear(&self, index: usize) {
        if let Some(cell) = self.cells.borrow_mut().get_mut(index) {
            *cell = Binding::Static(self.default.clone());
        }
    }

    pub fn clear_all(&self) {
        self.cells.borrow_mut().clear();
    }
}

// =============================================================================
// Lifecycle hooks used by the registry
// =============================================================================

/// Ensure all arrays have capacity for the given index.
///
/// Called by registry when allocating.
pub fn ensure_all_capacity(index: usize) {
    core_arrays::ensure_capacity(index);
    text_arrays::ensure_capacity(index);
    accessibility_arrays::ensure_capacity(index);
    interaction_arrays::ensure_capacity(index);
}

/// Clear all array values at an index.
///
/// Called by registry when releasing.
pub fn clear_all_at_index(index: usize) {
    core_arrays::clear_at_index(index);
    text_arrays::clear_at_index(index);
    accessibility_arrays::clear_at_index(index);
    interaction_arrays::clear_at_index(index);
}

/// Reset all parallel arrays to release memory.
///
/// Called automatically when the last component is destroyed.
pub fn reset_all_arrays() {
    core_arrays::reset();
    text_arrays::reset();
    accessibility_arrays::reset();
    interaction_arrays::reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::signal;

    #[test]
    fn test_binding_array_default_and_static() {
        let arr = BindingArray::new(7u16);
        assert_eq!(arr.get(3), 7);

        arr.set_value(3, 42);
        assert_eq!(arr.get(3), 42);
        assert_eq!(arr.get(0), 7);

        arr.clear(3);
        assert_eq!(arr.get(3), 7);
    }

    #[test]
    fn test_binding_array_getter_follows_signal() {
        let arr = BindingArray::new(false);
        let flag = signal(false);
        let flag_for_cell = flag.clone();

        arr.set_getter(0, move || flag_for_cell.get());
        assert!(!arr.get(0));

        flag.set(true);
        assert!(arr.get(0));
    }
}
