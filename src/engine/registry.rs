//! Component Registry - Index allocation for parallel arrays.
//!
//! Manages the lifecycle of component indices:
//! - ID ↔ Index bidirectional mapping
//! - Free index pool for O(1) reuse
//! - ReactiveSet for allocatedIndices (deriveds react to add/remove)
//! - Parent context stack for nested component creation

use std::cell::RefCell;
use std::collections::HashMap;
use spark_signals::ReactiveSet;

use super::arrays;
use super::flex_node_registry;

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Map component ID to array index.
    static ID_TO_INDEX: RefCell<HashMap<String, usize>> = RefCell::new(HashMap::new());

    /// Map array index to component ID.
    static INDEX_TO_ID: RefCell<HashMap<usize, String>> = RefCell::new(HashMap::new());

    /// Set of currently allocated indices. Reactive so the layout derived
    /// re-runs when components mount or unmount.
    static ALLOCATED_INDICES: ReactiveSet<usize> = ReactiveSet::new();

    /// Pool of freed indices for reuse.
    static FREE_INDICES: RefCell<Vec<usize>> = RefCell::new(Vec::new());

    /// Next index to allocate if pool is empty.
    static NEXT_INDEX: RefCell<usize> = const { RefCell::new(0) };

    /// Counter for generating unique IDs.
    static ID_COUNTER: RefCell<usize> = const { RefCell::new(0) };

    /// Stack of parent indices for nested component creation.
    static PARENT_STACK: RefCell<Vec<usize>> = RefCell::new(Vec::new());

    /// Allocation sequence number per index. Siblings are ordered by this,
    /// so a recycled low index still sorts after older siblings.
    static CREATION_SEQ: RefCell<HashMap<usize, u64>> = RefCell::new(HashMap::new());

    /// Next allocation sequence number.
    static NEXT_SEQ: RefCell<u64> = const { RefCell::new(0) };

    /// Destroy callbacks registered per index.
    static DESTROY_CALLBACKS: RefCell<HashMap<usize, Vec<Box<dyn FnOnce()>>>> = RefCell::new(HashMap::new());
}

// =============================================================================
// Parent Context Stack
// =============================================================================

/// Get current parent index (None at root).
pub fn get_current_parent_index() -> Option<usize> {
    PARENT_STACK.with(|stack| stack.borrow().last().copied())
}

/// Push a parent index onto the stack.
pub fn push_parent_context(index: usize) {
    PARENT_STACK.with(|stack| stack.borrow_mut().push(index));
}

/// Pop a parent index from the stack.
pub fn pop_parent_context() {
    PARENT_STACK.with(|stack| {
        stack.borrow_mut().pop();
    });
}

// =============================================================================
// Index Allocation
// =============================================================================

/// Allocate an index for a new component.
///
/// `id` is optional; one is generated (`c0`, `c1`, ...) if not provided.
/// Allocating an ID that is already registered returns its existing index.
pub fn allocate_index(id: Option<&str>) -> usize {
    let component_id = match id {
        Some(id) => id.to_string(),
        None => ID_COUNTER.with(|counter| {
            let mut counter = counter.borrow_mut();
            let id = format!("c{}", *counter);
            *counter += 1;
            id
        }),
    };

    let existing = ID_TO_INDEX.with(|map| map.borrow().get(&component_id).copied());
    if let Some(index) = existing {
        return index;
    }

    // Reuse free index or allocate new
    let index = FREE_INDICES.with(|free| free.borrow_mut().pop()).unwrap_or_else(|| {
        NEXT_INDEX.with(|next| {
            let mut next = next.borrow_mut();
            let index = *next;
            *next += 1;
            index
        })
    });

    ID_TO_INDEX.with(|map| {
        map.borrow_mut().insert(component_id.clone(), index);
    });
    INDEX_TO_ID.with(|map| {
        map.borrow_mut().insert(index, component_id);
    });
    let seq = NEXT_SEQ.with(|next| {
        let mut next = next.borrow_mut();
        let seq = *next;
        *next += 1;
        seq
    });
    CREATION_SEQ.with(|map| {
        map.borrow_mut().insert(index, seq);
    });

    arrays::ensure_all_capacity(index);

    ALLOCATED_INDICES.with(|set| {
        set.insert(index);
    });

    index
}

/// Release an index back to the pool.
///
/// Also recursively releases all children!
pub fn release_index(index: usize) {
    let id = INDEX_TO_ID.with(|map| map.borrow().get(&index).cloned());
    let Some(id) = id else { return };

    // Unmount hooks see the subtree still alive
    run_destroy_callbacks(index);

    for child_index in get_children(index) {
        release_index(child_index);
    }

    flex_node_registry::destroy_flex_node(index);

    ID_TO_INDEX.with(|map| {
        map.borrow_mut().remove(&id);
    });
    INDEX_TO_ID.with(|map| {
        map.borrow_mut().remove(&index);
    });
    CREATION_SEQ.with(|map| {
        map.borrow_mut().remove(&index);
    });
    ALLOCATED_INDICES.with(|set| {
        set.remove(&index);
    });

    arrays::clear_all_at_index(index);

    FREE_INDICES.with(|free| free.borrow_mut().push(index));

    // When all components are gone, reset everything to free memory
    let is_empty = ALLOCATED_INDICES.with(|set| set.is_empty());
    if is_empty {
        arrays::reset_all_arrays();
        flex_node_registry::reset_flex_nodes();
        FREE_INDICES.with(|free| free.borrow_mut().clear());
        NEXT_INDEX.with(|next| *next.borrow_mut() = 0);
    }
}

// =============================================================================
// Destroy Callbacks
// =============================================================================

/// Register a callback to run when the component at `index` is destroyed.
pub fn on_destroy(index: usize, callback: impl FnOnce() + 'static) {
    DESTROY_CALLBACKS.with(|callbacks| {
        callbacks
            .borrow_mut()
            .entry(index)
            .or_default()
            .push(Box::new(callback));
    });
}

fn run_destroy_callbacks(index: usize) {
    let callbacks = DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().remove(&index));
    for callback in callbacks.into_iter().flatten() {
        callback();
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Get index for a component ID.
pub fn get_index(id: &str) -> Option<usize> {
    ID_TO_INDEX.with(|map| map.borrow().get(id).copied())
}

/// Get ID for an index.
pub fn get_id(index: usize) -> Option<String> {
    INDEX_TO_ID.with(|map| map.borrow().get(&index).cloned())
}

/// Get all currently allocated indices.
///
/// Note: This creates a reactive dependency when called from a derived/effect.
pub fn get_allocated_indices() -> Vec<usize> {
    ALLOCATED_INDICES.with(|set| set.iter().copied().collect())
}

/// Allocation order of `index`; unallocated indices sort last.
pub fn creation_seq(index: usize) -> u64 {
    CREATION_SEQ.with(|map| map.borrow().get(&index).copied().unwrap_or(u64::MAX))
}

/// Direct children of `parent`, in creation order.
///
/// This is also the order the layout bridge lays children out in.
pub fn get_children(parent: usize) -> Vec<usize> {
    let mut children: Vec<usize> = get_allocated_indices()
        .into_iter()
        .filter(|&child| arrays::core::get_parent_index(child) == Some(parent))
        .collect();
    children.sort_by_key(|&child| creation_seq(child));
    children
}

/// Check if an index is currently allocated.
pub fn is_allocated(index: usize) -> bool {
    ALLOCATED_INDICES.with(|set| set.contains(&index))
}

/// Get the count of currently allocated components.
pub fn get_allocated_count() -> usize {
    ALLOCATED_INDICES.with(|set| set.len())
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all registry state (for testing).
pub fn reset_registry() {
    ID_TO_INDEX.with(|map| map.borrow_mut().clear());
    INDEX_TO_ID.with(|map| map.borrow_mut().clear());
    ALLOCATED_INDICES.with(|set| set.clear());
    FREE_INDICES.with(|free| free.borrow_mut().clear());
    NEXT_INDEX.with(|next| *next.borrow_mut() = 0);
    ID_COUNTER.with(|counter| *counter.borrow_mut() = 0);
    PARENT_STACK.with(|stack| stack.borrow_mut().clear());
    CREATION_SEQ.with(|map| map.borrow_mut().clear());
    NEXT_SEQ.with(|next| *next.borrow_mut() = 0);
    DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().clear());
    flex_node_registry::reset_flex_nodes();
    arrays::reset_all_arrays();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_index() {
        reset_registry();

        let idx1 = allocate_index(None);
        let idx2 = allocate_index(None);
        let idx3 = allocate_index(Some("tabs"));

        assert_eq!((idx1, idx2, idx3), (0, 1, 2));
        assert!(is_allocated(2));
        assert!(!is_allocated(3));
        assert_eq!(get_allocated_count(), 3);

        // Same ID, same index
        assert_eq!(allocate_index(Some("tabs")), idx3);
    }

    #[test]
    fn test_release_and_reuse() {
        reset_registry();

        let idx1 = allocate_index(None);
        let idx2 = allocate_index(None);

        release_index(idx1);
        assert!(!is_allocated(idx1));
        assert!(is_allocated(idx2));

        let idx3 = allocate_index(None);
        assert_eq!(idx3, idx1);
    }

    #[test]
    fn test_release_is_recursive() {
        reset_registry();

        let root = allocate_index(None);
        let child = allocate_index(None);
        let grandchild = allocate_index(None);
        let other = allocate_index(None);
        arrays::core::set_parent_index(child, Some(root));
        arrays::core::set_parent_index(grandchild, Some(child));

        assert_eq!(get_children(root), vec![child]);

        release_index(root);
        assert!(!is_allocated(child));
        assert!(!is_allocated(grandchild));
        assert!(is_allocated(other));
    }

    #[test]
    fn test_children_follow_creation_order() {
        reset_registry();

        let root = allocate_index(None);
        let spare = allocate_index(None);
        let first = allocate_index(None);
        release_index(spare);

        // Reuses the lower index but was created later
        let second = allocate_index(None);
        assert_eq!(second, spare);
        arrays::core::set_parent_index(first, Some(root));
        arrays::core::set_parent_index(second, Some(root));

        assert_eq!(get_children(root), vec![first, second]);
    }

    #[test]
    fn test_destroy_callback_runs_before_children_release() {
        use std::cell::Cell;
        use std::rc::Rc;

        reset_registry();

        let root = allocate_index(None);
        let child = allocate_index(None);
        arrays::core::set_parent_index(child, Some(root));

        let child_alive = Rc::new(Cell::new(false));
        let child_alive_in = child_alive.clone();
        on_destroy(root, move || child_alive_in.set(is_allocated(child)));

        release_index(root);
        assert!(child_alive.get());
        assert!(!is_allocated(child));
    }

    #[test]
    fn test_id_mapping() {
        reset_registry();

        let idx = allocate_index(Some("inbox"));
        assert_eq!(get_index("inbox"), Some(idx));
        assert_eq!(get_id(idx), Some("inbox".to_string()));
    }

    #[test]
    fn test_parent_context() {
        reset_registry();

        assert_eq!(get_current_parent_index(), None);

        push_parent_context(5);
        push_parent_context(10);
        assert_eq!(get_current_parent_index(), Some(10));

        pop_parent_context();
        assert_eq!(get_current_parent_index(), Some(5));

        pop_parent_context();
        assert_eq!(get_current_parent_index(), None);
    }

    #[test]
    fn test_destroy_callback() {
        use std::cell::Cell;
        use std::rc::Rc;

        reset_registry();

        let called = Rc::new(Cell::new(false));
        let called_clone = called.clone();

        let idx = allocate_index(None);
        on_destroy(idx, move || called_clone.set(true));

        assert!(!called.get());
        release_index(idx);
        assert!(called.get());
    }
}
