//! FlexNode Registry - Manages FlexNode lifecycle (creation/destruction).
//!
//! Each component gets one persistent FlexNode that lives for the component's
//! entire lifetime. This registry tracks the index → FlexNode mapping.
//!
//! FlexNodes are created by primitives (box, text) after `allocate_index()`,
//! and destroyed by `release_index()` cleanup.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::flex_node::FlexNode;

thread_local! {
    /// Map component index → FlexNode
    static FLEX_NODES: RefCell<HashMap<usize, Rc<FlexNode>>> = RefCell::new(HashMap::new());
}

/// Create a FlexNode for the given component index.
///
/// Returns the existing node if the index already has one.
pub fn create_flex_node(index: usize) -> Rc<FlexNode> {
    FLEX_NODES.with(|nodes| {
        nodes
            .borrow_mut()
            .entry(index)
            .or_insert_with(|| Rc::new(FlexNode::new(index)))
            .clone()
    })
}

/// Destroy a FlexNode, disconnecting all of its slot sources.
pub fn destroy_flex_node(index: usize) {
    // Take the node out first so disconnect() never runs under the borrow
    let removed = FLEX_NODES.with(|nodes| nodes.borrow_mut().remove(&index));
    if let Some(node) = removed {
        node.disconnect();
    }
}

/// Get FlexNode for a component index.
pub fn get_flex_node(index: usize) -> Option<Rc<FlexNode>> {
    FLEX_NODES.with(|nodes| nodes.borrow().get(&index).cloned())
}

/// Reset all FlexNodes (for testing).
pub fn reset_flex_nodes() {
    let drained: Vec<Rc<FlexNode>> =
        FLEX_NODES.with(|nodes| nodes.borrow_mut().drain().map(|(_, node)| node).collect());
    for node in drained {
        node.disconnect();
    }
}

/// Get the number of FlexNodes currently in the registry.
pub fn flex_node_count() -> usize {
    FLEX_NODES.with(|nodes| nodes.borrow().len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimension;

    #[test]
    fn test_create_flex_node() {
        reset_flex_nodes();

        let node = create_flex_node(0);
        assert_eq!(node.index, 0);
        assert_eq!(flex_node_count(), 1);

        // Creating again should return the same node
        let node2 = create_flex_node(0);
        assert_eq!(Rc::as_ptr(&node), Rc::as_ptr(&node2));
    }

    #[test]
    fn test_destroy_flex_node() {
        reset_flex_nodes();

        let node = create_flex_node(3);
        node.width.set_value(Dimension::Cells(100));

        destroy_flex_node(3);
        assert_eq!(flex_node_count(), 0);
        assert!(get_flex_node(3).is_none());
        // The detached node was reset on the way out
        assert_eq!(node.width.get(), Dimension::Auto);
    }
}
