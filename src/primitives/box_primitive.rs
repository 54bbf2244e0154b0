//! Box Primitive - Container component with flexbox layout.
//!
//! Props are bound directly to FlexNode slots, so a box sized by a getter
//! is re-laid out whenever the signals behind the getter change.
//!
//! # Example
//!
//! ```ignore
//! use spark_tab_view::primitives::{box_primitive, BoxProps, PropValue};
//! use spark_signals::signal;
//!
//! let page_width = signal(40u16);
//! let reader = page_width.clone();
//!
//! let cleanup = box_primitive(BoxProps {
//!     width: Some(PropValue::getter(move || Dimension::Cells(reader.get()))),
//!     ..Default::default()
//! });
//!
//! page_width.set(80);
//! ```

use crate::engine::arrays::{accessibility, core, interaction};
use crate::engine::{
    allocate_index, create_flex_node, get_current_parent_index, pop_parent_context,
    push_parent_context, release_index,
};
use crate::types::ComponentType;
use super::types::{BoxProps, Cleanup, PropValue};

// =============================================================================
// Helper: Bind PropValue to Slot
// =============================================================================

/// Bind a PropValue to a FlexNode Slot, keeping signals and getters live.
macro_rules! bind_slot {
    ($slot:expr, $prop:expr) => {
        match $prop {
            PropValue::Static(v) => $slot.set_value(v),
            PropValue::Signal(s) => $slot.set_signal(&s),
            PropValue::Getter(g) => $slot.set_getter(move || g()),
        }
    };
}

// =============================================================================
// Box Component
// =============================================================================

/// Create a box container component.
///
/// Returns a cleanup function that releases the box and its subtree.
pub fn box_primitive(props: BoxProps) -> Cleanup {
    // 1. ALLOCATE INDEX
    let index = allocate_index(props.id.as_deref());

    // 2. CREATE FLEXNODE
    let flex_node = create_flex_node(index);

    // 3. CORE SETUP - Type, parent
    core::set_component_type(index, ComponentType::Box);
    if let Some(parent) = get_current_parent_index() {
        core::set_parent_index(index, Some(parent));
    }

    // 4. BIND VISIBILITY
    if let Some(visible) = props.visible {
        match visible {
            PropValue::Static(v) => core::set_visible(index, v),
            PropValue::Signal(s) => core::set_visible_getter(index, move || s.get()),
            PropValue::Getter(g) => core::set_visible_getter(index, move || g()),
        }
    }

    // 5. BIND FLEXNODE SLOTS
    if let Some(dir) = props.flex_direction {
        bind_slot!(flex_node.flex_direction, dir);
    }
    if let Some(grow) = props.grow {
        bind_slot!(flex_node.flex_grow, grow);
    }
    if let Some(shrink) = props.shrink {
        bind_slot!(flex_node.flex_shrink, shrink);
    }

    if let Some(w) = props.width {
        bind_slot!(flex_node.width, w);
    }
    if let Some(h) = props.height {
        bind_slot!(flex_node.height, h);
    }

    if let Some(p) = props.padding {
        bind_slot!(flex_node.padding_top, p.clone());
        bind_slot!(flex_node.padding_right, p.clone());
        bind_slot!(flex_node.padding_bottom, p.clone());
        bind_slot!(flex_node.padding_left, p);
    }

    if let Some(overflow) = props.overflow {
        bind_slot!(flex_node.overflow, overflow);
    }
    if let Some(position) = props.position {
        bind_slot!(flex_node.position, position);
    }
    if let Some(left) = props.left {
        bind_slot!(flex_node.left, left);
    }
    if let Some(top) = props.top {
        bind_slot!(flex_node.top, top);
    }
    if let Some(right) = props.right {
        bind_slot!(flex_node.right, right);
    }
    if let Some(bottom) = props.bottom {
        bind_slot!(flex_node.bottom, bottom);
    }

    // 6. ACCESSIBILITY
    if let Some(access) = props.access {
        match access {
            PropValue::Static(v) => accessibility::set_access_flags(index, v),
            PropValue::Signal(s) => accessibility::set_access_flags_getter(index, move || s.get()),
            PropValue::Getter(g) => accessibility::set_access_flags_getter(index, move || g()),
        }
    }

    // 7. LAYOUT HANDLER
    if let Some(handler) = props.on_layout {
        interaction::set_on_layout(index, handler);
    }

    // 8. CHILDREN
    if let Some(children) = props.children {
        push_parent_context(index);
        children();
        pop_parent_context();
    }

    // 9. RETURN CLEANUP
    Box::new(move || release_index(index))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use crate::engine::{get_allocated_count, get_flex_node, reset_registry};
    use crate::types::{AccessFlags, Dimension};
    use spark_signals::signal;

    fn setup() {
        reset_registry();
    }

    #[test]
    fn test_box_creation_and_cleanup() {
        setup();

        let cleanup = box_primitive(BoxProps {
            width: Some(PropValue::Static(Dimension::Cells(50))),
            height: Some(PropValue::Static(Dimension::Cells(20))),
            ..Default::default()
        });

        assert_eq!(core::get_component_type(0), ComponentType::Box);
        assert_eq!(get_flex_node(0).unwrap().width.get(), Dimension::Cells(50));

        cleanup();
        assert_eq!(core::get_component_type(0), ComponentType::None);
    }

    #[test]
    fn test_box_children_get_parent() {
        setup();

        let cleanup = box_primitive(BoxProps {
            children: Some(Box::new(|| {
                box_primitive(BoxProps::default());
                box_primitive(BoxProps::default());
            })),
            ..Default::default()
        });

        assert_eq!(core::get_parent_index(1), Some(0));
        assert_eq!(core::get_parent_index(2), Some(0));

        // Releasing the parent releases the subtree
        cleanup();
        assert_eq!(get_allocated_count(), 0);
    }

    #[test]
    fn test_box_getter_props_stay_reactive() {
        setup();

        let page_width = signal(30u16);
        let reader = page_width.clone();
        let focused = signal(false);
        let focused_reader = focused.clone();

        let _cleanup = box_primitive(BoxProps {
            width: Some(PropValue::getter(move || Dimension::Cells(reader.get()))),
            access: Some(PropValue::getter(move || {
                if focused_reader.get() { AccessFlags::empty() } else { AccessFlags::HIDDEN }
            })),
            ..Default::default()
        });

        let node = get_flex_node(0).unwrap();
        assert_eq!(node.width.get(), Dimension::Cells(30));
        assert!(accessibility::is_hidden_from_accessibility(0));

        page_width.set(45);
        focused.set(true);
        assert_eq!(node.width.get(), Dimension::Cells(45));
        assert!(!accessibility::is_hidden_from_accessibility(0));
    }

    #[test]
    fn test_box_padding_shorthand() {
        setup();

        let _cleanup = box_primitive(BoxProps {
            padding: Some(PropValue::Static(2)),
            ..Default::default()
        });

        let node = get_flex_node(0).unwrap();
        assert_eq!(node.padding_top.get(), 2);
        assert_eq!(node.padding_left.get(), 2);
    }

    #[test]
    fn test_box_registers_layout_handler() {
        setup();

        let _cleanup = box_primitive(BoxProps {
            on_layout: Some(Rc::new(|_event| {})),
            ..Default::default()
        });

        assert_eq!(interaction::layout_listener_indices(), vec![0]);
    }
}
