//! Text Primitive - Display a single string.
//!
//! A leaf component; it cannot have children. Layout measures it by display
//! width, so a label's box is exactly as wide as its content.
//!
//! # Example
//!
//! ```ignore
//! use spark_tab_view::primitives::{text, TextProps, PropValue};
//!
//! text(TextProps {
//!     content: PropValue::getter(move || format!("[ {} ]", title.get())),
//!     ..Default::default()
//! });
//! ```

use crate::engine::arrays::{core, text as text_arrays};
use crate::engine::{allocate_index, create_flex_node, get_current_parent_index, release_index};
use crate::types::ComponentType;
use super::types::{Cleanup, PropValue, TextProps};

/// Create a text display component.
///
/// Returns a cleanup function that releases resources when called.
pub fn text(props: TextProps) -> Cleanup {
    // 1. ALLOCATE INDEX
    let index = allocate_index(props.id.as_deref());

    // 2. CREATE FLEXNODE - Even text needs layout properties
    let flex_node = create_flex_node(index);

    // 3. CORE SETUP - Type, parent
    core::set_component_type(index, ComponentType::Text);
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

    // 5. BIND TEXT CONTENT
    match props.content {
        PropValue::Static(v) => text_arrays::set_text_content(index, v),
        PropValue::Signal(s) => text_arrays::set_text_content_getter(index, move || s.get()),
        PropValue::Getter(g) => text_arrays::set_text_content_getter(index, move || g()),
    }

    // 6. ITEM PROPERTIES
    if let Some(grow) = props.grow {
        match grow {
            PropValue::Static(v) => flex_node.flex_grow.set_value(v),
            PropValue::Signal(s) => flex_node.flex_grow.set_signal(&s),
            PropValue::Getter(g) => flex_node.flex_grow.set_getter(move || g()),
        }
    }

    Box::new(move || release_index(index))
}
