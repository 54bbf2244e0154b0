//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts FlexNode properties to Taffy styles, runs layout computation,
//! and extracts results back to ComputedLayout.

use std::collections::HashMap;

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    LengthPercentage, LengthPercentageAuto, NodeId, Overflow as TaffyOverflow,
    Position as TaffyPosition, Rect, Size, Style, TaffyTree,
};

use crate::engine::arrays::{core, text};
use crate::engine::{creation_seq, get_allocated_indices, get_flex_node};
use crate::error::LayoutError;
use crate::types::{ComponentType, Dimension, FlexDirection, Overflow, Position};

use super::text_measure::{measure_text_height, string_width};
use super::types::ComputedLayout;

// =============================================================================
// CONVERSIONS
// =============================================================================

fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Cells(n) => TaffyDimension::Length(n as f32),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn to_taffy_inset(cells: Option<i32>) -> LengthPercentageAuto {
    match cells {
        Some(n) => LengthPercentageAuto::Length(n as f32),
        None => LengthPercentageAuto::Auto,
    }
}

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
    }
}

fn to_taffy_overflow(overflow: Overflow) -> TaffyOverflow {
    match overflow {
        Overflow::Visible => TaffyOverflow::Visible,
        Overflow::Hidden => TaffyOverflow::Clip,
        Overflow::Scroll => TaffyOverflow::Scroll,
    }
}

fn to_taffy_position(position: Position) -> TaffyPosition {
    match position {
        Position::Relative => TaffyPosition::Relative,
        Position::Absolute => TaffyPosition::Absolute,
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// Build a Taffy Style from the FlexNode at `idx`.
fn build_style(idx: usize) -> Style {
    let Some(node) = get_flex_node(idx) else {
        return Style::default();
    };

    let overflow = to_taffy_overflow(Overflow::from(node.overflow.get()));

    let mut style = Style {
        display: Display::Flex,
        position: to_taffy_position(Position::from(node.position.get())),
        inset: Rect {
            left: to_taffy_inset(Some(node.left.get())),
            top: to_taffy_inset(Some(node.top.get())),
            right: to_taffy_inset(node.right.get()),
            bottom: to_taffy_inset(node.bottom.get()),
        },

        flex_direction: to_taffy_flex_direction(FlexDirection::from(node.flex_direction.get())),
        flex_grow: node.flex_grow.get(),
        flex_shrink: node.flex_shrink.get(),

        size: Size {
            width: to_taffy_dimension(node.width.get()),
            height: to_taffy_dimension(node.height.get()),
        },

        padding: Rect {
            top: LengthPercentage::Length(node.padding_top.get() as f32),
            right: LengthPercentage::Length(node.padding_right.get() as f32),
            bottom: LengthPercentage::Length(node.padding_bottom.get() as f32),
            left: LengthPercentage::Length(node.padding_left.get() as f32),
        },

        overflow: taffy::Point { x: overflow, y: overflow },

        ..Default::default()
    };

    // Text sizes itself through the measure function
    if core::get_component_type(idx) == ComponentType::Text {
        style.size = Size::auto();
    }

    style
}

// =============================================================================
// TEXT MEASUREMENT
// =============================================================================

fn measure_text(
    idx: usize,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Size<f32> {
    let content = text::get_text_content(idx);
    if content.is_empty() {
        return Size::ZERO;
    }

    let text_width = string_width(&content);
    let avail_width = match available_space.width {
        AvailableSpace::Definite(w) => w as u16,
        AvailableSpace::MinContent => text_width,
        AvailableSpace::MaxContent => u16::MAX,
    };
    let wrap_width = known_dimensions
        .width
        .map(|w| w as u16)
        .unwrap_or(avail_width)
        .max(1);

    Size {
        width: known_dimensions.width.unwrap_or(text_width.min(wrap_width) as f32),
        height: known_dimensions
            .height
            .unwrap_or(measure_text_height(&content, wrap_width) as f32),
    }
}

/// A component is laid out only if it and every ancestor are visible.
fn is_effectively_visible(idx: usize) -> bool {
    let mut current = Some(idx);
    while let Some(i) = current {
        if !core::get_visible(i) {
            return false;
        }
        current = core::get_parent_index(i).filter(|&p| p != i);
    }
    true
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute layout for all allocated, visible components using Taffy.
///
/// * `terminal_width` / `terminal_height` - Available space in cells
/// * `constrain_height` - If false, roots may grow past the terminal height
///
/// Children are laid out in creation order.
pub fn compute_layout_taffy(
    terminal_width: u16,
    terminal_height: u16,
    constrain_height: bool,
) -> Result<ComputedLayout, LayoutError> {
    let mut indices = get_allocated_indices();

    if indices.is_empty() {
        return Ok(ComputedLayout::new());
    }

    // Creation order, so siblings keep the order they were mounted in
    indices.sort_by_key(|&idx| creation_seq(idx));

    let array_size = indices.iter().copied().max().unwrap_or(0) + 1;
    let mut result = ComputedLayout::with_capacity(array_size);

    let mut tree: TaffyTree<usize> = TaffyTree::new();
    let mut index_to_node: HashMap<usize, NodeId> = HashMap::new();

    // First pass: Create all nodes (without children)
    for &idx in &indices {
        if !is_effectively_visible(idx) {
            continue;
        }

        let style = build_style(idx);
        let node_id = if core::get_component_type(idx) == ComponentType::Text {
            tree.new_leaf_with_context(style, idx)?
        } else {
            tree.new_leaf(style)?
        };

        index_to_node.insert(idx, node_id);
    }

    // Second pass: Build parent-child relationships
    let mut roots: Vec<usize> = Vec::new();

    for &idx in &indices {
        let Some(&child_node) = index_to_node.get(&idx) else {
            continue;
        };

        match core::get_parent_index(idx).and_then(|p| index_to_node.get(&p).copied()) {
            Some(parent_node) => tree.add_child(parent_node, child_node)?,
            None => roots.push(idx),
        }
    }

    let available = Size {
        width: AvailableSpace::Definite(terminal_width as f32),
        height: if constrain_height {
            AvailableSpace::Definite(terminal_height as f32)
        } else {
            AvailableSpace::MaxContent
        },
    };

    let mut measure_fn = |known_dimensions: Size<Option<f32>>,
                          available_space: Size<AvailableSpace>,
                          _node_id: NodeId,
                          context: Option<&mut usize>,
                          _style: &Style| {
        match context {
            Some(&mut idx) => measure_text(idx, known_dimensions, available_space),
            None => Size::ZERO,
        }
    };

    for &root_idx in &roots {
        if let Some(&root_node) = index_to_node.get(&root_idx) {
            tree.compute_layout_with_measure(root_node, available, &mut measure_fn)?;
        }
    }

    // Extract results
    for (&idx, &node_id) in &index_to_node {
        let layout = tree.layout(node_id)?;
        result.x[idx] = layout.location.x.round() as i32;
        result.y[idx] = layout.location.y.round() as i32;
        result.width[idx] = layout.size.width.round().max(0.0) as u16;
        result.height[idx] = layout.size.height.round().max(0.0) as u16;
    }

    if let Some(&first_root) = roots.first() {
        result.content_width = result.width[first_root];
        result.content_height = result.height[first_root];
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::arrays::core as core_arrays;
    use crate::engine::{allocate_index, create_flex_node, reset_registry};

    fn make_box(parent: Option<usize>) -> usize {
        let idx = allocate_index(None);
        core_arrays::set_component_type(idx, ComponentType::Box);
        core_arrays::set_parent_index(idx, parent);
        create_flex_node(idx);
        idx
    }

    #[test]
    fn test_compute_layout_empty() {
        reset_registry();

        let layout = compute_layout_taffy(80, 24, true).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.content_width, 0);
    }

    #[test]
    fn test_compute_layout_single_root() {
        reset_registry();

        let idx = make_box(None);
        let node = get_flex_node(idx).unwrap();
        node.width.set_value(Dimension::Cells(40));
        node.height.set_value(Dimension::Cells(10));

        let layout = compute_layout_taffy(80, 24, true).unwrap();
        assert_eq!(layout.get(idx), (0, 0, 40, 10));
        assert_eq!(layout.content_width, 40);
    }

    #[test]
    fn test_row_children_do_not_shrink_when_told_not_to() {
        reset_registry();

        let row = make_box(None);
        let row_node = get_flex_node(row).unwrap();
        row_node.width.set_value(Dimension::Cells(30));
        row_node.height.set_value(Dimension::Cells(5));
        row_node.flex_direction.set_value(FlexDirection::Row as u8);
        row_node.overflow.set_value(Overflow::Hidden as u8);

        let first = make_box(Some(row));
        let second = make_box(Some(row));
        for idx in [first, second] {
            let node = get_flex_node(idx).unwrap();
            node.width.set_value(Dimension::Cells(30));
            node.flex_shrink.set_value(0.0);
        }

        let layout = compute_layout_taffy(80, 24, true).unwrap();
        assert_eq!(layout.width[first], 30);
        assert_eq!(layout.width[second], 30);
        assert_eq!(layout.x[second], 30);
    }

    #[test]
    fn test_relative_left_inset_offsets_node() {
        reset_registry();

        let root = make_box(None);
        let root_node = get_flex_node(root).unwrap();
        root_node.width.set_value(Dimension::Cells(20));
        root_node.height.set_value(Dimension::Cells(4));

        let shifted = make_box(Some(root));
        get_flex_node(shifted).unwrap().left.set_value(-20);

        let layout = compute_layout_taffy(80, 24, true).unwrap();
        assert_eq!(layout.x[shifted], -20);
    }

    #[test]
    fn test_absolute_fill() {
        reset_registry();

        let root = make_box(None);
        let root_node = get_flex_node(root).unwrap();
        root_node.width.set_value(Dimension::Cells(20));
        root_node.height.set_value(Dimension::Cells(6));

        let fill = make_box(Some(root));
        let fill_node = get_flex_node(fill).unwrap();
        fill_node.position.set_value(Position::Absolute as u8);
        fill_node.right.set_value(Some(0));
        fill_node.bottom.set_value(Some(0));

        let layout = compute_layout_taffy(80, 24, true).unwrap();
        assert_eq!(layout.get(fill), (0, 0, 20, 6));
    }

    #[test]
    fn test_hidden_component_skipped() {
        reset_registry();

        let root = make_box(None);
        get_flex_node(root).unwrap().width.set_value(Dimension::Cells(10));
        let child = make_box(Some(root));
        get_flex_node(child).unwrap().height.set_value(Dimension::Cells(3));
        core_arrays::set_visible(child, false);

        let layout = compute_layout_taffy(80, 24, true).unwrap();
        assert_eq!(layout.height[child], 0);
    }

    #[test]
    fn test_text_measured_by_content() {
        reset_registry();

        let root = make_box(None);
        get_flex_node(root).unwrap().flex_direction.set_value(FlexDirection::Row as u8);

        let label = allocate_index(None);
        core_arrays::set_component_type(label, ComponentType::Text);
        core_arrays::set_parent_index(label, Some(root));
        create_flex_node(label);
        text::set_text_content(label, "[ Home ]".to_string());

        let layout = compute_layout_taffy(80, 24, true).unwrap();
        assert_eq!(layout.width[label], 8);
        assert_eq!(layout.height[label], 1);
    }
}
