//! Layout Derived - Reactive layout computation.
//!
//! Creates a Derived that computes layout whenever:
//! - Terminal size changes
//! - Any FlexNode slot or visibility getter changes
//! - Components are added/removed
//!
//! [`dispatch_layout_events`] then tells every `on_layout` subscriber its
//! frame, but only when the frame differs from the last one it was told.

use log::{error, trace};
use spark_signals::{derived, Derived};

use crate::engine::arrays::interaction::{self, LayoutEvent};
use crate::engine::is_allocated;
use crate::layout::{compute_layout, ComputedLayout};
use super::terminal::{terminal_height, terminal_height_signal, terminal_width, terminal_width_signal};

/// Upper bound on layout passes per flush.
const MAX_FLUSH_PASSES: usize = 8;

/// Create the layout derived.
///
/// Height is constrained to the terminal; a tab view fills the screen.
/// A failed pass is logged and yields an empty layout.
pub fn create_layout_derived() -> Derived<ComputedLayout> {
    let tw_signal = terminal_width_signal();
    let th_signal = terminal_height_signal();

    derived(move || {
        let tw = tw_signal.get();
        let th = th_signal.get();

        match compute_layout(tw, th, true) {
            Ok(layout) => layout,
            Err(err) => {
                error!("layout pass failed: {}", err);
                ComputedLayout::new()
            }
        }
    })
}

/// Deliver changed frames to `on_layout` subscribers.
///
/// Returns how many handlers were called. Handlers run outside any registry
/// borrow, so they may set signals that re-run layout.
pub fn dispatch_layout_events(layout: &ComputedLayout) -> usize {
    let mut delivered = 0;

    for index in interaction::layout_listener_indices() {
        if !is_allocated(index) || index >= layout.len() {
            continue;
        }

        let (x, y, width, height) = layout.get(index);
        let event = LayoutEvent { x, y, width, height };
        if interaction::get_last_delivered(index) == Some(event) {
            continue;
        }
        interaction::set_last_delivered(index, event);

        if let Some(handler) = interaction::get_on_layout(index) {
            trace!("on_layout #{} -> {}x{} at ({}, {})", index, width, height, x, y);
            handler(&event);
            delivered += 1;
        }
    }

    delivered
}

/// Lay out and deliver frames until no handler sees a change.
///
/// Handlers may resize their own subtree, which needs another pass. Used when
/// no mounted effect is driving layout (headless hosts and tests). Returns
/// the total number of handler calls.
pub fn flush_layout() -> usize {
    let mut total = 0;
    for _ in 0..MAX_FLUSH_PASSES {
        let layout = match compute_layout(terminal_width(), terminal_height(), true) {
            Ok(layout) => layout,
            Err(err) => {
                error!("layout pass failed: {}", err);
                return total;
            }
        };
        let delivered = dispatch_layout_events(&layout);
        if delivered == 0 {
            return total;
        }
        total += delivered;
    }
    trace!("flush_layout stopped after {} passes", MAX_FLUSH_PASSES);
    total
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use crate::engine::arrays::core as core_arrays;
    use crate::engine::{allocate_index, create_flex_node, reset_registry};
    use crate::pipeline::terminal::set_terminal_size;
    use crate::types::{ComponentType, Dimension};

    fn setup() {
        reset_registry();
        set_terminal_size(80, 24);
    }

    fn full_screen_box() -> usize {
        let idx = allocate_index(None);
        core_arrays::set_component_type(idx, ComponentType::Box);
        let node = create_flex_node(idx);
        node.width.set_value(Dimension::Percent(100.0));
        node.height.set_value(Dimension::Percent(100.0));
        idx
    }

    #[test]
    fn test_layout_derived_empty() {
        setup();

        let layout = create_layout_derived().get();
        assert_eq!(layout.content_width, 0);
        assert_eq!(layout.content_height, 0);
    }

    #[test]
    fn test_layout_derived_reacts_to_terminal_resize() {
        setup();

        let idx = full_screen_box();
        let layout_derived = create_layout_derived();
        assert_eq!(layout_derived.get().get(idx), (0, 0, 80, 24));

        set_terminal_size(120, 40);
        assert_eq!(layout_derived.get().get(idx), (0, 0, 120, 40));
    }

    #[test]
    fn test_dispatch_only_on_change() {
        setup();

        let idx = full_screen_box();
        let frames: Rc<RefCell<Vec<LayoutEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let frames_in = frames.clone();
        interaction::set_on_layout(idx, Rc::new(move |event| frames_in.borrow_mut().push(*event)));

        let layout_derived = create_layout_derived();
        assert_eq!(dispatch_layout_events(&layout_derived.get()), 1);
        assert_eq!(dispatch_layout_events(&layout_derived.get()), 0);

        set_terminal_size(100, 30);
        assert_eq!(dispatch_layout_events(&layout_derived.get()), 1);

        let frames = frames.borrow();
        assert_eq!(frames.len(), 2);
        assert_eq!((frames[1].width, frames[1].height), (100, 30));
    }

    #[test]
    fn test_flush_layout_settles() {
        setup();

        let idx = full_screen_box();
        let calls = Rc::new(RefCell::new(0));
        let calls_in = calls.clone();
        interaction::set_on_layout(idx, Rc::new(move |_event| *calls_in.borrow_mut() += 1));

        assert_eq!(flush_layout(), 1);
        assert_eq!(flush_layout(), 0);
        assert_eq!(*calls.borrow(), 1);
    }
}
