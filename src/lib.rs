//! # spark-tab-view
//!
//! Swipeable tab view for terminal UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! Components are indices into columnar arrays rather than objects. Each
//! layout property is a reactive `Slot` that can be bound to signals, getters,
//! or static values. Layout is a derived over those slots:
//!
//! ```text
//! tab_view() → FlexNode Slots → layoutDerived → on_layout handlers → LayoutState
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Dimension, ComponentType, AccessFlags, etc.)
//! - [`engine`] - Component registry, FlexNode, parallel arrays
//! - [`layout`] - Taffy layout bridge
//! - [`primitives`] - box, text, show, each
//! - [`state`] - Keyboard events and input
//! - [`pipeline`] - Terminal size, layout events, deferred tasks, mount
//! - [`tab_view`] - The tab view, its pager and tab bar

pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod primitives;
pub mod state;
pub mod tab_view;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{LayoutError, TabViewError};

pub use engine::{
    get_allocated_count, get_children, get_current_parent_index, get_flex_node, get_id,
    get_index, is_allocated, on_destroy, reset_registry, FlexNode,
};

pub use layout::{compute_layout, string_width, ComputedLayout};

pub use pipeline::{
    create_layout_derived, defer, dispatch_layout_events, flush_layout, mount, run,
    run_deferred, set_terminal_size, terminal_height, terminal_width, tick, unmount,
    DeferredTask, MountHandle,
};

pub use primitives::{box_primitive, each, show, text, BoxProps, Cleanup, PropValue, TextProps};

pub use state::{
    dispatch as dispatch_keyboard, on as on_keyboard, on_key, reset_keyboard_state,
    KeyState, KeyboardEvent, Modifiers,
};

pub use tab_view::{
    tab_view, ContainerStyle, InitialLayout, JumpOutcome, KeyboardPager, Layout,
    ListenerId, NavigationState, Pager, PagerEvent, Route, SceneProps, SceneRendererProps,
    SimpleRoute, TabBarPosition, TabBarProps, TabView, TabViewProps,
};
