//! Tab View - Paged scenes with a tab bar.
//!
//! - **types** - Routes, navigation state, layout, renderer props
//! - **layout_state** - Measured container size
//! - **index_bridge** - Pager and tab bar index requests
//! - **pager** - Pager contract and the keyboard pager
//! - **tab_bar** - Default tab bar
//! - **view** - The component itself
//!
//! # Structure
//!
//! ```text
//! root (column)
//! ├── tab bar          (TabBarPosition::Top)
//! ├── scene row        (pager)
//! │   ├── container a  (focused, accessible)
//! │   └── container b  (hidden from accessibility)
//! └── tab bar          (TabBarPosition::Bottom)
//! ```

pub mod types;
pub mod layout_state;
pub mod index_bridge;
pub mod pager;
pub mod tab_bar;
pub mod view;

pub use types::{
    ContainerStyle, InitialLayout, Layout, NavigationState, Route, SceneProps,
    SceneRendererProps, SimpleRoute, TabBarPosition, TabBarProps,
};
pub use layout_state::LayoutState;
pub use index_bridge::{IndexBridge, JumpOutcome};
pub use pager::{
    KeyboardPager, ListenerId, Listeners, Pager, PagerChildren, PagerEvent, PagerProps,
    PagerRenderProps,
};
pub use tab_bar::{default_tab_bar, default_tab_bar_renderer, tab_label};
pub use view::{scene_container_id, tab_view, TabView, TabViewProps};
