//! Tab view data model.
//!
//! Routes and navigation state are owned by the caller; the tab view only
//! reads them. Layout is owned by the tab view and exposed as a signal.

use std::collections::HashSet;
use std::rc::Rc;

use spark_signals::Signal;

use crate::error::TabViewError;
use crate::primitives::PropValue;
use crate::types::{Dimension, Overflow};
use super::pager::{ListenerId, Listeners, PagerEvent};

// =============================================================================
// Routes
// =============================================================================

/// A caller-defined page identifier.
///
/// Keys must be unique within one [`NavigationState`].
pub trait Route: Clone + PartialEq + 'static {
    fn key(&self) -> &str;

    /// Label for the default tab bar. Falls back to the key.
    fn title(&self) -> Option<&str> {
        None
    }
}

/// Ready-made route with a key and optional title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRoute {
    pub key: String,
    pub title: Option<String>,
}

impl SimpleRoute {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), title: None }
    }

    pub fn with_title(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self { key: key.into(), title: Some(title.into()) }
    }
}

impl Route for SimpleRoute {
    fn key(&self) -> &str {
        &self.key
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

// =============================================================================
// Navigation State
// =============================================================================

/// Ordered routes plus the focused index.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState<R> {
    pub routes: Vec<R>,
    pub index: usize,
}

impl<R: Route> NavigationState<R> {
    /// Build a state, checking that it is non-empty, the index is in range
    /// and keys are unique.
    pub fn new(routes: Vec<R>, index: usize) -> Result<Self, TabViewError> {
        if routes.is_empty() {
            return Err(TabViewError::EmptyRoutes);
        }
        if index >= routes.len() {
            return Err(TabViewError::IndexOutOfBounds { index, len: routes.len() });
        }
        let mut seen = HashSet::with_capacity(routes.len());
        for route in &routes {
            if !seen.insert(route.key()) {
                return Err(TabViewError::DuplicateKey(route.key().to_string()));
            }
        }
        Ok(Self { routes, index })
    }

    /// Build a state without checking it.
    pub fn new_unchecked(routes: Vec<R>, index: usize) -> Self {
        Self { routes, index }
    }

    /// Position of the route with `key`, by linear search.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.routes.iter().position(|route| route.key() == key)
    }

    pub fn focused_route(&self) -> Option<&R> {
        self.routes.get(self.index)
    }

    /// True if `key` names the focused route.
    pub fn is_focused(&self, key: &str) -> bool {
        self.focused_route().is_some_and(|route| route.key() == key)
    }

    /// Same routes, different focus.
    pub fn with_index(&self, index: usize) -> Self {
        Self { routes: self.routes.clone(), index }
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Measured container size in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
}

impl Layout {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Size assumed before the first measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitialLayout {
    pub width: Option<u16>,
    pub height: Option<u16>,
}

impl From<InitialLayout> for Layout {
    fn from(initial: InitialLayout) -> Self {
        Layout {
            width: initial.width.unwrap_or(0),
            height: initial.height.unwrap_or(0),
        }
    }
}

/// Where the tab bar sits relative to the scenes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TabBarPosition {
    #[default]
    Top,
    Bottom,
}

/// Style overrides for the root and for each scene container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerStyle {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub grow: Option<f32>,
    pub padding: Option<u16>,
    pub overflow: Option<Overflow>,
}

// =============================================================================
// Renderer Props
// =============================================================================

/// Inputs shared by every scene and the tab bar.
///
/// Cloned by value into each renderer; all fields are handles, so clones
/// observe the same state.
#[derive(Clone)]
pub struct SceneRendererProps {
    /// Pager position, in pages (0.0 = first page).
    pub position: Signal<f32>,
    /// Measured container size.
    pub layout: Signal<Layout>,
    /// Focus the route with this key. Unknown keys are ignored.
    pub jump_to: Rc<dyn Fn(&str)>,
    /// Pager event listeners.
    pub listeners: Listeners,
}

impl SceneRendererProps {
    pub fn jump_to(&self, key: &str) {
        (self.jump_to)(key)
    }

    pub fn add_listener(&self, listener: impl Fn(&PagerEvent) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

/// Input to `render_scene`.
#[derive(Clone)]
pub struct SceneProps<R> {
    pub renderer: SceneRendererProps,
    pub route: R,
}

/// Input to `render_tab_bar`.
#[derive(Clone)]
pub struct TabBarProps<R: Route> {
    pub renderer: SceneRendererProps,
    pub navigation_state: PropValue<NavigationState<R>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes(keys: &[&str]) -> Vec<SimpleRoute> {
        keys.iter().map(|k| SimpleRoute::new(*k)).collect()
    }

    #[test]
    fn test_navigation_state_validates() {
        assert!(NavigationState::new(routes(&["a", "b"]), 1).is_ok());
        assert_eq!(
            NavigationState::<SimpleRoute>::new(Vec::new(), 0),
            Err(TabViewError::EmptyRoutes)
        );
        assert_eq!(
            NavigationState::new(routes(&["a", "b"]), 2),
            Err(TabViewError::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert_eq!(
            NavigationState::new(routes(&["a", "b", "a"]), 0),
            Err(TabViewError::DuplicateKey("a".to_string()))
        );

        // Unchecked construction trusts the caller
        let unchecked = NavigationState::new_unchecked(routes(&["a"]), 3);
        assert!(unchecked.focused_route().is_none());
        assert!(!unchecked.is_focused("a"));
    }

    #[test]
    fn test_index_of_and_focus() {
        let state = NavigationState::new(routes(&["home", "feed", "settings"]), 1).unwrap();

        assert_eq!(state.index_of("settings"), Some(2));
        assert_eq!(state.index_of("missing"), None);
        assert!(state.is_focused("feed"));
        assert!(!state.is_focused("home"));
        assert_eq!(state.with_index(2).focused_route().map(|r| r.key()), Some("settings"));
    }

    #[test]
    fn test_initial_layout_defaults_to_zero() {
        let layout: Layout = InitialLayout { width: Some(320), height: None }.into();
        assert_eq!(layout, Layout::new(320, 0));
        assert_eq!(Layout::from(InitialLayout::default()), Layout::default());
    }

    #[test]
    fn test_renderer_listeners_are_shared() {
        use spark_signals::signal;
        use std::cell::Cell;

        let renderer = SceneRendererProps {
            position: signal(0.0),
            layout: signal(Layout::default()),
            jump_to: Rc::new(|_: &str| {}),
            listeners: Listeners::new(),
        };
        let copy = renderer.clone();
        let calls = Rc::new(Cell::new(0));
        let calls_in = calls.clone();

        let id = copy.add_listener(move |_| calls_in.set(calls_in.get() + 1));
        renderer.listeners.emit(PagerEvent::Enter { index: 1 });
        assert!(renderer.remove_listener(id));
        renderer.listeners.emit(PagerEvent::Enter { index: 0 });

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_simple_route_title() {
        assert_eq!(SimpleRoute::new("home").title(), None);
        assert_eq!(SimpleRoute::with_title("home", "Home").title(), Some("Home"));
    }
}
