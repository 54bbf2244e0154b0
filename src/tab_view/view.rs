//! TabView component.
//!
//! Composes the tab bar and the pager's scene row inside a root column, keeps
//! one container per route, and decides which containers render content.
//!
//! Only the focused scene is rendered at first. The remaining scenes are
//! rendered one tick later, once the container width is known, so the first
//! frame stays cheap.
//!
//! # Example
//!
//! ```ignore
//! use spark_tab_view::tab_view::{tab_view, NavigationState, SimpleRoute, TabViewProps};
//!
//! let state = signal(NavigationState::new(routes, 0)?);
//! let view = tab_view(TabViewProps::new(
//!     PropValue::Signal(state.clone()),
//!     Rc::new(move |index| state.set(state.get().with_index(index))),
//!     Rc::new(|scene| text(TextProps { content: scene.route.key().into(), ..Default::default() })),
//! ));
//! ```

use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use spark_signals::{signal, Signal};

use crate::engine::arrays::interaction::{self, LayoutEvent, LayoutHandler};
use crate::engine::{get_current_parent_index, get_index, on_destroy};
use crate::pipeline::scheduler::{defer, DeferredTask};
use crate::primitives::{box_primitive, each, show, BoxProps, Cleanup, PropValue};
use crate::types::{AccessFlags, Dimension, FlexDirection, Overflow, Position};
use super::index_bridge::IndexBridge;
use super::layout_state::LayoutState;
use super::pager::{KeyboardPager, Pager, PagerChildren, PagerProps, PagerRenderProps};
use super::tab_bar::default_tab_bar;
use super::types::{
    ContainerStyle, InitialLayout, Layout, NavigationState, Route, SceneProps,
    SceneRendererProps, TabBarPosition, TabBarProps,
};

thread_local! {
    static NEXT_TAB_VIEW_ID: Cell<u64> = const { Cell::new(0) };
}

fn next_tab_view_id() -> String {
    let n = NEXT_TAB_VIEW_ID.with(|next| {
        let n = next.get();
        next.set(n + 1);
        n
    });
    format!("tab-view-{}", n)
}

/// Component id of the container for `key` inside the tab view `root_id`.
pub fn scene_container_id(root_id: &str, key: &str) -> String {
    format!("{}/{}", root_id, key)
}

// =============================================================================
// Props
// =============================================================================

/// Properties for [`tab_view`].
///
/// Build with [`TabViewProps::new`] and override the rest with struct update.
pub struct TabViewProps<R: Route> {
    /// Routes and focused index. Owned by the caller.
    pub navigation_state: PropValue<NavigationState<R>>,
    /// Called with the index the user asked to focus.
    pub on_index_change: Rc<dyn Fn(usize)>,
    pub render_scene: Rc<dyn Fn(SceneProps<R>) -> Cleanup>,
    /// Custom tab bar. `None` uses [`default_tab_bar`].
    pub render_tab_bar: Option<Rc<dyn Fn(TabBarProps<R>) -> Cleanup>>,
    pub tab_bar_position: TabBarPosition,
    /// Size assumed until the container is measured.
    pub initial_layout: InitialLayout,
    pub swipe_enabled: bool,
    pub swipe_distance_threshold: Option<f32>,
    pub swipe_velocity_threshold: Option<f32>,
    /// Applied to every scene container after the sizing rules.
    pub scene_container_style: Option<ContainerStyle>,
    /// Applied to the root column.
    pub style: Option<ContainerStyle>,
    pub pager: Rc<dyn Pager>,
    /// Root component id. Generated when absent.
    pub id: Option<String>,
}

impl<R: Route> TabViewProps<R> {
    pub fn new(
        navigation_state: PropValue<NavigationState<R>>,
        on_index_change: Rc<dyn Fn(usize)>,
        render_scene: Rc<dyn Fn(SceneProps<R>) -> Cleanup>,
    ) -> Self {
        Self {
            navigation_state,
            on_index_change,
            render_scene,
            render_tab_bar: None,
            tab_bar_position: TabBarPosition::default(),
            initial_layout: InitialLayout::default(),
            swipe_enabled: true,
            swipe_distance_threshold: None,
            swipe_velocity_threshold: None,
            scene_container_style: None,
            style: None,
            pager: Rc::new(KeyboardPager),
            id: None,
        }
    }
}

// =============================================================================
// Handle
// =============================================================================

/// A mounted tab view.
///
/// Dropping the handle unmounts the view.
pub struct TabView {
    root_id: String,
    layout: LayoutState,
    render_unfocused: Signal<bool>,
    deferred: Option<DeferredTask>,
    cleanup: Option<Cleanup>,
}

impl TabView {
    /// Root component index, while mounted.
    pub fn root_index(&self) -> Option<usize> {
        get_index(&self.root_id)
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    /// Current measured layout.
    pub fn layout(&self) -> Layout {
        self.layout.get()
    }

    /// Whether non-focused scenes may render (set one tick after mount).
    pub fn renders_unfocused_scenes(&self) -> bool {
        self.render_unfocused.get()
    }

    /// Report a container measurement. Returns true if the layout changed.
    ///
    /// A changed value makes the next layout pass redeliver the root frame,
    /// so a mounted pipeline corrects a size that differs from the real one.
    pub fn handle_layout(&self, width: u16, height: u16) -> bool {
        let changed = self.layout.handle_layout(width, height);
        if changed {
            if let Some(root) = self.root_index() {
                interaction::clear_last_delivered(root);
            }
        }
        changed
    }

    /// Index of the container for the route `key`, while mounted.
    pub fn scene_container_index(&self, key: &str) -> Option<usize> {
        get_index(&scene_container_id(&self.root_id, key))
    }

    /// Cancel pending startup work and release every component.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(task) = self.deferred.take() {
            if task.cancel() {
                debug!("{}: startup task cancelled", self.root_id);
            }
        }
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl Drop for TabView {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl From<TabView> for Cleanup {
    fn from(mut view: TabView) -> Self {
        Box::new(move || view.teardown())
    }
}

// =============================================================================
// Component
// =============================================================================

/// Everything a scene container needs, shared by all containers.
struct SceneContext<R: Route> {
    root_id: String,
    navigation_state: PropValue<NavigationState<R>>,
    layout: Signal<Layout>,
    render_unfocused: Signal<bool>,
    render_scene: Rc<dyn Fn(SceneProps<R>) -> Cleanup>,
    renderer: SceneRendererProps,
    style: Option<ContainerStyle>,
}

/// Mount a tab view under the current parent.
pub fn tab_view<R: Route>(props: TabViewProps<R>) -> TabView {
    let root_id = props.id.clone().unwrap_or_else(next_tab_view_id);
    let layout = LayoutState::new(props.initial_layout);
    let render_unfocused = signal(false);

    let on_layout: LayoutHandler = {
        let layout = layout.clone();
        Rc::new(move |event: &LayoutEvent| {
            layout.handle_layout(event.width, event.height);
        })
    };

    let style = props.style.clone().unwrap_or_default();
    let content: Box<dyn FnOnce()> = {
        let root_id = root_id.clone();
        let layout = layout.clone();
        let render_unfocused = render_unfocused.clone();
        Box::new(move || mount_content(props, root_id, layout, render_unfocused))
    };

    let cleanup = box_primitive(BoxProps {
        id: Some(root_id.clone()),
        flex_direction: Some(PropValue::Static(FlexDirection::Column as u8)),
        grow: Some(PropValue::Static(style.grow.unwrap_or(1.0))),
        width: Some(PropValue::Static(style.width.unwrap_or(Dimension::Percent(100.0)))),
        height: Some(PropValue::Static(style.height.unwrap_or(Dimension::Percent(100.0)))),
        padding: style.padding.map(PropValue::Static),
        overflow: Some(PropValue::Static(style.overflow.unwrap_or(Overflow::Hidden) as u8)),
        on_layout: Some(on_layout),
        children: Some(content),
        ..Default::default()
    });

    let deferred = {
        let flag = render_unfocused.clone();
        let root_id = root_id.clone();
        defer(move || {
            debug!("{}: rendering unfocused scenes", root_id);
            flag.set(true);
        })
    };

    TabView {
        root_id,
        layout,
        render_unfocused,
        deferred: Some(deferred),
        cleanup: Some(cleanup),
    }
}

/// Runs with the root as parent: wires the bridge and mounts the pager.
fn mount_content<R: Route>(
    props: TabViewProps<R>,
    root_id: String,
    layout: LayoutState,
    render_unfocused: Signal<bool>,
) {
    let root = get_current_parent_index();
    let navigation_state = props.navigation_state;
    let bridge = Rc::new(IndexBridge::new(navigation_state.clone(), props.on_index_change));

    let pager_props = PagerProps {
        index: {
            let state = navigation_state.clone();
            Rc::new(move || state.get().index)
        },
        route_count: {
            let state = navigation_state.clone();
            Rc::new(move || state.get().routes.len())
        },
        layout: layout.signal(),
        swipe_enabled: props.swipe_enabled,
        swipe_distance_threshold: props.swipe_distance_threshold,
        swipe_velocity_threshold: props.swipe_velocity_threshold,
        on_index_change: {
            let bridge = bridge.clone();
            Rc::new(move |index: usize| {
                bridge.jump_to_index(index);
            })
        },
    };

    let render_scene = props.render_scene;
    let render_tab_bar = props.render_tab_bar;
    let tab_bar_position = props.tab_bar_position;
    let scene_style = props.scene_container_style;
    let layout_signal = layout.signal();

    let children: PagerChildren = Box::new(move |render_props: PagerRenderProps| -> Cleanup {
        bridge.set_pager_jump(render_props.jump_to_index.clone());

        let renderer = SceneRendererProps {
            position: render_props.position.clone(),
            layout: layout_signal.clone(),
            jump_to: {
                let bridge = bridge.clone();
                Rc::new(move |key: &str| bridge.jump_to(key))
            },
            listeners: render_props.listeners.clone(),
        };

        let render_bar = || {
            let bar_props = TabBarProps {
                renderer: renderer.clone(),
                navigation_state: navigation_state.clone(),
            };
            match &render_tab_bar {
                Some(render) => render(bar_props),
                None => default_tab_bar(bar_props),
            }
        };

        let context = Rc::new(SceneContext {
            root_id,
            navigation_state: navigation_state.clone(),
            layout: layout_signal,
            render_unfocused,
            render_scene,
            renderer: renderer.clone(),
            style: scene_style,
        });

        let mut cleanups: Vec<Cleanup> = Vec::with_capacity(2);
        if tab_bar_position == TabBarPosition::Top {
            cleanups.push(render_bar());
        }
        cleanups.push((render_props.render)(Box::new(move || mount_scenes(context))));
        if tab_bar_position == TabBarPosition::Bottom {
            cleanups.push(render_bar());
        }

        Box::new(move || {
            for cleanup in cleanups.into_iter().rev() {
                cleanup();
            }
        })
    });

    let pager_cleanup = props.pager.render(pager_props, children);
    if let Some(root) = root {
        on_destroy(root, pager_cleanup);
    }
}

/// Runs with the scene row as parent: one container per route, keyed.
fn mount_scenes<R: Route>(context: Rc<SceneContext<R>>) {
    let row = get_current_parent_index();
    let routes_state = context.navigation_state.clone();
    let containers = each(
        move || routes_state.get().routes,
        move |get_route, key: String| scene_container(context.clone(), get_route, key),
        |route: &R| route.key().to_string(),
    );
    if let Some(row) = row {
        on_destroy(row, containers);
    }
}

fn scene_container<R: Route>(
    context: Rc<SceneContext<R>>,
    get_route: Rc<dyn Fn() -> R>,
    key: String,
) -> Cleanup {
    let focused: Rc<dyn Fn() -> bool> = {
        let state = context.navigation_state.clone();
        let key = key.clone();
        Rc::new(move || state.get().is_focused(&key))
    };
    // Focused container fills the root while the width is unknown
    let fills: Rc<dyn Fn() -> bool> = {
        let layout = context.layout.clone();
        let focused = focused.clone();
        Rc::new(move || layout.get().width == 0 && focused())
    };
    let style = context.style.clone().unwrap_or_default();

    let width = match style.width {
        Some(width) => PropValue::Static(width),
        None => {
            let layout = context.layout.clone();
            let focused = focused.clone();
            PropValue::getter(move || match layout.get().width {
                0 if focused() => Dimension::Percent(100.0),
                0 => Dimension::Auto,
                width => Dimension::Cells(width),
            })
        }
    };
    let height = match style.height {
        Some(height) => PropValue::Static(height),
        None => {
            let fills = fills.clone();
            PropValue::getter(move || {
                if fills() { Dimension::Percent(100.0) } else { Dimension::Auto }
            })
        }
    };
    let shrink = {
        let layout = context.layout.clone();
        PropValue::getter(move || if layout.get().width > 0 { 0.0 } else { 1.0 })
    };
    let inset = {
        let fills = fills.clone();
        move || PropValue::getter({
            let fills = fills.clone();
            move || if fills() { Some(0) } else { None }
        })
    };
    let access = {
        let focused = focused.clone();
        PropValue::getter(move || {
            if focused() { AccessFlags::empty() } else { AccessFlags::HIDDEN }
        })
    };

    let content: Box<dyn FnOnce()> = {
        let context = context.clone();
        Box::new(move || {
            let container = get_current_parent_index();
            let visible = {
                let focused = focused.clone();
                let layout = context.layout.clone();
                let render_unfocused = context.render_unfocused.clone();
                move || focused() || (render_unfocused.get() && layout.get().width > 0)
            };
            let render = {
                let context = context.clone();
                move || {
                    (context.render_scene)(SceneProps {
                        renderer: context.renderer.clone(),
                        route: get_route(),
                    })
                }
            };
            let scene = show(visible, render, None::<fn() -> Cleanup>);
            if let Some(container) = container {
                on_destroy(container, scene);
            }
        })
    };

    box_primitive(BoxProps {
        id: Some(scene_container_id(&context.root_id, &key)),
        grow: Some(PropValue::Static(style.grow.unwrap_or(1.0))),
        shrink: Some(shrink),
        width: Some(width),
        height: Some(height),
        padding: style.padding.map(PropValue::Static),
        overflow: Some(PropValue::Static(style.overflow.unwrap_or(Overflow::Hidden) as u8)),
        position: Some(PropValue::getter(move || {
            if fills() { Position::Absolute as u8 } else { Position::Relative as u8 }
        })),
        right: Some(inset()),
        bottom: Some(inset()),
        access: Some(access),
        children: Some(content),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use crate::engine::{get_allocated_count, get_children, get_flex_node, reset_registry};
    use crate::pipeline::layout_derived::flush_layout;
    use crate::pipeline::scheduler::{pending_count, reset_scheduler, run_deferred};
    use crate::pipeline::terminal::set_terminal_size;
    use crate::state::keyboard::handler_count;
    use crate::primitives::{text, TextProps};
    use crate::state::reset_keyboard_state;
    use crate::tab_view::types::SimpleRoute;

    fn setup() {
        reset_registry();
        reset_scheduler();
        reset_keyboard_state();
    }

    fn two_routes() -> NavigationState<SimpleRoute> {
        NavigationState::new(vec![SimpleRoute::new("a"), SimpleRoute::new("b")], 0).unwrap()
    }

    fn props(rendered: Rc<RefCell<Vec<String>>>) -> TabViewProps<SimpleRoute> {
        TabViewProps::new(
            PropValue::Static(two_routes()),
            Rc::new(|_: usize| {}),
            Rc::new(move |scene: SceneProps<SimpleRoute>| {
                rendered.borrow_mut().push(scene.route.key.clone());
                text(TextProps { content: scene.route.key.as_str().into(), ..Default::default() })
            }),
        )
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(next_tab_view_id(), next_tab_view_id());
        assert_eq!(scene_container_id("tabs", "home"), "tabs/home");
    }

    #[test]
    fn test_only_focused_scene_renders_before_tick() {
        setup();

        let rendered = Rc::new(RefCell::new(Vec::new()));
        let view = tab_view(props(rendered.clone()));

        assert_eq!(*rendered.borrow(), vec!["a".to_string()]);
        assert!(!view.renders_unfocused_scenes());

        let a = view.scene_container_index("a").unwrap();
        let b = view.scene_container_index("b").unwrap();
        assert_eq!(get_children(a).len(), 1);
        assert!(get_children(b).is_empty());

        view.unmount();
    }

    #[test]
    fn test_unfocused_scenes_wait_for_width() {
        setup();

        let rendered = Rc::new(RefCell::new(Vec::new()));
        let view = tab_view(props(rendered.clone()));

        assert_eq!(run_deferred(), 1);
        assert!(view.renders_unfocused_scenes());
        // Width still unknown
        assert_eq!(rendered.borrow().len(), 1);

        assert!(view.handle_layout(320, 24));
        assert_eq!(*rendered.borrow(), vec!["a".to_string(), "b".to_string()]);

        let b = view.scene_container_index("b").unwrap();
        let node = get_flex_node(b).unwrap();
        assert_eq!(node.width.get(), Dimension::Cells(320));
        assert_eq!(node.flex_shrink.get(), 0.0);

        view.unmount();
    }

    #[test]
    fn test_style_overrides_container_rules() {
        setup();

        let mut props = props(Rc::new(RefCell::new(Vec::new())));
        props.scene_container_style = Some(ContainerStyle {
            width: Some(Dimension::Cells(10)),
            ..Default::default()
        });
        let view = tab_view(props);
        view.handle_layout(320, 24);

        let a = view.scene_container_index("a").unwrap();
        assert_eq!(get_flex_node(a).unwrap().width.get(), Dimension::Cells(10));

        view.unmount();
    }

    #[test]
    fn test_containers_fill_and_clip_by_default() {
        setup();

        let view = tab_view(props(Rc::new(RefCell::new(Vec::new()))));
        for key in ["a", "b"] {
            let node = get_flex_node(view.scene_container_index(key).unwrap()).unwrap();
            assert_eq!(node.flex_grow.get(), 1.0);
            assert_eq!(node.overflow.get(), Overflow::Hidden as u8);
        }
        view.unmount();

        let mut props = props(Rc::new(RefCell::new(Vec::new())));
        props.scene_container_style = Some(ContainerStyle {
            grow: Some(0.0),
            overflow: Some(Overflow::Visible),
            ..Default::default()
        });
        let view = tab_view(props);
        let node = get_flex_node(view.scene_container_index("b").unwrap()).unwrap();
        assert_eq!(node.flex_grow.get(), 0.0);
        assert_eq!(node.overflow.get(), Overflow::Visible as u8);
        view.unmount();
    }

    #[test]
    fn test_dropping_handle_unmounts() {
        setup();

        let view = tab_view(props(Rc::new(RefCell::new(Vec::new()))));
        assert_eq!(pending_count(), 1);
        assert!(handler_count() > 0);

        drop(view);
        assert_eq!(pending_count(), 0);
        assert_eq!(handler_count(), 0);
        assert_eq!(get_allocated_count(), 0);
    }

    #[test]
    fn test_host_measurement_is_corrected_by_layout() {
        setup();
        set_terminal_size(320, 24);

        let view = tab_view(props(Rc::new(RefCell::new(Vec::new()))));
        flush_layout();
        assert_eq!(view.layout(), Layout::new(320, 24));

        // Stale host measurement; the real frame has not changed
        assert!(view.handle_layout(100, 24));
        flush_layout();
        assert_eq!(view.layout(), Layout::new(320, 24));

        assert!(!view.handle_layout(320, 24));
        view.unmount();
    }
}
