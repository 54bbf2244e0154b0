//! Pager contract and the default keyboard pager.
//!
//! A pager owns transition mechanics: it tracks the position (in pages),
//! lays the scenes out side by side, and reports index changes. The tab view
//! only talks to it through [`Pager`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::trace;
use spark_signals::{effect, effect_scope, on_scope_dispose, signal, Signal};

use crate::primitives::{box_primitive, BoxProps, Cleanup, PropValue};
use crate::state::keyboard;
use crate::types::{FlexDirection, Overflow};
use super::types::Layout;

// =============================================================================
// Listeners
// =============================================================================

/// Events a pager reports to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerEvent {
    /// The page at `index` became the focused page.
    Enter { index: usize },
}

/// Handle returned by [`Listeners::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&PagerEvent)>;

#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Shared listener registry. Clones share the same set.
#[derive(Clone, Default)]
pub struct Listeners {
    inner: Rc<RefCell<ListenerSet>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: impl Fn(&PagerEvent) + 'static) -> ListenerId {
        let mut set = self.inner.borrow_mut();
        let id = set.next_id;
        set.next_id += 1;
        set.entries.push((id, Rc::new(listener)));
        ListenerId(id)
    }

    /// Returns false if `id` was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut set = self.inner.borrow_mut();
        let before = set.entries.len();
        set.entries.retain(|(entry_id, _)| *entry_id != id.0);
        before != set.entries.len()
    }

    /// Call every listener. Listeners may add or remove listeners.
    pub fn emit(&self, event: PagerEvent) {
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Contract
// =============================================================================

/// What the tab view hands to its pager.
#[derive(Clone)]
pub struct PagerProps {
    /// Focused index (reactive getter).
    pub index: Rc<dyn Fn() -> usize>,
    /// Number of routes (reactive getter).
    pub route_count: Rc<dyn Fn() -> usize>,
    /// Measured container size.
    pub layout: Signal<Layout>,
    pub swipe_enabled: bool,
    pub swipe_distance_threshold: Option<f32>,
    pub swipe_velocity_threshold: Option<f32>,
    /// Ask the owner to focus an index.
    pub on_index_change: Rc<dyn Fn(usize)>,
}

/// What the pager hands back to the tab view.
#[derive(Clone)]
pub struct PagerRenderProps {
    /// Position in pages.
    pub position: Signal<f32>,
    /// Lay out the scene sequence; the closure creates one container per scene.
    pub render: Rc<dyn Fn(Box<dyn FnOnce()>) -> Cleanup>,
    pub listeners: Listeners,
    /// Snap to an index without notifying the owner.
    pub jump_to_index: Rc<dyn Fn(usize)>,
}

/// Builds the tab view's content from pager capabilities.
pub type PagerChildren = Box<dyn FnOnce(PagerRenderProps) -> Cleanup>;

/// Transition mechanics behind a tab view.
pub trait Pager {
    /// Mount the pager. `children` must be called exactly once, synchronously.
    fn render(&self, props: PagerProps, children: PagerChildren) -> Cleanup;
}

// =============================================================================
// KeyboardPager
// =============================================================================

/// Default pager: no animation, arrow keys page.
///
/// The scene row is shifted left by `position * width`, so the focused page
/// is the one in view. `ArrowLeft`/`ArrowRight` request the neighbouring page
/// when swiping is enabled. Distance and velocity thresholds are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardPager;

impl Pager for KeyboardPager {
    fn render(&self, props: PagerProps, children: PagerChildren) -> Cleanup {
        let position = signal((props.index)() as f32);
        let listeners = Listeners::new();

        // Follow the focused index
        let scope = effect_scope();
        {
            let index = props.index.clone();
            let position = position.clone();
            let listeners = listeners.clone();
            let last_index: Rc<Cell<Option<usize>>> = Rc::new(Cell::new(None));
            scope.run(move || {
                let _effect = effect(move || {
                    let current = index();
                    position.set(current as f32);
                    if last_index.replace(Some(current)).is_some_and(|prev| prev != current) {
                        trace!("pager enter {}", current);
                        listeners.emit(PagerEvent::Enter { index: current });
                    }
                });
                on_scope_dispose(|| trace!("pager stopped"));
            });
        }

        let mut key_cleanups: Vec<Box<dyn FnOnce()>> = Vec::new();
        if props.swipe_enabled {
            let index = props.index.clone();
            let request = props.on_index_change.clone();
            key_cleanups.push(Box::new(keyboard::on_key("ArrowLeft", move || {
                let current = index();
                if current == 0 {
                    return false;
                }
                request(current - 1);
                true
            })));

            let index = props.index.clone();
            let count = props.route_count.clone();
            let request = props.on_index_change.clone();
            key_cleanups.push(Box::new(keyboard::on_key("ArrowRight", move || {
                let current = index();
                if current + 1 >= count() {
                    return false;
                }
                request(current + 1);
                true
            })));
        }

        let render = {
            let position = position.clone();
            let layout = props.layout.clone();
            Rc::new(move |scenes: Box<dyn FnOnce()>| -> Cleanup {
                let position = position.clone();
                let layout = layout.clone();
                box_primitive(BoxProps {
                    flex_direction: Some(PropValue::Static(FlexDirection::Row as u8)),
                    grow: Some(PropValue::Static(1.0)),
                    overflow: Some(PropValue::Static(Overflow::Hidden as u8)),
                    left: Some(PropValue::getter(move || {
                        -(position.get() * layout.get().width as f32).round() as i32
                    })),
                    children: Some(scenes),
                    ..Default::default()
                })
            }) as Rc<dyn Fn(Box<dyn FnOnce()>) -> Cleanup>
        };

        let jump_to_index = {
            let position = position.clone();
            Rc::new(move |index: usize| {
                trace!("pager snap {}", index);
                position.set(index as f32);
            }) as Rc<dyn Fn(usize)>
        };

        let content = children(PagerRenderProps {
            position,
            render,
            listeners,
            jump_to_index,
        });

        Box::new(move || {
            for cleanup in key_cleanups {
                cleanup();
            }
            scope.stop();
            content();
        })
    }
}
