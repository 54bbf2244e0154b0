//! Control Flow Primitives - Conditional and keyed list rendering.
//!
//! - [`show`] - Mount a branch while a reactive condition holds
//! - [`each`] - Mount one branch per keyed item, reusing branches by key
//!
//! # Pattern: EffectScope-based Cleanup
//!
//! Both primitives own an EffectScope. The tracking effect and a dispose hook
//! are registered inside `scope.run()`, and the returned [`Cleanup`] stops the
//! scope, which tears down whatever branch is mounted.
//!
//! # Pattern: Parent Context Restoration
//!
//! The parent index is captured when the primitive is called and pushed again
//! around every (re)render, so components created later by the effect still
//! attach to the right parent.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::rc::Rc;

use log::warn;
use spark_signals::{effect, effect_scope, on_scope_dispose, signal, Signal};

use crate::engine::{get_current_parent_index, pop_parent_context, push_parent_context};
use crate::primitives::Cleanup;

/// Run `f` with `parent` pushed as the current parent context.
fn with_parent<R>(parent: Option<usize>, f: impl FnOnce() -> R) -> R {
    if let Some(parent) = parent {
        push_parent_context(parent);
    }
    let result = f();
    if parent.is_some() {
        pop_parent_context();
    }
    result
}

// =============================================================================
// show() - Conditional rendering
// =============================================================================

/// Conditionally mount a branch.
///
/// `then_fn` is mounted while `condition` returns true; `else_fn`, if given,
/// while it returns false. A branch is only rebuilt when the condition flips.
///
/// ```ignore
/// let cleanup = show(
///     move || focused.get() == 2,
///     || text(TextProps { content: "Settings".into(), ..Default::default() }),
///     None::<fn() -> Cleanup>,
/// );
/// ```
pub fn show<ThenF, ElseF, ThenR, ElseR>(
    condition: impl Fn() -> bool + 'static,
    then_fn: ThenF,
    else_fn: Option<ElseF>,
) -> Cleanup
where
    ThenF: Fn() -> ThenR + 'static,
    ElseF: Fn() -> ElseR + 'static,
    ThenR: Into<Cleanup>,
    ElseR: Into<Cleanup>,
{
    let parent_index = get_current_parent_index();

    let mounted: Rc<RefCell<Option<Cleanup>>> = Rc::new(RefCell::new(None));
    let last_condition: Rc<Cell<Option<bool>>> = Rc::new(Cell::new(None));

    let scope = effect_scope();

    let mounted_for_update = mounted.clone();
    let mounted_for_dispose = mounted;

    let update = move |current: bool| {
        if last_condition.get() == Some(current) {
            return;
        }
        last_condition.set(Some(current));

        let previous = mounted_for_update.borrow_mut().take();
        if let Some(previous) = previous {
            previous();
        }

        let next = with_parent(parent_index, || {
            if current {
                Some(then_fn().into())
            } else {
                else_fn.as_ref().map(|f| f().into())
            }
        });

        *mounted_for_update.borrow_mut() = next;
    };

    scope.run(move || {
        let _effect = effect(move || update(condition()));

        on_scope_dispose(move || {
            let current = mounted_for_dispose.borrow_mut().take();
            if let Some(cleanup) = current {
                cleanup();
            }
        });
    });

    Box::new(move || scope.stop())
}

// =============================================================================
// each() - Keyed list rendering
// =============================================================================

/// Mount one branch per item, keyed by `key_fn`.
///
/// - New key: a per-item signal is created and `render_fn` mounts the branch
/// - Known key: only the item's signal is updated, the branch is kept
/// - Missing key: the branch is cleaned up
///
/// Items with a key already seen in the same pass are skipped with a warning.
pub fn each<T, K, RenderF, R>(
    items_getter: impl Fn() -> Vec<T> + 'static,
    render_fn: RenderF,
    key_fn: impl Fn(&T) -> K + 'static,
) -> Cleanup
where
    T: Clone + PartialEq + 'static,
    K: Clone + Eq + Hash + std::fmt::Debug + 'static,
    RenderF: Fn(Rc<dyn Fn() -> T>, K) -> R + 'static,
    R: Into<Cleanup>,
{
    let parent_index = get_current_parent_index();

    let scope = effect_scope();

    let branches: Rc<RefCell<HashMap<K, (Signal<T>, Cleanup)>>> =
        Rc::new(RefCell::new(HashMap::new()));
    let branches_for_effect = branches.clone();
    let branches_for_dispose = branches;

    scope.run(move || {
        let _effect = effect(move || {
            let items = items_getter();
            let mut seen: HashSet<K> = HashSet::with_capacity(items.len());

            with_parent(parent_index, || {
                for item in &items {
                    let key = key_fn(item);
                    if !seen.insert(key.clone()) {
                        warn!("each(): duplicate key {:?} skipped", key);
                        continue;
                    }

                    let existing = branches_for_effect
                        .borrow()
                        .get(&key)
                        .map(|(item_signal, _)| item_signal.clone());

                    match existing {
                        Some(item_signal) => {
                            item_signal.set(item.clone());
                        }
                        None => {
                            let item_signal = signal(item.clone());
                            let reader = item_signal.clone();
                            let getter: Rc<dyn Fn() -> T> = Rc::new(move || reader.get());
                            // Not borrowed while rendering; branches may nest each()
                            let cleanup = render_fn(getter, key.clone()).into();
                            branches_for_effect
                                .borrow_mut()
                                .insert(key, (item_signal, cleanup));
                        }
                    }
                }
            });

            let removed: Vec<(Signal<T>, Cleanup)> = {
                let mut map = branches_for_effect.borrow_mut();
                let stale: Vec<K> = map.keys().filter(|k| !seen.contains(*k)).cloned().collect();
                stale.into_iter().filter_map(|k| map.remove(&k)).collect()
            };
            for (_, cleanup) in removed {
                cleanup();
            }
        });

        on_scope_dispose(move || {
            let all: Vec<(Signal<T>, Cleanup)> = branches_for_dispose
                .borrow_mut()
                .drain()
                .map(|(_, branch)| branch)
                .collect();
            for (_, cleanup) in all {
                cleanup();
            }
        });
    });

    Box::new(move || scope.stop())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{allocate_index, get_allocated_count, release_index, reset_registry};

    fn mount_component() -> Cleanup {
        let index = allocate_index(None);
        Box::new(move || release_index(index))
    }

    #[test]
    fn test_show_mounts_then_branch() {
        reset_registry();

        let condition = signal(true);
        let reader = condition.clone();

        let _cleanup = show(move || reader.get(), mount_component, None::<fn() -> Cleanup>);
        assert_eq!(get_allocated_count(), 1);
    }

    #[test]
    fn test_show_swaps_branches() {
        reset_registry();

        let condition = signal(true);
        let reader = condition.clone();

        let _cleanup = show(move || reader.get(), mount_component, Some(mount_component));
        assert_eq!(get_allocated_count(), 1);

        condition.set(false);
        assert_eq!(get_allocated_count(), 1);

        condition.set(true);
        assert_eq!(get_allocated_count(), 1);
    }

    #[test]
    fn test_show_without_else_unmounts() {
        reset_registry();

        let condition = signal(true);
        let reader = condition.clone();

        let _cleanup = show(move || reader.get(), mount_component, None::<fn() -> Cleanup>);
        condition.set(false);
        assert_eq!(get_allocated_count(), 0);

        condition.set(true);
        assert_eq!(get_allocated_count(), 1);
    }

    #[test]
    fn test_show_does_not_rebuild_on_same_value() {
        reset_registry();

        let condition = signal(true);
        let reader = condition.clone();
        let renders = Rc::new(Cell::new(0));
        let renders_in = renders.clone();

        let _cleanup = show(
            move || reader.get(),
            move || {
                renders_in.set(renders_in.get() + 1);
                mount_component()
            },
            None::<fn() -> Cleanup>,
        );
        assert_eq!(renders.get(), 1);

        condition.set(true);
        assert_eq!(renders.get(), 1);
    }

    #[test]
    fn test_show_cleanup_unmounts_branch() {
        reset_registry();

        let cleanup = show(|| true, mount_component, None::<fn() -> Cleanup>);
        assert_eq!(get_allocated_count(), 1);

        cleanup();
        assert_eq!(get_allocated_count(), 0);
    }

    #[test]
    fn test_show_restores_parent_context() {
        reset_registry();

        let parent = allocate_index(Some("parent"));
        push_parent_context(parent);

        let seen_parent = Rc::new(Cell::new(None));
        let seen_in = seen_parent.clone();
        let _cleanup = show(
            || true,
            move || {
                seen_in.set(get_current_parent_index());
                mount_component()
            },
            None::<fn() -> Cleanup>,
        );
        pop_parent_context();

        assert_eq!(seen_parent.get(), Some(parent));
    }

    #[test]
    fn test_each_mounts_and_diffs_by_key() {
        reset_registry();

        let items = signal(vec!["home", "feed", "settings"]);
        let reader = items.clone();

        let _cleanup = each(
            move || reader.get(),
            |_get_item, _key| mount_component(),
            |item| item.to_string(),
        );
        assert_eq!(get_allocated_count(), 3);

        items.set(vec!["home", "settings"]);
        assert_eq!(get_allocated_count(), 2);

        items.set(vec!["home", "settings", "profile"]);
        assert_eq!(get_allocated_count(), 3);
    }

    #[test]
    fn test_each_skips_duplicate_keys() {
        reset_registry();

        let _cleanup = each(
            || vec!["home", "home", "feed"],
            |_get_item, _key| mount_component(),
            |item| item.to_string(),
        );
        assert_eq!(get_allocated_count(), 2);
    }

    #[test]
    fn test_each_updates_item_without_remount() {
        reset_registry();

        #[derive(Clone, PartialEq)]
        struct Page {
            key: &'static str,
            title: &'static str,
        }

        let pages = signal(vec![Page { key: "home", title: "Home" }]);
        let reader = pages.clone();

        let renders = Rc::new(Cell::new(0));
        let renders_in = renders.clone();
        let title = Rc::new(RefCell::new(String::new()));
        let title_in = title.clone();

        let _cleanup = each(
            move || reader.get(),
            move |get_item, _key| {
                renders_in.set(renders_in.get() + 1);
                let title_effect = title_in.clone();
                let _effect = effect(move || {
                    *title_effect.borrow_mut() = get_item().title.to_string();
                });
                mount_component()
            },
            |page| page.key,
        );
        assert_eq!(*title.borrow(), "Home");

        pages.set(vec![Page { key: "home", title: "Start" }]);
        assert_eq!(renders.get(), 1);
        assert_eq!(*title.borrow(), "Start");
    }

    #[test]
    fn test_each_cleanup_unmounts_all() {
        reset_registry();

        let cleanup = each(
            || vec![1, 2, 3],
            |_get_item, _key| mount_component(),
            |item| *item,
        );
        assert_eq!(get_allocated_count(), 3);

        cleanup();
        assert_eq!(get_allocated_count(), 0);
    }
}
