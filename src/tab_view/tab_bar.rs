//! Default tab bar.
//!
//! One text label per route in a row. The focused label is bracketed, and
//! digit keys `1`-`9` jump to the route at that position.

use std::rc::Rc;

use crate::engine::{get_current_parent_index, on_destroy};
use crate::primitives::{box_primitive, each, text, BoxProps, Cleanup, PropValue, TextProps};
use crate::state::keyboard;
use crate::types::FlexDirection;
use super::types::{Route, TabBarProps};

/// Label shown for a route.
pub fn tab_label<R: Route>(route: &R, focused: bool) -> String {
    let title = route.title().unwrap_or_else(|| route.key());
    if focused {
        format!("[ {} ]", title)
    } else {
        format!("  {}  ", title)
    }
}

/// Route key for a digit key press, if it names an existing position.
fn digit_target<R: Route>(routes: &[R], key: &str) -> Option<String> {
    let digit = key.parse::<usize>().ok().filter(|d| (1..=9).contains(d))?;
    routes.get(digit - 1).map(|route| route.key().to_string())
}

/// Render the default tab bar.
pub fn default_tab_bar<R: Route>(props: TabBarProps<R>) -> Cleanup {
    let TabBarProps { renderer, navigation_state } = props;

    let labels_state = navigation_state.clone();
    let bar = box_primitive(BoxProps {
        flex_direction: Some(PropValue::Static(FlexDirection::Row as u8)),
        shrink: Some(PropValue::Static(0.0)),
        children: Some(Box::new(move || {
            let items_state = labels_state.clone();
            let focus_state = labels_state;
            let labels = each(
                move || items_state.get().routes,
                move |get_route, key: String| {
                    let focus_state = focus_state.clone();
                    text(TextProps {
                        content: PropValue::getter(move || {
                            tab_label(&get_route(), focus_state.get().is_focused(&key))
                        }),
                        ..Default::default()
                    })
                },
                |route: &R| route.key().to_string(),
            );
            if let Some(parent) = get_current_parent_index() {
                on_destroy(parent, labels);
            }
        })),
        ..Default::default()
    });

    let jump_to = renderer.jump_to.clone();
    let digits = keyboard::on(move |event| {
        if event.modifiers.ctrl || event.modifiers.alt {
            return false;
        }
        match digit_target(&navigation_state.get().routes, &event.key) {
            Some(key) => {
                jump_to(&key);
                true
            }
            None => false,
        }
    });

    Box::new(move || {
        digits();
        bar();
    })
}

/// Shared handle to the default tab bar, for `TabViewProps::render_tab_bar`.
pub fn default_tab_bar_renderer<R: Route>() -> Rc<dyn Fn(TabBarProps<R>) -> Cleanup> {
    Rc::new(default_tab_bar::<R>)
}
