//! Measured container size.

use log::debug;
use spark_signals::{signal, Signal};

use super::types::{InitialLayout, Layout};

/// Holds the tab view's measured layout.
///
/// Writes only happen when the measurement changes, so scene containers
/// sized from the signal are not re-laid out for a repeated measurement.
#[derive(Clone)]
pub struct LayoutState {
    layout: Signal<Layout>,
}

impl LayoutState {
    pub fn new(initial: InitialLayout) -> Self {
        Self { layout: signal(Layout::from(initial)) }
    }

    /// Current layout.
    pub fn get(&self) -> Layout {
        self.layout.get()
    }

    /// The backing signal, for reactive readers.
    pub fn signal(&self) -> Signal<Layout> {
        self.layout.clone()
    }

    /// Record a container measurement.
    ///
    /// Returns true if the stored layout changed.
    pub fn handle_layout(&self, width: u16, height: u16) -> bool {
        let current = self.layout.get();
        if current.width == width && current.height == height {
            return false;
        }
        debug!("tab view layout {}x{} -> {}x{}", current.width, current.height, width, height);
        self.layout.set(Layout { width, height });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::effect;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_starts_from_initial_layout() {
        let state = LayoutState::new(InitialLayout { width: Some(80), height: None });
        assert_eq!(state.get(), Layout::new(80, 0));
    }

    #[test]
    fn test_same_measurement_does_not_write() {
        let state = LayoutState::new(InitialLayout::default());
        let writes = Rc::new(Cell::new(0));
        let writes_in = writes.clone();
        let layout = state.signal();
        let _stop = effect(move || {
            layout.get();
            writes_in.set(writes_in.get() + 1);
        });
        assert_eq!(writes.get(), 1);

        assert!(state.handle_layout(320, 40));
        assert_eq!(writes.get(), 2);

        assert!(!state.handle_layout(320, 40));
        assert_eq!(writes.get(), 2);
    }

    #[test]
    fn test_new_measurement_replaces_pair() {
        let state = LayoutState::new(InitialLayout { width: Some(10), height: Some(5) });

        assert!(state.handle_layout(10, 7));
        assert_eq!(state.get(), Layout::new(10, 7));

        assert!(state.handle_layout(0, 0));
        assert_eq!(state.get(), Layout::default());
    }
}
