//! Terminal state signals.
//!
//! The terminal size signals are the roots of the layout pipeline: every
//! layout pass reads them, so a resize re-lays out the whole tree.

use std::cell::RefCell;

use log::{debug, warn};
use spark_signals::{signal, Signal};

thread_local! {
    static TERMINAL_WIDTH: RefCell<Signal<u16>> = RefCell::new(signal(80));
    static TERMINAL_HEIGHT: RefCell<Signal<u16>> = RefCell::new(signal(24));
}

/// Get the current terminal width.
pub fn terminal_width() -> u16 {
    TERMINAL_WIDTH.with(|w| w.borrow().get())
}

/// Get the current terminal height.
pub fn terminal_height() -> u16 {
    TERMINAL_HEIGHT.with(|h| h.borrow().get())
}

/// Set the terminal size (called on resize events).
pub fn set_terminal_size(width: u16, height: u16) {
    TERMINAL_WIDTH.with(|w| w.borrow().set(width));
    TERMINAL_HEIGHT.with(|h| h.borrow().set(height));
}

/// Get the terminal width signal for reactive tracking.
pub fn terminal_width_signal() -> Signal<u16> {
    TERMINAL_WIDTH.with(|w| w.borrow().clone())
}

/// Get the terminal height signal for reactive tracking.
pub fn terminal_height_signal() -> Signal<u16> {
    TERMINAL_HEIGHT.with(|h| h.borrow().clone())
}

/// Read the real terminal size into the signals.
///
/// Keeps the current size if the terminal cannot be queried (not a tty).
pub fn detect_terminal_size() {
    match crossterm::terminal::size() {
        Ok((width, height)) => {
            debug!("terminal size {}x{}", width, height);
            set_terminal_size(width, height);
        }
        Err(err) => warn!("could not query terminal size: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::effect;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_set_terminal_size() {
        set_terminal_size(120, 40);
        assert_eq!(terminal_width(), 120);
        assert_eq!(terminal_height(), 40);
    }

    #[test]
    fn test_size_signal_is_reactive() {
        set_terminal_size(80, 24);

        let seen = Rc::new(Cell::new(0u16));
        let seen_in = seen.clone();
        let width = terminal_width_signal();
        let _stop = effect(move || seen_in.set(width.get()));
        assert_eq!(seen.get(), 80);

        set_terminal_size(100, 24);
        assert_eq!(seen.get(), 100);
    }
}
