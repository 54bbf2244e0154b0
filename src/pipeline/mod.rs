//! Reactive Pipeline
//!
//! Connects the component tree to the terminal.
//!
//! ```text
//! Component Tree → FlexNode Slots → layoutDerived → layout effect → on_layout handlers
//! ```
//!
//! 1. **layoutDerived** - Reads FlexNode slots, calls Taffy, returns ComputedLayout
//! 2. **layout effect** - Delivers changed frames to `on_layout` handlers
//! 3. **scheduler** - Runs deferred work once per event loop tick
//!
//! The derived is pure; the handlers are the only side effects.

pub mod terminal;
pub mod layout_derived;
pub mod scheduler;
pub mod mount;

pub use terminal::{
    detect_terminal_size, set_terminal_size, terminal_height, terminal_width,
};
pub use layout_derived::{create_layout_derived, dispatch_layout_events, flush_layout};
pub use scheduler::{defer, pending_count, reset_scheduler, run_deferred, DeferredTask};
pub use mount::{mount, run, tick, unmount, MountHandle};
