//! Mount API - Application lifecycle and the layout effect.
//!
//! Mounting puts the terminal in raw mode and starts one effect that reads
//! the layout derived and delivers changed frames to `on_layout` handlers.
//! Nothing is drawn; hosts that draw read the same layout.
//!
//! # Example
//!
//! ```ignore
//! use spark_tab_view::pipeline::mount;
//!
//! let handle = mount::mount()?;
//!
//! // Option 1: Run blocking event loop
//! mount::run(&handle)?;
//!
//! // Option 2: Tick manually in your own loop
//! while mount::tick(&handle)? {
//!     // Your logic here
//! }
//!
//! handle.unmount();
//! ```

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::terminal;
use log::{debug, warn};
use spark_signals::effect;

use crate::state::{input, keyboard};
use super::layout_derived::{create_layout_derived, dispatch_layout_events};
use super::scheduler::run_deferred;
use super::terminal::detect_terminal_size;

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by mount() that allows unmounting.
///
/// Holds:
/// - The layout effect stop function
/// - The running flag (set to false on Ctrl+C or stop)
/// - The Ctrl+C handler cleanup
pub struct MountHandle {
    stop_effect: Option<Box<dyn FnOnce()>>,
    running: Arc<AtomicBool>,
    quit_key: Option<Box<dyn FnOnce()>>,
    raw_mode: bool,
}

impl MountHandle {
    /// Stop the layout effect and restore the terminal.
    pub fn unmount(mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.teardown();
    }

    /// Check if still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the application (sets running to false).
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn teardown(&mut self) {
        if let Some(cleanup) = self.quit_key.take() {
            cleanup();
        }
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
        if self.raw_mode {
            self.raw_mode = false;
            if let Err(err) = terminal::disable_raw_mode() {
                warn!("could not leave raw mode: {}", err);
            }
        }
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount the application.
///
/// This sets up:
/// 1. Terminal size detection
/// 2. Raw mode, so keys arrive unbuffered
/// 3. The layout effect (layout -> on_layout handlers)
/// 4. Ctrl+C to stop the loop
pub fn mount() -> io::Result<MountHandle> {
    detect_terminal_size();

    terminal::enable_raw_mode()?;

    let running = Arc::new(AtomicBool::new(true));
    let running_for_effect = running.clone();

    let layout_derived = create_layout_derived();
    let stop_fn = effect(move || {
        if !running_for_effect.load(Ordering::SeqCst) {
            return;
        }
        let layout = layout_derived.get();
        dispatch_layout_events(&layout);
    });

    let running_for_key = running.clone();
    let quit_key = keyboard::on(move |event| {
        if event.modifiers.ctrl && event.key == "c" {
            debug!("Ctrl+C, stopping");
            running_for_key.store(false, Ordering::SeqCst);
            return true;
        }
        false
    });

    Ok(MountHandle {
        stop_effect: Some(Box::new(stop_fn)),
        running,
        quit_key: Some(Box::new(quit_key)),
        raw_mode: true,
    })
}

/// Unmount and clean up.
pub fn unmount(handle: MountHandle) {
    handle.unmount();
}

// =============================================================================
// Event Loop
// =============================================================================

/// Run the event loop once.
///
/// Waits up to ~16ms for one input event, routes it, then runs the tasks
/// that were deferred before this tick.
///
/// * `Ok(true)` - Continue running
/// * `Ok(false)` - Stop requested (Ctrl+C pressed or `handle.stop()` called)
/// * `Err(e)` - I/O error while polling
pub fn tick(handle: &MountHandle) -> io::Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    if let Some(event) = input::poll_event(Duration::from_millis(16))? {
        input::route_event(event);
    }

    run_deferred();

    Ok(handle.is_running())
}

/// Run the event loop (blocking until stopped).
pub fn run(handle: &MountHandle) -> io::Result<()> {
    while tick(handle)? {}
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
