//! State Module - Runtime input state
//!
//! - **Keyboard** - Event types, dispatch, handler registry
//! - **Input** - crossterm event conversion, polling, routing

pub mod keyboard;
pub mod input;

pub use keyboard::{
    dispatch, last_event, last_key, on, on_key, reset_keyboard_state, KeyHandler, KeyState,
    KeyboardEvent, Modifiers,
};
pub use input::{poll_event, route_event, InputEvent};
