//! Primitives - Component building blocks.
//!
//! - [`box_primitive`] - Container with flexbox layout
//! - [`text`] - Single string, sized by display width
//! - [`show`] / [`each`] - Conditional and keyed list rendering
//!
//! # Architecture
//!
//! Components are indices into parallel arrays (ECS pattern). Each component:
//! 1. Allocates an index from the registry
//! 2. Creates a FlexNode with reactive Slot properties
//! 3. Binds props directly to slots (preserving reactivity!)
//! 4. Returns a cleanup function
//!
//! Pass props as signals or getters, not as values read out of them:
//!
//! ```ignore
//! // Stays connected
//! box_primitive(BoxProps { width: Some(PropValue::Signal(width_signal)), ..Default::default() });
//!
//! // Snapshot, never updates
//! box_primitive(BoxProps { width: Some(PropValue::Static(width_signal.get())), ..Default::default() });
//! ```

mod types;
mod box_primitive;
mod text;
mod control_flow;

pub use types::*;
pub use box_primitive::box_primitive;
pub use text::text;
pub use control_flow::{each, show};
