//! Engine - Component registry and parallel arrays.
//!
//! The engine manages the core data structures:
//! - Registry: Index allocation, ID mapping, parent context
//! - FlexNode: Persistent layout object with reactive Slot properties
//! - FlexNodeRegistry: FlexNode lifecycle management
//! - Arrays: Parallel columns for component state
//!
//! # Architecture
//!
//! Components are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: Box  (parent=None, tab view root)
//! Index 1: Box  (parent=0,    scene row)
//! Index 2: Box  (parent=1,    page "home", access=auto)
//! Index 3: Box  (parent=1,    page "feed", access=hidden)
//! ```

mod registry;
mod flex_node;
mod flex_node_registry;
pub mod arrays;

pub use registry::*;
pub use flex_node::*;
pub use flex_node_registry::*;
