//! Layout Module
//!
//! Flexbox layout computation for terminal cells using Taffy.
//!
//! # Architecture
//!
//! The layout module uses [Taffy](https://github.com/DioxusLabs/taffy) for
//! flexbox computation. The bridge:
//!
//! 1. Converts FlexNode properties → Taffy styles
//! 2. Builds the Taffy tree from parent relationships
//! 3. Measures text components by display width
//! 4. Extracts computed layout back to parallel arrays
//!
//! # Reactivity
//!
//! When called from a derived, reading FlexNode.*.get() creates dependencies.
//! The layout derived re-runs when any layout property changes.
//!
//! # Example
//!
//! ```ignore
//! use spark_tab_view::layout::compute_layout;
//! use spark_signals::derived;
//!
//! let layout = derived(|| compute_layout(80, 24, true));
//! ```

mod types;
mod text_measure;
mod taffy_bridge;

pub use types::*;
pub use text_measure::*;
pub use taffy_bridge::compute_layout_taffy as compute_layout;
