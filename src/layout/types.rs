//! Layout Types
//!
//! Output types for the layout computation.

/// Computed layout result.
///
/// Contains parallel arrays indexed by component index.
/// Positions are relative to the parent and may be negative (a paged row
/// pulled left to show a later page).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedLayout {
    /// X position (column) of each component, relative to its parent.
    pub x: Vec<i32>,

    /// Y position (row) of each component, relative to its parent.
    pub y: Vec<i32>,

    /// Width of each component.
    pub width: Vec<u16>,

    /// Height of each component.
    pub height: Vec<u16>,

    /// Width of the first root.
    pub content_width: u16,

    /// Height of the first root.
    pub content_height: u16,
}

impl ComputedLayout {
    /// Create a new empty computed layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layout with room for `size` components.
    pub fn with_capacity(size: usize) -> Self {
        Self {
            x: vec![0; size],
            y: vec![0; size],
            width: vec![0; size],
            height: vec![0; size],
            content_width: 0,
            content_height: 0,
        }
    }

    /// Get the position and size of a component.
    ///
    /// Returns (x, y, width, height) or zeros if index is out of bounds.
    pub fn get(&self, index: usize) -> (i32, i32, u16, u16) {
        (
            self.x.get(index).copied().unwrap_or(0),
            self.y.get(index).copied().unwrap_or(0),
            self.width.get(index).copied().unwrap_or(0),
            self.height.get(index).copied().unwrap_or(0),
        )
    }

    /// Number of component slots in this layout.
    pub fn len(&self) -> usize {
        self.width.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_empty()
    }
}
