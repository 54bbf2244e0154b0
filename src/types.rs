//! Core types for spark-tab-view.
//!
//! These types flow through the engine and the layout bridge. Enums that are
//! stored in FlexNode slots are `#[repr(u8)]` with a lossy `From<u8>` so the
//! slots can stay plain integers.

use bitflags::bitflags;

// =============================================================================
// Dimension - Supports absolute and percentage values
// =============================================================================

/// A dimension value that can be absolute (cells) or percentage.
///
/// - `Auto`: Auto-size based on content
/// - `Cells(n)`: Absolute value in terminal cells
/// - `Percent(n)`: Percentage of parent (0-100)
///
/// # Examples
///
/// ```
/// use spark_tab_view::types::Dimension;
///
/// let width = Dimension::Cells(50);       // 50 characters
/// let height = Dimension::Percent(100.0); // Full parent height
/// let auto = Dimension::Auto;             // Content-determined
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Auto-size based on content.
    #[default]
    Auto,
    /// Absolute size in terminal cells.
    Cells(u16),
    /// Percentage of parent size (0-100).
    Percent(f32),
}

impl Dimension {
    /// True for anything other than `Auto`.
    pub const fn is_explicit(&self) -> bool {
        !matches!(self, Self::Auto)
    }
}

impl From<u16> for Dimension {
    fn from(value: u16) -> Self {
        if value == 0 {
            Self::Auto
        } else {
            Self::Cells(value)
        }
    }
}

// =============================================================================
// Component Types
// =============================================================================

/// What kind of component lives at an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ComponentType {
    #[default]
    None = 0,
    Box = 1,
    Text = 2,
}

// =============================================================================
// Flex Enums - For layout
// =============================================================================

/// Flex direction for container layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FlexDirection {
    #[default]
    Column = 0,
    Row = 1,
    ColumnReverse = 2,
    RowReverse = 3,
}

impl FlexDirection {
    /// Check if this is a row direction (Row or RowReverse).
    pub const fn is_row(&self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }
}

impl From<u8> for FlexDirection {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Row,
            2 => Self::ColumnReverse,
            3 => Self::RowReverse,
            _ => Self::Column,
        }
    }
}

/// Overflow behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Overflow {
    #[default]
    Visible = 0,
    Hidden = 1,
    Scroll = 2,
}

impl From<u8> for Overflow {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Hidden,
            2 => Self::Scroll,
            _ => Self::Visible,
        }
    }
}

/// Position type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Position {
    #[default]
    Relative = 0,
    Absolute = 1,
}

impl From<u8> for Position {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Absolute,
            _ => Self::Relative,
        }
    }
}

// =============================================================================
// Accessibility
// =============================================================================

bitflags! {
    /// Accessibility hints passed through to the host.
    ///
    /// An empty set means the component participates in the accessibility
    /// tree normally.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct AccessFlags: u8 {
        /// The component's own elements are hidden from assistive tech.
        const ELEMENTS_HIDDEN = 1 << 0;
        /// The component and all of its descendants are excluded.
        const HIDE_DESCENDANTS = 1 << 1;
    }
}

impl AccessFlags {
    /// Flags for a page that is not currently focused.
    pub const HIDDEN: Self = Self::ELEMENTS_HIDDEN.union(Self::HIDE_DESCENDANTS);

    /// True when assistive tech should skip this component.
    pub const fn is_hidden(&self) -> bool {
        self.intersects(Self::HIDDEN)
    }
}

// =============================================================================
// Tests
// =============================================================================
