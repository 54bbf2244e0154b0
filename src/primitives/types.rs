//! Primitive types - Props and cleanup.
//!
//! Props accept static values, signals, or getters, so a container can be
//! sized from reactive state without rebuilding it.

use std::rc::Rc;
use spark_signals::Signal;

use crate::engine::arrays::interaction::LayoutHandler;
use crate::types::{AccessFlags, Dimension};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by components.
///
/// Call this to unmount the component and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// When bound to FlexNode slots or arrays the reactive connection is kept.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Wrap a closure as a reactive getter.
    pub fn getter(f: impl Fn() -> T + 'static) -> Self {
        PropValue::Getter(Rc::new(f))
    }

    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl From<&str> for PropValue<String> {
    fn from(value: &str) -> Self {
        PropValue::Static(value.to_string())
    }
}

impl From<u16> for PropValue<Dimension> {
    fn from(value: u16) -> Self {
        PropValue::Static(Dimension::from(value))
    }
}

// =============================================================================
// Box Props
// =============================================================================

/// Properties for the Box component.
///
/// # Example
///
/// ```ignore
/// box_primitive(BoxProps {
///     flex_direction: Some(PropValue::Static(FlexDirection::Row as u8)),
///     grow: Some(PropValue::Static(1.0)),
///     overflow: Some(PropValue::Static(Overflow::Hidden as u8)),
///     children: Some(Box::new(|| { /* pages */ })),
///     ..Default::default()
/// });
/// ```
#[derive(Default)]
pub struct BoxProps {
    /// Component ID. Generated when absent.
    pub id: Option<String>,

    /// Hidden boxes (and their subtree) are skipped by layout.
    pub visible: Option<PropValue<bool>>,

    // =========================================================================
    // Flex
    // =========================================================================

    /// 0=column, 1=row, 2=column-reverse, 3=row-reverse
    pub flex_direction: Option<PropValue<u8>>,

    pub grow: Option<PropValue<f32>>,

    pub shrink: Option<PropValue<f32>>,

    // =========================================================================
    // Dimensions
    // =========================================================================

    pub width: Option<PropValue<Dimension>>,

    pub height: Option<PropValue<Dimension>>,

    /// Padding on all sides, in cells.
    pub padding: Option<PropValue<u16>>,

    // =========================================================================
    // Positioning
    // =========================================================================

    /// 0=visible, 1=hidden, 2=scroll
    pub overflow: Option<PropValue<u8>>,

    /// 0=relative, 1=absolute
    pub position: Option<PropValue<u8>>,

    pub left: Option<PropValue<i32>>,

    pub top: Option<PropValue<i32>>,

    pub right: Option<PropValue<Option<i32>>>,

    pub bottom: Option<PropValue<Option<i32>>>,

    // =========================================================================
    // Accessibility
    // =========================================================================

    /// Hides the box (and optionally its descendants) from assistive tech.
    pub access: Option<PropValue<AccessFlags>>,

    // =========================================================================
    // Events
    // =========================================================================

    /// Called with the computed frame whenever it changes.
    pub on_layout: Option<LayoutHandler>,

    /// Builds the box's children with this box as parent context.
    pub children: Option<Box<dyn FnOnce()>>,
}

// =============================================================================
// Text Props
// =============================================================================

/// Properties for the Text component.
#[derive(Default)]
pub struct TextProps {
    pub id: Option<String>,

    /// Text content; sized by display width.
    pub content: PropValue<String>,

    pub visible: Option<PropValue<bool>>,

    pub grow: Option<PropValue<f32>>,
}
