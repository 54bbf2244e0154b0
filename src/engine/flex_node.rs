//! FlexNode - Persistent flexbox layout object with reactive Slot properties.
//!
//! Each component gets one FlexNode that lives for the component's entire lifetime.
//! Properties are Slots that bind to user props (signals/getters/static values).
//! The layout bridge reads `.get()` on properties, so a slot bound to a getter
//! re-evaluates whenever the signals behind it change.
//!
//! Only the properties a paged container needs are modelled: direction,
//! grow/shrink, size, padding, overflow, and positioning insets.

use spark_signals::{slot, Slot};
use crate::types::Dimension;

/// FlexNode - Persistent layout object with reactive Slot properties.
///
/// # Example
///
/// ```ignore
/// use spark_tab_view::engine::create_flex_node;
/// use spark_tab_view::types::Dimension;
/// use spark_signals::signal;
///
/// let flex_node = create_flex_node(0);
///
/// // Bind width to a signal
/// let page_width = signal(40u16);
/// flex_node.width.set_signal_readonly(move || Dimension::Cells(page_width.get()));
///
/// // Pull the node left by one page
/// flex_node.left.set_value(-40);
/// ```
pub struct FlexNode {
    /// Component index in parallel arrays.
    pub index: usize,

    // =========================================================================
    // CONTAINER
    // =========================================================================

    /// Flex direction: 0=column, 1=row, 2=column-reverse, 3=row-reverse
    pub flex_direction: Slot<u8>,

    // =========================================================================
    // ITEM
    // =========================================================================

    /// Flex grow factor (default 0).
    pub flex_grow: Slot<f32>,

    /// Flex shrink factor (default 1).
    pub flex_shrink: Slot<f32>,

    // =========================================================================
    // DIMENSIONS
    // =========================================================================

    /// Width: Auto, Cells(n), or Percent(n).
    pub width: Slot<Dimension>,

    /// Height: Auto, Cells(n), or Percent(n).
    pub height: Slot<Dimension>,

    // =========================================================================
    // SPACING
    // =========================================================================

    pub padding_top: Slot<u16>,
    pub padding_right: Slot<u16>,
    pub padding_bottom: Slot<u16>,
    pub padding_left: Slot<u16>,

    // =========================================================================
    // POSITIONING
    // =========================================================================

    /// Overflow: 0=visible, 1=hidden, 2=scroll.
    pub overflow: Slot<u8>,

    /// Position: 0=relative, 1=absolute.
    pub position: Slot<u8>,

    /// Left inset in cells. Offsets relative nodes, places absolute ones.
    pub left: Slot<i32>,

    /// Top inset in cells.
    pub top: Slot<i32>,

    /// Right inset (absolute nodes only). `None` = auto.
    pub right: Slot<Option<i32>>,

    /// Bottom inset (absolute nodes only). `None` = auto.
    pub bottom: Slot<Option<i32>>,
}

impl FlexNode {
    /// Create a new FlexNode with default values.
    pub fn new(index: usize) -> Self {
        Self {
            index,

            flex_direction: slot(Some(0)), // column

            flex_grow: slot(Some(0.0)),
            flex_shrink: slot(Some(1.0)), // Default shrink!

            width: slot(Some(Dimension::Auto)),
            height: slot(Some(Dimension::Auto)),

            padding_top: slot(Some(0)),
            padding_right: slot(Some(0)),
            padding_bottom: slot(Some(0)),
            padding_left: slot(Some(0)),

            overflow: slot(Some(0)), // visible
            position: slot(Some(0)), // relative
            left: slot(Some(0)),
            top: slot(Some(0)),
            right: slot(Some(None)),
            bottom: slot(Some(None)),
        }
    }

    /// Disconnect all slot sources for cleanup.
    ///
    /// Called when component is destroyed via `release_index()`.
    /// This breaks reactive connections and resets to default values.
    pub fn disconnect(&self) {
        self.flex_direction.set_value(0);

        self.flex_grow.set_value(0.0);
        self.flex_shrink.set_value(1.0);

        self.width.set_value(Dimension::Auto);
        self.height.set_value(Dimension::Auto);

        self.padding_top.set_value(0);
        self.padding_right.set_value(0);
        self.padding_bottom.set_value(0);
        self.padding_left.set_value(0);

        self.overflow.set_value(0);
        self.position.set_value(0);
        self.left.set_value(0);
        self.top.set_value(0);
        self.right.set_value(None);
        self.bottom.set_value(None);
    }
}
