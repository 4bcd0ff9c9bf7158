use procedural_scroller::{ItemGeometry, ScrollAxis, ScrollBehavior};

/// The environment a [`crate::Scroller`] drives: a scroll container plus the item elements
/// rendered inside it.
///
/// The scroller never holds the container. It reads measurements and writes scroll offsets through
/// this trait, and receives item elements through [`crate::Scroller::mount`].
///
/// Sizes and offsets are plain floats here; the scroller refines them before use and reports
/// non-finite or negative sizes as validation errors.
pub trait Host {
    /// Handle to a mounted item element.
    type Element;

    /// Content size of the container along `axis` (padding, border and margin excluded).
    fn container_size(&self, axis: ScrollAxis) -> f64;

    /// Client size of the container along `axis` (padding included).
    fn client_size(&self, axis: ScrollAxis) -> f64;

    /// Total scrollable length of the container along `axis`.
    fn scroll_size(&self, axis: ScrollAxis) -> f64;

    fn scroll_offset(&self, axis: ScrollAxis) -> f64;

    fn set_scroll_offset(&mut self, axis: ScrollAxis, offset: f64, behavior: ScrollBehavior);

    /// Placement of a mounted element, or `None` if it has not been laid out.
    fn measure_item(&self, element: &Self::Element, axis: ScrollAxis) -> Option<ItemGeometry>;
}
