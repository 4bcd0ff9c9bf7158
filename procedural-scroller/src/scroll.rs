use crate::{Block, NonNegativeReal, Real, ValidationError};

/// Measured placement of a mounted item along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemGeometry {
    /// Distance from the start of the scrollable content to the item's border box.
    pub offset: Real,
    /// Border-box size (padding and border included, margin excluded).
    pub size: NonNegativeReal,
    /// Margin-box size, used to check the declared minimum size.
    pub outer_size: NonNegativeReal,
}

impl ItemGeometry {
    /// Refines raw host measurements.
    pub fn new(offset: f64, size: f64, outer_size: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            offset: Real::new(offset)?,
            size: NonNegativeReal::new(size)?,
            outer_size: NonNegativeReal::new(outer_size)?,
        })
    }
}

/// The native scroll offset that aligns `item` with the viewport according to `block`.
///
/// `viewport` is the container's client size along the scroll axis (padding included).
pub fn scroll_length(block: Block, item: ItemGeometry, viewport: NonNegativeReal) -> f64 {
    let offset = item.offset.get();
    let slack = viewport.get() - item.size.get();
    match block {
        Block::Start => offset,
        Block::End => offset - slack,
        Block::Center => offset - slack / 2.0,
    }
}
