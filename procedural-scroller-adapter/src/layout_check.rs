use procedural_scroller::{Error, Integer, ItemGeometry};

/// Consecutive window updates with `scroll_size == client_size` tolerated before the container is
/// declared unbounded.
pub const UNBOUNDED_CONTAINER_CHECKS: usize = 2;

/// Fails if a rendered item is smaller than its declared minimum size.
///
/// The margin box is compared, so margins count toward the minimum.
pub fn check_item_size(index: Integer, geometry: ItemGeometry, minimum: f64) -> Result<(), Error> {
    let measured = geometry.outer_size.get();
    if minimum > measured {
        return Err(Error::ItemTooSmall {
            index,
            measured,
            minimum,
        });
    }
    Ok(())
}

/// Detects a container that grows with its content instead of scrolling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnboundedContainerCheck {
    consecutive: usize,
}

impl UnboundedContainerCheck {
    /// Records one window update. A scrollable observation resets the count.
    pub fn observe(&mut self, scroll_size: f64, client_size: f64) -> Result<(), Error> {
        if scroll_size == client_size {
            self.consecutive += 1;
        } else {
            self.consecutive = 0;
        }
        if self.consecutive >= UNBOUNDED_CONTAINER_CHECKS {
            return Err(Error::UnboundedContainer {
                observations: self.consecutive,
            });
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.consecutive = 0;
    }
}
