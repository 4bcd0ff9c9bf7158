use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::{Direction, Error, Integer, NonNegativeReal};

/// Grows a consecutive index run from `start_index` until it covers
/// `target_scaled_size * container_size`.
///
/// The seed index is always included and does not count toward the target: the run starts as
/// `[start_index]` and each newly added neighbour contributes `item_min_size(neighbour)`. A target
/// of zero therefore yields a one-element run. The result is ascending regardless of direction.
///
/// The caller must supply sizes whose sum diverges in `direction`. With every size `<= 0` this
/// never returns.
pub fn accumulate(
    target_scaled_size: NonNegativeReal,
    start_index: Integer,
    direction: Direction,
    container_size: NonNegativeReal,
    item_min_size: &dyn Fn(Integer) -> f64,
) -> Result<Vec<Integer>, Error> {
    let target = (target_scaled_size * container_size)?;
    let step = direction.step();

    let mut run = VecDeque::from([start_index]);
    let mut edge = start_index;
    let mut total = NonNegativeReal::ZERO;
    while total < target {
        edge = edge.checked_step(step)?;
        match direction {
            Direction::Forward => run.push_back(edge),
            Direction::Backward => run.push_front(edge),
        }
        total = total.checked_add(NonNegativeReal::new(item_min_size(edge))?)?;
    }

    vtrace!(
        start = start_index.get(),
        step,
        target = target.get(),
        len = run.len(),
        "accumulate"
    );
    Ok(run.into())
}
