use alloc::vec::Vec;

use crate::accumulate::accumulate;
use crate::bounds::Violation;
use crate::{
    Block, Direction, Error, IndexBounds, Integer, Items, NonNegativeReal, RangeScaledSizes,
    Scroll, Zone, ZoneMap,
};

/// Computes the window of indexes to render around `scroll`.
///
/// Zones are grown outward from the anchor: content first, then start-content and start-padding
/// backward from the content's first index, then end-content and end-padding forward from its
/// last. If the result crosses one index bound the window is rebuilt from that bound instead,
/// walking the zones away from it. Crossing both bounds, or a rebuilt window that still crosses
/// one, means the bounds cannot hold a window and yields [`Error::BoundsTooNarrow`].
///
/// This is a pure function: identical inputs always produce structurally equal windows.
pub fn compute_window(
    container_size: NonNegativeReal,
    sizes: &RangeScaledSizes,
    scroll: Scroll,
    item_min_size: &dyn Fn(Integer) -> f64,
    bounds: IndexBounds,
) -> Result<Items, Error> {
    let grow = |zone: Zone, from: Integer, direction: Direction| {
        accumulate(sizes[zone], from, direction, container_size, item_min_size)
    };

    let content = match scroll.block {
        Block::Start => grow(Zone::Content, scroll.index, Direction::Forward)?,
        Block::End => grow(Zone::Content, scroll.index, Direction::Backward)?,
        Block::Center => {
            let half = sizes.content.half();
            let before = accumulate(
                half,
                scroll.index.checked_step(-1)?,
                Direction::Backward,
                container_size,
                item_min_size,
            )?;
            let after = accumulate(
                half,
                scroll.index.checked_step(1)?,
                Direction::Forward,
                container_size,
                item_min_size,
            )?;
            let mut run = Vec::with_capacity(before.len() + after.len() + 1);
            run.extend(before);
            run.push(scroll.index);
            run.extend(after);
            run
        }
    };

    let start_content = grow(
        Zone::StartContent,
        content[0].checked_step(-1)?,
        Direction::Backward,
    )?;
    let start_padding = grow(
        Zone::StartPadding,
        start_content[0].checked_step(-1)?,
        Direction::Backward,
    )?;
    let end_content = grow(
        Zone::EndContent,
        content[content.len() - 1].checked_step(1)?,
        Direction::Forward,
    )?;
    let end_padding = grow(
        Zone::EndPadding,
        end_content[end_content.len() - 1].checked_step(1)?,
        Direction::Forward,
    )?;

    let first = start_padding[0];
    let last = end_padding[end_padding.len() - 1];
    let limited = match bounds.violations(first, last) {
        Violation::None => None,
        Violation::Both => return Err(bounds.too_narrow()),
        Violation::BelowMin => bounds.min().map(|min| (min, Direction::Forward)),
        Violation::AboveMax => bounds.max().map(|max| (max, Direction::Backward)),
    };

    let items = if let Some((limit, direction)) = limited {
        vdebug!(
            limit = limit.get(),
            ?direction,
            first = first.get(),
            last = last.get(),
            "compute_window: rebuilding from index bound"
        );
        let items = window_from_limit(container_size, sizes, limit, direction, item_min_size)?;
        if bounds.violations(items.first(), items.last()) != Violation::None {
            return Err(bounds.too_narrow());
        }
        items
    } else {
        Items::from_zones(ZoneMap {
            start_padding,
            start_content,
            content,
            end_content,
            end_padding,
        })?
    };

    vtrace!(
        container_size = container_size.get(),
        ?scroll,
        first = items.first().get(),
        last = items.last().get(),
        len = items.len(),
        "compute_window"
    );
    Ok(items)
}

/// Builds a window pinned to an index bound, walking zones away from `limit`.
///
/// For a minimum bound the walk runs start-padding → end-padding; for a maximum bound it runs
/// end-padding → start-padding, so the zones still land in window order.
fn window_from_limit(
    container_size: NonNegativeReal,
    sizes: &RangeScaledSizes,
    limit: Integer,
    direction: Direction,
    item_min_size: &dyn Fn(Integer) -> f64,
) -> Result<Items, Error> {
    let mut zones = ZoneMap::<Vec<Integer>>::default();
    let mut walk = Zone::ALL;
    if direction == Direction::Backward {
        walk.reverse();
    }

    let mut seed = limit;
    for zone in walk {
        let run = accumulate(sizes[zone], seed, direction, container_size, item_min_size)?;
        let edge = match direction {
            Direction::Forward => run[run.len() - 1],
            Direction::Backward => run[0],
        };
        seed = edge.checked_step(direction.step())?;
        zones[zone] = run;
    }

    Ok(Items::from_zones(zones)?)
}
