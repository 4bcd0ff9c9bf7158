use procedural_scroller::{
    Block, Error, IndexBounds, Integer, NonNegativeReal, RangeScaledSizes, Scroll,
    compute_window,
};

fn main() {
    let sizes = RangeScaledSizes::from_scales(3.0, 1.0, 1.0).expect("valid scales");
    let container = NonNegativeReal::new(600.0).expect("finite");
    let item_size = |i: Integer| 80.0 + (i.get().rem_euclid(3) as f64) * 20.0;

    // Anchored near the lower bound: the window is rebuilt from index 0.
    let bounds =
        IndexBounds::new(Some(Integer::ZERO), Some(Integer::new(1_000))).expect("min <= max");
    let window = compute_window(
        container,
        &sizes,
        Scroll::new(Block::Center, Integer::new(3)),
        &item_size,
        bounds,
    )
    .expect("plenty of room");
    println!("near min: {}..={}", window.first(), window.last());

    // Bounds that cannot hold a full window.
    let tight =
        IndexBounds::new(Some(Integer::ZERO), Some(Integer::new(10))).expect("min <= max");
    let anchor = Scroll::center(Integer::new(5));
    match compute_window(container, &sizes, anchor, &item_size, tight) {
        Ok(window) => println!("unexpected window {:?}", window.indexes()),
        Err(err @ Error::BoundsTooNarrow { .. }) => println!("rejected: {err}"),
        Err(err) => println!("other error: {err}"),
    }
}
